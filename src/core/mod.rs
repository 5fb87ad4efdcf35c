pub mod services;
pub mod store;
pub mod time;
