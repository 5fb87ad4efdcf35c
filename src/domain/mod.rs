//! Pure domain models for the budget tracker. No I/O, only data types and
//! the small amount of behavior that belongs to a single record.

pub mod category;
pub mod common;
pub mod goal;
pub mod transaction;

pub use category::Category;
pub use common::{
    palette_colors, total_amount, Amounted, BelongsToCategory, Displayable, EntryType,
    Identifiable, NamedEntity, DEFAULT_COLOR,
};
pub use goal::SavingsGoal;
pub use transaction::Transaction;
