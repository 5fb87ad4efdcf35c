//! The in-memory snapshot of the three entity collections, plus demo seed data.

#[allow(clippy::module_inception)]
pub mod ledger;
pub mod sample;

pub use ledger::Ledger;
