//! Shared traits and enums for budgeting primitives.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exposes a stable identifier for entities stored in the ledger.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Associates entities with the category they are booked against.
pub trait BelongsToCategory {
    fn category_id(&self) -> Uuid;
}

/// Supplies a common contract for retrieving numeric amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Sum of [`Amounted::amount`] over `items`.
pub fn total_amount<'a, T, I>(items: I) -> f64
where
    T: Amounted + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items.into_iter().map(Amounted::amount).sum()
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Direction of a money movement. Categories carry one too.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Income,
    Expense,
}

impl EntryType {
    /// Parses `income` / `expense`, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Some(EntryType::Income),
            "expense" => Some(EntryType::Expense),
            _ => None,
        }
    }

    /// Sign applied to amounts of this type when netting balances.
    pub fn sign(self) -> f64 {
        match self {
            EntryType::Income => 1.0,
            EntryType::Expense => -1.0,
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntryType::Income => "Income",
            EntryType::Expense => "Expense",
        };
        f.write_str(label)
    }
}

/// Color assigned to new categories and goals when none is given.
pub const DEFAULT_COLOR: &str = "#3B82F6";

/// Base chart colors: blue, green, amber, red, purple, pink, cyan, orange.
const CHART_PALETTE: [&str; 8] = [
    "#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6", "#EC4899", "#06B6D4", "#F97316",
];

/// Returns `count` chart colors, cycling through the base palette.
pub fn palette_colors(count: usize) -> Vec<String> {
    CHART_PALETTE
        .iter()
        .cycle()
        .take(count)
        .map(|color| (*color).to_string())
        .collect()
}
