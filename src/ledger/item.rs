use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Discriminates the two sequences an item can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    #[serde(rename = "inc")]
    Income,
    #[serde(rename = "exp")]
    Expense,
}

impl ItemKind {
    /// Short tag used in row keys and serialized output.
    pub fn tag(self) -> &'static str {
        match self {
            ItemKind::Income => "inc",
            ItemKind::Expense => "exp",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ItemKind::Income => "Income",
            ItemKind::Expense => "Expense",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown item kind `{}` (expected `inc` or `exp`)", self.0)
    }
}

impl std::error::Error for UnknownKind {}

impl FromStr for ItemKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inc" | "income" | "+" => Ok(ItemKind::Income),
            "exp" | "expense" | "-" => Ok(ItemKind::Expense),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

/// A whole-number percentage, or undefined when there was no income to
/// compare against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub struct Percentage(Option<u32>);

impl Percentage {
    pub const UNDEFINED: Percentage = Percentage(None);

    /// Numeric stand-in for an undefined percentage.
    pub const SENTINEL: i64 = -1;

    /// `round(part / whole * 100)`, undefined unless `whole` is positive and
    /// the ratio is finite.
    pub fn of(part: f64, whole: f64) -> Self {
        if whole <= 0.0 {
            return Self::UNDEFINED;
        }
        let ratio = (part / whole * 100.0).round();
        if ratio.is_finite() {
            Percentage(Some(ratio.max(0.0) as u32))
        } else {
            Self::UNDEFINED
        }
    }

    pub fn value(self) -> Option<u32> {
        self.0
    }

    pub fn is_undefined(self) -> bool {
        self.0.is_none()
    }

    pub fn to_sentinel(self) -> i64 {
        self.0.map(i64::from).unwrap_or(Self::SENTINEL)
    }
}

impl From<u32> for Percentage {
    fn from(value: u32) -> Self {
        Percentage(Some(value))
    }
}

impl From<i64> for Percentage {
    fn from(value: i64) -> Self {
        u32::try_from(value)
            .map(Percentage::from)
            .unwrap_or(Percentage::UNDEFINED)
    }
}

impl From<Percentage> for i64 {
    fn from(value: Percentage) -> Self {
        value.to_sentinel()
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{value}%"),
            None => f.write_str("---"),
        }
    }
}

/// One recorded income or expense entry.
///
/// Everything except the derived percentage is fixed at creation; items are
/// only constructed by [`Ledger::add_item`](super::Ledger::add_item).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    id: u64,
    kind: ItemKind,
    description: String,
    value: f64,
    percentage: Percentage,
}

impl Item {
    pub(crate) fn new(id: u64, kind: ItemKind, description: String, value: f64) -> Self {
        Self {
            id,
            kind,
            description,
            value,
            percentage: Percentage::UNDEFINED,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Share of total income as of the last percentage recompute. Always
    /// undefined for income items.
    pub fn percentage(&self) -> Percentage {
        self.percentage
    }

    /// Key the presentation layer uses to address this row, e.g. `exp-3`.
    pub fn row_key(&self) -> String {
        format!("{}-{}", self.kind.tag(), self.id)
    }

    pub(crate) fn calc_percentage(&mut self, total_income: f64) {
        self.percentage = match self.kind {
            ItemKind::Expense => Percentage::of(self.value, total_income),
            ItemKind::Income => Percentage::UNDEFINED,
        };
    }
}
