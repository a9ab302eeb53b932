//! Validation of raw user input before it reaches the ledger.

use crate::errors::{BudgetError, Result};
use crate::ledger::ItemKind;

/// A validated `add` request.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemInput {
    pub kind: ItemKind,
    pub description: String,
    pub value: f64,
}

impl ItemInput {
    pub fn parse(kind: &str, description: &str, value: &str) -> Result<Self> {
        let kind = parse_kind(kind)?;
        let description = parse_description(description)?;
        let value = parse_value(value)?;
        Ok(Self {
            kind,
            description,
            value,
        })
    }
}

pub fn parse_kind(raw: &str) -> Result<ItemKind> {
    raw.parse::<ItemKind>()
        .map_err(|err| BudgetError::InvalidInput(err.to_string()))
}

pub fn parse_description(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BudgetError::InvalidInput(
            "description must not be empty".into(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Accepts a finite number greater than zero.
pub fn parse_value(raw: &str) -> Result<f64> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| BudgetError::InvalidInput(format!("`{}` is not a number", raw.trim())))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(BudgetError::InvalidInput(format!(
            "value must be a positive number, got `{}`",
            raw.trim()
        )));
    }
    Ok(value)
}

/// Parses a row key such as `exp-3` into its kind and id.
pub fn parse_row_key(raw: &str) -> Result<(ItemKind, u64)> {
    let (kind, id) = raw.trim().split_once('-').ok_or_else(|| {
        BudgetError::InvalidInput(format!(
            "`{raw}` is not a row key (expected `inc-<id>` or `exp-<id>`)"
        ))
    })?;
    Ok((parse_kind(kind)?, parse_id(id)?))
}

pub fn parse_id(raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| BudgetError::InvalidInput(format!("`{}` is not a valid item id", raw.trim())))
}
