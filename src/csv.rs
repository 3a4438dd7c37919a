use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use crate::engine::Storefront;
use crate::{Action, ProductId};

/// Errors that can occur when reading an action script
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("failed to open action script: {0}")]
    Open(csv::Error),

    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: unrecognized action '{action}'")]
    UnrecognizedAction { line: usize, action: String },

    #[error("line {line}: invalid {field} '{value}'")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: {action} missing {field}")]
    MissingField {
        line: usize,
        action: String,
        field: &'static str,
    },
}

/// Raw row. Fields are kept untrimmed so `value` reaches the engine verbatim.
#[derive(Debug, Deserialize)]
struct InputRow {
    action: String,
    product: Option<String>,
    quantity: Option<String>,
    value: Option<String>,
}

#[derive(Debug, Serialize)]
struct LineRow<'a> {
    id: ProductId,
    name: &'a str,
    price: String,
    quantity: u32,
    total: String,
}

#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    items: u64,
    subtotal: String,
    discount: String,
    total: String,
    coupon: &'a str,
}

/// Read user actions from a csv file with an `action,product,quantity,value` header.
///
/// `action`, `product` and `quantity` are trimmed; `value` (coupon code or
/// category) is passed through untouched.
pub fn read_actions(
    path: impl AsRef<Path>,
) -> Result<impl Iterator<Item = Result<Action, CsvError>>, CsvError> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_path(path)
        .map_err(CsvError::Open)?;

    Ok(reader
        .into_deserialize::<InputRow>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2; // 1-indexed, skip header
            let row = result.map_err(|source| CsvError::Parse { line, source })?;
            parse_row(line, row)
        }))
}

/// Parse an optional numeric field, treating blank as absent.
fn parse_number<T: FromStr>(
    line: usize,
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<T>, CsvError> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            value.parse().map_err(|_| CsvError::InvalidNumber {
                line,
                field,
                value: value.to_string(),
            })
        })
        .transpose()
}

fn parse_row(line: usize, row: InputRow) -> Result<Action, CsvError> {
    let action = row.action.trim();
    let missing = |field: &'static str| CsvError::MissingField {
        line,
        action: action.to_string(),
        field,
    };
    let product = || -> Result<ProductId, CsvError> {
        parse_number::<ProductId>(line, "product", row.product.as_deref())?
            .ok_or_else(|| missing("product"))
    };

    match action {
        "add" => Ok(Action::AddItem {
            product: product()?,
        }),
        "update" => Ok(Action::UpdateQuantity {
            product: product()?,
            quantity: parse_number(line, "quantity", row.quantity.as_deref())?
                .ok_or_else(|| missing("quantity"))?,
        }),
        "remove" => Ok(Action::RemoveItem {
            product: product()?,
        }),
        // an empty code is a valid action, rejected later by the engine
        "apply_coupon" => Ok(Action::ApplyCoupon {
            code: row.value.clone().unwrap_or_default(),
        }),
        "remove_coupon" => Ok(Action::RemoveCoupon),
        "select_category" => Ok(Action::SelectCategory {
            category: row.value.clone().ok_or_else(|| missing("value"))?,
        }),
        other => Err(CsvError::UnrecognizedAction {
            line,
            action: other.to_string(),
        }),
    }
}

/// Write the cart lines, a blank line, then the cart summary, both in csv format
pub fn write_cart(mut out: impl io::Write, store: &Storefront) -> Result<(), csv::Error> {
    {
        // header is written by hand so it is emitted even for an empty cart
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(&mut out);
        writer.write_record(["id", "name", "price", "quantity", "total"])?;
        for line in store.cart().lines() {
            writer.serialize(LineRow {
                id: line.id(),
                name: &line.product.name,
                price: line.product.price.to_string(),
                quantity: line.quantity,
                total: line.line_total().to_string(),
            })?;
        }
        writer.flush()?;
    }

    writeln!(out)?;

    let mut writer = csv::Writer::from_writer(&mut out);
    writer.serialize(SummaryRow {
        items: store.item_count(),
        subtotal: store.subtotal().to_string(),
        discount: store.discount().to_string(),
        total: store.total().to_string(),
        coupon: &store.coupon().code,
    })?;
    writer.flush()?;
    Ok(())
}
