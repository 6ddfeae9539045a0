//! Declarative option tables.
//!
//! Each operation kind owns one static [`OperationSchema`] listing its options, their value type
//! and bounds. Typed setters and the generic/JSON paths validate against the same table.

use crate::{
    error::{TransformError, TransformResult},
    value::{OptionValue, Resource},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionType {
    Bool,
    Int,
    Range {
        min: i64,
        max: i64,
    },
    Text,
    Enum(&'static [&'static str]),
    Resource,
    List {
        item: &'static OptionType,
        min_len: usize,
        max_len: usize,
    },
}

impl OptionType {
    pub fn describe(&self) -> String {
        match self {
            Self::Bool => "bool".to_owned(),
            Self::Int => "int".to_owned(),
            Self::Range { min, max } => format!("int {min}..={max}"),
            Self::Text => "text".to_owned(),
            Self::Enum(tokens) => format!("one of {}", tokens.join("|")),
            Self::Resource => "url or handle".to_owned(),
            Self::List {
                item,
                min_len,
                max_len,
            } if min_len == max_len => format!("[{}; {min_len}]", item.describe()),
            Self::List {
                item,
                min_len,
                max_len,
            } => format!("[{}; {min_len}..={max_len}]", item.describe()),
        }
    }

    fn expected(&self) -> &'static str {
        match self {
            Self::Bool => "a boolean",
            Self::Int => "an integer",
            Self::Range { .. } => "a bounded integer",
            Self::Text => "a string",
            Self::Enum(_) => "an enumerated token",
            Self::Resource => "a URL or handle",
            Self::List { .. } => "a list",
        }
    }

    /// Check that `value` has the declared shape and satisfies the declared bounds.
    pub fn validate(&self, option: &str, value: &OptionValue) -> TransformResult<()> {
        match (self, value) {
            (Self::Bool, OptionValue::Bool(_))
            | (Self::Int, OptionValue::Int(_))
            | (Self::Text, OptionValue::Text(_))
            | (Self::Resource, OptionValue::Resource(_)) => Ok(()),
            (Self::Range { min, max }, OptionValue::Int(v)) => check_range(option, *v, *min, *max),
            (
                Self::Range { min, max },
                OptionValue::Bounded {
                    value,
                    min: vmin,
                    max: vmax,
                },
            ) => {
                if (vmin, vmax) != (min, max) {
                    return Err(TransformError::invalid_value(
                        option,
                        format!("declared bounds [{min}, {max}] differ from [{vmin}, {vmax}]"),
                    ));
                }
                check_range(option, *value, *min, *max)
            }
            (Self::Enum(tokens), OptionValue::Enum(token)) => {
                if tokens.contains(token) {
                    Ok(())
                } else {
                    Err(TransformError::invalid_value(
                        option,
                        format!("'{token}' is not one of {}", tokens.join("|")),
                    ))
                }
            }
            (
                Self::List {
                    item,
                    min_len,
                    max_len,
                },
                OptionValue::List(items),
            ) => {
                if items.len() < *min_len || items.len() > *max_len {
                    return Err(TransformError::invalid_value(
                        option,
                        format!(
                            "expected {min_len}..={max_len} items, got {}",
                            items.len()
                        ),
                    ));
                }
                items.iter().try_for_each(|v| item.validate(option, v))
            }
            _ => Err(TransformError::type_mismatch(option, self.expected())),
        }
    }

    /// Canonical stored form of an already validated value: plain integers under a `Range`
    /// become `Bounded` carrying the declared bounds, as the typed setters store them.
    pub(crate) fn normalize(&self, value: OptionValue) -> OptionValue {
        match (self, value) {
            (Self::Range { min, max }, OptionValue::Int(v)) => OptionValue::bounded(v, *min, *max),
            (Self::List { item, .. }, OptionValue::List(items)) => {
                OptionValue::List(items.into_iter().map(|v| item.normalize(v)).collect())
            }
            (_, value) => value,
        }
    }

    /// Convert a loosely typed JSON value into the `OptionValue` this type declares.
    pub fn coerce_json(
        &self,
        option: &str,
        json: &serde_json::Value,
    ) -> TransformResult<OptionValue> {
        use serde_json::Value;

        let mismatch = || TransformError::type_mismatch(option, self.expected());
        match self {
            Self::Bool => json.as_bool().map(OptionValue::Bool).ok_or_else(mismatch),
            Self::Int => json.as_i64().map(OptionValue::Int).ok_or_else(mismatch),
            Self::Range { min, max } => json
                .as_i64()
                .map(|v| OptionValue::bounded(v, *min, *max))
                .ok_or_else(mismatch),
            Self::Text => match json {
                Value::String(s) => Ok(OptionValue::Text(s.clone())),
                _ => Err(mismatch()),
            },
            Self::Enum(tokens) => {
                let raw = json.as_str().ok_or_else(mismatch)?;
                tokens
                    .iter()
                    .copied()
                    .find(|t| *t == raw)
                    .map(OptionValue::Enum)
                    .ok_or_else(|| {
                        TransformError::invalid_value(
                            option,
                            format!("'{raw}' is not one of {}", tokens.join("|")),
                        )
                    })
            }
            Self::Resource => {
                let raw = json.as_str().ok_or_else(mismatch)?;
                Resource::parse(raw)
                    .map(OptionValue::Resource)
                    .map_err(|e| TransformError::invalid_value(option, e.to_string()))
            }
            Self::List { item, .. } => {
                let items = match json {
                    Value::Array(items) => items
                        .iter()
                        .map(|v| item.coerce_json(option, v))
                        .collect::<TransformResult<Vec<_>>>()?,
                    // A lone scalar is accepted as a one-item list.
                    scalar => vec![item.coerce_json(option, scalar)?],
                };
                Ok(OptionValue::List(items))
            }
        }
    }
}

fn check_range(option: &str, value: i64, min: i64, max: i64) -> TransformResult<()> {
    if value < min || value > max {
        return Err(TransformError::out_of_range(option, value, min, max));
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: &'static str,
    pub ty: OptionType,
}

#[derive(Debug, PartialEq, Eq)]
pub struct OperationSchema {
    pub kind: &'static str,
    pub options: &'static [OptionSpec],
}

impl OperationSchema {
    pub fn option(&self, name: &str) -> Option<&'static OptionSpec> {
        self.options.iter().find(|o| o.name == name)
    }

    pub fn lookup(&self, name: &str) -> TransformResult<&'static OptionSpec> {
        self.option(name)
            .ok_or_else(|| TransformError::unknown_option(self.kind, name))
    }
}

/// All registered operation kinds, in registration order.
pub fn schemas() -> &'static [&'static OperationSchema] {
    crate::ops::REGISTRY
}

pub fn schema(kind: &str) -> Option<&'static OperationSchema> {
    schemas().iter().copied().find(|s| s.kind == kind)
}
