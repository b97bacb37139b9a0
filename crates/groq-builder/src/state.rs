//! The query state passed from the builder to the generator.

use serde::{Deserialize, Serialize};

use crate::error::{GroqError, Result};
use crate::filter::{Filter, FilterCondition};
use crate::op::Op;
use crate::ordering::SortField;
use crate::projection::{Projection, MAX_PROJECTION_DEPTH};
use crate::render;
use crate::value::Value;

/// Accumulated description of one query.
///
/// The builder appends to the sequences and sets the optional scalars; the
/// generator only reads. Every sequence is owned, so a clone shares nothing
/// with its source.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryState {
    /// Target `_type`, if any.
    pub collection: Option<String>,
    /// Conjunctive filter list, in rendering order.
    pub filters: Vec<Filter>,
    /// Sort keys, in precedence order.
    pub sorts: Vec<SortField>,
    /// Output fields, in output order.
    pub projections: Vec<Projection>,
    /// Maximum number of results.
    pub limit: Option<usize>,
    /// Number of results to skip.
    pub offset: Option<usize>,
    /// Explicit `[start...end]` range; wins over limit/offset.
    pub slice: Option<(i64, i64)>,
}

impl QueryState {
    /// Creates an empty state (renders as `*[]`).
    pub fn new() -> Self {
        QueryState::default()
    }

    /// Renders this state as a GROQ query string.
    pub fn to_groq(&self) -> Result<String> {
        render::render(self)
    }

    /// Returns `true` if at least one filter has been added.
    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty()
    }

    /// Returns `true` if nothing has been set; such a state renders as `*[]`.
    pub fn is_empty(&self) -> bool {
        self.collection.is_none()
            && self.filters.is_empty()
            && self.sorts.is_empty()
            && self.projections.is_empty()
            && self.limit.is_none()
            && self.offset.is_none()
            && self.slice.is_none()
    }

    /// Checks the state against the builder's validation rules.
    ///
    /// - the collection name, when set, is not empty
    /// - every filter, sort and projection names a non-empty field
    /// - `in` / `nin` values are arrays
    /// - `contains` values are strings
    /// - `match` values are strings or arrays of strings
    /// - a slice whose bounds share a sign does not start after it ends
    /// - projection trees are at most [`MAX_PROJECTION_DEPTH`] deep
    pub fn validate(&self) -> Result<()> {
        if matches!(self.collection.as_deref(), Some("")) {
            return Err(GroqError::EmptyCollection);
        }

        let mut first_error = None;
        for filter in &self.filters {
            filter.for_each_condition(&mut |condition| {
                if first_error.is_none() {
                    first_error = validate_condition(condition).err();
                }
            });
        }
        if let Some(err) = first_error {
            return Err(err);
        }

        if self.sorts.iter().any(|s| s.field.is_empty()) {
            return Err(GroqError::EmptyField { context: "sort" });
        }

        for projection in &self.projections {
            validate_projection(projection, 1)?;
        }

        if let Some((start, end)) = self.slice {
            // Negative indices count from the end, so only same-sign bounds are comparable.
            if (start < 0) == (end < 0) && start > end {
                return Err(GroqError::InvalidSlice { start, end });
            }
        }

        Ok(())
    }
}

fn validate_condition(condition: &FilterCondition) -> Result<()> {
    if condition.field.is_empty() {
        return Err(GroqError::EmptyField { context: "filter" });
    }
    match condition.op {
        op if op.requires_array() && !condition.value.is_array() => Err(GroqError::ArrayRequired {
            field: condition.field.clone(),
            op: condition.op.as_str(),
            actual: condition.value.type_name(),
        }),
        Op::Contains if !condition.value.is_string() => Err(GroqError::ContainsRequiresString {
            field: condition.field.clone(),
            actual: condition.value.type_name(),
        }),
        Op::Match if !is_match_pattern(&condition.value) => Err(GroqError::MatchRequiresText {
            field: condition.field.clone(),
        }),
        _ => Ok(()),
    }
}

fn is_match_pattern(value: &Value) -> bool {
    match value {
        Value::String(_) => true,
        Value::Array(items) => items.iter().all(Value::is_string),
        _ => false,
    }
}

fn validate_projection(projection: &Projection, depth: usize) -> Result<()> {
    if projection.name.is_empty() {
        return Err(GroqError::EmptyField {
            context: "projection",
        });
    }
    if depth > MAX_PROJECTION_DEPTH {
        return Err(GroqError::ProjectionTooDeep {
            name: projection.name.clone(),
            max: MAX_PROJECTION_DEPTH,
        });
    }
    for child in &projection.nested {
        validate_projection(child, depth + 1)?;
    }
    Ok(())
}
