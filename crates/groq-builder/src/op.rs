//! Filter operators.
//!
//! The [`Op`] enum is the closed set of operators a filter condition can use.
//! Each operator maps to a fixed piece of GROQ syntax (see [`crate::render`]).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GroqError;

/// Comparison operator for a filter condition.
///
/// Operators are grouped by the values they accept:
/// - **Scalar comparison**: `Eq`, `Neq`, `Gt`, `Gte`, `Lt`, `Lte`
/// - **Membership**: `In`, `Nin` - value must be an array
/// - **Text**: `Match` (string or array), `Contains` (string only)
/// - **Presence**: `Exists`, `NotExists` - value is ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Op {
    /// Equal: `field == value`.
    Eq,
    /// Not equal: `field != value`.
    Neq,
    /// Greater than: `field > value`.
    Gt,
    /// Greater than or equal: `field >= value`.
    Gte,
    /// Less than: `field < value`.
    Lt,
    /// Less than or equal: `field <= value`.
    Lte,
    /// Membership: `field in [..]`.
    In,
    /// Negated membership: `!(field in [..])`.
    Nin,
    /// Full-text pattern match: `field match value`.
    Match,
    /// Substring match: `field match "*value*"`.
    Contains,
    /// Field is defined: `defined(field)`.
    Exists,
    /// Field is not defined: `!defined(field)`.
    NotExists,
}

impl Op {
    /// All operators, in declaration order.
    pub const ALL: [Op; 12] = [
        Op::Eq,
        Op::Neq,
        Op::Gt,
        Op::Gte,
        Op::Lt,
        Op::Lte,
        Op::In,
        Op::Nin,
        Op::Match,
        Op::Contains,
        Op::Exists,
        Op::NotExists,
    ];

    /// Returns `true` if this operator requires an array value.
    pub fn requires_array(self) -> bool {
        matches!(self, Op::In | Op::Nin)
    }

    /// Returns the canonical name of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "eq",
            Op::Neq => "neq",
            Op::Gt => "gt",
            Op::Gte => "gte",
            Op::Lt => "lt",
            Op::Lte => "lte",
            Op::In => "in",
            Op::Nin => "nin",
            Op::Match => "match",
            Op::Contains => "contains",
            Op::Exists => "exists",
            Op::NotExists => "not_exists",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Op {
    type Err = GroqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Op::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| GroqError::UnknownOperator(s.to_string()))
    }
}
