//! Ordering types for the `order(...)` clause.
//!
//! Provides [`Dir`] for sort direction and [`SortField`] for field-based ordering.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GroqError;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// Returns the GROQ keyword for this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Dir {
    type Err = GroqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Dir::Asc),
            "desc" => Ok(Dir::Desc),
            other => Err(GroqError::UnknownDirection(other.to_string())),
        }
    }
}

/// A single sort key: a field and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    #[serde(default)]
    pub dir: Dir,
}

impl SortField {
    /// Creates a new ascending sort key.
    pub fn asc(field: impl Into<String>) -> Self {
        SortField {
            field: field.into(),
            dir: Dir::Asc,
        }
    }

    /// Creates a new descending sort key.
    pub fn desc(field: impl Into<String>) -> Self {
        SortField {
            field: field.into(),
            dir: Dir::Desc,
        }
    }

    /// Creates a new sort key with the given direction.
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        SortField {
            field: field.into(),
            dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dir_checks() {
        assert!(Dir::Asc.is_asc());
        assert!(!Dir::Asc.is_desc());
        assert!(Dir::Desc.is_desc());
        assert_eq!(Dir::default(), Dir::Asc);
    }

    #[test]
    fn dir_display() {
        assert_eq!(Dir::Asc.to_string(), "asc");
        assert_eq!(Dir::Desc.to_string(), "desc");
    }

    #[test]
    fn dir_parse() {
        assert_eq!("desc".parse::<Dir>().unwrap(), Dir::Desc);
        assert_eq!(
            "DESC".parse::<Dir>().unwrap_err(),
            GroqError::UnknownDirection("DESC".to_string())
        );
    }

    #[test]
    fn sort_field_constructors() {
        let asc = SortField::asc("name");
        assert_eq!(asc.field, "name");
        assert_eq!(asc.dir, Dir::Asc);

        let desc = SortField::desc("priority");
        assert_eq!(desc.field, "priority");
        assert_eq!(desc.dir, Dir::Desc);

        assert_eq!(SortField::new("x", Dir::Desc), SortField::desc("x"));
    }

    #[test]
    fn sort_field_direction_defaults_to_asc() {
        let sort: SortField = serde_json::from_str(r#"{"field": "date"}"#).unwrap();
        assert_eq!(sort, SortField::asc("date"));
    }
}
