//! groq-builder - Fluent query builder that compiles to GROQ.
//!
//! groq-builder accumulates a structured description of a query and renders
//! it into a single, well-formed GROQ query string. It supports:
//!
//! - Collection selection via `_type`
//! - Filters with twelve operators, combined with AND, plus OR/AND groups
//! - Multi-field ordering with ascending/descending
//! - Pagination with limit/offset or an explicit slice
//! - Projections with aliases and arbitrarily nested sub-fields
//! - Escaping of every field name and string value
//!
//! Executing the query is left to the caller.
//!
//! # Quick Start
//!
//! ```rust
//! use groq_builder::QueryBuilder;
//!
//! let query = QueryBuilder::new()
//!     .from("post")
//!     .where_eq("status", "published")
//!     .order_desc("date")
//!     .limit(10)
//!     .select(["title", "date"])
//!     .to_groq()
//!     .unwrap();
//!
//! assert_eq!(
//!     query,
//!     r#"*[_type == "post" && status == "published"] | order(date desc) [0...10] | title, date"#
//! );
//! ```
//!
//! # Rendering
//!
//! | Operator | Output |
//! |----------|--------|
//! | `Eq`, `Neq` | `field == value`, `field != value` |
//! | `Gt`, `Gte`, `Lt`, `Lte` | `field > value`, ... |
//! | `In`, `Nin` | `field in [..]`, `!(field in [..])` |
//! | `Match` | `field match value` |
//! | `Contains` | `field match "*value*"` |
//! | `Exists`, `NotExists` | `defined(field)`, `!defined(field)` |
//!
//! Rendering never produces a partial string: states that cannot be rendered
//! (a `contains` on a number, an `in` without an array, a projection tree
//! nested too deeply) return a [`GroqError`].

mod builder;
mod error;
mod escape;
mod filter;
mod op;
mod ordering;
mod projection;
mod render;
mod state;
mod value;

// Re-export public API
pub use builder::{BuildOptions, QueryBuilder};
pub use error::{GroqError, Result};
pub use escape::{
    escape_field_path, escape_string_literal, is_identifier, sanitize_value,
    unescape_string_literal,
};
pub use filter::{Filter, FilterCondition, FilterGroup, GroupBuilder, Logic};
pub use op::Op;
pub use ordering::{Dir, SortField};
pub use projection::{Projection, MAX_PROJECTION_DEPTH};
pub use render::{format_value, render, render_condition, render_filter};
pub use state::QueryState;
pub use value::{Number, Value};
