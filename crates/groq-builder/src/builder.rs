//! Fluent query builder.
//!
//! The [`QueryBuilder`] accumulates a [`QueryState`] through chained calls.
//! Every method only appends to the state or sets one of its scalars; all
//! rendering logic lives in [`crate::render`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::filter::{Filter, FilterCondition, GroupBuilder, Logic};
use crate::op::Op;
use crate::ordering::{Dir, SortField};
use crate::projection::Projection;
use crate::render::render;
use crate::state::QueryState;
use crate::value::Value;

/// Options controlling [`QueryBuilder::build`].
///
/// Deserializable so it can live in an application's configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Run [`QueryState::validate`] before returning the state.
    pub validate: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions { validate: true }
    }
}

/// A fluent builder for GROQ queries.
///
/// Top-level filters are combined with AND. Use [`any_of`](Self::any_of) for
/// OR groups and [`all_of`](Self::all_of) for parenthesized AND groups.
///
/// The builder is a plain value: [`Clone`] yields an independent copy, so a
/// base query can be branched into variants without either affecting the other.
///
/// # Example
///
/// ```
/// use groq_builder::QueryBuilder;
///
/// let query = QueryBuilder::new()
///     .from("post")
///     .where_eq("status", "published")
///     .any_of(|g| g.where_contains("title", "rust").where_contains("title", "groq"))
///     .order_desc("publishedAt")
///     .limit(10)
///     .select(["title", "slug"])
///     .to_groq()
///     .unwrap();
///
/// assert_eq!(
///     query,
///     r#"*[_type == "post" && status == "published" && (title match "*rust*" || title match "*groq*")] | order(publishedAt desc) [0...10] | title, slug"#
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    state: QueryState,
    options: BuildOptions,
}

impl QueryBuilder {
    /// Creates a new builder with default options.
    ///
    /// An empty builder renders as `*[]`.
    pub fn new() -> Self {
        QueryBuilder::default()
    }

    /// Creates a new builder with the given options.
    pub fn with_options(options: BuildOptions) -> Self {
        QueryBuilder {
            state: QueryState::default(),
            options,
        }
    }

    /// Sets the target collection (`_type`).
    pub fn from(mut self, collection: impl Into<String>) -> Self {
        self.state.collection = Some(collection.into());
        self
    }

    // ========================================================================
    // Generic filter builder
    // ========================================================================

    /// Adds a filter condition.
    ///
    /// Top-level conditions are combined with AND, in insertion order.
    pub fn filter(mut self, field: &str, op: Op, value: impl Into<Value>) -> Self {
        self.state
            .filters
            .push(FilterCondition::new(field, op, value).into());
        self
    }

    /// Adds a prebuilt filter entry.
    pub fn filter_entry(mut self, filter: impl Into<Filter>) -> Self {
        self.state.filters.push(filter.into());
        self
    }

    // ========================================================================
    // Filter shorthand methods
    // ========================================================================

    /// Adds an equality filter.
    pub fn where_eq(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter(field, Op::Eq, value)
    }

    /// Adds a not-equal filter.
    pub fn where_ne(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter(field, Op::Neq, value)
    }

    /// Adds a greater-than filter.
    pub fn where_gt(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter(field, Op::Gt, value)
    }

    /// Adds a greater-than-or-equal filter.
    pub fn where_gte(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter(field, Op::Gte, value)
    }

    /// Adds a less-than filter.
    pub fn where_lt(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter(field, Op::Lt, value)
    }

    /// Adds a less-than-or-equal filter.
    pub fn where_lte(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter(field, Op::Lte, value)
    }

    /// Adds a membership filter: `field in [..]`.
    pub fn where_in<I, V>(self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let items: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.filter(field, Op::In, Value::Array(items))
    }

    /// Adds a negated membership filter: `!(field in [..])`.
    pub fn where_not_in<I, V>(self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let items: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.filter(field, Op::Nin, Value::Array(items))
    }

    /// Adds a full-text match filter.
    pub fn where_match(self, field: &str, pattern: impl Into<Value>) -> Self {
        self.filter(field, Op::Match, pattern)
    }

    /// Adds a substring filter (`field match "*value*"`).
    pub fn where_contains(self, field: &str, value: &str) -> Self {
        self.filter(field, Op::Contains, value)
    }

    /// Adds a filter requiring the field to be defined.
    pub fn where_exists(self, field: &str) -> Self {
        self.filter(field, Op::Exists, true)
    }

    /// Adds a filter requiring the field to be undefined.
    pub fn where_not_exists(self, field: &str) -> Self {
        self.filter(field, Op::NotExists, true)
    }

    // ========================================================================
    // Groups
    // ========================================================================

    /// Adds an OR group; at least one of its members must match.
    ///
    /// ```
    /// use groq_builder::QueryBuilder;
    ///
    /// let query = QueryBuilder::new()
    ///     .any_of(|g| g.where_eq("a", 1).where_eq("b", 2))
    ///     .to_groq()
    ///     .unwrap();
    /// assert_eq!(query, "*[(a == 1 || b == 2)]");
    /// ```
    pub fn any_of(self, build: impl FnOnce(GroupBuilder) -> GroupBuilder) -> Self {
        self.group(Logic::Any, build)
    }

    /// Adds a parenthesized AND group.
    pub fn all_of(self, build: impl FnOnce(GroupBuilder) -> GroupBuilder) -> Self {
        self.group(Logic::All, build)
    }

    fn group(mut self, logic: Logic, build: impl FnOnce(GroupBuilder) -> GroupBuilder) -> Self {
        let group = build(GroupBuilder::new()).finish(logic);
        self.state.filters.push(group.into());
        self
    }

    // ========================================================================
    // Ordering
    // ========================================================================

    /// Adds a sort key.
    pub fn order_by(mut self, field: &str, dir: Dir) -> Self {
        self.state.sorts.push(SortField::new(field, dir));
        self
    }

    /// Adds an ascending sort key.
    pub fn order_asc(self, field: &str) -> Self {
        self.order_by(field, Dir::Asc)
    }

    /// Adds a descending sort key.
    pub fn order_desc(self, field: &str) -> Self {
        self.order_by(field, Dir::Desc)
    }

    // ========================================================================
    // Pagination
    // ========================================================================

    /// Sets the maximum number of results.
    pub fn limit(mut self, n: usize) -> Self {
        self.state.limit = Some(n);
        self
    }

    /// Sets the number of results to skip.
    pub fn offset(mut self, n: usize) -> Self {
        self.state.offset = Some(n);
        self
    }

    /// Sets an explicit `[start...end]` range. Overrides limit and offset.
    pub fn slice(mut self, start: i64, end: i64) -> Self {
        self.state.slice = Some((start, end));
        self
    }

    // ========================================================================
    // Projections
    // ========================================================================

    /// Adds bare projections for each field.
    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state
            .projections
            .extend(fields.into_iter().map(Projection::new));
        self
    }

    /// Adds an aliased projection: `"alias": field`.
    pub fn select_as(mut self, field: &str, alias: &str) -> Self {
        self.state
            .projections
            .push(Projection::new(field).alias(alias));
        self
    }

    /// Adds a prebuilt projection, possibly with nested fields.
    pub fn select_projection(mut self, projection: Projection) -> Self {
        self.state.projections.push(projection);
        self
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Finalizes the query and returns its state.
    ///
    /// When [`BuildOptions::validate`] is set the state is checked with
    /// [`QueryState::validate`] first.
    pub fn build(self) -> Result<QueryState> {
        if self.options.validate {
            self.state.validate()?;
        }
        debug!(
            validated = self.options.validate,
            filters = self.state.filters.len(),
            "built query state"
        );
        Ok(self.state)
    }

    /// Validates (if enabled) and renders the query without consuming the builder.
    pub fn to_groq(&self) -> Result<String> {
        if self.options.validate {
            self.state.validate()?;
        }
        render(&self.state)
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the state accumulated so far.
    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// Returns the build options.
    pub fn options(&self) -> BuildOptions {
        self.options
    }

    /// Returns `true` if nothing has been added to the query.
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }
}
