//! Filter predicates.
//!
//! A [`FilterCondition`] is a single predicate: a field name, an operator,
//! and a comparison value. A [`Filter`] is either a condition or a
//! [`FilterGroup`] combining other filters with AND or OR.

use serde::{Deserialize, Serialize};

use crate::op::Op;
use crate::value::Value;

/// A single filter predicate.
///
/// # Example
///
/// ```
/// use groq_builder::{FilterCondition, Op, Value};
///
/// let condition = FilterCondition::new("status", Op::Eq, "published");
/// assert_eq!(condition.value, Value::String("published".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCondition {
    /// The field path to compare.
    pub field: String,
    /// The comparison operator.
    pub op: Op,
    /// The value to compare against. Ignored by `Exists` / `NotExists`.
    #[serde(default)]
    pub value: Value,
}

impl FilterCondition {
    /// Creates a new condition.
    pub fn new(field: impl Into<String>, op: Op, value: impl Into<Value>) -> Self {
        FilterCondition {
            field: field.into(),
            op,
            value: value.into(),
        }
    }
}

/// How the members of a [`FilterGroup`] combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Logic {
    /// Every member must match (`&&`).
    #[default]
    All,
    /// At least one member must match (`||`).
    Any,
}

impl Logic {
    /// Returns the GROQ operator joining the members.
    pub fn joiner(self) -> &'static str {
        match self {
            Logic::All => " && ",
            Logic::Any => " || ",
        }
    }

    /// Literal an empty group renders as.
    pub fn empty_literal(self) -> &'static str {
        match self {
            Logic::All => "true",
            Logic::Any => "false",
        }
    }
}

/// A parenthesized group of filters.
///
/// A group without `logic` deserializes as an AND group.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterGroup {
    /// How the members combine.
    pub logic: Logic,
    /// Group members, in rendering order.
    pub filters: Vec<Filter>,
}

impl FilterGroup {
    /// Creates an empty group with the given logic.
    pub fn new(logic: Logic) -> Self {
        FilterGroup {
            logic,
            filters: Vec::new(),
        }
    }

    /// Returns `true` if the group has no members.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

/// A top-level filter entry: a condition or a nested group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Filter {
    /// A single predicate.
    Condition(FilterCondition),
    /// A group of filters combined with AND or OR.
    Group(FilterGroup),
}

impl Filter {
    /// Returns the condition, if this entry is one.
    pub fn as_condition(&self) -> Option<&FilterCondition> {
        match self {
            Filter::Condition(c) => Some(c),
            Filter::Group(_) => None,
        }
    }

    /// Visits every condition in this filter, depth first.
    pub fn for_each_condition<'a>(&'a self, f: &mut impl FnMut(&'a FilterCondition)) {
        match self {
            Filter::Condition(c) => f(c),
            Filter::Group(group) => {
                for member in &group.filters {
                    member.for_each_condition(f);
                }
            }
        }
    }
}

impl From<FilterCondition> for Filter {
    fn from(condition: FilterCondition) -> Self {
        Filter::Condition(condition)
    }
}

impl From<FilterGroup> for Filter {
    fn from(group: FilterGroup) -> Self {
        Filter::Group(group)
    }
}

/// Collects filters for an [`any_of`](crate::QueryBuilder::any_of) or
/// [`all_of`](crate::QueryBuilder::all_of) group.
///
/// Offers the same shorthand methods as the query builder, plus nesting.
#[derive(Debug, Clone, Default)]
pub struct GroupBuilder {
    filters: Vec<Filter>,
}

impl GroupBuilder {
    /// Creates an empty group builder.
    pub fn new() -> Self {
        GroupBuilder::default()
    }

    /// Adds a condition to the group.
    pub fn filter(mut self, field: &str, op: Op, value: impl Into<Value>) -> Self {
        self.filters
            .push(FilterCondition::new(field, op, value).into());
        self
    }

    /// Adds an equality condition.
    pub fn where_eq(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter(field, Op::Eq, value)
    }

    /// Adds a not-equal condition.
    pub fn where_ne(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter(field, Op::Neq, value)
    }

    /// Adds a greater-than condition.
    pub fn where_gt(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter(field, Op::Gt, value)
    }

    /// Adds a less-than condition.
    pub fn where_lt(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter(field, Op::Lt, value)
    }

    /// Adds a membership condition.
    pub fn where_in<I, V>(self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let items: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.filter(field, Op::In, Value::Array(items))
    }

    /// Adds a substring condition.
    pub fn where_contains(self, field: &str, value: &str) -> Self {
        self.filter(field, Op::Contains, value)
    }

    /// Adds a defined-field condition.
    pub fn where_exists(self, field: &str) -> Self {
        self.filter(field, Op::Exists, true)
    }

    /// Adds an undefined-field condition.
    pub fn where_not_exists(self, field: &str) -> Self {
        self.filter(field, Op::NotExists, true)
    }

    /// Nests an OR group inside this group.
    pub fn any_of(mut self, build: impl FnOnce(GroupBuilder) -> GroupBuilder) -> Self {
        self.filters.push(build(GroupBuilder::new()).finish(Logic::Any).into());
        self
    }

    /// Nests an AND group inside this group.
    pub fn all_of(mut self, build: impl FnOnce(GroupBuilder) -> GroupBuilder) -> Self {
        self.filters.push(build(GroupBuilder::new()).finish(Logic::All).into());
        self
    }

    /// Closes the group with the given logic.
    pub fn finish(self, logic: Logic) -> FilterGroup {
        FilterGroup {
            logic,
            filters: self.filters,
        }
    }
}
