//! GROQ generator.
//!
//! [`render`] turns a [`QueryState`] into a single query string. Output is
//! assembled from up to four space-separated fragments, always in this order:
//!
//! ```text
//! *[_type == "post" && <filters>]  | order(<sorts>)  [<start>...<end>]  | <projections>
//! ```
//!
//! Only the selection fragment is mandatory. Rendering is all-or-nothing: a
//! state that cannot be rendered yields an error and no partial string.

use tracing::{debug, trace};

use crate::error::{GroqError, Result};
use crate::escape::{escape_field_path, escape_string_literal, quote};
use crate::filter::{Filter, FilterCondition, FilterGroup};
use crate::op::Op;
use crate::ordering::SortField;
use crate::projection::{Projection, MAX_PROJECTION_DEPTH};
use crate::state::QueryState;
use crate::value::Value;

/// Renders a query state as a GROQ query string.
///
/// # Example
///
/// ```
/// use groq_builder::{render, QueryState, Projection};
///
/// let state = QueryState {
///     collection: Some("post".to_string()),
///     projections: vec![Projection::new("title")],
///     ..Default::default()
/// };
/// assert_eq!(render(&state).unwrap(), r#"*[_type == "post"] | title"#);
/// ```
pub fn render(state: &QueryState) -> Result<String> {
    let mut parts = vec![render_selection(state)?];

    if !state.sorts.is_empty() {
        parts.push(render_sorts(&state.sorts));
    }

    if let Some(range) = render_pagination(state) {
        parts.push(range);
    }

    if !state.projections.is_empty() {
        parts.push(render_projections(&state.projections)?);
    }

    let query = parts.join(" ");
    debug!(
        filters = state.filters.len(),
        sorts = state.sorts.len(),
        projections = state.projections.len(),
        len = query.len(),
        "rendered GROQ query"
    );
    Ok(query)
}

fn render_selection(state: &QueryState) -> Result<String> {
    let mut selection = match &state.collection {
        Some(collection) => format!("*[_type == {}", quote(collection)),
        None => "*[".to_string(),
    };

    if state.has_filters() {
        let rendered = state
            .filters
            .iter()
            .map(render_filter)
            .collect::<Result<Vec<_>>>()?
            .join(" && ");

        if state.collection.is_some() {
            selection.push_str(" && ");
        }
        selection.push_str(&rendered);
    }

    selection.push(']');
    Ok(selection)
}

/// Renders one top-level filter entry.
pub fn render_filter(filter: &Filter) -> Result<String> {
    match filter {
        Filter::Condition(condition) => render_condition(condition),
        Filter::Group(group) => render_group(group),
    }
}

fn render_group(group: &FilterGroup) -> Result<String> {
    let members = group
        .filters
        .iter()
        .map(render_filter)
        .collect::<Result<Vec<_>>>()?;

    Ok(match members.len() {
        0 => group.logic.empty_literal().to_string(),
        1 => members.into_iter().next().unwrap_or_default(),
        _ => format!("({})", members.join(group.logic.joiner())),
    })
}

/// Renders a single condition according to its operator.
pub fn render_condition(condition: &FilterCondition) -> Result<String> {
    let field = escape_field_path(&condition.field);
    let value = &condition.value;

    let rendered = match condition.op {
        Op::Eq => comparison(&field, "==", value),
        Op::Neq => comparison(&field, "!=", value),
        Op::Gt => comparison(&field, ">", value),
        Op::Gte => comparison(&field, ">=", value),
        Op::Lt => comparison(&field, "<", value),
        Op::Lte => comparison(&field, "<=", value),
        Op::In => format!("{} in {}", field, require_array(condition)?),
        Op::Nin => format!("!({} in {})", field, require_array(condition)?),
        Op::Match => format!("{} match {}", field, format_value(value)),
        Op::Contains => match value {
            Value::String(s) => format!("{} match \"*{}*\"", field, escape_string_literal(s)),
            other => {
                return Err(GroqError::ContainsRequiresString {
                    field: condition.field.clone(),
                    actual: other.type_name(),
                })
            }
        },
        Op::Exists => format!("defined({})", field),
        Op::NotExists => format!("!defined({})", field),
    };

    trace!(op = %condition.op, filter = %rendered, "rendered filter");
    Ok(rendered)
}

fn comparison(field: &str, symbol: &str, value: &Value) -> String {
    format!("{} {} {}", field, symbol, format_value(value))
}

fn require_array(condition: &FilterCondition) -> Result<String> {
    match &condition.value {
        Value::Array(items) => Ok(format_array(items)),
        other => Err(GroqError::ArrayRequired {
            field: condition.field.clone(),
            op: condition.op.as_str(),
            actual: other.type_name(),
        }),
    }
}

/// Formats a value as a GROQ literal.
///
/// Strings are quoted and escaped, arrays are formatted element by element,
/// and numbers and booleans use their default textual form.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        Value::Array(items) => format_array(items),
    }
}

fn format_array(items: &[Value]) -> String {
    let formatted: Vec<String> = items.iter().map(format_value).collect();
    format!("[{}]", formatted.join(", "))
}

fn render_sorts(sorts: &[SortField]) -> String {
    let spec: Vec<String> = sorts
        .iter()
        .map(|sort| format!("{} {}", escape_field_path(&sort.field), sort.dir))
        .collect();
    format!("| order({})", spec.join(", "))
}

fn render_pagination(state: &QueryState) -> Option<String> {
    if let Some((start, end)) = state.slice {
        return Some(format!("[{}...{}]", start, end));
    }

    if state.limit.is_none() && state.offset.is_none() {
        return None;
    }

    let start = state.offset.unwrap_or(0);
    let end = state
        .limit
        .map(|limit| start.saturating_add(limit).to_string())
        .unwrap_or_default();
    Some(format!("[{}...{}]", start, end))
}

fn render_projections(projections: &[Projection]) -> Result<String> {
    let rendered = projections
        .iter()
        .map(|p| render_projection(p, 1))
        .collect::<Result<Vec<_>>>()?;
    Ok(format!("| {}", rendered.join(", ")))
}

fn render_projection(projection: &Projection, depth: usize) -> Result<String> {
    if depth > MAX_PROJECTION_DEPTH {
        return Err(GroqError::ProjectionTooDeep {
            name: projection.name.clone(),
            max: MAX_PROJECTION_DEPTH,
        });
    }

    let mut result = escape_field_path(&projection.name);

    if !projection.nested.is_empty() {
        let nested = projection
            .nested
            .iter()
            .map(|child| render_projection(child, depth + 1))
            .collect::<Result<Vec<_>>>()?;
        result.push_str(&format!("{{ {} }}", nested.join(", ")));
    }

    if let Some(alias) = &projection.alias {
        result = format!("{}: {}", quote(alias), result);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Logic;
    use crate::ordering::Dir;
    use crate::value::Number;

    fn condition(field: &str, op: Op, value: impl Into<Value>) -> String {
        render_condition(&FilterCondition::new(field, op, value)).unwrap()
    }

    // =========================================================================
    // Selection
    // =========================================================================

    #[test]
    fn empty_state() {
        assert_eq!(render(&QueryState::new()).unwrap(), "*[]");
    }

    #[test]
    fn collection_only() {
        let state = QueryState {
            collection: Some("post".to_string()),
            ..Default::default()
        };
        assert_eq!(render(&state).unwrap(), "*[_type == \"post\"]");
    }

    #[test]
    fn collection_name_is_escaped() {
        let state = QueryState {
            collection: Some("we\"ird".to_string()),
            ..Default::default()
        };
        assert_eq!(render(&state).unwrap(), "*[_type == \"we\\\"ird\"]");
    }

    #[test]
    fn filters_without_collection() {
        let state = QueryState {
            filters: vec![
                FilterCondition::new("a", Op::Eq, 1).into(),
                FilterCondition::new("b", Op::Eq, 2).into(),
            ],
            ..Default::default()
        };
        assert_eq!(render(&state).unwrap(), "*[a == 1 && b == 2]");
    }

    #[test]
    fn filters_with_collection() {
        let state = QueryState {
            collection: Some("post".to_string()),
            filters: vec![FilterCondition::new("a", Op::Eq, 1).into()],
            ..Default::default()
        };
        assert_eq!(render(&state).unwrap(), "*[_type == \"post\" && a == 1]");
    }

    // =========================================================================
    // Operators
    // =========================================================================

    #[test]
    fn comparison_operators() {
        assert_eq!(condition("a", Op::Eq, "x"), "a == \"x\"");
        assert_eq!(condition("a", Op::Neq, "x"), "a != \"x\"");
        assert_eq!(condition("n", Op::Gt, 1), "n > 1");
        assert_eq!(condition("n", Op::Gte, 1), "n >= 1");
        assert_eq!(condition("n", Op::Lt, 1.5), "n < 1.5");
        assert_eq!(condition("n", Op::Lte, -2), "n <= -2");
    }

    #[test]
    fn only_eq_renders_equality() {
        for op in Op::ALL.into_iter().filter(|&op| op != Op::Eq) {
            let value = if op.requires_array() {
                Value::from(vec![1])
            } else {
                Value::from("v")
            };
            let rendered = condition("f", op, value);
            assert!(!rendered.contains("=="), "{} rendered as {}", op, rendered);
        }
    }

    #[test]
    fn membership_operators() {
        assert_eq!(condition("tags", Op::In, vec!["a", "b"]), "tags in [\"a\", \"b\"]");
        assert_eq!(condition("n", Op::Nin, vec![1, 2]), "!(n in [1, 2])");
        assert_eq!(condition("n", Op::In, Vec::<Value>::new()), "n in []");
    }

    #[test]
    fn membership_requires_array() {
        let err = render_condition(&FilterCondition::new("tags", Op::In, "a")).unwrap_err();
        assert_eq!(
            err,
            GroqError::ArrayRequired {
                field: "tags".to_string(),
                op: "in",
                actual: "string",
            }
        );
    }

    #[test]
    fn match_operator() {
        assert_eq!(condition("title", Op::Match, "word*"), "title match \"word*\"");
        assert_eq!(
            condition("title", Op::Match, vec!["a", "b"]),
            "title match [\"a\", \"b\"]"
        );
    }

    #[test]
    fn contains_wraps_escaped_substring() {
        assert_eq!(
            condition("title", Op::Contains, "hello \"world\""),
            "title match \"*hello \\\"world\\\"*\""
        );
    }

    #[test]
    fn contains_requires_string() {
        let err = render_condition(&FilterCondition::new("count", Op::Contains, 42)).unwrap_err();
        assert!(matches!(
            err,
            GroqError::ContainsRequiresString { actual: "number", .. }
        ));
    }

    #[test]
    fn presence_operators_ignore_value() {
        assert_eq!(condition("slug", Op::Exists, true), "defined(slug)");
        assert_eq!(condition("slug", Op::NotExists, Value::Null), "!defined(slug)");
    }

    #[test]
    fn field_paths_are_escaped() {
        assert_eq!(
            condition("author.full name", Op::Eq, "x"),
            "author.\"full name\" == \"x\""
        );
        assert_eq!(condition("my-field", Op::Exists, true), "defined(\"my-field\")");
    }

    // =========================================================================
    // Values
    // =========================================================================

    #[test]
    fn value_formatting() {
        assert_eq!(format_value(&Value::Null), "null");
        assert_eq!(format_value(&Value::Bool(false)), "false");
        assert_eq!(format_value(&Value::Number(Number::U64(7))), "7");
        assert_eq!(format_value(&Value::Number(Number::F64(0.25))), "0.25");
        assert_eq!(format_value(&Value::from("a\nb")), "\"a\\nb\"");
        assert_eq!(
            format_value(&Value::from(vec![Value::from(1), Value::Null, Value::from(vec!["x"])])),
            "[1, null, [\"x\"]]"
        );
    }

    // =========================================================================
    // Groups
    // =========================================================================

    #[test]
    fn any_group_renders_parenthesized_or() {
        let group = FilterGroup {
            logic: Logic::Any,
            filters: vec![
                FilterCondition::new("a", Op::Eq, 1).into(),
                FilterCondition::new("b", Op::Eq, 2).into(),
            ],
        };
        assert_eq!(render_filter(&group.into()).unwrap(), "(a == 1 || b == 2)");
    }

    #[test]
    fn single_member_group_is_bare() {
        let group = FilterGroup {
            logic: Logic::Any,
            filters: vec![FilterCondition::new("a", Op::Exists, true).into()],
        };
        assert_eq!(render_filter(&group.into()).unwrap(), "defined(a)");
    }

    #[test]
    fn empty_groups_render_literals() {
        assert_eq!(
            render_filter(&FilterGroup::new(Logic::Any).into()).unwrap(),
            "false"
        );
        assert_eq!(
            render_filter(&FilterGroup::new(Logic::All).into()).unwrap(),
            "true"
        );
    }

    #[test]
    fn nested_groups() {
        let inner = FilterGroup {
            logic: Logic::All,
            filters: vec![
                FilterCondition::new("b", Op::Gt, 1).into(),
                FilterCondition::new("c", Op::Lt, 5).into(),
            ],
        };
        let outer = FilterGroup {
            logic: Logic::Any,
            filters: vec![FilterCondition::new("a", Op::Eq, true).into(), inner.into()],
        };
        assert_eq!(
            render_filter(&outer.into()).unwrap(),
            "(a == true || (b > 1 && c < 5))"
        );
    }

    #[test]
    fn group_errors_propagate() {
        let group = FilterGroup {
            logic: Logic::Any,
            filters: vec![FilterCondition::new("x", Op::Contains, 1).into()],
        };
        assert!(render_filter(&group.into()).is_err());
    }

    // =========================================================================
    // Sorting and pagination
    // =========================================================================

    #[test]
    fn sorts_in_precedence_order() {
        let state = QueryState {
            sorts: vec![SortField::new("date", Dir::Desc), SortField::asc("title")],
            ..Default::default()
        };
        assert_eq!(render(&state).unwrap(), "*[] | order(date desc, title asc)");
    }

    #[test]
    fn limit_only() {
        let state = QueryState {
            limit: Some(10),
            ..Default::default()
        };
        assert_eq!(render(&state).unwrap(), "*[] [0...10]");
    }

    #[test]
    fn offset_only_is_open_ended() {
        let state = QueryState {
            offset: Some(20),
            ..Default::default()
        };
        assert_eq!(render(&state).unwrap(), "*[] [20...]");
    }

    #[test]
    fn offset_and_limit() {
        let state = QueryState {
            offset: Some(20),
            limit: Some(10),
            ..Default::default()
        };
        assert_eq!(render(&state).unwrap(), "*[] [20...30]");
    }

    #[test]
    fn slice_wins_over_limit_offset() {
        let state = QueryState {
            offset: Some(20),
            limit: Some(10),
            slice: Some((3, 7)),
            ..Default::default()
        };
        assert_eq!(render(&state).unwrap(), "*[] [3...7]");
    }

    #[test]
    fn limit_overflow_saturates() {
        let state = QueryState {
            offset: Some(usize::MAX),
            limit: Some(1),
            ..Default::default()
        };
        assert_eq!(
            render(&state).unwrap(),
            format!("*[] [{}...{}]", usize::MAX, usize::MAX)
        );
    }

    // =========================================================================
    // Projections
    // =========================================================================

    #[test]
    fn nested_projection() {
        let state = QueryState {
            projections: vec![Projection::new("author")
                .nest([Projection::new("name"), Projection::new("bio")])],
            ..Default::default()
        };
        assert_eq!(render(&state).unwrap(), "*[] | author{ name, bio }");
    }

    #[test]
    fn alias_wraps_nested_block() {
        let state = QueryState {
            projections: vec![Projection::new("author")
                .alias("writer")
                .nest([Projection::new("name")])],
            ..Default::default()
        };
        assert_eq!(
            render(&state).unwrap(),
            "*[] | \"writer\": author{ name }"
        );
    }

    #[test]
    fn projection_depth_is_bounded() {
        let mut tree = Projection::new("leaf");
        for _ in 0..MAX_PROJECTION_DEPTH {
            tree = Projection::new("node").nest([tree]);
        }
        let state = QueryState {
            projections: vec![tree],
            ..Default::default()
        };
        assert!(matches!(
            render(&state),
            Err(GroqError::ProjectionTooDeep { .. })
        ));
    }

    #[test]
    fn render_error_yields_no_output() {
        let state = QueryState {
            collection: Some("post".to_string()),
            filters: vec![
                FilterCondition::new("a", Op::Eq, 1).into(),
                FilterCondition::new("b", Op::Nin, "oops").into(),
            ],
            ..Default::default()
        };
        assert!(render(&state).is_err());
    }
}
