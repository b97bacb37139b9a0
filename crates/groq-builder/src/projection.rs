//! Projection trees.
//!
//! A [`Projection`] names an output field, optionally aliased and optionally
//! expanded into nested sub-fields. Children are owned, so a projection tree
//! can never contain a cycle; its depth is bounded by [`MAX_PROJECTION_DEPTH`].

use serde::{Deserialize, Serialize};

/// Deepest projection nesting the generator will render.
pub const MAX_PROJECTION_DEPTH: usize = 32;

/// A requested output field.
///
/// # Example
///
/// ```
/// use groq_builder::Projection;
///
/// let author = Projection::new("author")
///     .alias("writer")
///     .nest([Projection::new("name"), Projection::new("slug")]);
/// assert_eq!(author.depth(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Projection {
    /// Field path to project.
    pub name: String,
    /// Output key, if it differs from the field name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Sub-fields, rendered as `{ ... }` after the field name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<Projection>,
}

impl Projection {
    /// Creates a bare projection for a field.
    pub fn new(name: impl Into<String>) -> Self {
        Projection {
            name: name.into(),
            alias: None,
            nested: Vec::new(),
        }
    }

    /// Sets the output alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Appends nested sub-projections.
    pub fn nest<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = Projection>,
    {
        self.nested.extend(children);
        self
    }

    /// Returns the number of levels in this tree (a leaf has depth 1).
    pub fn depth(&self) -> usize {
        1 + self.nested.iter().map(Projection::depth).max().unwrap_or(0)
    }
}

impl From<&str> for Projection {
    fn from(name: &str) -> Self {
        Projection::new(name)
    }
}

impl From<String> for Projection {
    fn from(name: String) -> Self {
        Projection::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_depth() {
        assert_eq!(Projection::new("title").depth(), 1);
    }

    #[test]
    fn depth_follows_deepest_branch() {
        let tree = Projection::new("a").nest([
            Projection::new("b"),
            Projection::new("c").nest([Projection::new("d").nest([Projection::new("e")])]),
        ]);
        assert_eq!(tree.depth(), 4);
    }

    #[test]
    fn builder_methods() {
        let p = Projection::new("title").alias("heading");
        assert_eq!(p.alias.as_deref(), Some("heading"));
        assert!(p.nested.is_empty());

        let p: Projection = "slug".into();
        assert_eq!(p, Projection::new("slug"));
    }

    #[test]
    fn serde_skips_empty_parts() {
        let json = serde_json::to_string(&Projection::new("title")).unwrap();
        assert_eq!(json, r#"{"name":"title"}"#);

        let parsed: Projection =
            serde_json::from_str(r#"{"name":"author","nested":[{"name":"name"}]}"#).unwrap();
        assert_eq!(parsed, Projection::new("author").nest([Projection::new("name")]));
    }
}
