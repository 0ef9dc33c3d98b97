//! Path pattern matching.
//!
//! # Responsibilities
//! - Parse patterns such as `/damage-reports/subscriptions/{id}/total-cost`
//! - Match literal segments exactly (case-sensitive)
//! - Accept only unsigned integers for `{param}` segments
//! - Substitute captured parameters into a backend path template
//!
//! # Design Decisions
//! - Segment-by-segment comparison, no regex
//! - Trailing slashes are significant (`/cars/` does not match `/cars`)
//! - Parameters are positional: the n-th capture fills the n-th placeholder

use std::fmt;

/// One `/`-separated piece of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
}

/// Integer parameters captured from a matched path, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(Vec<(String, u64)>);

impl PathParams {
    pub fn get(&self, name: &str) -> Option<u64> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.iter().map(|(_, v)| *v)
    }
}

/// A compiled path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Compile a pattern. `{name}` segments become integer parameters.
    pub fn parse(pattern: &str) -> Self {
        let segments = split_path(pattern)
            .unwrap_or_default()
            .into_iter()
            .map(|segment| {
                match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                    Some(name) if !name.is_empty() => Segment::Param(name.to_string()),
                    _ => Segment::Literal(segment.to_string()),
                }
            })
            .collect();
        Self {
            raw: pattern.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of the parameters, in order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Match a request path, returning the captured parameters.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let parts = split_path(path)?;
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = Vec::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) => {
                    if literal != part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    params.push((name.clone(), parse_id(part)?));
                }
            }
        }
        Some(PathParams(params))
    }

    /// Fill the placeholders positionally with `params`.
    ///
    /// Returns `None` when the counts differ.
    pub fn render(&self, params: &PathParams) -> Option<String> {
        if self.param_names().count() != params.len() {
            return None;
        }
        let mut values = params.values();
        let mut rendered = String::new();
        for segment in &self.segments {
            rendered.push('/');
            match segment {
                Segment::Literal(literal) => rendered.push_str(literal),
                Segment::Param(_) => rendered.push_str(&values.next()?.to_string()),
            }
        }
        if rendered.is_empty() {
            rendered.push('/');
        }
        Some(rendered)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Split an absolute path into segments; `/` has none.
fn split_path(path: &str) -> Option<Vec<&str>> {
    let rest = path.strip_prefix('/')?;
    if rest.is_empty() {
        return Some(Vec::new());
    }
    Some(rest.split('/').collect())
}

/// Digits only: no sign, no whitespace, must fit in a `u64`.
fn parse_id(segment: &str) -> Option<u64> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_pattern() {
        let pattern = PathPattern::parse("/damage-types");
        assert!(pattern.matches("/damage-types").is_some());
        assert!(pattern.matches("/damage-types/").is_none());
        assert!(pattern.matches("/Damage-Types").is_none());
        assert!(pattern.matches("damage-types").is_none());
    }

    #[test]
    fn test_root_pattern() {
        let pattern = PathPattern::parse("/");
        assert!(pattern.segments().is_empty());
        assert!(pattern.matches("/").is_some());
        assert!(pattern.matches("/cars").is_none());
        assert_eq!(pattern.render(&PathParams::default()).as_deref(), Some("/"));
    }

    #[test]
    fn test_integer_parameter() {
        let pattern = PathPattern::parse("/damage-reports/subscriptions/{id}/total-cost");
        let params = pattern
            .matches("/damage-reports/subscriptions/42/total-cost")
            .unwrap();
        assert_eq!(params.get("id"), Some(42));

        assert!(pattern.matches("/damage-reports/subscriptions/abc/total-cost").is_none());
        assert!(pattern.matches("/damage-reports/subscriptions/-1/total-cost").is_none());
        assert!(pattern.matches("/damage-reports/subscriptions/+1/total-cost").is_none());
        assert!(pattern.matches("/damage-reports/subscriptions//total-cost").is_none());
        assert!(pattern
            .matches("/damage-reports/subscriptions/99999999999999999999999/total-cost")
            .is_none());
    }

    #[test]
    fn test_render_substitutes_positionally() {
        let inbound = PathPattern::parse("/damage-reports/cars/{id}");
        let backend = PathPattern::parse("/damage-reports/cars/{car_id}");
        let params = inbound.matches("/damage-reports/cars/7").unwrap();
        assert_eq!(backend.render(&params).as_deref(), Some("/damage-reports/cars/7"));

        let literal = PathPattern::parse("/cars");
        assert_eq!(literal.render(&params), None);
    }
}
