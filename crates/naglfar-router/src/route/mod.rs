/// Route module: template tokenizing and compiled patterns
///
/// A route key is compiled once, at registration, into a [`RoutePattern`]
/// backed by an anchored regular expression.

use regex::Regex;
use std::collections::HashMap;
use std::fmt;

use crate::error::RouterError;

pub mod pattern;

pub use pattern::{tokenize, PatternToken};

/// Parameters extracted from a matched path
pub type Params = HashMap<String, String>;

const PARAM_EXPR: &str = "([^/?]+)";
const SPLAT_EXPR: &str = "([^?]*?)";
const TRAILING_QUERY_EXPR: &str = "(?:\\?.*)?";

/// A compiled route template
///
/// # Examples
///
/// ```
/// use naglfar_router::route::RoutePattern;
///
/// let pattern = RoutePattern::compile("/a/:animal").unwrap();
/// let params = pattern.matches("/a/lion").unwrap();
/// assert_eq!(params.get("animal"), Some(&"lion".to_string()));
///
/// assert!(pattern.matches("/a").is_none());
/// assert!(pattern.matches("/a/lion/cub").is_none());
/// ```
#[derive(Clone)]
pub struct RoutePattern {
    source: String,
    regex: Regex,
    names: Vec<String>,
}

impl fmt::Debug for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutePattern")
            .field("source", &self.source)
            .field("names", &self.names)
            .finish()
    }
}

impl PartialEq for RoutePattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl RoutePattern {
    /// Compiles a route template
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPattern`] when the template is malformed.
    pub fn compile(template: &str) -> Result<Self, RouterError> {
        let tokens = tokenize(template)?;
        let mut expr = String::from("^");
        let mut names = Vec::new();

        for token in tokens {
            match token {
                PatternToken::Literal(text) => expr.push_str(&regex::escape(&text)),
                PatternToken::Param(name) => {
                    expr.push_str(PARAM_EXPR);
                    names.push(name);
                }
                PatternToken::Splat(name) => {
                    expr.push_str(SPLAT_EXPR);
                    names.push(name);
                }
                PatternToken::OptionalStart => expr.push_str("(?:"),
                PatternToken::OptionalEnd => expr.push_str(")?"),
            }
        }

        expr.push_str(TRAILING_QUERY_EXPR);
        expr.push('$');

        let regex = Regex::new(&expr)
            .map_err(|e| RouterError::invalid(template, e.to_string()))?;

        Ok(Self {
            source: template.to_string(),
            regex,
            names,
        })
    }

    /// The template this pattern was compiled from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Declared parameter names, in template order
    pub fn param_names(&self) -> &[String] {
        &self.names
    }

    /// Matches a path against this pattern
    ///
    /// Captured values are percent-decoded; a value that fails to decode is
    /// returned as written. Parameters inside an optional group that did not
    /// participate in the match are absent from the result.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let captures = self.regex.captures(path)?;

        let params = self
            .names
            .iter()
            .enumerate()
            .filter_map(|(idx, name)| {
                captures.get(idx + 1).map(|value| {
                    let raw = value.as_str();
                    let decoded = urlencoding::decode(raw)
                        .map(|v| v.into_owned())
                        .unwrap_or_else(|_| raw.to_string());
                    (name.clone(), decoded)
                })
            })
            .collect();

        Some(params)
    }
}
