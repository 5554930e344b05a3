/// Tokenizing of route templates
///
/// Pure functional parsing of a route key such as `/a/:animal(/*rest)` into typed tokens.
/// All functions are **pure**: same input → same output, no side effects.

use crate::error::RouterError;

/// Represents the pieces a route template is made of
///
/// # Examples
///
/// ```
/// use naglfar_router::route::pattern::{tokenize, PatternToken};
///
/// let tokens = tokenize("/a/:animal").unwrap();
/// assert_eq!(
///     tokens,
///     vec![
///         PatternToken::Literal("/a/".to_string()),
///         PatternToken::Param("animal".to_string()),
///     ]
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PatternToken {
    /// Text matched verbatim
    Literal(String),
    /// `:name`, matches one path segment
    Param(String),
    /// `*name`, matches the rest of the path including slashes
    Splat(String),
    /// `(` opening an optional group
    OptionalStart,
    /// `)` closing an optional group
    OptionalEnd,
}

/// Characters allowed in a parameter name
fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Splits a route template into tokens
///
/// # Errors
///
/// Returns [`RouterError::InvalidPattern`] for an empty template, a `:` or `*`
/// without a name, unbalanced parentheses, or a parameter name used twice.
pub fn tokenize(template: &str) -> Result<Vec<PatternToken>, RouterError> {
    if template.is_empty() {
        return Err(RouterError::invalid(template, "route template is empty"));
    }

    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut names: Vec<String> = Vec::new();
    let mut depth = 0usize;
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            ':' | '*' => {
                let mut name = String::new();
                while let Some(&next) = chars.peek() {
                    if !is_name_char(next) {
                        break;
                    }
                    name.push(next);
                    chars.next();
                }

                if name.is_empty() {
                    return Err(RouterError::invalid(
                        template,
                        format!("`{c}` must be followed by a parameter name"),
                    ));
                }
                if names.contains(&name) {
                    return Err(RouterError::invalid(
                        template,
                        format!("parameter `{name}` is declared more than once"),
                    ));
                }

                flush_literal(&mut literal, &mut tokens);
                names.push(name.clone());
                tokens.push(if c == ':' {
                    PatternToken::Param(name)
                } else {
                    PatternToken::Splat(name)
                });
            }
            '(' => {
                flush_literal(&mut literal, &mut tokens);
                depth += 1;
                tokens.push(PatternToken::OptionalStart);
            }
            ')' => {
                if depth == 0 {
                    return Err(RouterError::invalid(template, "unexpected `)`"));
                }
                flush_literal(&mut literal, &mut tokens);
                depth -= 1;
                tokens.push(PatternToken::OptionalEnd);
            }
            other => literal.push(other),
        }
    }

    if depth != 0 {
        return Err(RouterError::invalid(template, "unclosed `(`"));
    }

    flush_literal(&mut literal, &mut tokens);
    Ok(tokens)
}

fn flush_literal(literal: &mut String, tokens: &mut Vec<PatternToken>) {
    if !literal.is_empty() {
        tokens.push(PatternToken::Literal(std::mem::take(literal)));
    }
}
