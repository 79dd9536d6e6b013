//! Shorthand markup for card text.
//!
//! A token is written `_name_`, or `_name:arg1:arg2_` with parameters.
//! Each registered token is replaced with its text. `{}` placeholders in
//! the replacement take the parameters in order, except that a
//! one-character replacement given one parameter is prefixed by it, so
//! `_coin:3_` becomes `3¢` with the replacement `¢`. A doubled `__` is a
//! literal underscore.
//!
//! Replacements are themselves expanded, to a bounded depth.

use rustc_hash::FxHashMap;

use crate::error::MarkupError;

const LEAD_IN: char = '_';
const LEAD_OUT: char = '_';
const SEPARATOR: char = ':';
const PLACEHOLDER: &str = "{}";

/// A table of shorthand tokens.
///
/// ## Example
///
/// ```
/// use deckprint::content::Markup;
///
/// let markup = Markup::new()
///     .with_token("coin", "¢")
///     .with_token("gain", "Gain {} and {}.");
///
/// assert_eq!(markup.expand("Pay _coin:2_.").unwrap(), "Pay 2¢.");
/// assert!(markup.expand("_gain:1_").is_err());
/// assert_eq!(markup.expand("_gain:1:a card_").unwrap(), "Gain 1 and a card.");
/// ```
#[derive(Clone, Debug)]
pub struct Markup {
    tokens: FxHashMap<String, String>,
    max_depth: usize,
}

impl Default for Markup {
    fn default() -> Self {
        Self {
            tokens: FxHashMap::default(),
            max_depth: 8,
        }
    }
}

impl Markup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a token (builder pattern).
    #[must_use]
    pub fn with_token(mut self, name: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.insert(name, replacement);
        self
    }

    /// Limit nested expansion (builder pattern).
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Register a token, replacing any previous one of the same name.
    pub fn insert(&mut self, name: impl Into<String>, replacement: impl Into<String>) {
        self.tokens.insert(name.into(), replacement.into());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Rewrite all tokens in `text`.
    pub fn expand(&self, text: &str) -> Result<String, MarkupError> {
        self.expand_at(text, 0)
    }

    fn expand_at(&self, text: &str, depth: usize) -> Result<String, MarkupError> {
        if depth > self.max_depth {
            return Err(MarkupError::TooDeep(self.max_depth));
        }

        let mut output = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(start) = rest.find(LEAD_IN) {
            output.push_str(&rest[..start]);
            let after = &rest[start + LEAD_IN.len_utf8()..];
            let end = after
                .find(LEAD_OUT)
                .ok_or_else(|| MarkupError::Unterminated(text.to_string()))?;
            let body = &after[..end];
            rest = &after[end + LEAD_OUT.len_utf8()..];

            if body.is_empty() {
                output.push(LEAD_IN);
                continue;
            }

            let mut parts = body.split(SEPARATOR);
            let name = parts.next().unwrap_or_default();
            let parameters: Vec<&str> = parts.collect();
            let template = self
                .tokens
                .get(name)
                .ok_or_else(|| MarkupError::UnknownToken(name.to_string()))?;

            let replacement = fill(name, template, &parameters)?;
            output.push_str(&self.expand_at(&replacement, depth + 1)?);
        }
        output.push_str(rest);
        Ok(output)
    }
}

fn fill(name: &str, template: &str, parameters: &[&str]) -> Result<String, MarkupError> {
    if template.chars().count() == 1 && parameters.len() == 1 {
        return Ok(format!("{}{}", parameters[0], template));
    }

    let slots = template.matches(PLACEHOLDER).count();
    if slots != parameters.len() {
        return Err(MarkupError::Parameters {
            token: name.to_string(),
            expected: slots,
            found: parameters.len(),
        });
    }

    let mut filled = String::with_capacity(template.len());
    let mut pieces = template.split(PLACEHOLDER);
    filled.push_str(pieces.next().unwrap_or_default());
    for (piece, parameter) in pieces.zip(parameters) {
        filled.push_str(parameter);
        filled.push_str(piece);
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markup() -> Markup {
        Markup::new()
            .with_token("b", "x")
            .with_token("coin", "¢")
            .with_token("draw", "Draw {} cards.")
            .with_token("loop", "_loop_")
            .with_token("nested", "_b_ and _b_")
    }

    #[test]
    fn test_plain_token() {
        assert_eq!(markup().expand("a_b_d").unwrap(), "axd");
    }

    #[test]
    fn test_empty_parameter_block() {
        assert_eq!(markup().expand("a_b:_d").unwrap(), "axd");
    }

    #[test]
    fn test_prefix_symbol() {
        assert_eq!(markup().expand("_coin_").unwrap(), "¢");
        assert_eq!(markup().expand("_coin:3_").unwrap(), "3¢");
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(markup().expand("_draw:2_").unwrap(), "Draw 2 cards.");
        assert_eq!(
            markup().expand("_draw_"),
            Err(MarkupError::Parameters {
                token: "draw".into(),
                expected: 1,
                found: 0
            })
        );
    }

    #[test]
    fn test_escaped_underscore() {
        assert_eq!(markup().expand("snake__case").unwrap(), "snake_case");
    }

    #[test]
    fn test_unknown_and_unterminated() {
        assert_eq!(
            markup().expand("_bc_"),
            Err(MarkupError::UnknownToken("bc".into()))
        );
        assert!(matches!(
            markup().expand("a_b"),
            Err(MarkupError::Unterminated(_))
        ));
    }

    #[test]
    fn test_nested_expansion() {
        assert_eq!(markup().expand("_nested_").unwrap(), "x and x");
    }

    #[test]
    fn test_depth_bound() {
        assert_eq!(markup().expand("_loop_"), Err(MarkupError::TooDeep(8)));
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(markup().expand("no tokens here").unwrap(), "no tokens here");
    }
}
