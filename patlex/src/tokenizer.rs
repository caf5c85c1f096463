use crate::pattern::{Matcher, Pattern};
use regex::Regex;
use tracing::trace;

// used to cut the offending text out of the input when reporting errors
const SPACE_OR_END: &str = r"\s|$";

#[derive(Clone, PartialEq, Debug)]
pub struct Token<T> {
    pub category: String,
    pub lexeme: String,
    pub value: T,
}

#[derive(Clone, PartialEq, Debug, thiserror::Error)]
pub enum LexError {
    #[error("Unknown token '{token}' at position {position}")]
    UnknownToken { token: String, position: usize },
}

/// Splits input into tokens using an ordered list of patterns.
///
/// At every step all patterns are tried at the cursor. The cursor moves by
/// the longest match found, while the token emitted comes from the longest
/// match whose transform produced a value (earliest pattern wins ties).
/// Patterns without value can swallow input (eg: whitespace) this way.
pub struct Tokenizer<T> {
    patterns: Vec<Pattern<T>>,
    separator: Regex,
}

impl<T> Default for Tokenizer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tokenizer<T> {
    pub fn new() -> Self {
        Tokenizer {
            patterns: Vec::new(),
            separator: Regex::new(SPACE_OR_END).expect("BUG: bad default separator"),
        }
    }

    pub fn add_pattern(
        &mut self,
        category: impl Into<String>,
        matcher: Matcher,
        transform: impl Fn(&str) -> Option<T> + Send + Sync + 'static)
    {
        self.patterns.push(Pattern::new(category, matcher, transform));
    }

    pub fn add_regex(
        &mut self,
        category: impl Into<String>,
        re: &str,
        transform: impl Fn(&str) -> Option<T> + Send + Sync + 'static) -> Result<(), regex::Error>
    {
        self.add_pattern(category, Matcher::regex(re)?, transform);
        Ok(())
    }

    /// Separators delimit the text quoted by `UnknownToken` errors.
    pub fn set_separator(&mut self, re: &str) -> Result<(), regex::Error> {
        self.separator = Regex::new(re)?;
        Ok(())
    }

    pub fn patterns(&self) -> &[Pattern<T>] {
        &self.patterns
    }

    pub fn tokenize(&self, input: &str) -> Result<Vec<Token<T>>, LexError> {
        let mut tokens = Vec::new();
        let mut pos = 0;
        while pos < input.len() {
            let rest = &input[pos..];
            let mut longest = 0;
            let mut emit: Option<(usize, &Pattern<T>, T)> = None;
            for pattern in &self.patterns {
                let len = match pattern.match_len(rest) {
                    Some(len) => len,
                    None => continue,
                };
                longest = longest.max(len);
                // strictly longer, so earlier patterns keep ties
                if emit.as_ref().map_or(true, |(best, _, _)| len > *best) {
                    if let Some(value) = pattern.transform(&rest[..len]) {
                        emit = Some((len, pattern, value));
                    }
                }
            }
            if longest == 0 {
                return Err(self.unknown_token(input, pos));
            }
            if let Some((len, pattern, value)) = emit {
                trace!(category = pattern.category(), lexeme = &rest[..len], pos, "token");
                tokens.push(Token {
                    category: pattern.category().to_string(),
                    lexeme: rest[..len].to_string(),
                    value,
                });
            }
            pos += longest;
        }
        Ok(tokens)
    }

    fn unknown_token(&self, input: &str, pos: usize) -> LexError {
        let rest = &input[pos..];
        let end = self.separator.find(rest).map_or(rest.len(), |m| m.start());
        LexError::UnknownToken {
            token: rest[..end].to_string(),
            // 1-based and counting chars, not bytes
            position: input[..pos].chars().count() + 1,
        }
    }
}
