use crate::parser::{ParseError, ShuntingParser};
use crate::token::{category, Assoc, Combiner, RawToken, Side, Token, TokenValue};
use patlex::{Matcher, Tokenizer};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Bad pattern '{0}': {1}")]
    BadPattern(String, regex::Error),
    #[error("Bad separator '{0}': {1}")]
    BadSeparator(String, regex::Error),
}

/// Operators and functions known to the classifier, keyed by symbol/name.
pub struct Registry<V> {
    operators: HashMap<String, Token<V>>,
    functions: HashMap<String, Token<V>>,
}

impl<V> Default for Registry<V> {
    fn default() -> Self {
        Registry {
            operators: HashMap::new(),
            functions: HashMap::new(),
        }
    }
}

impl<V> Registry<V> {
    // Registering a symbol twice replaces the old definition
    pub fn add_operator(&mut self, symbol: String, precedence: usize, assoc: Assoc, combiner: Combiner<V>) {
        debug!(%symbol, precedence, ?assoc, arity = combiner.arity(), "operator");
        let op = Token::operator(symbol.clone(), precedence, assoc, combiner);
        if self.operators.insert(symbol.clone(), op).is_some() {
            debug!(%symbol, "operator redefined");
        }
    }

    pub fn add_function(&mut self, name: String, combiner: Combiner<V>) {
        debug!(%name, arity = combiner.arity(), "function");
        let func = Token::function(name.clone(), combiner);
        if self.functions.insert(name.clone(), func).is_some() {
            debug!(%name, "function redefined");
        }
    }

    pub fn operator(&self, symbol: &str) -> Option<&Token<V>> {
        self.operators.get(symbol)
    }

    pub fn function(&self, name: &str) -> Option<&Token<V>> {
        self.functions.get(name)
    }
}

impl<V: Clone> Registry<V> {
    /// Turn a raw token from the tokenizer into a typed `Token`.
    pub fn classify(&self, raw: &RawToken<V>) -> Result<Token<V>, ParseError> {
        use crate::token::category::*;
        match (raw.category.as_str(), &raw.value) {
            (ARGUMENT_SEPARATOR, _) => Ok(Token::ArgumentSeparator),
            (FUNCTION, TokenValue::Name(name)) => self.function(name).cloned()
                .ok_or_else(|| ParseError::UnknownFunction(name.clone())),
            (PARENTHESIS, TokenValue::Name(name)) => match name.as_str() {
                "(" => Ok(Token::Paren(Side::Left)),
                ")" => Ok(Token::Paren(Side::Right)),
                _ => Err(ParseError::UnknownParenthesis(raw.lexeme.clone())),
            },
            (OPERAND, TokenValue::Operand(value)) => {
                Ok(Token::operand(raw.lexeme.clone(), value.clone()))
            }
            (OPERATOR, TokenValue::Name(name)) => self.operator(name).cloned()
                .ok_or_else(|| ParseError::UnknownOperator(name.clone())),
            (FUNCTION | PARENTHESIS | OPERAND | OPERATOR, _) => Err(ParseError::UnexpectedValue {
                category: raw.category.clone(),
                lexeme: raw.lexeme.clone(),
            }),
            (other, _) => Err(ParseError::UnknownTokenType(other.to_string())),
        }
    }
}

/// Collects patterns, operators and functions, then freezes them into a
/// `ShuntingParser`. Errors are remembered and reported by `into_parser`.
pub struct ShuntingBuilder<V> {
    tokenizer: Tokenizer<TokenValue<V>>,
    registry: Registry<V>,
    error: Option<ConfigError>,
}

impl<V: 'static> Default for ShuntingBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: 'static> ShuntingBuilder<V> {
    pub fn new() -> Self {
        ShuntingBuilder {
            tokenizer: Tokenizer::new(),
            registry: Registry::default(),
            error: None,
        }
    }

    fn add_pattern(
        &mut self,
        category: &str,
        re: &str,
        transform: impl Fn(&str) -> Option<TokenValue<V>> + Send + Sync + 'static)
    {
        match Matcher::regex(re) {
            Ok(matcher) => {
                debug!(category, re, "pattern");
                self.tokenizer.add_pattern(category, matcher, transform);
            }
            // keep the first error, later ones are usually fallout
            Err(e) => {
                self.error.get_or_insert(ConfigError::BadPattern(re.to_string(), e));
            }
        }
    }

    /// Tokens of this pattern carry the matched text as their name.
    pub fn pattern(mut self, category: &str, re: &str) -> Self {
        self.add_pattern(category, re, |lexeme| Some(TokenValue::Name(lexeme.to_string())));
        self
    }

    pub fn pattern_with(
        mut self,
        category: &str,
        re: &str,
        transform: impl Fn(&str) -> Option<TokenValue<V>> + Send + Sync + 'static) -> Self
    {
        self.add_pattern(category, re, transform);
        self
    }

    /// Consume matching input without producing tokens (eg: whitespace).
    pub fn skip(mut self, category: &str, re: &str) -> Self {
        self.add_pattern(category, re, |_| None);
        self
    }

    pub fn operand(
        mut self,
        re: &str,
        value: impl Fn(&str) -> Option<V> + Send + Sync + 'static) -> Self
    {
        self.add_pattern(category::OPERAND, re, move |lexeme| value(lexeme).map(TokenValue::Operand));
        self
    }

    /// Where to cut the offending text when reporting unknown tokens.
    pub fn separator(mut self, re: &str) -> Self {
        if let Err(e) = self.tokenizer.set_separator(re) {
            self.error.get_or_insert(ConfigError::BadSeparator(re.to_string(), e));
        }
        self
    }

    pub fn operator(
        self,
        symbol: impl Into<String>,
        precedence: usize,
        assoc: Assoc,
        combine: impl Fn(V, V) -> V + Send + Sync + 'static) -> Self
    {
        self.operator_with(symbol, precedence, assoc, Combiner::binary(combine))
    }

    pub fn operator_n(
        self,
        symbol: impl Into<String>,
        precedence: usize,
        assoc: Assoc,
        arity: usize,
        combine: impl Fn(Vec<V>) -> V + Send + Sync + 'static) -> Self
    {
        self.operator_with(symbol, precedence, assoc, Combiner::nary(arity, combine))
    }

    pub fn operator_with(
        mut self,
        symbol: impl Into<String>,
        precedence: usize,
        assoc: Assoc,
        combiner: Combiner<V>) -> Self
    {
        self.registry.add_operator(symbol.into(), precedence, assoc, combiner);
        self
    }

    pub fn function(
        self,
        name: impl Into<String>,
        combine: impl Fn(V, V) -> V + Send + Sync + 'static) -> Self
    {
        self.function_with(name, Combiner::binary(combine))
    }

    pub fn function_n(
        self,
        name: impl Into<String>,
        arity: usize,
        combine: impl Fn(Vec<V>) -> V + Send + Sync + 'static) -> Self
    {
        self.function_with(name, Combiner::nary(arity, combine))
    }

    pub fn function_with(mut self, name: impl Into<String>, combiner: Combiner<V>) -> Self {
        self.registry.add_function(name.into(), combiner);
        self
    }

    pub fn into_parser(self) -> Result<ShuntingParser<V>, ConfigError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(ShuntingParser::new(self.tokenizer, self.registry)),
        }
    }
}
