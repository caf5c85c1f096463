use crate::registry::Registry;
use crate::rpneval::{EvalErr, RPNExpr};
use crate::token::{Assoc, RawToken, Side, Token, TokenValue};
use patlex::{LexError, Tokenizer};
use tracing::trace;

#[derive(Clone, PartialEq, Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Unknown token '{token}' at position {position}")]
    UnknownToken { token: String, position: usize },
    #[error("Unknown operator '{0}'")]
    UnknownOperator(String),
    #[error("Unknown function '{0}'")]
    UnknownFunction(String),
    #[error("Token '{0}' is not a parenthesis")]
    UnknownParenthesis(String),
    #[error("Token '{0}' is not defined")]
    UnknownTokenType(String),
    #[error("Mismatched parentheses")]
    MismatchedParentheses,
    #[error("Token '{lexeme}' carries the wrong kind of value for '{category}'")]
    UnexpectedValue { category: String, lexeme: String },
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        match err {
            LexError::UnknownToken { token, position } => {
                ParseError::UnknownToken { token, position }
            }
        }
    }
}

#[derive(Clone, PartialEq, Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalErr),
}

/// Frozen configuration: tokenizes, converts infix to RPN and evaluates.
/// Nothing here mutates, a parser can be shared between threads.
pub struct ShuntingParser<V> {
    tokenizer: Tokenizer<TokenValue<V>>,
    registry: Registry<V>,
}

impl<V> ShuntingParser<V> {
    pub(crate) fn new(tokenizer: Tokenizer<TokenValue<V>>, registry: Registry<V>) -> Self {
        ShuntingParser { tokenizer, registry }
    }

    pub fn registry(&self) -> &Registry<V> {
        &self.registry
    }

    pub fn tokenize(&self, expr: &str) -> Result<Vec<RawToken<V>>, ParseError> {
        Ok(self.tokenizer.tokenize(expr)?)
    }
}

// Move operators from the stack to the output until an opening paren shows
// up. Returns whether one was found, it's left on the stack.
fn pop_until_paren<V>(stack: &mut Vec<Token<V>>, out: &mut Vec<Token<V>>) -> bool {
    while let Some(top) = stack.pop() {
        if top.is_paren() {
            stack.push(top);
            return true;
        }
        out.push(top);
    }
    false
}

impl<V: Clone> ShuntingParser<V> {
    pub fn classify(&self, raw: &RawToken<V>) -> Result<Token<V>, ParseError> {
        self.registry.classify(raw)
    }

    pub fn to_rpn(&self, expr: &str) -> Result<RPNExpr<V>, ParseError> {
        self.convert(self.tokenize(expr)?)
    }

    pub fn evaluate(&self, expr: &str) -> Result<Option<V>, Error> {
        Ok(self.to_rpn(expr)?.eval()?)
    }

    /// Shunting-yard: raw tokens are classified as they're consumed.
    pub fn convert<I>(&self, tokens: I) -> Result<RPNExpr<V>, ParseError>
        where I: IntoIterator<Item = RawToken<V>>
    {
        let mut out = Vec::new();
        let mut stack = Vec::new();

        for raw in tokens {
            let token = self.classify(&raw)?;
            trace!(lexeme = token.lexeme(), stack = stack.len(), "shunting");
            match token {
                Token::Operand { .. } => out.push(token),
                Token::Function { .. } => stack.push(token),
                Token::Paren(Side::Left) => stack.push(token),
                // the stack running dry here just means there was no
                // pending operator, it's not an error
                Token::ArgumentSeparator => {
                    pop_until_paren(&mut stack, &mut out);
                }
                Token::Paren(Side::Right) => {
                    if !pop_until_paren(&mut stack, &mut out) {
                        return Err(ParseError::MismatchedParentheses);
                    }
                    stack.pop(); // peel matching OParen
                }
                Token::Operator { precedence, assoc, .. } => {
                    while let Some(top) = stack.last() {
                        let pops = match top {
                            // functions always bind tighter than operators
                            Token::Function { .. } => true,
                            Token::Operator { precedence: top_prec, .. } => {
                                *top_prec > precedence ||
                                    (*top_prec == precedence && assoc == Assoc::Left)
                            }
                            _ => false,
                        };
                        if !pops {
                            break;
                        }
                        if let Some(top) = stack.pop() {
                            out.push(top);
                        }
                    }
                    stack.push(token);
                }
            }
        }
        while let Some(top) = stack.pop() {
            if top.is_paren() {
                return Err(ParseError::MismatchedParentheses);
            }
            out.push(top);
        }
        Ok(RPNExpr(out))
    }
}
