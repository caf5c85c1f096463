use crate::token::Token;
use std::ops::Deref;
use tracing::trace;

#[derive(Clone, PartialEq, Debug, thiserror::Error)]
pub enum EvalErr {
    #[error("Invalid arguments count passed to one of functions or operators")]
    InvalidArgumentsCount,
    #[error("Token '{0}' can't be evaluated")]
    BadToken(String),
}

/// A postfix sequence of operands, operators and functions.
#[derive(Clone, PartialEq, Debug)]
pub struct RPNExpr<V>(pub Vec<Token<V>>);

impl<V> Deref for RPNExpr<V> {
    type Target = [Token<V>];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<V: Clone> RPNExpr<V> {
    /// Run the expression on a stack. An empty expression yields `None`.
    pub fn eval(&self) -> Result<Option<V>, EvalErr> {
        let mut operands = Vec::new();

        for token in self.0.iter() {
            match token {
                Token::Operand { value, .. } => operands.push(value.clone()),
                Token::Operator { combiner, .. } | Token::Function { combiner, .. } => {
                    let arity = combiner.arity();
                    if arity > operands.len() {
                        return Err(EvalErr::InvalidArgumentsCount);
                    }
                    trace!(lexeme = token.lexeme(), arity, "apply");
                    let cut = operands.len() - arity;
                    let args = operands.split_off(cut);
                    let result = combiner.apply(args).ok_or(EvalErr::InvalidArgumentsCount)?;
                    operands.push(result);
                }
                Token::Paren(_) | Token::ArgumentSeparator => {
                    return Err(EvalErr::BadToken(token.lexeme().to_string()))
                }
            }
        }
        // leftovers mean operands nobody consumed
        if operands.len() > 1 {
            return Err(EvalErr::InvalidArgumentsCount);
        }
        Ok(operands.pop())
    }
}
