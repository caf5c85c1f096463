mod token;
pub use token::{category, Assoc, Combiner, RawToken, Side, Token, TokenValue};

mod registry;
pub use registry::{ConfigError, Registry, ShuntingBuilder};

mod parser;
pub use parser::{Error, ParseError, ShuntingParser};

mod rpneval;
pub use rpneval::{EvalErr, RPNExpr};
#[cfg(test)]
mod rpneval_test;

mod rpnprint;

pub mod calc;
