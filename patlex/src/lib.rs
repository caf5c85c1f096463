mod pattern;
mod tokenizer;

pub use pattern::{Matcher, Pattern};
pub use tokenizer::{LexError, Token, Tokenizer};
