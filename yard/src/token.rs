use std::fmt;
use std::sync::Arc;

/// Category names understood by the classifier.
pub mod category {
    pub const ARGUMENT_SEPARATOR: &str = "argument_separator";
    pub const FUNCTION: &str = "function";
    pub const PARENTHESIS: &str = "parenthesis";
    pub const OPERAND: &str = "operand";
    pub const OPERATOR: &str = "operator";
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Assoc {
    Left,
    Right,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Side {
    Left,
    Right,
}

/// What the tokenizer attaches to each raw token: symbol-like categories
/// carry a name to look up, operands carry the application's value.
#[derive(Clone, PartialEq, Debug)]
pub enum TokenValue<V> {
    Name(String),
    Operand(V),
}

pub type RawToken<V> = patlex::Token<TokenValue<V>>;

type BinaryFn<V> = Arc<dyn Fn(V, V) -> V + Send + Sync>;
type NaryFn<V> = Arc<dyn Fn(Vec<V>) -> V + Send + Sync>;

/// Combining function of an operator or function along with its arity.
/// The arity is fixed when registering so the evaluator knows how many
/// operands to pop before calling.
pub enum Combiner<V> {
    Binary(BinaryFn<V>),
    Nary(usize, NaryFn<V>),
}

impl<V> Combiner<V> {
    pub fn binary(f: impl Fn(V, V) -> V + Send + Sync + 'static) -> Self {
        Combiner::Binary(Arc::new(f))
    }

    pub fn nary(arity: usize, f: impl Fn(Vec<V>) -> V + Send + Sync + 'static) -> Self {
        Combiner::Nary(arity, Arc::new(f))
    }

    pub fn arity(&self) -> usize {
        match self {
            Combiner::Binary(_) => 2,
            Combiner::Nary(arity, _) => *arity,
        }
    }

    /// Args are in left to right order. `None` if their count is off.
    pub fn apply(&self, mut args: Vec<V>) -> Option<V> {
        if args.len() != self.arity() {
            return None;
        }
        match self {
            Combiner::Binary(f) => {
                let rhs = args.pop()?;
                let lhs = args.pop()?;
                Some(f(lhs, rhs))
            }
            Combiner::Nary(_, f) => Some(f(args)),
        }
    }
}

impl<V> Clone for Combiner<V> {
    fn clone(&self) -> Self {
        match self {
            Combiner::Binary(f) => Combiner::Binary(f.clone()),
            Combiner::Nary(arity, f) => Combiner::Nary(*arity, f.clone()),
        }
    }
}

/// A token classified against the registries.
pub enum Token<V> {
    ArgumentSeparator,
    Operand { lexeme: String, value: V },
    Function { name: String, combiner: Combiner<V> },
    Operator {
        symbol: String,
        precedence: usize,
        assoc: Assoc,
        combiner: Combiner<V>,
    },
    Paren(Side),
}

impl<V> Token<V> {
    pub fn operand(lexeme: impl Into<String>, value: V) -> Self {
        Token::Operand { lexeme: lexeme.into(), value }
    }

    pub fn function(name: impl Into<String>, combiner: Combiner<V>) -> Self {
        Token::Function { name: name.into(), combiner }
    }

    pub fn operator(
        symbol: impl Into<String>,
        precedence: usize,
        assoc: Assoc,
        combiner: Combiner<V>) -> Self
    {
        Token::Operator { symbol: symbol.into(), precedence, assoc, combiner }
    }

    /// Text used when printing RPN expressions.
    pub fn lexeme(&self) -> &str {
        match self {
            Token::ArgumentSeparator => ",",
            Token::Operand { lexeme, .. } => lexeme,
            Token::Function { name, .. } => name,
            Token::Operator { symbol, .. } => symbol,
            Token::Paren(Side::Left) => "(",
            Token::Paren(Side::Right) => ")",
        }
    }

    pub fn is_paren(&self) -> bool {
        matches!(self, Token::Paren(_))
    }
}

impl<V: Clone> Clone for Token<V> {
    fn clone(&self) -> Self {
        match self {
            Token::ArgumentSeparator => Token::ArgumentSeparator,
            Token::Operand { lexeme, value } => Token::Operand {
                lexeme: lexeme.clone(),
                value: value.clone(),
            },
            Token::Function { name, combiner } => Token::Function {
                name: name.clone(),
                combiner: combiner.clone(),
            },
            Token::Operator { symbol, precedence, assoc, combiner } => Token::Operator {
                symbol: symbol.clone(),
                precedence: *precedence,
                assoc: *assoc,
                combiner: combiner.clone(),
            },
            Token::Paren(side) => Token::Paren(*side),
        }
    }
}

// Combining functions can't be compared, only their arity is.
impl<V: PartialEq> PartialEq for Token<V> {
    fn eq(&self, other: &Token<V>) -> bool {
        match (self, other) {
            (Token::ArgumentSeparator, Token::ArgumentSeparator) => true,
            (Token::Operand { lexeme: l1, value: v1 },
             Token::Operand { lexeme: l2, value: v2 }) => l1 == l2 && v1 == v2,
            (Token::Function { name: n1, combiner: c1 },
             Token::Function { name: n2, combiner: c2 }) => {
                n1 == n2 && c1.arity() == c2.arity()
            }
            (Token::Operator { symbol: s1, precedence: p1, assoc: a1, combiner: c1 },
             Token::Operator { symbol: s2, precedence: p2, assoc: a2, combiner: c2 }) => {
                s1 == s2 && p1 == p2 && a1 == a2 && c1.arity() == c2.arity()
            }
            (Token::Paren(s1), Token::Paren(s2)) => s1 == s2,
            _ => false,
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for Token<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::ArgumentSeparator => write!(f, "ArgumentSeparator"),
            Token::Operand { lexeme, value } => write!(f, "Operand({}, {:?})", lexeme, value),
            Token::Function { name, combiner } => {
                write!(f, "Function({}/{})", name, combiner.arity())
            }
            Token::Operator { symbol, precedence, assoc, combiner } => write!(
                f, "Operator({}/{}, {}, {:?})", symbol, combiner.arity(), precedence, assoc),
            Token::Paren(side) => write!(f, "Paren({:?})", side),
        }
    }
}

///////////////////////////////////////////////////////////////////////////////
