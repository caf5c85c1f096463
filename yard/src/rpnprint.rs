use crate::rpneval::RPNExpr;
use crate::token::{Assoc, Token};
use std::fmt;

impl<V> fmt::Display for RPNExpr<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let lexemes = self.0.iter().map(|t| t.lexeme()).collect::<Vec<_>>();
        write!(f, "{}", lexemes.join(" "))
    }
}

enum Ast<'a, V> {
    Leaf(&'a Token<V>),
    Node(&'a Token<V>, Vec<Ast<'a, V>>),
}

impl<V> RPNExpr<V> {
    fn build_ast(&self) -> Option<Ast<V>> {
        let mut ops = Vec::new();
        for token in self.0.iter() {
            match token {
                Token::Operand { .. } => ops.push(Ast::Leaf(token)),
                Token::Operator { combiner, .. } | Token::Function { combiner, .. } => {
                    let n = ops.len().checked_sub(combiner.arity())?;
                    let operands = ops.split_off(n);
                    ops.push(Ast::Node(token, operands));
                }
                _ => return None,
            }
        }
        if ops.len() != 1 {
            return None;
        }
        ops.pop()
    }

    /// Print back in infix notation using as few parens as possible.
    /// `None` if the expression isn't well formed.
    pub fn to_infix(&self) -> Option<String> {
        self.build_ast().map(|ast| printer(&ast).0)
    }
}

// Printed text plus how tight it binds, `None` for atoms
fn printer<V>(root: &Ast<V>) -> (String, Option<(usize, Assoc)>) {
    let (token, args) = match root {
        Ast::Leaf(token) => return (token.lexeme().to_string(), None),
        Ast::Node(token, args) => (token, args),
    };
    let subtrees = args.iter().map(printer).collect::<Vec<_>>();
    match token {
        Token::Operator { symbol, precedence, assoc, .. } if subtrees.len() == 2 => {
            let prec = *precedence;
            let wrap = |(text, binds): &(String, Option<(usize, Assoc)>), side: Assoc| {
                match binds {
                    Some((p, _)) if *p < prec || (*p == prec && *assoc != side) => {
                        format!("({})", text)
                    }
                    _ => text.clone(),
                }
            };
            let lh = wrap(&subtrees[0], Assoc::Left);
            let rh = wrap(&subtrees[1], Assoc::Right);
            // NOTE: '2+(3+4)' keeps its parens, they're needed to group right
            (format!("{} {} {}", lh, symbol, rh), Some((prec, *assoc)))
        }
        Token::Operator { symbol, precedence, assoc, .. } if subtrees.len() == 1 => {
            let (text, binds) = &subtrees[0];
            let text = match binds {
                Some((p, _)) if *p < *precedence => format!("({})", text),
                _ => text.clone(),
            };
            (format!("{}{}", symbol, text), Some((*precedence, *assoc)))
        }
        _ => {
            let expr = subtrees.into_iter()
                .map(|(text, _)| text)
                .collect::<Vec<String>>()
                .join(", ");
            (format!("{}({})", token.lexeme(), expr), None)
        }
    }
}

///////////////////////////////////////////////////////////////////////////////
