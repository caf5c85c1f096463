//! A ready to use floating point calculator.

use crate::parser::ShuntingParser;
use crate::registry::{ConfigError, ShuntingBuilder};
use crate::token::{category, Assoc};
use std::f64::consts;

fn constant(name: &str) -> Option<f64> {
    match name {
        "pi" => Some(consts::PI),
        "e" => Some(consts::E),
        _ => None,
    }
}

/// Infix math on `f64`.
///
/// `+ -` bind loosest, then `* /`, then `^` and the prefix negation `~`
/// which group to the right (`~2 ^ 2` is `-4`). Functions: `min`, `max`,
/// `abs`, `sqrt` and `rand(x)` which samples uniformly from `[0, x)`.
/// Numbers are unsigned, use `~` to negate.
pub fn math_parser() -> Result<ShuntingParser<f64>, ConfigError> {
    ShuntingBuilder::<f64>::new()
        .separator(r"\s|$|,|\(|\)")
        .skip("space", r"\s+")
        .pattern(category::ARGUMENT_SEPARATOR, r",")
        .pattern(category::OPERATOR, r"[-+*/^~]")
        .pattern(category::PARENTHESIS, r"[()]")
        .operand(r"\d+(?:\.\d+)?(?:[eE][-+]?\d+)?", |n| n.parse().ok())
        .operand(r"pi|e", constant)
        // after the constants so they win ties, "exp" is still a function
        .pattern(category::FUNCTION, r"[A-Za-z_][A-Za-z0-9_]*")
        .operator("+", 0, Assoc::Left, |l, r| l + r)
        .operator("-", 0, Assoc::Left, |l, r| l - r)
        .operator("*", 1, Assoc::Left, |l, r| l * r)
        .operator("/", 1, Assoc::Left, |l, r| l / r)
        .operator("^", 2, Assoc::Right, |l: f64, r| l.powf(r))
        .operator_n("~", 2, Assoc::Right, 1, |args| -args[0])
        .function("min", f64::min)
        .function("max", f64::max)
        .function_n("abs", 1, |args| args[0].abs())
        .function_n("sqrt", 1, |args| args[0].sqrt())
        .function_n("rand", 1, |args| args[0] * rand::random::<f64>())
        .into_parser()
}
