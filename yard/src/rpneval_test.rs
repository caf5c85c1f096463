use crate::calc::math_parser;
use crate::parser::{Error, ParseError};
use crate::registry::ShuntingBuilder;
use crate::rpneval::{EvalErr, RPNExpr};
use crate::token::{category, Assoc, Combiner, Side, Token};

macro_rules! fuzzy_eq {
    ($lhs:expr, $rhs:expr) => { assert!(($lhs - $rhs).abs() < 1.0e-10) }
}

fn eval(expr: &str) -> f64 {
    math_parser().unwrap().evaluate(expr).unwrap().unwrap()
}

fn n(x: i64) -> Token<i64> {
    Token::operand(x.to_string(), x)
}

fn plus() -> Token<i64> {
    Token::operator("+", 0, Assoc::Left, Combiner::binary(|l: i64, r| l + r))
}

fn times() -> Token<i64> {
    Token::operator("*", 1, Assoc::Left, Combiner::binary(|l: i64, r| l * r))
}

#[test]
fn operand_count_matches() {
    let expr = RPNExpr(vec![n(2), n(5), n(3), times(), plus()]);
    assert_eq!(expr.eval(), Ok(Some(17)));
}

#[test]
fn extra_operand() {
    let expr = RPNExpr(vec![n(1), n(2), n(5), n(3), times(), plus()]);
    assert_eq!(expr.eval(), Err(EvalErr::InvalidArgumentsCount));
}

#[test]
fn missing_operand() {
    let expr = RPNExpr(vec![n(5), n(3), times(), plus()]);
    assert_eq!(expr.eval(), Err(EvalErr::InvalidArgumentsCount));
}

#[test]
fn empty_and_single() {
    assert_eq!(RPNExpr::<i64>(vec![]).eval(), Ok(None));
    assert_eq!(RPNExpr(vec![n(7)]).eval(), Ok(Some(7)));
}

#[test]
fn parens_dont_evaluate() {
    let expr = RPNExpr(vec![n(1), Token::Paren(Side::Left)]);
    assert_eq!(expr.eval(), Err(EvalErr::BadToken("(".to_string())));
    let expr = RPNExpr(vec![n(1), Token::ArgumentSeparator, n(2)]);
    assert_eq!(expr.eval(), Err(EvalErr::BadToken(",".to_string())));
}

#[test]
fn function_arity() {
    let parser = math_parser().unwrap();
    let expr = parser.to_rpn("min(1)").unwrap();
    assert_eq!(expr.to_string(), "1 min");
    assert_eq!(expr.eval(), Err(EvalErr::InvalidArgumentsCount));
    let expr = parser.to_rpn("min(1, 2, 3)").unwrap();
    assert_eq!(expr.eval(), Err(EvalErr::InvalidArgumentsCount));
    let expr = parser.to_rpn("abs(1, 2)").unwrap();
    assert_eq!(expr.eval(), Err(EvalErr::InvalidArgumentsCount));
}

#[test]
fn nary_args_in_order() {
    let parser = ShuntingBuilder::<i64>::new()
        .skip("space", r"\s+")
        .pattern(category::ARGUMENT_SEPARATOR, r",")
        .pattern(category::PARENTHESIS, r"[()]")
        .pattern(category::FUNCTION, r"[a-z]+")
        .operand(r"\d+", |n| n.parse().ok())
        .function_n("digits", 3, |args| args.iter().fold(0, |acc, d| acc * 10 + d))
        .into_parser()
        .unwrap();
    assert_eq!(parser.evaluate("digits(1, 2, 3)"), Ok(Some(123)));
}

#[test]
fn opaque_values() {
    let parser = ShuntingBuilder::<String>::new()
        .skip("space", r"\s+")
        .pattern(category::OPERATOR, r"\+")
        .operand(r"[a-z]+", |s| Some(s.to_string()))
        .operator("+", 0, Assoc::Left, |l, r| l + &r)
        .into_parser()
        .unwrap();
    assert_eq!(parser.evaluate("ab + cd + ef"), Ok(Some("abcdef".to_string())));
}

#[test]
fn end_to_end() {
    let parser = math_parser().unwrap();
    let expr = parser.to_rpn("min(max(3, 4 / 2) * 2 ^ 3, 25)").unwrap();
    assert_eq!(expr.to_string(), "3 4 2 / max 2 3 ^ * 25 min");
    assert_eq!(expr.eval(), Ok(Some(24.0)));
}

#[test]
fn arithmetic() {
    fuzzy_eq!(eval("(3+4)*3"), 21.0);
    fuzzy_eq!(eval("2^3"), 8.0);
    fuzzy_eq!(eval("2 ^ ~3"), 0.125);
    fuzzy_eq!(eval("~2 ^ 2"), -4.0);
    fuzzy_eq!(eval("2 ^ 3 ^ 2"), 512.0);
    fuzzy_eq!(eval("10 - 4 - 3"), 3.0);
    fuzzy_eq!(eval("3.4e-2 * 100"), 3.4);
    fuzzy_eq!(eval("sqrt(16) + abs(~2)"), 6.0);
    fuzzy_eq!(eval("pi / 2"), std::f64::consts::FRAC_PI_2);
    fuzzy_eq!(eval("e"), std::f64::consts::E);
}

#[test]
fn random_samples() {
    for _ in 0..100 {
        let x = eval("rand(10)");
        assert!((0.0..10.0).contains(&x));
    }
    fuzzy_eq!(eval("rand(0)"), 0.0);
}

#[test]
fn errors_surface_by_stage() {
    let parser = math_parser().unwrap();
    assert_eq!(parser.evaluate("1 2"), Err(Error::Eval(EvalErr::InvalidArgumentsCount)));
    assert_eq!(parser.evaluate("(1"), Err(Error::Parse(ParseError::MismatchedParentheses)));
    assert_eq!(
        parser.evaluate("exp(1)"),
        Err(Error::Parse(ParseError::UnknownFunction("exp".to_string()))));
    assert_eq!(
        parser.evaluate("max(5 + 2, $6)"),
        Err(Error::Parse(ParseError::UnknownToken { token: "$6".to_string(), position: 12 })));
    assert_eq!(parser.evaluate(""), Ok(None));
}
