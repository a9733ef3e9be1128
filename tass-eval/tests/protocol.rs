//! Operator protocol flows over mixed operand kinds

use num_bigint::BigInt;
use tass_bits::{Bits, Polarity, Truth};
use tass_eval::{
    canonical, BinaryOp, Diagnostic, EvalConfig, EvalError, Evaluator, Position, RawEncoding,
    ScreenEncoding, SliceRange, UnaryOp, Value, ValueKind,
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn at(line: u32) -> Position {
    Position::new(line, 1)
}

fn bin(text: &str) -> Value {
    Value::from(Bits::from_bin_str(text).unwrap().bits)
}

fn hex(text: &str) -> Value {
    Value::from(Bits::from_hex_str(text).unwrap().bits)
}

fn bits_of(value: &Value) -> &Bits {
    value.as_bits().expect("bits value")
}

// ============================================================================
// Literal scenarios through the evaluator
// ============================================================================

#[test]
fn test_invert_and_negate_literal() {
    init_tracing();
    let mut eval = Evaluator::default();
    let v = bin("1010");

    let inv = eval.calc1(UnaryOp::Invert, &v, at(1)).unwrap();
    assert_eq!(eval.repr(&inv).as_deref(), Some("~$a"));

    let neg = eval.calc1(UnaryOp::Neg, &v, at(2)).unwrap();
    assert_eq!(bits_of(&neg).limbs(), &[9]);
    assert_eq!(bits_of(&neg).polarity(), Polarity::Inverted);
    assert_eq!(eval.to_int(&neg, at(2)).unwrap(), BigInt::from(-10));
}

#[test]
fn test_and_narrow_with_wide_ones() {
    let mut eval = Evaluator::default();
    let ones = eval.calc1(UnaryOp::Invert, &bin("00000"), at(1)).unwrap();
    assert!(eval.truth(&ones, Truth::All, at(1)).unwrap());

    let r = eval.calc2(BinaryOp::And, &bin("110"), &ones, at(2)).unwrap();
    assert_eq!(bits_of(&r).width(), 3);
    assert_eq!(bits_of(&r).limbs(), &[0b110]);
}

#[test]
fn test_gather_and_concat() {
    let mut eval = Evaluator::default();
    let list = Value::List(vec![Value::int(0), Value::int(1), Value::int(7)]);
    let gathered = eval.slice(&bin("11001010"), &[list], at(1)).unwrap();
    assert_eq!(bits_of(&gathered).width(), 3);

    let joined = eval.calc2(BinaryOp::Concat, &bin("1111"), &bin("0000"), at(2)).unwrap();
    assert_eq!(eval.repr(&joined).as_deref(), Some("$f0"));
}

// ============================================================================
// Mixed operand kinds
// ============================================================================

#[test]
fn test_int_on_either_side() {
    init_tracing();
    let mut eval = Evaluator::default();
    let v = hex("ff");
    assert_eq!(eval.calc2(BinaryOp::Add, &v, &Value::int(1), at(1)).unwrap(), Value::int(256));
    assert_eq!(eval.calc2(BinaryOp::Sub, &Value::int(1), &v, at(1)).unwrap(), Value::int(-254));
    assert_eq!(eval.calc2(BinaryOp::Eq, &v, &Value::int(255), at(1)).unwrap(), Value::Bool(true));
    assert_eq!(eval.calc2(BinaryOp::Div, &v, &Value::int(16), at(1)).unwrap(), Value::int(15));
    assert_eq!(
        eval.calc2(BinaryOp::Mod, &v, &Value::int(0), at(4)).unwrap_err(),
        EvalError::DivisionByZero { pos: at(4) }
    );
}

#[test]
fn test_comparisons_are_numeric() {
    let mut eval = Evaluator::default();
    let narrow = bin("1");
    let wide = bin("00000001");
    assert_eq!(eval.calc2(BinaryOp::Eq, &narrow, &wide, at(1)).unwrap(), Value::Bool(true));
    assert_ne!(narrow, wide);

    let minus_one = eval.create_bits(&Value::int(-1), at(2)).unwrap();
    assert_eq!(eval.calc2(BinaryOp::Cmp, &minus_one, &narrow, at(2)).unwrap(), Value::int(-1));
}

#[test]
fn test_text_operands_with_encoding() {
    let mut eval = Evaluator::with_encoding(EvalConfig::DEFAULT, Box::new(ScreenEncoding));
    let r = eval.calc2(BinaryOp::Or, &hex("80"), &Value::from("A"), at(1)).unwrap();
    assert_eq!(bits_of(&r).limbs(), &[0x81]);

    let err = eval
        .calc2(BinaryOp::Concat, &hex("80"), &Value::from("\u{7}"), at(2))
        .unwrap_err();
    assert!(matches!(err, EvalError::UnknownCharacter { ch: '\u{7}', .. }));
}

#[test]
fn test_text_without_encoding() {
    let eval = Evaluator::default();
    let v = eval.create_bits(&Value::from("\u{20ac}"), at(1)).unwrap();
    assert_eq!(bits_of(&v).width(), 24);
    assert_eq!(bits_of(&v).limbs(), &[0x20AC]);
    assert_eq!(
        eval.create_bits(&Value::from(""), at(2)).unwrap_err(),
        EvalError::BigStringConversion { pos: at(2) }
    );

    let eval = Evaluator::with_encoding(EvalConfig::DEFAULT, Box::new(RawEncoding));
    let v = eval.create_bits(&Value::from(""), at(3)).unwrap();
    assert_eq!(*bits_of(&v), Bits::null());
}

#[test]
fn test_lanes_of_inverted_value() {
    let mut eval = Evaluator::default();
    let minus_two = eval.create_bits(&Value::int(-2), at(1)).unwrap();
    let low = eval.calc1(UnaryOp::Lower, &minus_two, at(1)).unwrap();
    assert_eq!(eval.repr(&low).as_deref(), Some("bytes(fe)"));
    let word = eval.calc1(UnaryOp::Word, &minus_two, at(1)).unwrap();
    assert_eq!(eval.repr(&word).as_deref(), Some("bytes(feff)"));
}

#[test]
fn test_wrong_kinds() {
    let mut eval = Evaluator::default();
    let range = Value::Range(SliceRange::default());
    assert_eq!(
        eval.create_bits(&range, at(1)).unwrap_err(),
        EvalError::WrongType { kind: ValueKind::Range, pos: at(1) }
    );
    let err = eval.calc2(BinaryOp::Repeat, &Value::int(2), &bin("1"), at(2)).unwrap_err();
    assert!(matches!(err, EvalError::InvalidBinary { op: BinaryOp::Repeat, .. }));
    assert!(!err.is_fatal());
}

// ============================================================================
// Conversions
// ============================================================================

#[test]
fn test_integer_extraction() {
    let eval = Evaluator::default();
    assert_eq!(eval.uval(&hex("ff"), 8, at(1)).unwrap(), 255);
    assert_eq!(
        eval.uval(&hex("1ff"), 8, at(2)).unwrap_err(),
        EvalError::CantUval {
            bits: 8,
            value: "$1ff".to_string(),
            pos: at(2)
        }
    );
    let minus_one = eval.create_bits(&Value::int(-1), at(3)).unwrap();
    assert_eq!(eval.ival(&minus_one, 8, at(3)).unwrap(), -1);
    assert!(eval.uval(&hex("123456789"), 32, at(4)).is_err());
}

#[test]
fn test_float_sign_abs_len() {
    let eval = Evaluator::default();
    let v = eval.create_bits(&Value::int(-5), at(1)).unwrap();
    assert_eq!(eval.to_float(&v, at(1)).unwrap(), -5.0);
    assert_eq!(eval.sign(&v, at(1)).unwrap(), -1);
    assert_eq!(eval.abs(&v, at(1)).unwrap(), Value::int(5));
    assert_eq!(eval.len(&hex("0ff"), at(1)).unwrap(), 12);
    assert_eq!(eval.sign(&bin("000"), at(1)).unwrap(), 0);
}

#[test]
fn test_hash_matches_small_integers() {
    let eval = Evaluator::default();
    for n in [0i64, 1, 42, 0x7FFF_FFFF, -1, -42] {
        let bits = eval.create_bits(&Value::int(n), at(1)).unwrap();
        assert_eq!(
            eval.hash(&bits, at(1)).unwrap(),
            eval.hash(&Value::int(n), at(1)).unwrap()
        );
    }
}

#[test]
fn test_repr_limit() {
    let config = EvalConfig::new(false, 4, usize::MAX).unwrap();
    let eval = Evaluator::new(config);
    assert_eq!(eval.repr(&hex("abc")).as_deref(), Some("$abc"));
    assert_eq!(eval.repr(&hex("abcd")), None);
    assert_eq!(eval.repr_bounded(&hex("abcd"), 5).as_deref(), Some("$abcd"));
}

// ============================================================================
// Strict boolean diagnostics
// ============================================================================

#[test]
fn test_strict_bool_diagnostics() {
    init_tracing();
    let mut eval = Evaluator::new(EvalConfig::DEFAULT.strict());
    let v = bin("1010");
    assert!(eval.truth(&v, Truth::Bool, at(1)).unwrap());
    assert!(eval.diagnostics().is_empty());

    assert!(eval.truth(&v, Truth::Any, at(2)).unwrap());
    assert!(!eval.truth(&v, Truth::All, at(3)).unwrap());
    eval.calc1(UnaryOp::LogicalNot, &v, at(4)).unwrap();

    let diagnostics = eval.take_diagnostics();
    assert_eq!(diagnostics.len(), 3);
    assert_eq!(
        diagnostics[0],
        Diagnostic::ImplicitBool { kind: ValueKind::Bits, pos: at(2) }
    );
    assert_eq!(diagnostics[2].position(), at(4));
}

#[test]
fn test_lenient_bool_is_silent() {
    let mut eval = Evaluator::default();
    let v = bin("1010");
    eval.truth(&v, Truth::All, at(1)).unwrap();
    eval.calc2(BinaryOp::LogicalOr, &v, &Value::Bool(false), at(2)).unwrap();
    eval.calc2(BinaryOp::Xor, &v, &Value::Bool(true), at(3)).unwrap();
    assert!(eval.diagnostics().is_empty());
}

// ============================================================================
// Canonical values
// ============================================================================

#[test]
fn test_canonical_results_are_shared() {
    init_tracing();
    let mut eval = Evaluator::default();
    let v = bin("10");
    let bit = eval.slice(&v, &[Value::int(1)], at(1)).unwrap();
    let empty = eval
        .slice(&v, &[Value::Range(SliceRange::new(Some(1), Some(1), None))], at(1))
        .unwrap();
    assert_eq!(canonical::outstanding(), 2);
    drop((bit, empty));
    assert_eq!(eval.shutdown(), 0);
}
