//! Arithmetic operations: +, -, *, /, mod
//!
//! - `+`: sum of all evaluated operands (identity 0)
//! - `-`: subtract subsequent operands from the first; one operand is `0 - x`
//! - `*`: product of all evaluated operands (identity 1)
//! - `/`: divide the first operand by the rest; one operand is `0 / x`
//! - `mod`: remainder of the first operand by the rest; one operand is `0 mod x`
//!
//! Integer/Real operands promote to Real when mixed; a missing (Nil) operand
//! coerces to integer 0; anything else non-numeric is a bad argument.

use super::define;
use crate::error::LispError;
use crate::interpreter::Interpreter;
use crate::value::Value;

#[derive(Clone, Copy)]
enum Num {
    Integer(i64),
    Real(f64),
}

impl Num {
    fn into_value(self) -> Value {
        match self {
            Num::Integer(n) => Value::Integer(n),
            Num::Real(r) => Value::Real(r),
        }
    }
}

fn to_num(value: &Value) -> Result<Num, LispError> {
    match value {
        Value::Integer(n) => Ok(Num::Integer(*n)),
        Value::Real(r) => Ok(Num::Real(*r)),
        Value::Nil => Ok(Num::Integer(0)),
        other => Err(LispError::bad_argument(format!(
            "expected a number, got {}",
            other.type_name()
        ))),
    }
}

fn eval_operands_as_nums(interp: &mut Interpreter, args: &Value) -> Result<Vec<Num>, LispError> {
    let mut nums = Vec::new();
    for item in args.iter_list() {
        let evaluated = interp.eval(item.clone())?;
        nums.push(to_num(&evaluated)?);
    }
    Ok(nums)
}

fn combine(a: Num, b: Num, int_op: fn(i64, i64) -> i64, real_op: fn(f64, f64) -> f64) -> Num {
    match (a, b) {
        (Num::Integer(x), Num::Integer(y)) => Num::Integer(int_op(x, y)),
        (Num::Integer(x), Num::Real(y)) => Num::Real(real_op(x as f64, y)),
        (Num::Real(x), Num::Integer(y)) => Num::Real(real_op(x, y as f64)),
        (Num::Real(x), Num::Real(y)) => Num::Real(real_op(x, y)),
    }
}

fn is_zero(n: Num) -> bool {
    match n {
        Num::Integer(0) => true,
        Num::Real(r) => r == 0.0,
        _ => false,
    }
}

/// Folds operands with an identity seed: `(op)` with no operands returns the
/// seed itself (0 for `+`, 1 for `*`).
fn fold_with_identity(
    interp: &mut Interpreter,
    args: &Value,
    seed: Num,
    int_op: fn(i64, i64) -> i64,
    real_op: fn(f64, f64) -> f64,
) -> Result<Value, LispError> {
    let nums = eval_operands_as_nums(interp, args)?;
    let result = nums
        .into_iter()
        .fold(seed, |acc, n| combine(acc, n, int_op, real_op));
    Ok(result.into_value())
}

/// Folds operands the way `-`, `/`, and `mod` do: zero operands yields 0; one
/// operand is treated as `0 op x`; otherwise the first operand seeds the
/// accumulator and the rest fold in.
fn fold_binary_like(
    interp: &mut Interpreter,
    args: &Value,
    int_op: fn(i64, i64) -> i64,
    real_op: fn(f64, f64) -> f64,
    reject_zero_divisor: bool,
    name: &str,
) -> Result<Value, LispError> {
    let nums = eval_operands_as_nums(interp, args)?;
    match nums.len() {
        0 => Ok(Value::Integer(0)),
        1 => {
            if reject_zero_divisor && is_zero(nums[0]) {
                return Err(LispError::bad_argument(format!("{}: division by zero", name)));
            }
            Ok(combine(Num::Integer(0), nums[0], int_op, real_op).into_value())
        }
        _ => {
            let mut acc = nums[0];
            for n in &nums[1..] {
                if reject_zero_divisor && is_zero(*n) {
                    return Err(LispError::bad_argument(format!("{}: division by zero", name)));
                }
                acc = combine(acc, *n, int_op, real_op);
            }
            Ok(acc.into_value())
        }
    }
}

pub fn register(interp: &mut Interpreter) {
    define(interp, "+", |interp, args| {
        fold_with_identity(interp, args, Num::Integer(0), |a, b| a.wrapping_add(b), |a, b| a + b)
    });
    define(interp, "*", |interp, args| {
        fold_with_identity(interp, args, Num::Integer(1), |a, b| a.wrapping_mul(b), |a, b| a * b)
    });
    define(interp, "-", |interp, args| {
        fold_binary_like(interp, args, |a, b| a.wrapping_sub(b), |a, b| a - b, false, "-")
    });
    define(interp, "/", |interp, args| {
        fold_binary_like(interp, args, |a, b| a.wrapping_div(b), |a, b| a / b, true, "/")
    });
    define(interp, "mod", |interp, args| {
        fold_binary_like(interp, args, |a, b| a.wrapping_rem(b), |a, b| a % b, true, "mod")
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::NullHost;

    fn eval(source: &str) -> Value {
        let mut interp = Interpreter::new(Box::new(NullHost::default()));
        interp.eval_source(source).unwrap()
    }

    #[test]
    fn test_add_identity_and_sum() {
        assert!(matches!(eval("(+)"), Value::Integer(0)));
        assert!(matches!(eval("(+ 1 2 3)"), Value::Integer(6)));
    }

    #[test]
    fn test_mul_identity_and_product() {
        assert!(matches!(eval("(*)"), Value::Integer(1)));
        assert!(matches!(eval("(* 2 3 4)"), Value::Integer(24)));
    }

    #[test]
    fn test_sub_zero_one_and_many_operands() {
        assert!(matches!(eval("(-)"), Value::Integer(0)));
        assert!(matches!(eval("(- 5)"), Value::Integer(-5)));
        assert!(matches!(eval("(- 10 3 2)"), Value::Integer(5)));
    }

    #[test]
    fn test_div_one_operand_is_zero_over_x() {
        assert!(matches!(eval("(/ 5)"), Value::Integer(0)));
        assert!(matches!(eval("(/ 20 4)"), Value::Integer(5)));
    }

    #[test]
    fn test_div_by_zero_is_bad_argument() {
        let mut interp = Interpreter::new(Box::new(NullHost::default()));
        assert!(interp.eval_source("(/ 1 0)").is_err());
    }

    #[test]
    fn test_integer_real_promotion() {
        match eval("(+ 1 2.5)") {
            Value::Real(r) => assert_eq!(r, 3.5),
            other => panic!("expected Real, got {:?}", other),
        }
    }

    #[test]
    fn test_nil_coerces_to_zero() {
        assert!(matches!(eval("(+ nil 5)"), Value::Integer(5)));
    }

    #[test]
    fn test_mod_real_is_supported() {
        match eval("(mod 5.5 2.0)") {
            Value::Real(r) => assert!((r - 1.5).abs() < 1e-9),
            other => panic!("expected Real, got {:?}", other),
        }
    }

    #[test]
    fn test_min_int_divided_by_minus_one_does_not_panic() {
        assert!(matches!(
            eval("(/ -9223372036854775808 -1)"),
            Value::Integer(i64::MIN)
        ));
        assert!(matches!(
            eval("(mod -9223372036854775808 -1)"),
            Value::Integer(0)
        ));
        assert!(matches!(
            eval("(- -9223372036854775808 1)"),
            Value::Integer(i64::MAX)
        ));
    }
}
