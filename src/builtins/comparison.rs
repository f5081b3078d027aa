//! Comparison operations: <, <=, >, >=, ==
//!
//! Exactly two operands each, evaluated. Nil coerces to integer 0. Integer
//! and Real promote against each other; a non-String compared against a
//! String is rendered via the printer and compared textually; String
//! against String is lexicographic. `==` additionally short-circuits true on
//! two String sentinels sharing the same allocation (`Rc::ptr_eq`) before
//! falling into the general comparison.

use super::define;
use crate::error::LispError;
use crate::interpreter::Interpreter;
use crate::value::Value;
use std::cmp::Ordering;
use std::rc::Rc;

fn coerce_nil(value: Value) -> Value {
    if value.is_nil() {
        Value::Integer(0)
    } else {
        value
    }
}

fn compare(a: &Value, b: &Value) -> Result<Ordering, LispError> {
    match (a, b) {
        (Value::String(sa), Value::String(sb)) => Ok(sa.as_bytes().cmp(sb.as_bytes())),
        (Value::String(sa), other) => Ok(sa.as_bytes().cmp(crate::printer::render(other).as_bytes())),
        (other, Value::String(sb)) => Ok(crate::printer::render(other).as_bytes().cmp(sb.as_bytes())),
        (Value::Integer(x), Value::Integer(y)) => Ok(x.cmp(y)),
        (Value::Integer(x), Value::Real(y)) => {
            Ok((*x as f64).partial_cmp(y).unwrap_or(Ordering::Equal))
        }
        (Value::Real(x), Value::Integer(y)) => {
            Ok(x.partial_cmp(&(*y as f64)).unwrap_or(Ordering::Equal))
        }
        (Value::Real(x), Value::Real(y)) => Ok(x.partial_cmp(y).unwrap_or(Ordering::Equal)),
        _ => Err(LispError::bad_argument(
            "comparison requires numbers or strings",
        )),
    }
}

fn eval_pair(interp: &mut Interpreter, args: &Value, name: &str) -> Result<(Value, Value), LispError> {
    let (items, tail) = args.to_vec_with_tail();
    if items.len() != 2 || tail.is_some() {
        return Err(LispError::bad_argument(format!(
            "{}: expected exactly 2 arguments",
            name
        )));
    }
    let a = coerce_nil(interp.eval(items[0].clone())?);
    let b = coerce_nil(interp.eval(items[1].clone())?);
    Ok((a, b))
}

fn to_bool(value: bool) -> Value {
    Value::Integer(if value { 1 } else { 0 })
}

pub fn register(interp: &mut Interpreter) {
    define(interp, "<", |interp, args| {
        let (a, b) = eval_pair(interp, args, "<")?;
        Ok(to_bool(compare(&a, &b)? == Ordering::Less))
    });
    define(interp, "<=", |interp, args| {
        let (a, b) = eval_pair(interp, args, "<=")?;
        Ok(to_bool(compare(&a, &b)? != Ordering::Greater))
    });
    define(interp, ">", |interp, args| {
        let (a, b) = eval_pair(interp, args, ">")?;
        Ok(to_bool(compare(&a, &b)? == Ordering::Greater))
    });
    define(interp, ">=", |interp, args| {
        let (a, b) = eval_pair(interp, args, ">=")?;
        Ok(to_bool(compare(&a, &b)? != Ordering::Less))
    });
    define(interp, "==", |interp, args| {
        let (a, b) = eval_pair(interp, args, "==")?;
        if let (Value::String(sa), Value::String(sb)) = (&a, &b) {
            if Rc::ptr_eq(sa, sb) {
                return Ok(to_bool(true));
            }
        }
        Ok(to_bool(compare(&a, &b)? == Ordering::Equal))
    });
}
