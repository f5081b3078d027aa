//! Logic operations: and, or
//!
//! Truthiness-based short-circuit operators. Neither coerces its result to a
//! boolean sentinel: `and` returns the last evaluated value (or boolean-true
//! with no operands), `or` returns the first truthy value (or empty if none
//! are truthy).

use super::define;
use crate::interpreter::Interpreter;
use crate::value::Value;

pub fn register(interp: &mut Interpreter) {
    define(interp, "and", |interp, args| {
        let mut last = Value::Integer(1);
        for item in args.iter_list() {
            last = interp.eval(item.clone())?;
            if !last.is_truthy() {
                return Ok(Value::Nil);
            }
        }
        Ok(last)
    });

    define(interp, "or", |interp, args| {
        for item in args.iter_list() {
            let value = interp.eval(item.clone())?;
            if value.is_truthy() {
                return Ok(value);
            }
        }
        Ok(Value::Nil)
    });
}
