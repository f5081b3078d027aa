//! Type/truth predicates: true?, false?, atom?, cell?, nil?, typeof
//!
//! All predicates take one evaluated operand and return the boolean-true or
//! boolean-false sentinel. `typeof` returns one of the eight cached
//! `Rc<str>` type-name sentinels, shared (same allocation) across calls.

use super::define;
use crate::error::LispError;
use crate::interpreter::Interpreter;
use crate::value::Value;

fn eval_one(interp: &mut Interpreter, args: &Value, name: &str) -> Result<Value, LispError> {
    let (items, tail) = args.to_vec_with_tail();
    if items.len() != 1 || tail.is_some() {
        return Err(LispError::bad_argument(format!(
            "{}: expected exactly 1 argument",
            name
        )));
    }
    interp.eval(items[0].clone())
}

fn to_bool(value: bool) -> Value {
    Value::Integer(if value { 1 } else { 0 })
}

pub fn register(interp: &mut Interpreter) {
    define(interp, "true?", |interp, args| {
        Ok(to_bool(eval_one(interp, args, "true?")?.is_truthy()))
    });
    define(interp, "false?", |interp, args| {
        Ok(to_bool(!eval_one(interp, args, "false?")?.is_truthy()))
    });
    define(interp, "atom?", |interp, args| {
        Ok(to_bool(eval_one(interp, args, "atom?")?.is_atom()))
    });
    define(interp, "cell?", |interp, args| {
        Ok(to_bool(eval_one(interp, args, "cell?")?.is_cell()))
    });
    define(interp, "nil?", |interp, args| {
        Ok(to_bool(eval_one(interp, args, "nil?")?.is_nil()))
    });
    define(interp, "typeof", |interp, args| {
        let value = eval_one(interp, args, "typeof")?;
        let name = interp.type_names.for_value(&value);
        Ok(Value::String(name))
    });
}
