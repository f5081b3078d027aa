//! List operations: cons, car, cdr, list, reverse
//!
//! Operate on the cons-cell representation directly; `car`/`cdr` are total
//! over atoms and nil (see `Value::car`/`Value::cdr`), so these builtins
//! never reject a non-cell operand the way a length-checked vector model
//! would.

use super::define;
use crate::error::LispError;
use crate::interpreter::Interpreter;
use crate::value::Value;

fn eval_all(interp: &mut Interpreter, args: &Value) -> Result<Vec<Value>, LispError> {
    let mut out = Vec::new();
    for item in args.iter_list() {
        out.push(interp.eval(item.clone())?);
    }
    Ok(out)
}

fn eval_one(interp: &mut Interpreter, args: &Value, name: &str) -> Result<Value, LispError> {
    let values = eval_all(interp, args)?;
    if values.len() != 1 {
        return Err(LispError::bad_argument(format!(
            "{}: expected exactly 1 argument",
            name
        )));
    }
    Ok(values.into_iter().next().unwrap())
}

pub fn register(interp: &mut Interpreter) {
    define(interp, "cons", |interp, args| {
        let values = eval_all(interp, args)?;
        if values.len() != 2 {
            return Err(LispError::bad_argument("cons: expected exactly 2 arguments"));
        }
        let mut iter = values.into_iter();
        let head = iter.next().unwrap();
        let tail = iter.next().unwrap();
        Ok(Value::cons(head, tail))
    });

    define(interp, "car", |interp, args| {
        Ok(eval_one(interp, args, "car")?.car())
    });

    define(interp, "cdr", |interp, args| {
        Ok(eval_one(interp, args, "cdr")?.cdr())
    });

    define(interp, "list", |interp, args| {
        let values = eval_all(interp, args)?;
        Ok(Value::list(values))
    });

    define(interp, "reverse", |interp, args| {
        Ok(eval_one(interp, args, "reverse")?.reverse())
    });
}
