//! Evaluation-control forms: quote, lambda, cond, set, eval
//!
//! Unlike the arithmetic/comparison/logic/type/list builtins, these do not
//! pre-evaluate every operand uniformly: each manages its own evaluation
//! strategy per §4.6/§4.7, dispatched the same way as any other builtin
//! (there is no evaluator-level special-casing for these names).

use super::define;
use crate::error::LispError;
use crate::interpreter::Interpreter;
use crate::value::{LispFunction, Value};
use std::rc::Rc;

pub fn register(interp: &mut Interpreter) {
    define(interp, "quote", |_interp, args| {
        let (items, tail) = args.to_vec_with_tail();
        if items.len() != 1 || tail.is_some() {
            return Err(LispError::bad_argument("quote: expected exactly 1 argument"));
        }
        Ok(items.into_iter().next().unwrap())
    });

    define(interp, "lambda", |_interp, args| {
        let (forms, tail) = args.to_vec_with_tail();
        if tail.is_some() {
            return Err(LispError::bad_argument("lambda: improper argument list"));
        }
        let mut forms = forms.into_iter();
        let params = forms.next().unwrap_or(Value::Nil);
        let body: Vec<Value> = forms.collect();
        Ok(Value::Function(Rc::new(LispFunction { params, body })))
    });

    define(interp, "cond", |interp, args| {
        for clause in args.iter_list() {
            let (parts, tail) = clause.to_vec_with_tail();
            if parts.len() != 2 || tail.is_some() {
                return Err(LispError::bad_argument(
                    "cond: each clause must be a two-element (test consequent) list",
                ));
            }
            let test = interp.eval(parts[0].clone())?;
            if test.is_truthy() {
                return interp.eval(parts[1].clone());
            }
        }
        Ok(Value::Nil)
    });

    define(interp, "set", |interp, args| {
        let target = args.car();
        let rest = args.cdr();
        match target {
            Value::Symbol(name) => {
                let value = interp.eval(rest.car())?;
                interp.set_binding(name, value.clone());
                Ok(value)
            }
            Value::Cell(cons) => {
                let name = match &cons.car {
                    Value::Symbol(name) => name.clone(),
                    _ => return Err(LispError::bad_argument("set: function name must be a symbol")),
                };
                let params = cons.cdr.clone();
                let (body, tail) = rest.to_vec_with_tail();
                if tail.is_some() {
                    return Err(LispError::bad_argument("set: improper body list"));
                }
                let function = Value::Function(Rc::new(LispFunction { params, body }));
                interp.set_binding(name, function.clone());
                Ok(function)
            }
            _ => Err(LispError::bad_argument(
                "set: first argument must be a symbol or a (name . params) cell",
            )),
        }
    });

    define(interp, "eval", |interp, args| {
        let (items, tail) = args.to_vec_with_tail();
        if items.len() != 1 || tail.is_some() {
            return Err(LispError::bad_argument("eval: expected exactly 1 argument"));
        }
        let once = interp.eval(items[0].clone())?;
        interp.eval(once)
    });
}
