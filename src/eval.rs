// ABOUTME: Evaluator module for executing parsed Lisp expressions

use crate::env::Scope;
use crate::error::LispError;
use crate::interpreter::Interpreter;
use crate::value::{LispFunction, Value};
use std::rc::Rc;

/// Reduces `value` to a result under the interpreter's current scope. No
/// tail-call optimization and no macro expansion: this is a plain recursive
/// evaluator, matching the apply-form dispatch rule exactly.
pub fn eval(interp: &mut Interpreter, value: Value) -> Result<Value, LispError> {
    match value {
        Value::Nil => Ok(Value::Nil),
        Value::Symbol(name) => interp
            .get_binding(&name)
            .ok_or_else(|| LispError::Error(format!("scope query failed: {}", name))),
        Value::Cell(cons) => apply_form(interp, &cons.car, &cons.cdr),
        atom => Ok(atom),
    }
}

fn apply_form(interp: &mut Interpreter, operator_expr: &Value, args: &Value) -> Result<Value, LispError> {
    let operator = eval(interp, operator_expr.clone())?;
    if operator.is_cell() {
        return Err(LispError::bad_argument("non-atomic operator is not executable"));
    }
    match operator {
        Value::Function(func) => apply_function(interp, &func, args),
        Value::Builtin(builtin) => (builtin.func)(interp, args),
        _ => Err(LispError::bad_argument("atomic operator is not executable")),
    }
}

/// Applies a user function: binds parameters against the caller's current
/// scope (applicative order, evaluated before the callee's scope is
/// installed), then evaluates each body form under a child of the caller's
/// current scope, returning the last. This dialect has no closures, so the
/// child frame is always of the *caller's* current scope, never a scope
/// captured when the function was defined.
pub fn apply_function(interp: &mut Interpreter, func: &LispFunction, args: &Value) -> Result<Value, LispError> {
    let child = Scope::child(interp.current_scope());
    bind_parameters(interp, &child, &func.params, args)?;
    interp.with_scope(child, |interp| {
        let mut last = Value::Nil;
        for form in &func.body {
            last = eval(interp, form.clone())?;
        }
        Ok(last)
    })
}

/// Zips the parameter list against the unevaluated argument list. Each
/// argument is evaluated here, in the caller's still-current scope, before
/// being bound into `child`. Missing arguments bind to Nil; extra arguments
/// are silently discarded — both preserved exactly as specified.
fn bind_parameters(
    interp: &mut Interpreter,
    child: &Rc<Scope>,
    params: &Value,
    args: &Value,
) -> Result<(), LispError> {
    let mut remaining_params = params.clone();
    let mut remaining_args = args.clone();
    loop {
        let param_cons = match &remaining_params {
            Value::Cell(cons) => cons.clone(),
            _ => break,
        };
        let param_name = match &param_cons.car {
            Value::Symbol(name) => name.clone(),
            _ => return Err(LispError::bug("parameter list contains a non-symbol")),
        };
        let (arg_expr, rest_args) = match &remaining_args {
            Value::Cell(cons) => (cons.car.clone(), cons.cdr.clone()),
            _ => (Value::Nil, Value::Nil),
        };
        let arg_value = eval(interp, arg_expr)?;
        child.set(param_name, arg_value);
        remaining_params = param_cons.cdr.clone();
        remaining_args = rest_args;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::NullHost;
    use crate::interpreter::Interpreter;

    fn eval_str(interp: &mut Interpreter, source: &str) -> Value {
        interp.eval_source(source).unwrap()
    }

    #[test]
    fn test_self_evaluating_atoms() {
        let mut interp = Interpreter::new(Box::new(NullHost::default()));
        assert!(matches!(eval_str(&mut interp, "42"), Value::Integer(42)));
        assert!(matches!(eval_str(&mut interp, "3.5"), Value::Real(r) if r == 3.5));
    }

    #[test]
    fn test_unbound_symbol_is_an_error() {
        let mut interp = Interpreter::new(Box::new(NullHost::default()));
        assert!(interp.eval_source("not-bound").is_err());
    }

    #[test]
    fn test_non_atomic_operator_is_an_error() {
        let mut interp = Interpreter::new(Box::new(NullHost::default()));
        assert!(interp.eval_source("((quote (1 2)) 3)").is_err());
    }

    #[test]
    fn test_non_callable_atom_operator_is_an_error() {
        let mut interp = Interpreter::new(Box::new(NullHost::default()));
        assert!(interp.eval_source("(1 2 3)").is_err());
    }

    #[test]
    fn test_user_function_application() {
        let mut interp = Interpreter::new(Box::new(NullHost::default()));
        eval_str(&mut interp, "(set f (lambda (x y) (+ x y)))");
        assert!(matches!(eval_str(&mut interp, "(f 10 20)"), Value::Integer(30)));
    }

    #[test]
    fn test_extra_arguments_are_discarded() {
        let mut interp = Interpreter::new(Box::new(NullHost::default()));
        eval_str(&mut interp, "(set f (lambda (x) x))");
        assert!(matches!(eval_str(&mut interp, "(f 1 2 3)"), Value::Integer(1)));
    }

    #[test]
    fn test_missing_arguments_bind_to_nil() {
        let mut interp = Interpreter::new(Box::new(NullHost::default()));
        eval_str(&mut interp, "(set f (lambda (x y) (nil? y)))");
        let result = eval_str(&mut interp, "(f 1)");
        assert!(matches!(result, Value::Integer(1)));
    }

    #[test]
    fn test_no_closure_capture() {
        let mut interp = Interpreter::new(Box::new(NullHost::default()));
        eval_str(&mut interp, "(set make-adder (lambda (n) (lambda (x) (+ n x))))");
        eval_str(&mut interp, "(set add5 (make-adder 5))");
        // n is not captured: calling add5 looks n up in the caller's scope at
        // call time, not in make-adder's scope, so this is unbound.
        assert!(interp.eval_source("(add5 10)").is_err());
    }
}
