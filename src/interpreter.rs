// ABOUTME: Interpreter instance: owns scope chain, host, and last result/error

use crate::env::Scope;
use crate::error::LispError;
use crate::host::{DefaultHost, Host};
use crate::value::{BuiltinFunction, Value};
use std::rc::Rc;

/// Cached sentinel `Rc<str>` for each of the eight type names, built once per
/// `Interpreter`. `typeof` and `==`'s identity fast path rely on these being
/// the *same* allocation across calls, not just equal text.
pub struct TypeNames {
    pub nil: Rc<str>,
    pub integer: Rc<str>,
    pub real: Rc<str>,
    pub string: Rc<str>,
    pub symbol: Rc<str>,
    pub function: Rc<str>,
    pub builtin: Rc<str>,
    pub cell: Rc<str>,
}

impl TypeNames {
    fn new() -> Self {
        TypeNames {
            nil: Rc::from("nil"),
            integer: Rc::from("integer"),
            real: Rc::from("real"),
            string: Rc::from("string"),
            symbol: Rc::from("symbol"),
            function: Rc::from("function"),
            builtin: Rc::from("builtin"),
            cell: Rc::from("cell"),
        }
    }

    pub fn for_value(&self, value: &Value) -> Rc<str> {
        match value {
            Value::Nil => self.nil.clone(),
            Value::Integer(_) => self.integer.clone(),
            Value::Real(_) => self.real.clone(),
            Value::String(_) => self.string.clone(),
            Value::Symbol(_) => self.symbol.clone(),
            Value::Function(_) => self.function.clone(),
            Value::Builtin(_) => self.builtin.clone(),
            Value::Cell(_) => self.cell.clone(),
        }
    }
}

pub struct Interpreter {
    host: Box<dyn Host>,
    root: Rc<Scope>,
    current: Rc<Scope>,
    last_result: Value,
    last_error: Option<LispError>,
    pub type_names: TypeNames,
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new(Box::new(DefaultHost))
    }
}

impl Interpreter {
    pub fn new(host: Box<dyn Host>) -> Self {
        let root = Scope::root();
        let mut interp = Interpreter {
            host,
            current: root.clone(),
            root,
            last_result: Value::Nil,
            last_error: None,
            type_names: TypeNames::new(),
        };
        crate::builtins::register_builtins(&mut interp);
        interp
    }

    pub fn host_mut(&mut self) -> &mut dyn Host {
        self.host.as_mut()
    }

    pub fn current_scope(&self) -> Rc<Scope> {
        self.current.clone()
    }

    pub fn root_scope(&self) -> Rc<Scope> {
        self.root.clone()
    }

    /// Runs `f` with `scope` installed as current, then restores the
    /// previous current scope — including on an error path, since `f`'s
    /// result is a plain value, not something that can skip the restore.
    pub fn with_scope<F, R>(&mut self, scope: Rc<Scope>, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        let saved = std::mem::replace(&mut self.current, scope);
        let result = f(self);
        self.current = saved;
        result
    }

    pub fn get_binding(&self, name: &str) -> Option<Value> {
        self.current.query(name)
    }

    pub fn set_binding(&self, name: impl Into<Rc<str>>, value: Value) {
        self.current.set(name.into(), value);
    }

    pub fn define_root(&self, name: impl Into<Rc<str>>, value: Value) {
        self.root.set(name.into(), value);
    }

    /// Lexes, parses, and evaluates one top-level expression. On success,
    /// stores the result as the most recent one; on failure, records the
    /// error without disturbing the previous result.
    pub fn eval_source(&mut self, source: &str) -> Result<Value, LispError> {
        self.last_error = None;
        let outcome = crate::parser::parse_source(source).and_then(|value| self.eval(value));
        match outcome {
            Ok(value) => {
                self.last_result = value.clone();
                Ok(value)
            }
            Err(err) => {
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    pub fn eval(&mut self, value: Value) -> Result<Value, LispError> {
        crate::eval::eval(self, value)
    }

    pub fn last_result(&self) -> &Value {
        &self.last_result
    }

    pub fn last_error_message(&self) -> Option<String> {
        self.last_error.as_ref().map(|err| err.to_string())
    }

    /// Binds `name` in the root scope to a host-provided function. The
    /// closure captures whatever state it needs directly; there is no
    /// separate user-data pointer or destructor callback because Rust's
    /// closures and `Drop` already provide that lifecycle.
    pub fn register_host_function(
        &mut self,
        name: &str,
        f: impl Fn(&mut Interpreter, &mut HostCall) -> Result<(), LispError> + 'static,
    ) {
        let name_rc: Rc<str> = Rc::from(name);
        let bound_name = name_rc.clone();
        let func = Rc::new(move |interp: &mut Interpreter, raw_args: &Value| {
            let (operands, _tail) = raw_args.to_vec_with_tail();
            let mut call = HostCall {
                operands,
                ret: Value::Nil,
            };
            f(interp, &mut call)?;
            Ok(call.ret)
        });
        self.root.set(
            name_rc.clone(),
            Value::Builtin(Rc::new(BuiltinFunction {
                name: bound_name,
                func,
            })),
        );
    }
}

/// Positional argument accessor / return-value setter handed to a
/// host-registered function. Each accessor evaluates the operand at `pos` in
/// the caller's current scope, then coerces it; a missing operand behaves as
/// `Nil`, matching the scope `enter` rule that absent arguments are empty.
pub struct HostCall {
    operands: Vec<Value>,
    ret: Value,
}

impl HostCall {
    fn operand(&self, pos: usize) -> Value {
        self.operands.get(pos).cloned().unwrap_or(Value::Nil)
    }

    pub fn arg_integer(&self, interp: &mut Interpreter, pos: usize) -> Result<i64, LispError> {
        let evaluated = interp.eval(self.operand(pos))?;
        coerce_integer(&evaluated)
    }

    pub fn arg_real(&self, interp: &mut Interpreter, pos: usize) -> Result<f64, LispError> {
        let evaluated = interp.eval(self.operand(pos))?;
        coerce_real(&evaluated)
    }

    pub fn arg_string(&self, interp: &mut Interpreter, pos: usize) -> Result<String, LispError> {
        let evaluated = interp.eval(self.operand(pos))?;
        Ok(match evaluated {
            Value::String(s) => s.to_string(),
            other => crate::printer::render(&other),
        })
    }

    pub fn set_return(&mut self, value: Value) {
        self.ret = value;
    }
}

fn coerce_integer(value: &Value) -> Result<i64, LispError> {
    match value {
        Value::Integer(n) => Ok(*n),
        Value::Real(r) => Ok(*r as i64),
        Value::Nil => Ok(0),
        Value::String(s) => s
            .parse::<i64>()
            .map_err(|_| LispError::unsupported(format!("cannot coerce \"{}\" to integer", s))),
        other => Err(LispError::unsupported(format!(
            "cannot coerce {} to integer",
            other.type_name()
        ))),
    }
}

fn coerce_real(value: &Value) -> Result<f64, LispError> {
    match value {
        Value::Real(r) => Ok(*r),
        Value::Integer(n) => Ok(*n as f64),
        Value::Nil => Ok(0.0),
        Value::String(s) => s
            .parse::<f64>()
            .map_err(|_| LispError::unsupported(format!("cannot coerce \"{}\" to real", s))),
        other => Err(LispError::unsupported(format!(
            "cannot coerce {} to real",
            other.type_name()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::NullHost;

    #[test]
    fn test_eval_source_records_last_result() {
        let mut interp = Interpreter::new(Box::new(NullHost::default()));
        let result = interp.eval_source("(+ 1 2 3)").unwrap();
        assert!(matches!(result, Value::Integer(6)));
        assert!(matches!(interp.last_result(), Value::Integer(6)));
        assert!(interp.last_error_message().is_none());
    }

    #[test]
    fn test_eval_source_records_error_without_clobbering_result() {
        let mut interp = Interpreter::new(Box::new(NullHost::default()));
        interp.eval_source("(+ 1 2)").unwrap();
        assert!(interp.eval_source("undefined-symbol").is_err());
        assert!(interp.last_error_message().is_some());
        assert!(matches!(interp.last_result(), Value::Integer(3)));
    }

    #[test]
    fn test_register_host_function() {
        let mut interp = Interpreter::new(Box::new(NullHost::default()));
        interp.register_host_function("host-double", |interp, call| {
            let n = call.arg_integer(interp, 0)?;
            call.set_return(Value::Integer(n * 2));
            Ok(())
        });
        let result = interp.eval_source("(host-double 21)").unwrap();
        assert!(matches!(result, Value::Integer(42)));
    }

    #[test]
    fn test_typeof_sentinel_identity() {
        let interp = Interpreter::new(Box::new(NullHost::default()));
        let a = interp.type_names.for_value(&Value::Integer(1));
        let b = interp.type_names.for_value(&Value::Integer(2));
        assert!(Rc::ptr_eq(&a, &b));
    }
}
