//! Host-mediated I/O: println, prompt
//!
//! Both route through `Interpreter`'s `Host` trait object rather than
//! `print!`/`io::stdin()` directly, so an embedding host can redirect or
//! suppress the interpreter's I/O (see `crate::host`).

use super::define;
use crate::error::LispError;
use crate::host::Channel;
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

pub fn register(interp: &mut Interpreter) {
    define(interp, "println", |interp, args| {
        let value = eval_one(interp, args, "println")?;
        match value {
            Value::String(s) => {
                interp.host_mut().print(Channel::Stdout, &s);
                interp.host_mut().print(Channel::Stdout, "\n");
                Ok(Value::Nil)
            }
            other => Err(LispError::unsupported(format!(
                "println: expected a string, got {}",
                other.type_name()
            ))),
        }
    });

    define(interp, "prompt", |interp, args| {
        let value = eval_one(interp, args, "prompt")?;
        match value {
            Value::String(s) => {
                interp.host_mut().print(Channel::Stdout, &s);
                match interp.host_mut().read_line() {
                    Some(line) => Ok(Value::string(line)),
                    None => Err(LispError::unsupported("prompt: no line-input host configured")),
                }
            }
            other => Err(LispError::unsupported(format!(
                "prompt: expected a string, got {}",
                other.type_name()
            ))),
        }
    });
}
