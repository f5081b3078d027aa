//! # Built-in Functions Module
//!
//! Core built-in functions for the Lisp interpreter, organized into 7 categories.
//!
//! ## Categories
//!
//! - **[arithmetic]** (5): +, -, *, /, mod - Numeric operations
//! - **[comparison]** (5): <, <=, >, >=, == - Value comparisons
//! - **[logic]** (2): and, or - Short-circuiting logical operators
//! - **[types]** (6): true?, false?, atom?, cell?, nil?, typeof - Type/truth predicates
//! - **[lists]** (5): car, cdr, cons, list, reverse - List manipulation
//! - **[special_forms]** (5): quote, lambda, cond, set, eval - Evaluation control
//! - **[io]** (2): println, prompt - Host-mediated I/O
//!
//! Each category is a sub-module with its own register function.

use crate::error::LispError;
use crate::interpreter::Interpreter;
use crate::value::{BuiltinFunction, Value};
use std::rc::Rc;

/// Binds `name` in the root scope to a builtin dispatch closure. Shared by
/// every category module so each one reads as a flat list of definitions
/// rather than repeating the `Rc<BuiltinFunction>` construction.
pub(crate) fn define(
    interp: &mut Interpreter,
    name: &str,
    func: impl Fn(&mut Interpreter, &Value) -> Result<Value, LispError> + 'static,
) {
    let name_rc: Rc<str> = Rc::from(name);
    interp.define_root(
        name_rc.clone(),
        Value::Builtin(Rc::new(BuiltinFunction {
            name: name_rc,
            func: Rc::new(func),
        })),
    );
}

pub mod arithmetic;
pub mod comparison;
pub mod io;
pub mod lists;
pub mod logic;
pub mod special_forms;
pub mod types;

/// Registers all built-in functions, plus the `#t`/`#f` root bindings, in
/// the interpreter's root scope.
pub fn register_builtins(interp: &mut Interpreter) {
    arithmetic::register(interp);
    comparison::register(interp);
    logic::register(interp);
    types::register(interp);
    lists::register(interp);
    special_forms::register(interp);
    io::register(interp);

    interp.define_root("#t", Value::Integer(1));
    interp.define_root("#f", Value::Integer(0));
}
