// ABOUTME: Value types representing Lisp data structures and expressions

use crate::error::LispError;
use crate::interpreter::Interpreter;
use std::fmt;
use std::rc::Rc;

/// A function implemented in Rust and exposed to Lisp code under a fixed name.
///
/// The closure receives the unevaluated argument list (the `cdr` of the call
/// cell) and decides its own evaluation strategy, matching the builtin
/// dispatch rule: some builtins pre-evaluate every operand, others (quote,
/// lambda, cond, set, and, or) manage evaluation themselves.
pub type BuiltinFn = Rc<dyn Fn(&mut Interpreter, &Value) -> Result<Value, LispError>>;

pub struct BuiltinFunction {
    pub name: Rc<str>,
    pub func: BuiltinFn,
}

impl fmt::Debug for BuiltinFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltinFunction").field("name", &self.name).finish()
    }
}

/// A user-defined function. Stores only its parameter list and body, never a
/// captured defining scope: this dialect has no lexical closures, so applying
/// a function always builds a child frame of the caller's current scope.
#[derive(Debug)]
pub struct LispFunction {
    pub params: Value,
    pub body: Vec<Value>,
}

/// One cons cell: an ordered pair whose slots may hold any value, including
/// empty. A proper list is a right-nested chain of cells terminated by
/// `Value::Nil`; any other terminator makes the list improper.
#[derive(Debug)]
pub struct Cons {
    pub car: Value,
    pub cdr: Value,
}

#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Integer(i64),
    Real(f64),
    String(Rc<str>),
    Symbol(Rc<str>),
    Function(Rc<LispFunction>),
    Builtin(Rc<BuiltinFunction>),
    Cell(Rc<Cons>),
}

impl Value {
    pub fn symbol(text: impl Into<Rc<str>>) -> Value {
        Value::Symbol(text.into())
    }

    pub fn string(text: impl Into<Rc<str>>) -> Value {
        Value::String(text.into())
    }

    pub fn cons(car: Value, cdr: Value) -> Value {
        Value::Cell(Rc::new(Cons { car, cdr }))
    }

    /// Totalized `car`: atoms (including Nil) return themselves; only a Cell
    /// yields its actual first slot. This mirrors the evaluator's own
    /// list-walking so there is exactly one definition of "car of a non-cell".
    pub fn car(&self) -> Value {
        match self {
            Value::Cell(cons) => cons.car.clone(),
            other => other.clone(),
        }
    }

    /// Totalized `cdr`: atoms and Nil both yield Nil; only a Cell yields its
    /// actual rest.
    pub fn cdr(&self) -> Value {
        match self {
            Value::Cell(cons) => cons.cdr.clone(),
            _ => Value::Nil,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn is_cell(&self) -> bool {
        matches!(self, Value::Cell(_))
    }

    pub fn is_atom(&self) -> bool {
        !self.is_cell()
    }

    /// Falsy values are empty, integer zero, and real zero; everything else
    /// is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Integer(0)) && !matches!(self, Value::Real(r) if *r == 0.0)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Integer(_) => "integer",
            Value::Real(_) => "real",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Function(_) => "function",
            Value::Builtin(_) => "builtin",
            Value::Cell(_) => "cell",
        }
    }

    /// Builds a proper list from `items`, right to left, terminated by Nil.
    pub fn list(items: Vec<Value>) -> Value {
        items
            .into_iter()
            .rev()
            .fold(Value::Nil, |tail, item| Value::cons(item, tail))
    }

    /// Iterates the cells of a (possibly improper) list using the same
    /// totalized car/cdr traversal used throughout the evaluator. Yields
    /// `(element, is_tail)`: `is_tail` is true only for a trailing non-cell,
    /// non-nil improper tail, which is yielded once after all cell cars.
    pub fn iter_list(&self) -> ListIter<'_> {
        ListIter { cursor: self }
    }

    /// Collects a proper or improper list into a vector plus an optional
    /// improper tail value.
    pub fn to_vec_with_tail(&self) -> (Vec<Value>, Option<Value>) {
        let mut items = Vec::new();
        let mut cursor = self;
        loop {
            match cursor {
                Value::Cell(cons) => {
                    items.push(cons.car.clone());
                    cursor = &cons.cdr;
                }
                Value::Nil => return (items, None),
                other => return (items, Some(other.clone())),
            }
        }
    }

    /// List-reverse per the totalized traversal rule: walk every cell,
    /// accumulating `car`s, then fold in a trailing improper tail (if any) as
    /// one more accumulated element. Atoms and Nil pass through unchanged.
    pub fn reverse(&self) -> Value {
        match self {
            Value::Cell(_) => {
                let (items, tail) = self.to_vec_with_tail();
                let mut reversed: Vec<Value> = items.into_iter().rev().collect();
                if let Some(tail) = tail {
                    reversed.insert(0, tail);
                }
                Value::list(reversed)
            }
            other => other.clone(),
        }
    }
}

pub struct ListIter<'a> {
    cursor: &'a Value,
}

impl<'a> Iterator for ListIter<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        match self.cursor {
            Value::Cell(cons) => {
                let item = &cons.car;
                self.cursor = &cons.cdr;
                Some(item)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::printer::render(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_display() {
        assert_eq!(format!("{}", Value::Integer(42)), "42");
        assert_eq!(format!("{}", Value::Integer(-7)), "-7");
    }

    #[test]
    fn test_nil_display() {
        assert_eq!(format!("{}", Value::Nil), "nil");
    }

    #[test]
    fn test_symbol_and_string_display() {
        assert_eq!(format!("{}", Value::symbol("foo")), "foo");
        assert_eq!(format!("{}", Value::string("hello")), "\"hello\"");
    }

    #[test]
    fn test_list_display_with_nested_lists() {
        let simple = Value::list(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]);
        assert_eq!(format!("{}", simple), "(1 2 3)");

        let nested = Value::list(vec![
            Value::Integer(1),
            Value::list(vec![Value::Integer(2), Value::Integer(3)]),
            Value::Integer(4),
        ]);
        assert_eq!(format!("{}", nested), "(1 (2 3) 4)");

        assert_eq!(format!("{}", Value::list(vec![])), "nil");
    }

    #[test]
    fn test_improper_list_display() {
        let improper = Value::cons(Value::symbol("a"), Value::symbol("b"));
        assert_eq!(format!("{}", improper), "(a . b)");
    }

    #[test]
    fn test_totalized_car_cdr_on_atoms() {
        assert_eq!(Value::Integer(5).car().type_name(), "integer");
        assert!(Value::Integer(5).cdr().is_nil());
        assert!(Value::Nil.car().is_nil());
        assert!(Value::Nil.cdr().is_nil());
    }

    #[test]
    fn test_reverse_proper_list() {
        let list = Value::list(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]);
        let reversed = list.reverse();
        assert_eq!(format!("{}", reversed), "(3 2 1)");
    }

    #[test]
    fn test_reverse_atom_and_nil_passthrough() {
        assert!(Value::Nil.reverse().is_nil());
        assert_eq!(format!("{}", Value::Integer(9).reverse()), "9");
    }

    #[test]
    fn test_truthiness() {
        assert!(!Value::Nil.is_truthy());
        assert!(!Value::Integer(0).is_truthy());
        assert!(!Value::Real(0.0).is_truthy());
        assert!(Value::Integer(1).is_truthy());
        assert!(Value::string("").is_truthy());
    }
}
