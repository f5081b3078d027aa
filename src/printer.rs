// ABOUTME: Canonical textual rendering of values, capped at 1024 bytes

use crate::value::Value;
use std::fmt::Write as _;

const MAX_OUTPUT_BYTES: usize = 1024;

/// Renders `value` to its canonical textual form, truncating the result to
/// at most 1024 bytes at a char boundary. Truncation is silent: the caller
/// has no way to learn whether the text was cut short, matching the printer's
/// documented behavior.
pub fn render(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    truncate(out)
}

fn truncate(mut text: String) -> String {
    if text.len() <= MAX_OUTPUT_BYTES {
        return text;
    }
    let mut boundary = MAX_OUTPUT_BYTES;
    while boundary > 0 && !text.is_char_boundary(boundary) {
        boundary -= 1;
    }
    text.truncate(boundary);
    text
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Nil => out.push_str("nil"),
        Value::Integer(n) => {
            let _ = write!(out, "{}", n);
        }
        Value::Real(r) => write_real(out, *r),
        Value::String(s) => {
            out.push('"');
            out.push_str(s);
            out.push('"');
        }
        Value::Symbol(s) => out.push_str(s),
        Value::Function(_) => out.push_str("<func>"),
        Value::Builtin(_) => out.push_str("<builtin>"),
        Value::Cell(_) => write_cell(out, value),
    }
}

fn write_real(out: &mut String, r: f64) {
    let mut text = format!("{:.6}", r);
    if let Some(dot) = text.find('.') {
        let mut end = text.len();
        while end > dot + 2 && text.as_bytes()[end - 1] == b'0' {
            end -= 1;
        }
        text.truncate(end);
    }
    out.push_str(&text);
}

fn write_cell(out: &mut String, value: &Value) {
    out.push('(');
    let (items, tail) = value.to_vec_with_tail();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        write_value(out, item);
    }
    if let Some(tail) = tail {
        out.push_str(" . ");
        write_value(out, &tail);
    }
    out.push(')');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_real_formatting() {
        assert_eq!(render(&Value::Real(2.5)), "2.5");
        assert_eq!(render(&Value::Real(2.0)), "2.0");
        assert_eq!(render(&Value::Real(0.1)), "0.1");
    }

    #[test]
    fn test_integer_and_nil() {
        assert_eq!(render(&Value::Integer(-3)), "-3");
        assert_eq!(render(&Value::Nil), "nil");
    }

    #[test]
    fn test_string_rendering_unescaped() {
        assert_eq!(render(&Value::string("hi")), "\"hi\"");
    }

    #[test]
    fn test_proper_and_improper_list_rendering() {
        let proper = Value::list(vec![Value::Integer(1), Value::Integer(2)]);
        assert_eq!(render(&proper), "(1 2)");

        let improper = Value::cons(Value::symbol("a"), Value::symbol("b"));
        assert_eq!(render(&improper), "(a . b)");
    }

    #[test]
    fn test_truncation_caps_at_1024_bytes() {
        let long = Value::string("x".repeat(2000));
        let rendered = render(&long);
        assert_eq!(rendered.len(), MAX_OUTPUT_BYTES);
    }
}
