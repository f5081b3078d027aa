// ABOUTME: Recursive-descent parser consuming a token stream into a value tree

use crate::error::LispError;
use crate::lexer::Token;
use crate::value::Value;

struct TokenCursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> TokenCursor<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        TokenCursor { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn remaining(&self) -> usize {
        self.tokens.len().saturating_sub(self.pos)
    }
}

/// Parses exactly one top-level value from the front of the token stream.
/// Trailing tokens are ignored, matching the single-expression-per-call
/// non-goal.
pub fn parse_one(tokens: &[Token]) -> Result<Value, LispError> {
    let mut cursor = TokenCursor::new(tokens);
    parse_value(&mut cursor)
}

fn parse_value(cursor: &mut TokenCursor) -> Result<Value, LispError> {
    match cursor.next() {
        None => Err(LispError::Error("unexpected end of input".to_string())),
        Some(Token::Integer(n)) => Ok(Value::Integer(*n)),
        Some(Token::Real(r)) => Ok(Value::Real(*r)),
        Some(Token::String(s)) => Ok(Value::string(s.clone())),
        Some(Token::Symbol(s)) => Ok(Value::symbol(s.clone())),
        Some(Token::Nil) => Ok(Value::Nil),
        Some(Token::RParen) => Err(LispError::Error("unexpected ')'".to_string())),
        Some(Token::LParen) => parse_list(cursor),
        Some(Token::Quote) => {
            let mut quote_count = 1;
            while matches!(cursor.peek(), Some(Token::Quote)) {
                cursor.next();
                quote_count += 1;
            }
            let mut value = parse_value(cursor)?;
            for _ in 0..quote_count {
                value = Value::list(vec![Value::symbol("quote"), value]);
            }
            Ok(value)
        }
    }
}

fn parse_list(cursor: &mut TokenCursor) -> Result<Value, LispError> {
    let mut items = Vec::new();
    loop {
        match cursor.peek() {
            None => return Err(LispError::Error("unterminated list".to_string())),
            Some(Token::RParen) => {
                cursor.next();
                return Ok(Value::list(items));
            }
            _ => items.push(parse_value(cursor)?),
        }
    }
}

/// Lexes and parses one top-level expression from source text.
pub fn parse_source(source: &str) -> Result<Value, LispError> {
    let tokens = crate::lexer::lex(source)?;
    parse_one(&tokens)
}

#[allow(dead_code)]
pub fn trailing_token_count(tokens: &[Token]) -> Result<usize, LispError> {
    let mut cursor = TokenCursor::new(tokens);
    parse_value(&mut cursor)?;
    Ok(cursor.remaining())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_atoms() {
        assert!(matches!(parse_source("42").unwrap(), Value::Integer(42)));
        assert!(matches!(parse_source("3.5").unwrap(), Value::Real(r) if r == 3.5));
        assert!(parse_source("nil").unwrap().is_nil());
    }

    #[test]
    fn test_parse_empty_list_is_nil() {
        assert!(parse_source("()").unwrap().is_nil());
    }

    #[test]
    fn test_parse_simple_call() {
        let parsed = parse_source("(+ 1 2 3)").unwrap();
        assert_eq!(format!("{}", parsed), "(+ 1 2 3)");
    }

    #[test]
    fn test_parse_nested_list() {
        let parsed = parse_source("(a (b c) d)").unwrap();
        assert_eq!(format!("{}", parsed), "(a (b c) d)");
    }

    #[test]
    fn test_parse_quote() {
        let parsed = parse_source("'x").unwrap();
        assert_eq!(format!("{}", parsed), "(quote x)");
    }

    #[test]
    fn test_parse_nested_quote() {
        let parsed = parse_source("''x").unwrap();
        assert_eq!(format!("{}", parsed), "(quote (quote x))");
    }

    #[test]
    fn test_trailing_tokens_are_ignored() {
        let tokens = crate::lexer::lex("1 2 3").unwrap();
        let value = parse_one(&tokens).unwrap();
        assert!(matches!(value, Value::Integer(1)));
    }

    #[test]
    fn test_unterminated_list_is_an_error() {
        let tokens = crate::lexer::lex("(a b").unwrap();
        assert!(parse_one(&tokens).is_err());
    }

    #[test]
    fn test_stray_close_paren_is_an_error() {
        let tokens = crate::lexer::lex(")").unwrap();
        assert!(parse_one(&tokens).is_err());
    }
}
