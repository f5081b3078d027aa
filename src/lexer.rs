// ABOUTME: Byte-level tokenizer producing a finite linear token stream

use crate::error::LispError;

const LEXEME_CAPACITY: usize = 127;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Integer(i64),
    Real(f64),
    String(String),
    Symbol(String),
    Nil,
    LParen,
    RParen,
    Quote,
}

struct Lexer<'a> {
    bytes: &'a [u8],
    pos: usize,
    lexeme: Vec<u8>,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Lexer {
            bytes: source.as_bytes(),
            pos: 0,
            lexeme: Vec::new(),
            tokens: Vec::new(),
        }
    }

    fn push_byte(&mut self, b: u8) -> Result<(), LispError> {
        if self.lexeme.len() >= LEXEME_CAPACITY {
            return Err(LispError::Overflow);
        }
        self.lexeme.push(b);
        Ok(())
    }

    fn flush_lexeme(&mut self) {
        if self.lexeme.is_empty() {
            return;
        }
        let text = String::from_utf8_lossy(&self.lexeme).into_owned();
        self.lexeme.clear();
        self.tokens.push(classify(&text));
    }

    fn flush_string(&mut self) {
        let text = String::from_utf8_lossy(&self.lexeme).into_owned();
        self.lexeme.clear();
        self.tokens.push(Token::String(text));
    }

    fn run(mut self) -> Result<Vec<Token>, LispError> {
        let mut in_string = false;
        while self.pos < self.bytes.len() {
            let b = self.bytes[self.pos];
            if in_string {
                if b == b'"' {
                    self.flush_string();
                    in_string = false;
                } else {
                    self.push_byte(b)?;
                }
                self.pos += 1;
                continue;
            }

            match b {
                b'"' => {
                    self.flush_lexeme();
                    in_string = true;
                }
                b' ' | b'\t' | b'\n' | b'\r' => {
                    self.flush_lexeme();
                }
                b'(' => {
                    self.flush_lexeme();
                    self.tokens.push(Token::LParen);
                }
                b')' => {
                    self.flush_lexeme();
                    self.tokens.push(Token::RParen);
                }
                b'\'' => {
                    self.flush_lexeme();
                    self.tokens.push(Token::Quote);
                }
                _ => {
                    self.push_byte(b)?;
                }
            }
            self.pos += 1;
        }
        // An unterminated string literal silently drops whatever was
        // buffered; the parser, not the lexer, is responsible for detecting
        // structural truncation.
        if !in_string {
            self.flush_lexeme();
        }
        Ok(self.tokens)
    }
}

fn classify(text: &str) -> Token {
    if text == "nil" {
        return Token::Nil;
    }
    if let Some(value) = parse_hex(text) {
        return Token::Integer(value);
    }
    if let Ok(value) = text.parse::<i64>() {
        return Token::Integer(value);
    }
    if let Ok(value) = text.parse::<f64>() {
        return Token::Real(value);
    }
    Token::Symbol(text.to_string())
}

fn parse_hex(text: &str) -> Option<i64> {
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let digits = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X"))?;
    if digits.is_empty() {
        return None;
    }
    let value = i64::from_str_radix(digits, 16).ok()?;
    Some(if negative { -value } else { value })
}

pub fn lex(source: &str) -> Result<Vec<Token>, LispError> {
    Lexer::new(source).run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_call() {
        let tokens = lex("(+ 1 2 3)").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::LParen,
                Token::Symbol("+".to_string()),
                Token::Integer(1),
                Token::Integer(2),
                Token::Integer(3),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_string_literal() {
        let tokens = lex("(println \"hello world\")").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::LParen,
                Token::Symbol("println".to_string()),
                Token::String("hello world".to_string()),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_quote_and_nested_quote() {
        let tokens = lex("''x").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Quote, Token::Quote, Token::Symbol("x".to_string())]
        );
    }

    #[test]
    fn test_nil_and_hex_and_real() {
        let tokens = lex("nil 0x1F -0x2 3.5 -7").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Nil,
                Token::Integer(31),
                Token::Integer(-2),
                Token::Real(3.5),
                Token::Integer(-7),
            ]
        );
    }

    #[test]
    fn test_lexeme_overflow() {
        let long_symbol = "a".repeat(200);
        assert!(matches!(lex(&long_symbol), Err(LispError::Overflow)));
    }

    #[test]
    fn test_dot_is_a_symbol() {
        let tokens = lex("(a . b)").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::LParen,
                Token::Symbol("a".to_string()),
                Token::Symbol(".".to_string()),
                Token::Symbol("b".to_string()),
                Token::RParen,
            ]
        );
    }
}
