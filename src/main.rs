use clap::Parser;
use embeddable_lisp::Interpreter;
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};
use std::path::PathBuf;

/// A small embeddable Lisp interpreter
#[derive(Parser, Debug)]
#[command(name = "embeddable-lisp")]
#[command(version)]
#[command(about = "A small embeddable tree-walking Lisp interpreter")]
struct CliArgs {
    /// Script file to execute (if omitted, starts the REPL)
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();
    let mut interp = Interpreter::default();

    if let Some(script_path) = args.script {
        run_script(&script_path, &mut interp)?;
        return Ok(());
    }

    run_repl(&mut interp)
}

/// Reads the file and evaluates each top-level form in it, in order. Each
/// `eval_source` call only consumes one expression (the non-goal of
/// multi-expression evaluation per call), so the script runner drives the
/// loop itself, advancing past whatever source text the previous call left
/// unconsumed.
fn run_script(path: &PathBuf, interp: &mut Interpreter) -> Result<(), Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read script file {}: {}", path.display(), e))?;

    let mut remaining = contents.as_str();
    loop {
        remaining = skip_whitespace_and_comments(remaining);
        if remaining.is_empty() {
            break;
        }
        let consumed_end = find_expr_end(remaining)?;
        let expr_text = &remaining[..consumed_end];
        interp
            .eval_source(expr_text)
            .map_err(|e| format!("evaluation error: {}", e))?;
        remaining = &remaining[consumed_end..];
    }
    Ok(())
}

fn run_repl(interp: &mut Interpreter) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::builder().auto_add_history(true).build();
    let mut rl = Editor::<(), rustyline::history::DefaultHistory>::with_config(config)
        .map_err(|e| format!("failed to initialize REPL: {}", e))?;

    let history_file = ".lisp_history";
    let _ = rl.load_history(history_file);

    println!("embeddable-lisp REPL — type (quit) or press Ctrl-D to exit");

    loop {
        let readline = rl.readline("lisp> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if trimmed == "(quit)" || trimmed == "(exit)" {
                    println!("Goodbye!");
                    break;
                }
                match interp.eval_source(trimmed) {
                    Ok(value) => println!("=> {}", value),
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                eprintln!("Error: {}", err);
                break;
            }
        }
    }

    let _ = rl.save_history(history_file);
    Ok(())
}

/// Skips leading whitespace and `;`-prefixed line comments, matching the
/// line-comment convention the lexer itself does not model (the lexer has no
/// notion of comments; stripping them here keeps script files readable
/// without adding comment handling to the core tokenizer).
fn skip_whitespace_and_comments(input: &str) -> &str {
    let mut remaining = input;
    loop {
        remaining = remaining.trim_start();
        if remaining.starts_with(';') {
            match remaining.find('\n') {
                Some(pos) => remaining = &remaining[pos + 1..],
                None => remaining = "",
            }
        } else {
            break;
        }
    }
    remaining
}

/// Finds the end of the next top-level expression (matching-paren balanced,
/// or one bare-atom token) so the script runner can feed `eval_source`
/// exactly one form at a time.
fn find_expr_end(input: &str) -> Result<usize, String> {
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    if i >= bytes.len() {
        return Err("empty input".to_string());
    }

    if bytes[i] == b'(' {
        let mut depth: i32 = 0;
        let mut in_string = false;
        while i < bytes.len() {
            match bytes[i] {
                b'"' => in_string = !in_string,
                b'(' if !in_string => depth += 1,
                b')' if !in_string => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(i + 1);
                    }
                }
                _ => {}
            }
            i += 1;
        }
        Err("unclosed expression".to_string())
    } else {
        while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b')' {
            i += 1;
        }
        Ok(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_expr_end_atom() {
        assert_eq!(find_expr_end("42 rest").unwrap(), 2);
    }

    #[test]
    fn test_find_expr_end_balanced_list() {
        assert_eq!(find_expr_end("(+ 1 (* 2 3)) rest").unwrap(), 13);
    }

    #[test]
    fn test_find_expr_end_unclosed_is_error() {
        assert!(find_expr_end("(+ 1 2").is_err());
    }

    #[test]
    fn test_skip_whitespace_and_comments() {
        let text = "  ; a comment\n  (+ 1 2)";
        assert_eq!(skip_whitespace_and_comments(text), "(+ 1 2)");
    }

    #[test]
    fn test_run_script_evaluates_each_form() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("embeddable-lisp-test-{}.lisp", std::process::id()));
        std::fs::write(&path, "(set x 10)\n(set y (+ x 5))\n").unwrap();

        let mut interp = Interpreter::default();
        run_script(&path, &mut interp).unwrap();
        assert!(matches!(interp.eval_source("y").unwrap(), embeddable_lisp::Value::Integer(15)));

        let _ = std::fs::remove_file(&path);
    }
}
