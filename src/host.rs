// ABOUTME: Host callback abstraction for the interpreter's I/O-facing builtins

use std::io::{self, BufRead, Write};

/// Which output stream a `print` call targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Stdout,
    Stderr,
}

/// The embedding application's I/O capability suite. `println` writes through
/// `print`; `prompt` writes through `print` then reads through `read_line`.
///
/// There is no allocate/free pair here: Rust's global allocator is ambient,
/// so proxying allocation through host callbacks (as a C embedding API would)
/// has no idiomatic counterpart and no externally observable effect this
/// interpreter's behavior depends on.
pub trait Host {
    fn print(&mut self, channel: Channel, text: &str);

    /// Reads one line (without its trailing newline). Returns `None` at
    /// end-of-input, or when this host has no line-input capability
    /// configured at all (see `NullHost`).
    fn read_line(&mut self) -> Option<String>;
}

/// Reads and writes real process stdio. `read_line` returns `None` only at
/// end-of-input.
#[derive(Debug, Default)]
pub struct DefaultHost;

impl Host for DefaultHost {
    fn print(&mut self, channel: Channel, text: &str) {
        match channel {
            Channel::Stdout => {
                print!("{}", text);
                let _ = io::stdout().flush();
            }
            Channel::Stderr => {
                eprint!("{}", text);
            }
        }
    }

    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        let bytes_read = io::stdin().lock().read_line(&mut line).ok()?;
        if bytes_read == 0 {
            return None;
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Some(line)
    }
}

/// A host with no line-input capability: `prompt` always fails with
/// `Unsupported` against this host. `print` is still honored, buffered in
/// memory, which makes it useful for embedding tests.
#[derive(Debug, Default)]
pub struct NullHost {
    pub stdout: String,
    pub stderr: String,
}

impl Host for NullHost {
    fn print(&mut self, channel: Channel, text: &str) {
        match channel {
            Channel::Stdout => self.stdout.push_str(text),
            Channel::Stderr => self.stderr.push_str(text),
        }
    }

    fn read_line(&mut self) -> Option<String> {
        None
    }
}
