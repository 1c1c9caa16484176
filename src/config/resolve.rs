//! Resolution of the effective output configuration.

use std::path::{Path, PathBuf};

use super::options::LineOptions;

/// The separator and destination a console task writes with.
///
/// Computed once per task execution and reused for every record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    separator: String,
    output_file: Option<PathBuf>,
}

impl OutputConfig {
    /// Build a config from an already-unescaped separator.
    pub fn new(separator: impl Into<String>, output_file: Option<PathBuf>) -> Self {
        Self {
            separator: separator.into(),
            output_file,
        }
    }

    /// The separator written after every record.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// The output file, or `None` for the console's stdout.
    pub fn output_file(&self) -> Option<&Path> {
        self.output_file.as_deref()
    }

    pub fn is_stdout(&self) -> bool {
        self.output_file.is_none()
    }
}

/// Pick the effective configuration from the shared and task-local scopes.
///
/// If the local scope overrides either option, the local scope is used in
/// full; otherwise the shared scope is used in full. Fields are never mixed
/// across scopes.
pub fn resolve(shared: &LineOptions, local: &LineOptions) -> OutputConfig {
    let (scope, winner) = if local.is_overridden() {
        ("local", local)
    } else {
        ("shared", shared)
    };
    tracing::debug!(
        scope,
        sep = winner.sep(),
        output_file = ?winner.output_file(),
        "resolved line-oriented output options"
    );
    OutputConfig {
        separator: unescape(winner.sep()),
        output_file: winner.output_file().map(Path::to_path_buf),
    }
}

/// Interpret backslash escape sequences in `raw`.
///
/// Supports `\\ \' \" \a \b \f \n \r \t \v`, octal `\ooo`, `\xHH`, `\uXXXX`,
/// `\UXXXXXXXX`, and backslash-newline as a line continuation. Anything
/// else, including a trailing lone backslash, is kept literally.
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        let Some(&(idx, next)) = chars.peek() else {
            out.push('\\');
            break;
        };

        let simple = match next {
            '\n' => Some(None),
            '\\' => Some(Some('\\')),
            '\'' => Some(Some('\'')),
            '"' => Some(Some('"')),
            'a' => Some(Some('\u{07}')),
            'b' => Some(Some('\u{08}')),
            'f' => Some(Some('\u{0c}')),
            'n' => Some(Some('\n')),
            'r' => Some(Some('\r')),
            't' => Some(Some('\t')),
            'v' => Some(Some('\u{0b}')),
            _ => None,
        };
        if let Some(replacement) = simple {
            chars.next();
            if let Some(ch) = replacement {
                out.push(ch);
            }
            continue;
        }

        let rest = &raw[idx..];
        if let Some((ch, consumed)) = numeric_escape(rest) {
            out.push(ch);
            for _ in 0..consumed {
                chars.next();
            }
        } else {
            out.push('\\');
        }
    }

    out
}

/// Decode an octal, `\x`, `\u` or `\U` escape. `rest` starts right after the
/// backslash; returns the char and how many chars of `rest` it used.
fn numeric_escape(rest: &str) -> Option<(char, usize)> {
    let first = rest.chars().next()?;

    if first.is_digit(8) {
        let digits: String = rest.chars().take(3).take_while(|c| c.is_digit(8)).collect();
        let value = u32::from_str_radix(&digits, 8).ok()?;
        return char::from_u32(value).map(|ch| (ch, digits.len()));
    }

    let width = match first {
        'x' => 2,
        'u' => 4,
        'U' => 8,
        _ => return None,
    };
    let digits: String = rest.chars().skip(1).take(width).collect();
    if digits.len() != width || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(&digits, 16).ok()?;
    char::from_u32(value).map(|ch| (ch, width + 1))
}
