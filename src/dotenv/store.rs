use regex::Regex;
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors produced by [`DotenvStore`] when the backing file cannot be
/// accessed.
///
/// The variants deliberately separate "the file is simply not there"
/// (recoverable, callers may treat it as an empty environment) from
/// "the file is there but off limits" (callers should report and abort).
#[derive(Debug, Error)]
pub enum DotenvError {
    /// The file (or its containing directory) does not exist.
    #[error("environment file not found at {}", path.display())]
    NotFound { path: PathBuf },
    /// The file exists but cannot be read or written.
    #[error("permission denied for environment file at {}", path.display())]
    PermissionDenied { path: PathBuf },
    /// Any other I/O failure.
    #[error("unable to access the environment file at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Map an `io::Error` onto the matching [`DotenvError`] variant.
fn classify(path: &Path, err: io::Error) -> DotenvError {
    match err.kind() {
        io::ErrorKind::NotFound => DotenvError::NotFound {
            path: path.to_path_buf(),
        },
        io::ErrorKind::PermissionDenied => DotenvError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => DotenvError::Io {
            path: path.to_path_buf(),
            source: err,
        },
    }
}

/// Line-aware `.env` file editor.
///
/// A store is bound to one file path. Loading parses every line of the form
/// `[export ]NAME=VALUE` / `[export ]NAME="VALUE"` into an in-memory map and
/// remembers the physical line each variable came from. Writing a variable
/// back either replaces that exact line in place or, for a new variable,
/// appends a fresh line, leaving comments, blank lines, and anything else
/// the parser did not recognize untouched.
///
/// Later occurrences of the same name override earlier ones, mirroring what
/// a shell would do when sourcing the file.
///
/// One store per process invocation, one writer at a time: there is no file
/// locking, and two concurrent invocations editing the same file can lose
/// one of the updates. See the module docs for the accepted-limitation note.
pub struct DotenvStore {
    path: PathBuf,
    entries: HashMap<String, String>,
    line_numbers: HashMap<String, usize>,
}

impl DotenvStore {
    /// Create a store bound to `path` and parse the file if it exists.
    ///
    /// A missing file is not an error: the store just starts empty and the
    /// file will be created on the first [`set`](Self::set).
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, DotenvError> {
        let mut store = Self {
            path: path.into(),
            entries: HashMap::new(),
            line_numbers: HashMap::new(),
        };
        if store.path.exists() {
            store.load()?;
        }
        Ok(store)
    }

    /// The backing file path this store was constructed with.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-parse the backing file, replacing all in-memory state.
    fn load(&mut self) -> Result<(), DotenvError> {
        let lines = read_lines(&self.path)?;
        self.entries.clear();
        self.line_numbers.clear();

        let setter = setter_pattern();
        for (number, line) in lines.iter().enumerate() {
            if let Some((name, value)) = parse_assignment(line, &setter) {
                self.entries.insert(name.clone(), value);
                self.line_numbers.insert(name, number);
            }
        }
        Ok(())
    }

    /// Does the file define `name`?
    pub fn has(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Value of `name`, or `None` if the file does not define it.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Snapshot of all variables in the order they appear in the file.
    pub fn all(&self) -> Vec<(String, String)> {
        let mut vars: Vec<(&String, &String)> = self.entries.iter().collect();
        vars.sort_by_key(|(name, _)| {
            self.line_numbers.get(*name).copied().unwrap_or(usize::MAX)
        });
        vars.into_iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    /// Set `name` to `value`, writing the change through to the file.
    ///
    /// The composed line is `NAME="value"` (with `\` and `"` in the value
    /// backslash-escaped), prefixed with `export ` when `export` is true.
    /// If the variable was already present, the line it was parsed from is
    /// replaced in place; otherwise the line is appended and the file is
    /// created if necessary.
    ///
    /// After writing, the store re-reads the whole file so that values and
    /// line numbers match the on-disk state exactly, including any edits
    /// made externally since the last load.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read back or written, e.g.
    /// when it is read-only or its directory does not exist.
    ///
    /// # Returns
    /// The composed line, so callers can display what was written.
    pub fn set(
        &mut self,
        name: &str,
        value: &str,
        export: bool,
    ) -> Result<String, DotenvError> {
        let line = compose_line(name, value, export);
        let number = self.line_numbers.get(name).copied();
        self.write_line(&line, number)?;
        self.load()?;
        Ok(line)
    }

    /// Write one composed line to the file: in place at `number`, or
    /// appended when `number` is `None`.
    fn write_line(&self, line: &str, number: Option<usize>) -> Result<(), DotenvError> {
        let Some(number) = number else {
            return self.append_line(line);
        };

        let mut lines = read_lines(&self.path)?;
        if number < lines.len() {
            lines[number] = line.to_string();
        } else {
            // The file shrank underneath us since the last load.
            lines.push(line.to_string());
        }
        fs::write(&self.path, lines.join("\n")).map_err(|e| classify(&self.path, e))
    }

    fn append_line(&self, line: &str) -> Result<(), DotenvError> {
        // An unterminated final line would otherwise swallow the append.
        let needs_newline = match fs::read(&self.path) {
            Ok(bytes) => !bytes.is_empty() && bytes.last() != Some(&b'\n'),
            Err(e) if e.kind() == io::ErrorKind::NotFound => false,
            Err(e) => return Err(classify(&self.path, e)),
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| classify(&self.path, e))?;
        let prefix = if needs_newline { "\n" } else { "" };
        file.write_all(format!("{prefix}{line}\n").as_bytes())
            .map_err(|e| classify(&self.path, e))
    }
}

/// Matcher for assignment lines: optional `export` keyword, a shell-style
/// identifier, `=`, and the raw value (possibly quoted).
fn setter_pattern() -> Regex {
    Regex::new(r"^(?:export\s+)?([A-Za-z_][A-Za-z0-9_]*)\s*=\s*(.*)$").unwrap()
}

/// Split raw file contents into physical lines.
///
/// Handles LF, CRLF, and lone-CR endings without any process-wide state.
/// A single trailing newline does not produce a phantom empty line.
fn read_lines(path: &Path) -> Result<Vec<String>, DotenvError> {
    let text = fs::read_to_string(path).map_err(|e| classify(path, e))?;
    Ok(split_lines(&text))
}

fn split_lines(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines: Vec<String> = normalized.split('\n').map(str::to_string).collect();
    if lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

/// Extract `(name, value)` from one line, or `None` for blank lines,
/// comments, and anything that does not look like an assignment.
fn parse_assignment(line: &str, setter: &Regex) -> Option<(String, String)> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    let caps = setter.captures(trimmed)?;
    let name = caps[1].to_string();
    let value = unquote(caps[2].trim());
    Some((name, value))
}

/// Strip surrounding matching quotes from a raw value.
///
/// Double-quoted values have `\"` and `\\` unescaped; single-quoted values
/// are taken literally; unquoted values are returned as-is.
fn unquote(raw: &str) -> String {
    if raw.len() >= 2 {
        let mut chars = raw.chars();
        // The quote characters are ASCII, so slicing off one byte at each
        // end is safe in the matching arms.
        match (chars.next(), chars.next_back()) {
            (Some('"'), Some('"')) => return unescape(&raw[1..raw.len() - 1]),
            (Some('\''), Some('\'')) => return raw[1..raw.len() - 1].to_string(),
            _ => {}
        }
    }
    raw.to_string()
}

fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(escaped @ ('"' | '\\')) => out.push(escaped),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Compose the line that [`DotenvStore::set`] writes.
///
/// The value is always double-quoted; only `\` and `"` are escaped, so
/// spaces, `=`, `#`, etc. pass through untouched.
fn compose_line(name: &str, value: &str, export: bool) -> String {
    let prefix = if export { "export " } else { "" };
    format!("{prefix}{name}=\"{}\"", escape(value))
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
