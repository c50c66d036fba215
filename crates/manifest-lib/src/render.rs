//! YAML rendering of built documents
//!
//! Block style with two-space indentation. Sequences are indented under
//! their parent key, keys keep insertion order, and long single-line strings
//! are folded (`>-`) near [`LINE_WIDTH`] columns. Whether a string scalar
//! can be written plain or needs quoting is left to `serde_yaml`.

use serde_json::{Map, Value};

use crate::error::Result;

/// Separator placed between documents of a stream
pub const DOCUMENT_SEPARATOR: &str = "---\n";

/// Column at which long strings are folded
pub const LINE_WIDTH: usize = 120;

const INDENT: usize = 2;

/// Folded lines never get narrower than this, however deep the nesting
const MIN_FOLD_WIDTH: usize = 40;

/// Render one document as block-style YAML
pub fn to_yaml(document: &Value) -> Result<String> {
    let mut emitter = Emitter::default();
    match document {
        Value::Object(map) if !map.is_empty() => emitter.mapping(map, 0, false)?,
        Value::Array(items) if !items.is_empty() => emitter.sequence(items, 0, false)?,
        scalar => emitter.scalar_line(scalar, 0)?,
    }
    Ok(emitter.out)
}

/// Render documents and join them into a single stream
pub fn to_yaml_stream(documents: &[Value]) -> Result<String> {
    let rendered = documents
        .iter()
        .map(to_yaml)
        .collect::<Result<Vec<_>>>()?;
    Ok(rendered.join(DOCUMENT_SEPARATOR))
}

#[derive(Default)]
struct Emitter {
    out: String,
}

impl Emitter {
    fn pad(&mut self, indent: usize) {
        self.out.extend(std::iter::repeat(' ').take(indent));
    }

    /// `inline_first` continues the line opened by a `- ` sequence marker
    fn mapping(&mut self, map: &Map<String, Value>, indent: usize, inline_first: bool) -> Result<()> {
        for (i, (key, value)) in map.iter().enumerate() {
            if i > 0 || !inline_first {
                self.pad(indent);
            }
            self.out.push_str(&inline_string(key)?);
            self.out.push(':');
            match value {
                Value::Object(child) if !child.is_empty() => {
                    self.out.push('\n');
                    self.mapping(child, indent + INDENT, false)?;
                }
                Value::Array(items) if !items.is_empty() => {
                    self.out.push('\n');
                    self.sequence(items, indent + INDENT, false)?;
                }
                scalar => {
                    self.out.push(' ');
                    self.scalar_line(scalar, indent + INDENT)?;
                }
            }
        }
        Ok(())
    }

    fn sequence(&mut self, items: &[Value], indent: usize, inline_first: bool) -> Result<()> {
        for (i, item) in items.iter().enumerate() {
            if i > 0 || !inline_first {
                self.pad(indent);
            }
            self.out.push_str("- ");
            match item {
                Value::Object(map) if !map.is_empty() => self.mapping(map, indent + INDENT, true)?,
                Value::Array(nested) if !nested.is_empty() => {
                    self.sequence(nested, indent + INDENT, true)?
                }
                scalar => self.scalar_line(scalar, indent + INDENT)?,
            }
        }
        Ok(())
    }

    /// Write a scalar and end the line; block scalars indent their body by `indent`
    fn scalar_line(&mut self, value: &Value, indent: usize) -> Result<()> {
        let text = match value {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => string_scalar(s, indent)?,
            Value::Array(_) => "[]".to_string(),
            Value::Object(_) => "{}".to_string(),
        };
        self.out.push_str(&text);
        self.out.push('\n');
        Ok(())
    }
}

fn string_scalar(s: &str, indent: usize) -> Result<String> {
    if s.chars().any(|c| c.is_control() && c != '\n' && c != '\t') {
        return Ok(double_quoted(s));
    }
    if s.contains('\n') {
        return Ok(literal_block(s, indent));
    }

    let width = LINE_WIDTH.saturating_sub(indent).max(MIN_FOLD_WIDTH);
    if s.len() > width && !s.starts_with(' ') {
        let lines = fold(s, width);
        if lines.len() > 1 {
            let pad = " ".repeat(indent);
            let body: Vec<String> = lines.iter().map(|l| format!("{pad}{l}")).collect();
            return Ok(format!(">-\n{}", body.join("\n")));
        }
    }

    inline_string(s)
}

/// Plain when `serde_yaml` would leave the string bare, otherwise its quoted form
fn inline_string(s: &str) -> Result<String> {
    let rendered = serde_yaml::to_string(s)?;
    let rendered = rendered.strip_suffix('\n').unwrap_or(&rendered);
    if rendered.contains('\n') {
        return Ok(double_quoted(s));
    }
    Ok(rendered.to_string())
}

fn double_quoted(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

/// `|` block for multi-line strings, chomping chosen to keep trailing newlines exact
fn literal_block(s: &str, indent: usize) -> String {
    let clip = s.ends_with('\n');
    let keep = clip && (s == "\n" || s.ends_with("\n\n"));
    let chomp = if keep {
        "+"
    } else if clip {
        ""
    } else {
        "-"
    };
    let indicator = if s.starts_with(' ') || s.starts_with('\n') {
        INDENT.to_string()
    } else {
        String::new()
    };

    let body = if clip { &s[..s.len() - 1] } else { s };
    let pad = " ".repeat(indent);
    let lines: Vec<String> = body
        .split('\n')
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect();

    format!("|{indicator}{chomp}\n{}", lines.join("\n"))
}

/// Split a line at single spaces so that each piece fits in `width` where possible
///
/// A break is only taken at a space followed by a non-space, so folding the
/// pieces back together with one space restores the original text.
fn fold(line: &str, width: usize) -> Vec<&str> {
    let bytes = line.as_bytes();
    let breaks = (0..bytes.len().saturating_sub(1))
        .filter(|&i| bytes[i] == b' ' && bytes[i + 1] != b' ');

    let mut pieces = Vec::new();
    let (mut start, mut last) = (0, 0);
    for next in breaks {
        if next - start > width {
            let end = if last > start { last } else { next };
            pieces.push(&line[start..end]);
            start = end + 1;
        }
        last = next;
    }

    if line.len() - start > width && last > start {
        pieces.push(&line[start..last]);
        pieces.push(&line[last + 1..]);
    } else {
        pieces.push(&line[start..]);
    }
    pieces
}
