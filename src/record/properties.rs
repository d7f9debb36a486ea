//! Line-preserving `key=value` documents
//!
//! Follows the usual `.properties` conventions: `#` and `!` start comments,
//! the key ends at the first unescaped `=`, `:` or whitespace, and a trailing
//! backslash continues the entry on the next line. Lines that are never
//! updated are written back exactly as they were read.

/// One physical or logical line of a document
#[derive(Debug, Clone)]
enum Line {
    /// Comment or blank line, kept verbatim
    Raw(String),
    /// A key/value entry; `raw` holds the original text until the entry is updated
    Entry {
        key: String,
        value: String,
        raw: Option<String>,
    },
}

/// An ordered `key=value` document that remembers its original layout
#[derive(Debug, Clone)]
pub struct PropertiesDocument {
    lines: Vec<Line>,
    trailing_newline: bool,
    /// Lines end in `\r\n`; rewritten entries follow suit
    crlf: bool,
    /// The text started with a UTF-8 byte-order mark
    bom: bool,
}

impl Default for PropertiesDocument {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            trailing_newline: true,
            crlf: false,
            bom: false,
        }
    }
}

impl PropertiesDocument {
    /// Parse a document; every input is accepted
    pub fn parse(text: &str) -> Self {
        let (text, bom) = match text.strip_prefix('\u{FEFF}') {
            Some(rest) => (rest, true),
            None => (text, false),
        };
        if text.is_empty() {
            return Self {
                bom,
                ..Self::default()
            };
        }

        let mut physical: Vec<&str> = text.split('\n').collect();
        let trailing_newline = text.ends_with('\n');
        if trailing_newline {
            physical.pop();
        }
        let crlf = physical.first().is_some_and(|line| line.ends_with('\r'));

        let mut lines = Vec::with_capacity(physical.len());
        let mut i = 0;
        while i < physical.len() {
            let line = physical[i];
            let content = line.trim_end_matches('\r').trim_start();

            if content.is_empty() || content.starts_with('#') || content.starts_with('!') {
                lines.push(Line::Raw(line.to_string()));
                i += 1;
                continue;
            }

            let mut logical = content.to_string();
            let mut raw = vec![line];
            while ends_with_continuation(&logical) && i + 1 < physical.len() {
                logical.pop();
                i += 1;
                raw.push(physical[i]);
                logical.push_str(physical[i].trim_end_matches('\r').trim_start());
            }
            if ends_with_continuation(&logical) {
                // Continuation on the last line has nothing to join
                logical.pop();
            }

            let (key, value) = split_entry(&logical);
            lines.push(Line::Entry {
                key,
                value,
                raw: Some(raw.join("\n")),
            });
            i += 1;
        }

        Self {
            lines,
            trailing_newline,
            crlf,
            bom,
        }
    }

    /// Value of `key`; a later duplicate overrides an earlier one
    pub fn get(&self, key: &str) -> Option<&str> {
        self.lines.iter().rev().find_map(|line| match line {
            Line::Entry { key: k, value, .. } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    /// Set `key`, rewriting its last occurrence in place or appending it
    pub fn set(&mut self, key: &str, new_value: impl Into<String>) {
        let new_value = new_value.into();
        let existing = self.lines.iter_mut().rev().find_map(|line| match line {
            Line::Entry { key: k, value, raw } if k.as_str() == key => Some((value, raw)),
            _ => None,
        });

        match existing {
            Some((value, raw)) => {
                if *value != new_value {
                    *value = new_value;
                    *raw = None;
                }
            }
            None => self.lines.push(Line::Entry {
                key: key.to_string(),
                value: new_value,
                raw: None,
            }),
        }
    }

    /// Render the document back to text
    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.bom {
            out.push('\u{FEFF}');
        }
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            match line {
                Line::Raw(text) => out.push_str(text),
                Line::Entry {
                    raw: Some(text), ..
                } => out.push_str(text),
                Line::Entry {
                    key,
                    value,
                    raw: None,
                } => {
                    out.push_str(&escape(key, true));
                    out.push('=');
                    out.push_str(&escape(value, false));
                    if self.crlf {
                        out.push('\r');
                    }
                }
            }
        }
        if self.trailing_newline && !self.lines.is_empty() {
            out.push('\n');
        }
        out
    }
}

/// True if `s` ends with an odd number of backslashes
fn ends_with_continuation(s: &str) -> bool {
    s.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Split a logical line into unescaped key and value
fn split_entry(logical: &str) -> (String, String) {
    let mut key_end = logical.len();
    let mut escaped = false;
    for (idx, c) in logical.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || c.is_whitespace() {
            key_end = idx;
            break;
        }
    }

    let key = &logical[..key_end];
    let mut rest = logical[key_end..].trim_start();
    if let Some(stripped) = rest.strip_prefix(['=', ':']) {
        rest = stripped.trim_start();
    }

    (unescape(key), unescape(rest))
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{000C}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push('u');
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

fn escape(s: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(s.len());
    for (i, c) in s.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '=' | ':' if is_key => {
                out.push('\\');
                out.push(c);
            }
            '#' | '!' if is_key && i == 0 => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}
