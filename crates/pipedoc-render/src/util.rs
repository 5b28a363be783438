//! Shared text helpers for page assembly.

use std::fmt::Write;

/// Join items as an English list: `a`, `a and b`, `a, b, and c`.
///
/// An empty list yields `"no"`, so "accepts no events" still reads.
pub(crate) fn to_sentence(items: &[String]) -> String {
    match items {
        [] => "no".to_owned(),
        [only] => only.clone(),
        [first, second] => format!("{first} and {second}"),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    }
}

/// Escape text for a single Markdown table cell.
pub(crate) fn escape_cell(text: &str) -> String {
    text.trim()
        .replace('|', "\\|")
        .replace("\r\n", "\n")
        .replace('\n', "<br/>")
}

/// Escape brackets so text is safe inside Markdown link text.
pub(crate) fn escape_link_text(text: &str) -> String {
    text.replace('[', "\\[").replace(']', "\\]")
}

/// Render a TOML value as an inline literal.
pub(crate) fn toml_literal(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => quote(s),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => float_literal(*f),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(items) => {
            let items: Vec<String> = items.iter().map(toml_literal).collect();
            format!("[{}]", items.join(", "))
        }
        toml::Value::Table(table) if table.is_empty() => "{}".to_owned(),
        toml::Value::Table(table) => {
            let pairs: Vec<String> = table
                .iter()
                .map(|(k, v)| format!("{} = {}", toml_key(k), toml_literal(v)))
                .collect();
            format!("{{ {} }}", pairs.join(", "))
        }
    }
}

/// Render a key, quoting it unless it is a bare TOML key.
pub(crate) fn toml_key(key: &str) -> String {
    let bare = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if bare { key.to_owned() } else { quote(key) }
}

/// TOML basic string.
pub(crate) fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04X}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[allow(clippy::float_cmp)]
fn float_literal(f: f64) -> String {
    if f.is_nan() {
        "nan".to_owned()
    } else if f.is_infinite() {
        let inf = if f.is_sign_positive() { "inf" } else { "-inf" };
        inf.to_owned()
    } else if f.fract() == 0.0 {
        format!("{f:.1}")
    } else {
        f.to_string()
    }
}

/// Open code fence: fence character and run length.
#[derive(Default)]
struct Fence(Option<(char, usize)>);

impl Fence {
    fn is_open(&self) -> bool {
        self.0.is_some()
    }

    /// Track fence state for one line.
    fn update(&mut self, line: &str) {
        let trimmed = line.trim_start();
        let Some(first) = trimmed.chars().next().filter(|c| *c == '`' || *c == '~') else {
            return;
        };
        let run = trimmed.chars().take_while(|&c| c == first).count();
        match self.0 {
            Some((ch, len)) => {
                if ch == first && run >= len && trimmed[run..].trim().is_empty() {
                    self.0 = None;
                }
            }
            None if run >= 3 => self.0 = Some((first, run)),
            None => {}
        }
    }
}

/// Collapse runs of blank lines outside code fences into one blank line.
///
/// Leading and trailing blank lines are dropped and the result ends with a
/// single newline.
pub(crate) fn collapse_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut fence = Fence::default();
    let mut previous_blank = true;

    for line in text.lines() {
        let inside = fence.is_open();
        fence.update(line);
        let blank = line.trim().is_empty();
        if blank && !inside {
            if previous_blank {
                continue;
            }
            previous_blank = true;
        } else {
            previous_blank = false;
        }
        out.push_str(line);
        out.push('\n');
    }

    while out.ends_with("\n\n") {
        out.pop();
    }
    out
}

/// Longest run of backticks in `text`.
pub(crate) fn longest_backtick_run(text: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in text.chars() {
        if c == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}
