//! Purpose: Render pretty JSON with optional ANSI colorization for CLI output.
//! Exports: colorize_json.
//! Role: Small, pure formatter used by CLI emission paths.
//! Invariants: When color is disabled, output equals serde_json::to_string_pretty.
//! Invariants: ANSI escapes appear only when explicitly enabled.
use serde_json::Value;

// Conservative 8/16-color palette for broad terminal compatibility.
const COLOR_KEY: &str = "36";
const COLOR_STRING: &str = "32";
const COLOR_NUMBER: &str = "33";
const COLOR_BOOL: &str = "35";
const COLOR_NULL: &str = "39";
const COLOR_PUNCT: &str = "39";

struct Painter {
    use_color: bool,
    out: String,
}

impl Painter {
    fn paint(&mut self, text: &str, color: &str) {
        if !self.use_color {
            self.out.push_str(text);
            return;
        }
        self.out.push_str("\u{1b}[");
        self.out.push_str(color);
        self.out.push('m');
        self.out.push_str(text);
        self.out.push_str("\u{1b}[0m");
    }

    fn indent(&mut self, level: usize) {
        for _ in 0..level {
            self.out.push_str("  ");
        }
    }

    fn value(&mut self, value: &Value, level: usize) {
        match value {
            Value::Null => self.paint("null", COLOR_NULL),
            Value::Bool(true) => self.paint("true", COLOR_BOOL),
            Value::Bool(false) => self.paint("false", COLOR_BOOL),
            Value::Number(num) => self.paint(&num.to_string(), COLOR_NUMBER),
            Value::String(text) => {
                let encoded = serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string());
                self.paint(&encoded, COLOR_STRING);
            }
            Value::Array(items) => {
                if items.is_empty() {
                    self.paint("[]", COLOR_PUNCT);
                    return;
                }
                self.paint("[", COLOR_PUNCT);
                self.out.push('\n');
                for (idx, item) in items.iter().enumerate() {
                    self.indent(level + 1);
                    self.value(item, level + 1);
                    if idx + 1 < items.len() {
                        self.paint(",", COLOR_PUNCT);
                    }
                    self.out.push('\n');
                }
                self.indent(level);
                self.paint("]", COLOR_PUNCT);
            }
            Value::Object(map) => {
                if map.is_empty() {
                    self.paint("{}", COLOR_PUNCT);
                    return;
                }
                self.paint("{", COLOR_PUNCT);
                self.out.push('\n');
                for (idx, (key, item)) in map.iter().enumerate() {
                    self.indent(level + 1);
                    let encoded =
                        serde_json::to_string(key).unwrap_or_else(|_| "\"\"".to_string());
                    self.paint(&encoded, COLOR_KEY);
                    self.paint(":", COLOR_PUNCT);
                    self.out.push(' ');
                    self.value(item, level + 1);
                    if idx + 1 < map.len() {
                        self.paint(",", COLOR_PUNCT);
                    }
                    self.out.push('\n');
                }
                self.indent(level);
                self.paint("}", COLOR_PUNCT);
            }
        }
    }
}

pub fn colorize_json(value: &Value, use_color: bool) -> String {
    let mut painter = Painter {
        use_color,
        out: String::new(),
    };
    painter.value(value, 0);
    painter.out
}

#[cfg(test)]
mod tests {
    use super::colorize_json;
    use serde_json::json;

    #[test]
    fn colorize_json_matches_pretty_when_disabled() {
        let value = json!({
            "arr": [1, true, null],
            "nested": { "x": "y" }
        });
        let plain = colorize_json(&value, false);
        let pretty = serde_json::to_string_pretty(&value).expect("pretty");
        assert_eq!(plain, pretty);
    }

    #[test]
    fn colorize_json_emits_ansi_when_enabled() {
        let value = json!({"k":"v","n":1,"b":true,"z":null});
        let colored = colorize_json(&value, true);
        assert!(colored.contains("\u{1b}["));
        assert!(colored.contains("\u{1b}[36m\"k\"\u{1b}[0m"));
        assert!(colored.contains("\u{1b}[32m\"v\"\u{1b}[0m"));
        assert!(colored.contains("\u{1b}[33m1\u{1b}[0m"));
        assert!(colored.contains("\u{1b}[35mtrue\u{1b}[0m"));
        assert!(colored.contains("\u{1b}[39mnull\u{1b}[0m"));
    }
}
