//! Textual repairs for near-JSON produced by language models.
//!
//! Each rule is a regex rewrite applied in a fixed order. Rules only ever
//! touch text outside string literals, so a colon or comma inside a
//! description is never rewritten.

use regex::{Captures, Regex};
use serde_json::Value;
use std::sync::OnceLock;

fn unquoted_key() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([{,]\s*)([\w$]+)(\s*:)").expect("unquoted key pattern"))
}

fn hex_value() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(:\s*)(0[xX][0-9a-fA-F]+)\b").expect("hex value pattern"))
}

fn bare_value() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(:\s*)([^\s"{}\[\],:][^"{}\[\],:\r\n]*)"#).expect("bare value pattern")
    })
}

fn trailing_comma_object() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r",\s*\}").expect("trailing comma pattern"))
}

fn trailing_comma_array() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r",\s*\]").expect("trailing comma pattern"))
}

/// Applies every repair rule to `text`, in order:
///
/// 1. quote bare object keys (`{width: 4}`)
/// 2. quote bare `0x` hex literals used as values (`"color": 0x666666`)
/// 3. quote any other bare word value that is not a JSON literal (`geometryType: 棱柱`)
/// 4. drop a trailing comma before `}`
/// 5. drop a trailing comma before `]`
///
/// Well-formed JSON passes through unchanged.
pub fn repair_json(text: &str) -> String {
    let text = rewrite_outside_strings(text, |bare| {
        unquoted_key().replace_all(bare, "$1\"$2\"$3").into_owned()
    });
    let text = rewrite_outside_strings(&text, |bare| {
        hex_value().replace_all(bare, "$1\"$2\"").into_owned()
    });
    let text = rewrite_outside_strings(&text, |bare| {
        bare_value().replace_all(bare, quote_bare_value).into_owned()
    });
    let text = rewrite_outside_strings(&text, |bare| {
        trailing_comma_object().replace_all(bare, "}").into_owned()
    });
    rewrite_outside_strings(&text, |bare| {
        trailing_comma_array().replace_all(bare, "]").into_owned()
    })
}

fn quote_bare_value(caps: &Captures<'_>) -> String {
    let token = caps[2].trim_end();
    let trailing = &caps[2][token.len()..];

    // numbers, true, false and null stay as they are
    if serde_json::from_str::<Value>(token).is_ok() {
        return caps[0].to_string();
    }

    format!("{}{}{}", &caps[1], Value::String(token.to_string()), trailing)
}

enum Segment<'a> {
    Bare(&'a str),
    Literal(&'a str),
}

/// Splits `text` into string literals and the text between them. An
/// unterminated literal runs to the end of the input.
fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                out.push(Segment::Literal(&text[start..=i]));
                start = i + 1;
                in_string = false;
            }
        } else if c == '"' {
            if start < i {
                out.push(Segment::Bare(&text[start..i]));
            }
            start = i;
            in_string = true;
        }
    }

    if start < text.len() {
        let rest = &text[start..];
        out.push(if in_string {
            Segment::Literal(rest)
        } else {
            Segment::Bare(rest)
        });
    }

    out
}

fn rewrite_outside_strings<F>(text: &str, mut rewrite: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut out = String::with_capacity(text.len() + 16);
    for segment in segments(text) {
        match segment {
            Segment::Bare(bare) => out.push_str(&rewrite(bare)),
            Segment::Literal(literal) => out.push_str(literal),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Value {
        serde_json::from_str(&repair_json(text)).unwrap()
    }

    #[test]
    fn quotes_bare_keys() {
        let value = parse("{width: 4, height:2, $ref: 1}");
        assert_eq!(value["width"], 4);
        assert_eq!(value["height"], 2);
        assert_eq!(value["$ref"], 1);
    }

    #[test]
    fn quotes_hex_colors() {
        let value = parse(r#"{"color": 0x666666, "other": 0XFF}"#);
        assert_eq!(value["color"], "0x666666");
        assert_eq!(value["other"], "0XFF");
    }

    #[test]
    fn quotes_bare_word_values_but_not_literals() {
        let value = parse("{kind: 棱柱, n: -2.5e1, ok: true, none: null, label: cube shape }");
        assert_eq!(value["kind"], "棱柱");
        assert_eq!(value["n"], -25.0);
        assert_eq!(value["ok"], true);
        assert!(value["none"].is_null());
        assert_eq!(value["label"], "cube shape");
    }

    #[test]
    fn removes_trailing_commas() {
        let value = parse("{\"a\": [1, 2, 3,\n], \"b\": {\"c\": 1,  },}");
        assert_eq!(value["a"].as_array().unwrap().len(), 3);
        assert_eq!(value["b"]["c"], 1);
    }

    #[test]
    fn string_contents_are_left_alone() {
        let text = r#"{"description": "点E: CC1的中点, {x: 1,}", "color": "0x666666"}"#;
        assert_eq!(repair_json(text), text);
    }

    #[test]
    fn escaped_quotes_do_not_end_a_literal() {
        let text = r#"{"description": "say \"a: b,}\"", d: 1}"#;
        let value = parse(text);
        assert_eq!(value["description"], "say \"a: b,}\"");
        assert_eq!(value["d"], 1);
    }

    #[test]
    fn well_formed_json_is_unchanged() {
        let text = crate::preprocessing::EXAMPLE_SCHEMA;
        assert_eq!(repair_json(text), text);

        let compact = r#"{"geometryType":"sphere","dimensions":{"radius":2},"points":[],"x":[1,-2.5,3e2],"y":false}"#;
        assert_eq!(repair_json(compact), compact);
    }
}
