use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use regex::{Regex, RegexBuilder};
use serde_yaml::{Mapping, Value};

use crate::article::Article;

#[derive(Debug, Default)]
pub(super) struct FrontMatter {
    pub attributes: Mapping,
    pub body: String,
}

/// Splits `content` into its YAML header and the text after it.
///
/// The header opens with a `---` line at the very top (after an optional BOM)
/// and closes with a `---` or `...` line. Text without a header is all body.
pub(super) fn parse(content: &str) -> Result<FrontMatter, serde_yaml::Error> {
    static BLOCK: OnceLock<Regex> = OnceLock::new();
    let block = BLOCK.get_or_init(|| {
        RegexBuilder::new(r"\A\x{FEFF}?---[ \t]*\r?\n(.*?)^(?:---|\.\.\.)[ \t]*(?:\r?\n|\z)")
            .dot_matches_new_line(true)
            .multi_line(true)
            .build()
            .unwrap()
    });

    let Some(caps) = block.captures(content) else {
        return Ok(FrontMatter {
            attributes: Mapping::new(),
            body: content.to_string(),
        });
    };

    let header = &caps[1];
    let attributes = if header.trim().is_empty() {
        Mapping::new()
    } else {
        match serde_yaml::from_str::<Value>(header)? {
            Value::Mapping(m) => m,
            Value::Null => Mapping::new(),
            _ => {
                return Err(serde::de::Error::custom(
                    "front-matter must be a mapping of attributes",
                ))
            }
        }
    };

    let end = caps.get(0).map_or(0, |m| m.end());
    Ok(FrontMatter {
        attributes,
        body: content[end..].to_string(),
    })
}

/// Renders the header and body for `article`. `id` is always quoted so a
/// numeric id is read back as the same string.
pub(super) fn render(article: &Article, id: &str) -> String {
    let mut out = String::from("---\n");
    out.push_str(&format!("title: {}\n", scalar(&article.title)));
    out.push_str(&format!(
        "date: {}\n",
        article.date.to_rfc3339_opts(SecondsFormat::Millis, true)
    ));
    if !article.categories.is_empty() {
        out.push_str("categories:\n");
        for category in article.categories.iter() {
            out.push_str(&format!("  - {}\n", scalar(category)));
        }
    }
    out.push_str(&format!("id: {}\n", quoted(id)));
    out.push_str("---\n");
    out.push_str(&article.text);
    out
}

/// Text of a scalar attribute. Sequences, mappings and null have none.
pub(super) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        _ => None,
    }
}

pub(super) fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Sequence(items) => items.iter().filter_map(scalar_text).collect(),
        other => scalar_text(other).into_iter().collect(),
    }
}

/// Accepts RFC 3339 timestamps as well as the naive `YYYY-MM-DD[ HH:MM:SS]`
/// forms people type by hand, which are taken as UTC.
pub(super) fn parse_date(value: &Value) -> Option<DateTime<Utc>> {
    let text = scalar_text(value)?;
    let text = text.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn scalar(value: &str) -> String {
    if reads_back_as_plain(value) {
        value.to_string()
    } else {
        quoted(value)
    }
}

// JSON strings are valid YAML double-quoted scalars, except that YAML folds
// NEL, LS and PS as line breaks, so those get YAML escapes.
fn quoted(value: &str) -> String {
    serde_json::Value::String(value.to_string())
        .to_string()
        .replace('\u{85}', "\\N")
        .replace('\u{2028}', "\\L")
        .replace('\u{2029}', "\\P")
}

fn reads_back_as_plain(value: &str) -> bool {
    if value.is_empty() || value.contains(['\n', '\r', '\u{85}', '\u{2028}', '\u{2029}']) {
        return false;
    }
    match serde_yaml::from_str::<Value>(&format!("v: {value}")) {
        Ok(Value::Mapping(m)) => m.len() == 1 && m.get("v") == Some(&Value::String(value.into())),
        _ => false,
    }
}
