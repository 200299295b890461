//! Preset text codec.
//!
//! A preset is a list of named sections, each holding a JSON value:
//!
//! ```text
//! #SETTINGS\r\n{\r\n  "serverName": "..."\r\n}\r\n\r\n#BOP\r\n{ ... }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

pub mod cfg_files;
pub mod share;

const SECTION_SEPARATOR: &str = "\r\n\r\n";

/// Ordered mapping from section name to its JSON value.
///
/// Iteration follows insertion order. Re-inserting an existing name replaces
/// the value in place.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresetDocument {
    sections: Map<String, Value>,
}

impl PresetDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.sections.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.sections.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.sections.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.sections
    }
}

impl From<Map<String, Value>> for PresetDocument {
    fn from(sections: Map<String, Value>) -> Self {
        Self { sections }
    }
}

impl FromIterator<(String, Value)> for PresetDocument {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            sections: iter.into_iter().collect(),
        }
    }
}

/// Serialize a document to preset text.
///
/// Each section becomes `#NAME` followed by its 2-space pretty JSON, all with
/// CRLF line endings. Sections are separated by one blank line.
pub fn encode(doc: &PresetDocument) -> String {
    doc.iter()
        .map(|(name, value)| format!("#{name}\r\n{}", pretty_json(value).replace('\n', "\r\n")))
        .collect::<Vec<_>>()
        .join(SECTION_SEPARATOR)
}

/// Parse preset text, keeping every section that holds valid JSON.
///
/// Malformed sections are dropped and the scan carries on, so this never
/// fails. Text between sections is ignored.
pub fn decode(text: &str) -> PresetDocument {
    decode_with_report(text).0
}

/// Like [`decode`], also returning the names of the sections that were dropped,
/// in the order they appear. Writers use this to avoid losing sections when
/// rewriting a file they read.
pub fn decode_with_report(text: &str) -> (PresetDocument, Vec<String>) {
    let mut doc = PresetDocument::new();
    let mut skipped = Vec::new();
    for found in SectionScanner::new(text) {
        let raw = match found {
            Scanned::Section(raw) => raw,
            Scanned::Unterminated(name) => {
                debug!(section = name, "Skipping unterminated preset section");
                skipped.push(name.to_string());
                continue;
            }
        };
        match serde_json::from_str::<Value>(raw.body) {
            Ok(value) => {
                doc.insert(raw.name, value);
            }
            Err(e) => {
                debug!(section = raw.name, error = %e, "Skipping malformed preset section");
                skipped.push(raw.name.to_string());
            }
        }
    }
    (doc, skipped)
}

fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// A `#NAME` marker and the bracket-balanced span that follows it.
#[derive(Debug, PartialEq)]
struct RawSection<'a> {
    name: &'a str,
    body: &'a str,
}

#[derive(Debug, PartialEq)]
enum Scanned<'a> {
    Section(RawSection<'a>),
    /// A section header whose brackets never close.
    Unterminated(&'a str),
}

struct SectionScanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> SectionScanner<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl<'a> Iterator for SectionScanner<'a> {
    type Item = Scanned<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.text.as_bytes();

        while let Some(offset) = self.text[self.pos..].find('#') {
            let name_start = self.pos + offset + 1;
            let name_len = bytes[name_start..]
                .iter()
                .take_while(|b| b.is_ascii_uppercase())
                .count();
            let name_end = name_start + name_len;
            self.pos = name_end;

            if name_len == 0 {
                continue;
            }

            let open = name_end
                + bytes[name_end..]
                    .iter()
                    .take_while(|b| b.is_ascii_whitespace())
                    .count();
            if !matches!(bytes.get(open), Some(b'{' | b'[')) {
                continue;
            }

            // Unterminated spans drop the marker and resume after the name.
            let name = &self.text[name_start..name_end];
            let Some(close) = find_closing_bracket(bytes, open) else {
                return Some(Scanned::Unterminated(name));
            };
            self.pos = close + 1;

            return Some(Scanned::Section(RawSection {
                name,
                body: &self.text[open..=close],
            }));
        }

        self.pos = self.text.len();
        None
    }
}

/// Index of the bracket closing the one at `open`, skipping string literals.
fn find_closing_bracket(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(open) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' | b'[' => depth += 1,
            b'}' | b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sections(text: &str) -> Vec<RawSection<'_>> {
        SectionScanner::new(text)
            .filter_map(|found| match found {
                Scanned::Section(raw) => Some(raw),
                Scanned::Unterminated(_) => None,
            })
            .collect()
    }

    #[test]
    fn scanner_finds_sections_with_junk_between() {
        let text = "; exported\r\n#EVENT\r\n{\"a\": 1}\r\nstray text\r\n#BOP [1, 2]";
        assert_eq!(
            sections(text),
            vec![
                RawSection { name: "EVENT", body: "{\"a\": 1}" },
                RawSection { name: "BOP", body: "[1, 2]" },
            ]
        );
    }

    #[test]
    fn scanner_respects_braces_inside_strings() {
        let text = "#SETTINGS\r\n{\"serverName\": \"a } b { \\\" }\", \"x\": {\"y\": 2}}";
        let found = sections(text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].body, &text[11..]);
    }

    #[test]
    fn names_with_digits_or_underscores_are_not_sections() {
        assert!(sections("#BOP2\r\n{}").is_empty());
        assert!(sections("#EVENT_RULES\r\n{}").is_empty());
        assert!(sections("#event\r\n{}").is_empty());
        assert!(sections("# {}").is_empty());
    }

    #[test]
    fn unterminated_section_does_not_hide_later_ones() {
        let doc = decode("#EVENT\r\n{\"a\": 1\r\n#BOP\r\n{\"entries\": []}");
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get("BOP"), Some(&json!({"entries": []})));
    }

    #[test]
    fn malformed_section_is_skipped_and_scan_continues() {
        let doc = decode("#BOP\r\n{oops}\r\n\r\n#EVENT\r\n{\"track\": \"spa\"}");
        assert_eq!(doc.names().collect::<Vec<_>>(), vec!["EVENT"]);
    }

    #[test]
    fn report_names_dropped_sections() {
        let (doc, skipped) = decode_with_report(
            "#SETTINGS\r\n{\"serverName\": \"League\",}\r\n\r\n#BOP\r\n{\"entries\": []}\r\n#EVENT\r\n{\"a\": 1",
        );
        assert_eq!(doc.names().collect::<Vec<_>>(), vec!["BOP"]);
        assert_eq!(skipped, vec!["SETTINGS", "EVENT"]);
    }

    #[test]
    fn clean_text_reports_nothing_skipped() {
        let (doc, skipped) = decode_with_report("#EVENT\r\n{}\r\n\r\n#BOP\r\n[]");
        assert_eq!(doc.len(), 2);
        assert!(skipped.is_empty());
    }

    #[test]
    fn repeated_section_overwrites_but_keeps_first_position() {
        let doc = decode("#BOP\r\n{\"v\": 1}\r\n#EVENT\r\n{}\r\n#BOP\r\n{\"v\": 2}");
        assert_eq!(doc.names().collect::<Vec<_>>(), vec!["BOP", "EVENT"]);
        assert_eq!(doc.get("BOP"), Some(&json!({"v": 2})));
    }

    #[test]
    fn encode_uses_crlf_and_two_space_indent() {
        let mut doc = PresetDocument::new();
        doc.insert("EVENT", json!({"track": "monza", "rain": 0.1}));
        assert_eq!(
            encode(&doc),
            "#EVENT\r\n{\r\n  \"track\": \"monza\",\r\n  \"rain\": 0.1\r\n}"
        );
    }

    #[test]
    fn encode_empty_document_is_empty_text() {
        assert_eq!(encode(&PresetDocument::new()), "");
    }
}
