use crate::annotations::model::FixtureAnnotations;

const MODULE_MARKERS: &[&str] = &["default", "__esModule"];

/// Human readable story name from an export name: `primaryButton` -> `Primary Button`.
pub fn story_name_from_export(export_name: &str) -> String {
    split_words(export_name)
        .iter()
        .map(|w| capitalize(w))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lower-case, dash separated id fragment.
pub fn sanitize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() {
            out.push(ch);
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    out.trim_matches('-').to_string()
}

/// Story id `kind--name`. An empty kind yields the sanitized name alone.
pub fn to_id(kind: &str, name: &str) -> String {
    let kind = sanitize(kind);
    let name = sanitize(name);
    match (kind.is_empty(), name.is_empty()) {
        (true, _) => name,
        (false, true) => kind,
        (false, false) => format!("{kind}--{name}"),
    }
}

/// Whether a named export of a story module is a story.
pub fn is_export_story(key: &str, fixture: &FixtureAnnotations) -> bool {
    if MODULE_MARKERS.contains(&key) {
        return false;
    }
    let included = fixture
        .include_stories
        .as_ref()
        .is_none_or(|names| names.iter().any(|n| n == key));
    let excluded = fixture
        .exclude_stories
        .as_ref()
        .is_some_and(|names| names.iter().any(|n| n == key));
    included && !excluded
}

fn split_words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut cur = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !cur.is_empty() {
                words.push(std::mem::take(&mut cur));
            }
            continue;
        }
        if let Some(prev) = cur.chars().last() {
            let next = chars.get(i + 1).copied();
            let boundary = (prev.is_lowercase() && c.is_uppercase())
                || (prev.is_alphabetic() && c.is_numeric())
                || (prev.is_numeric() && c.is_alphabetic())
                || (prev.is_uppercase()
                    && c.is_uppercase()
                    && next.is_some_and(char::is_lowercase));
            if boundary {
                words.push(std::mem::take(&mut cur));
            }
        }
        cur.push(c);
    }
    if !cur.is_empty() {
        words.push(cur);
    }
    words
}

fn capitalize(w: &str) -> String {
    let mut chars = w.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/naming.rs"]
mod tests;
