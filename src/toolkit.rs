//! Helpers shared by the syntax writers: literal escaping, prefix
//! abbreviation and splitting IRIs into XML qualified names.

use indexmap::IndexMap;

/// Escape a string as a double-quoted N-Triples / Turtle literal
pub fn escape_literal(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    result.push('"');

    for ch in s.chars() {
        match ch {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c.is_control() => {
                result.push_str(&format!("\\u{:04X}", c as u32));
            }
            c => result.push(c),
        }
    }

    result.push('"');
    result
}

/// Escape a string for a double-quoted DOT identifier
pub fn escape_dot(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            c => result.push(c),
        }
    }
    result
}

/// Ordered prefix → namespace URI map
///
/// A later declaration of an existing prefix replaces its URI but keeps the
/// original position.
#[derive(Debug, Clone, Default)]
pub struct PrefixMap {
    prefixes: IndexMap<String, String>,
}

impl PrefixMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `prefix` (empty for the default namespace); returns true if
    /// the mapping changed
    pub fn insert(&mut self, prefix: &str, uri: &str) -> bool {
        match self.prefixes.get(prefix) {
            Some(existing) if existing == uri => false,
            _ => {
                self.prefixes.insert(prefix.to_string(), uri.to_string());
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes.iter().map(|(p, u)| (p.as_str(), u.as_str()))
    }

    pub fn clear(&mut self) {
        self.prefixes.clear();
    }

    /// Prefixed name for `iri`, if a namespace matches and the remainder is
    /// a usable local name. The longest matching namespace wins.
    pub fn abbreviate(&self, iri: &str) -> Option<String> {
        self.prefixes
            .iter()
            .filter(|(_, uri)| iri.starts_with(uri.as_str()))
            .filter(|(_, uri)| is_valid_local_name(&iri[uri.len()..]))
            .max_by_key(|(_, uri)| uri.len())
            .map(|(prefix, uri)| format!("{prefix}:{}", &iri[uri.len()..]))
    }

    /// Namespace URI bound to `prefix`
    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(String::as_str)
    }

    /// Prefix bound to exactly `uri`
    pub fn prefix_for(&self, uri: &str) -> Option<&str> {
        self.prefixes
            .iter()
            .find(|(_, u)| u.as_str() == uri)
            .map(|(p, _)| p.as_str())
    }
}

/// Conservative check for a Turtle local name
pub fn is_valid_local_name(local: &str) -> bool {
    let mut chars = local.chars();
    match chars.next() {
        None => true,
        Some(first) if first.is_alphanumeric() || first == '_' => {
            !local.ends_with('.')
                && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        }
        Some(_) => false,
    }
}

/// Split an IRI into a namespace and an XML local name.
///
/// Returns `(iri, "")` when no suffix of the IRI is a valid NCName.
pub fn split_iri(iri: &str) -> (&str, &str) {
    if let Some(position_base) = iri.rfind(|c| !is_name_char(c) || c == ':') {
        if let Some(position_add) =
            iri[position_base..].find(|c| is_name_start_char(c) && c != ':')
        {
            (
                &iri[..position_base + position_add],
                &iri[position_base + position_add..],
            )
        } else {
            (iri, "")
        }
    } else {
        (iri, "")
    }
}

pub fn is_name_start_char(c: char) -> bool {
    matches!(c,
        ':'
        | 'A'..='Z'
        | '_'
        | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

pub fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(
            c,
            '-' | '.' | '0'..='9' | '\u{B7}' | '\u{0300}'..='\u{036F}' | '\u{203F}'..='\u{2040}'
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_literal() {
        assert_eq!(escape_literal("plain"), "\"plain\"");
        assert_eq!(escape_literal("a \"q\"\n"), "\"a \\\"q\\\"\\n\"");
        assert_eq!(escape_literal("\u{1}"), "\"\\u0001\"");
    }

    #[test]
    fn test_abbreviate_longest_match() {
        let mut prefixes = PrefixMap::new();
        prefixes.insert("ex", "http://example.org/");
        prefixes.insert("exv", "http://example.org/vocab#");
        assert_eq!(
            prefixes.abbreviate("http://example.org/vocab#name").as_deref(),
            Some("exv:name")
        );
        assert_eq!(
            prefixes.abbreviate("http://example.org/thing").as_deref(),
            Some("ex:thing")
        );
        assert_eq!(prefixes.abbreviate("http://example.org/a/b"), None);
        assert_eq!(prefixes.abbreviate("http://other.org/x"), None);
    }

    #[test]
    fn test_prefix_redeclaration_keeps_position() {
        let mut prefixes = PrefixMap::new();
        assert!(prefixes.insert("a", "http://a/"));
        assert!(prefixes.insert("b", "http://b/"));
        assert!(!prefixes.insert("a", "http://a/"));
        assert!(prefixes.insert("a", "http://a2/"));
        let order: Vec<_> = prefixes.iter().map(|(p, _)| p).collect();
        assert_eq!(order, ["a", "b"]);
        assert_eq!(prefixes.prefix_for("http://a2/"), Some("a"));
    }

    #[test]
    fn test_split_iri() {
        assert_eq!(
            split_iri("http://xmlns.com/foaf/0.1/name"),
            ("http://xmlns.com/foaf/0.1/", "name")
        );
        assert_eq!(
            split_iri("http://example.org/vocab#type"),
            ("http://example.org/vocab#", "type")
        );
        assert_eq!(
            split_iri("http://example.org/123"),
            ("http://example.org/123", "")
        );
    }
}
