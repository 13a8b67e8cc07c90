//! RDF statements and term strings
//!
//! A [`Tripel`] holds three already-serialized SPARQL terms. The plain
//! insert path substitutes them into the update verbatim. The constructors
//! here ([`iri`], [`literal`], [`lang_literal`], [`typed_literal`]) produce
//! well-formed terms, and [`validate`] backs the checked insert path.

use crate::error::{BlazegraphError, Result};

/// One `(subject, predicate, object)` statement of serialized terms.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tripel {
    pub s: String,
    pub p: String,
    pub o: String,
}

impl Tripel {
    pub fn new(s: impl Into<String>, p: impl Into<String>, o: impl Into<String>) -> Self {
        Self {
            s: s.into(),
            p: p.into(),
            o: o.into(),
        }
    }

    /// Check all three terms with [`validate`].
    pub fn validate(&self) -> Result<()> {
        validate(&self.s)?;
        validate(&self.p)?;
        validate(&self.o)?;
        Ok(())
    }
}

/// Syntactic class of a term accepted by [`validate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermKind {
    /// `<...>` or the `a` keyword
    Iri,
    /// `prefix:local`
    PrefixedName,
    /// `_:label`
    BlankNode,
    /// Quoted, numeric or boolean literal
    Literal,
}

/// Wrap `value` in angle brackets, rejecting characters IRIREF forbids.
pub fn iri(value: &str) -> Result<String> {
    if let Some(c) = value.chars().find(|c| is_forbidden_in_iri(*c)) {
        return Err(BlazegraphError::invalid_term(format!(
            "character {c:?} not allowed in IRI {value:?}"
        )));
    }
    Ok(format!("<{value}>"))
}

/// Quote `value` as a plain string literal, escaping quotes, backslashes and
/// line breaks.
pub fn literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// String literal with a language tag, e.g. `"Haus"@de`.
pub fn lang_literal(value: &str, lang: &str) -> Result<String> {
    if !is_lang_tag(lang) {
        return Err(BlazegraphError::invalid_term(format!(
            "malformed language tag {lang:?}"
        )));
    }
    Ok(format!("{}@{lang}", literal(value)))
}

/// Literal typed by a datatype IRI, e.g. `"42"^^<http://www.w3.org/2001/XMLSchema#integer>`.
pub fn typed_literal(value: &str, datatype: &str) -> Result<String> {
    Ok(format!("{}^^{}", literal(value), iri(datatype)?))
}

/// Classify a serialized term, failing on anything that would not parse as
/// a term of an `INSERT DATA` block.
///
/// Long (triple-quoted) literals are not accepted.
pub fn validate(term: &str) -> Result<TermKind> {
    let invalid = |why: &str| BlazegraphError::invalid_term(format!("{why}: {term:?}"));

    if let Some(rest) = term.strip_prefix('<') {
        let inner = rest
            .strip_suffix('>')
            .ok_or_else(|| invalid("unterminated IRI"))?;
        if inner.chars().any(is_forbidden_in_iri) {
            return Err(invalid("illegal character in IRI"));
        }
        return Ok(TermKind::Iri);
    }

    if term.starts_with('"') || term.starts_with('\'') {
        validate_literal(term).map_err(invalid)?;
        return Ok(TermKind::Literal);
    }

    if let Some(label) = term.strip_prefix("_:") {
        if is_name(label) {
            return Ok(TermKind::BlankNode);
        }
        return Err(invalid("malformed blank node"));
    }

    if term == "a" {
        return Ok(TermKind::Iri);
    }
    if term == "true" || term == "false" || is_numeric(term) {
        return Ok(TermKind::Literal);
    }
    if is_prefixed_name(term) {
        return Ok(TermKind::PrefixedName);
    }

    Err(invalid("not an RDF term"))
}

fn is_forbidden_in_iri(c: char) -> bool {
    matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\') || c <= ' '
}

fn validate_literal(term: &str) -> std::result::Result<(), &'static str> {
    let mut chars = term.char_indices();
    let (_, quote) = chars.next().ok_or("empty literal")?;

    let mut end = None;
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                let hex_digits = match chars.next() {
                    Some((_, 't' | 'b' | 'n' | 'r' | 'f' | '"' | '\'' | '\\')) => 0,
                    Some((_, 'u')) => 4,
                    Some((_, 'U')) => 8,
                    _ => return Err("invalid escape sequence in literal"),
                };
                for _ in 0..hex_digits {
                    if !chars.next().is_some_and(|(_, h)| h.is_ascii_hexdigit()) {
                        return Err("invalid unicode escape in literal");
                    }
                }
            }
            '\n' | '\r' => return Err("line break in short literal"),
            c if c == quote => {
                end = Some(i);
                break;
            }
            _ => {}
        }
    }

    let end = end.ok_or("unterminated literal")?;
    let suffix = &term[end + quote.len_utf8()..];
    if suffix.is_empty() {
        return Ok(());
    }
    if let Some(lang) = suffix.strip_prefix('@') {
        return if is_lang_tag(lang) {
            Ok(())
        } else {
            Err("malformed language tag")
        };
    }
    if let Some(datatype) = suffix.strip_prefix("^^") {
        return match validate(datatype) {
            Ok(TermKind::Iri) if datatype != "a" => Ok(()),
            Ok(TermKind::PrefixedName) => Ok(()),
            _ => Err("malformed datatype"),
        };
    }
    Err("unexpected characters after literal")
}

fn is_lang_tag(tag: &str) -> bool {
    let mut parts = tag.split('-');
    let primary_ok = parts
        .next()
        .is_some_and(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_alphabetic()));
    primary_ok && parts.all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_alphanumeric()))
}

fn is_name(label: &str) -> bool {
    label
        .chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() || c == '_')
        && !label.ends_with('.')
        && label
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn is_prefixed_name(term: &str) -> bool {
    let Some((prefix, local)) = term.split_once(':') else {
        return false;
    };
    let prefix_ok = prefix.is_empty()
        || (prefix.chars().next().is_some_and(char::is_alphabetic) && is_name(prefix));
    let local_ok = local.is_empty()
        || (!local.ends_with('.')
            && local
                .chars()
                .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':' | '%')));
    prefix_ok && local_ok
}

fn is_numeric(term: &str) -> bool {
    let digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());

    let body = term.strip_prefix(&['+', '-'][..]).unwrap_or(term);
    let (mantissa, exponent) = match body.find(&['e', 'E'][..]) {
        Some(i) => (&body[..i], Some(&body[i + 1..])),
        None => (body, None),
    };
    let (int, frac) = match mantissa.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (mantissa, None),
    };

    let mantissa_ok = digits(int)
        && match frac {
            None => !int.is_empty(),
            Some(f) => digits(f) && (!f.is_empty() || (exponent.is_some() && !int.is_empty())),
        };
    let exponent_ok = exponent.map_or(true, |e| {
        let e = e.strip_prefix(&['+', '-'][..]).unwrap_or(e);
        !e.is_empty() && digits(e)
    });
    mantissa_ok && exponent_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_escapes() {
        assert_eq!(literal("plain"), r#""plain""#);
        assert_eq!(literal("say \"hi\""), r#""say \"hi\"""#);
        assert_eq!(literal("a\\b\nc"), r#""a\\b\nc""#);
    }

    #[test]
    fn test_escaped_literal_validates() {
        let nasty = literal("\" } } ; DROP ALL ; INSERT DATA { {");
        assert_eq!(validate(&nasty).unwrap(), TermKind::Literal);
    }

    #[test]
    fn test_iri_rejects_forbidden_chars() {
        assert_eq!(iri("http://example.com/a").unwrap(), "<http://example.com/a>");
        assert!(iri("http://example.com/a> }").is_err());
        assert!(iri("http://example.com/with space").is_err());
    }

    #[test]
    fn test_lang_and_typed_literals() {
        assert_eq!(lang_literal("Haus", "de").unwrap(), r#""Haus"@de"#);
        assert_eq!(lang_literal("color", "en-US").unwrap(), r#""color"@en-US"#);
        assert!(lang_literal("x", "en US").is_err());

        let typed = typed_literal("42", "http://www.w3.org/2001/XMLSchema#integer").unwrap();
        assert_eq!(typed, r#""42"^^<http://www.w3.org/2001/XMLSchema#integer>"#);
        assert_eq!(validate(&typed).unwrap(), TermKind::Literal);
    }

    #[test]
    fn test_validate_kinds() {
        assert_eq!(validate("<http://example.com/s>").unwrap(), TermKind::Iri);
        assert_eq!(validate("a").unwrap(), TermKind::Iri);
        assert_eq!(validate("dcat:Dataset").unwrap(), TermKind::PrefixedName);
        assert_eq!(validate(":local").unwrap(), TermKind::PrefixedName);
        assert_eq!(validate("_:b0").unwrap(), TermKind::BlankNode);
        assert_eq!(validate("'single'").unwrap(), TermKind::Literal);
        assert_eq!(validate(r#""x"^^xsd:string"#).unwrap(), TermKind::Literal);
        assert_eq!(validate(r#""café""#).unwrap(), TermKind::Literal);
        assert_eq!(validate(r#""\U0001F600"@en"#).unwrap(), TermKind::Literal);
        assert_eq!(validate("_:_b-1").unwrap(), TermKind::BlankNode);
        assert_eq!(validate("42").unwrap(), TermKind::Literal);
        assert_eq!(validate("-1.5e3").unwrap(), TermKind::Literal);
        assert_eq!(validate("true").unwrap(), TermKind::Literal);
    }

    #[test]
    fn test_validate_rejects_malformed() {
        for bad in [
            "",
            "<http://example.com/s",
            "<http://a> <http://b>",
            r#""unterminated"#,
            r#""x" . <http://evil>"#,
            r#""x"@"#,
            r#""x"^^a"#,
            "_:",
            "_:-x",
            "_:.x",
            r#""\u""#,
            r#""\uZZZZ""#,
            r#""\u00e""#,
            r#""\U0001F60""#,
            r#""\q""#,
            "inf",
            "1.",
            "no spaces:allowed here",
            "?var",
        ] {
            assert!(validate(bad).is_err(), "expected {bad:?} to be rejected");
        }
    }

    #[test]
    fn test_tripel_validate() {
        let ok = Tripel::new("<http://example.com/s>", "a", "dcat:Dataset");
        assert!(ok.validate().is_ok());

        let bad = Tripel::new("<http://example.com/s>", "a", "} } DROP ALL");
        let err = bad.validate().unwrap_err();
        assert!(matches!(err, BlazegraphError::InvalidTerm(_)));
    }
}
