use serde::Serialize;

/// A single header name and value.
///
/// Message headers carry the lowercase names of the `http` header map, multipart part
/// headers keep the name as written in the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    name: String,
    value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Parses a raw `Name: Value` line.
    ///
    /// Returns `None` for lines without a colon or with an empty name, both sides are trimmed.
    pub fn parse_line(line: &str) -> Option<Self> {
        let (name, value) = line.split_once(':')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self::new(name, value.trim()))
    }

    /// Case-insensitive name comparison.
    #[inline]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Reads bytes as ISO-8859-1, every byte maps to the char with the same code point.
///
/// Header bytes may precede any charset negotiation, this never fails and never loses a byte.
pub(crate) fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_line() {
        let header = Header::parse_line("Content-Type: text/plain; charset=ISO-8859-1").unwrap();
        assert_eq!(header.name(), "Content-Type");
        assert_eq!(header.value(), "text/plain; charset=ISO-8859-1");
        assert!(header.is("content-type"));
    }

    #[test]
    fn parse_keeps_colons_in_value() {
        let header = Header::parse_line("Referer:http://localhost:8080/").unwrap();
        assert_eq!(header.name(), "Referer");
        assert_eq!(header.value(), "http://localhost:8080/");
    }

    #[test]
    fn parse_invalid_lines() {
        assert_eq!(Header::parse_line("no colon here"), None);
        assert_eq!(Header::parse_line(": empty name"), None);
        assert_eq!(Header::parse_line(""), None);
    }

    #[test]
    fn latin1_is_byte_exact() {
        let bytes: Vec<u8> = (0u8..=255).collect();
        let s = latin1(&bytes);
        assert_eq!(s.chars().count(), 256);
        assert!(s.chars().zip(bytes).all(|(c, b)| c as u32 == u32::from(b)));
    }
}
