use std::borrow::Cow;
use std::fmt;

use encoding_rs::{Encoding, UTF_8, X_USER_DEFINED};
use serde::{Serialize, Serializer};

use crate::protocol::latin1;

// labels read byte for byte instead of through the windows-1252 mapping of `encoding_rs`
const LATIN1_LABELS: &[&str] = &[
    "iso-8859-1",
    "iso8859-1",
    "iso88591",
    "iso_8859-1",
    "iso_8859-1:1987",
    "iso-ir-100",
    "latin1",
    "l1",
    "cp819",
    "ibm819",
    "csisolatin1",
];

/// The character set text content is decoded with.
///
/// ISO-8859-1 maps every byte to the code point of the same value, every other charset
/// decodes through `encoding_rs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Latin1,
    Whatwg(&'static Encoding),
}

impl Charset {
    pub fn utf8() -> Self {
        Self::Whatwg(UTF_8)
    }

    /// Looks up a charset label, case-insensitively and ignoring surrounding whitespace.
    ///
    /// Returns `None` for unknown labels and for labels that cannot decode real text: the
    /// WHATWG "replacement" labels (`ISO-2022-KR`, `HZ-GB-2312`, ...), which turn any input
    /// into a single U+FFFD, and the browser-internal `x-user-defined`.
    pub fn for_label(label: &str) -> Option<Self> {
        let label = label.trim();
        if LATIN1_LABELS.iter().any(|latin1| latin1.eq_ignore_ascii_case(label)) {
            return Some(Self::Latin1);
        }
        Encoding::for_label_no_replacement(label.as_bytes())
            .filter(|&encoding| encoding != X_USER_DEFINED)
            .map(Self::Whatwg)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Latin1 => "ISO-8859-1",
            Self::Whatwg(encoding) => encoding.name(),
        }
    }

    /// Decodes `bytes`, malformed sequences are replaced with U+FFFD.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        match self {
            Self::Latin1 => Cow::Owned(latin1(bytes)),
            Self::Whatwg(encoding) => encoding.decode_without_bom_handling(bytes).0,
        }
    }
}

impl Default for Charset {
    fn default() -> Self {
        Self::utf8()
    }
}

impl PartialEq<&'static Encoding> for Charset {
    fn eq(&self, other: &&'static Encoding) -> bool {
        matches!(self, Self::Whatwg(encoding) if encoding == other)
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Charset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
