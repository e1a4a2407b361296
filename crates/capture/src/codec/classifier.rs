//! Body classification by mime type.
//!
//! The decision is a plain table lookup: a [`BodyTypeMap`] supplied by the caller maps
//! mime types to a [`BodyKind`]. Only two kinds have built-in fallbacks, `multipart/*`
//! and `application/x-www-form-urlencoded`. Text must always be listed explicitly, so
//! unknown types are kept as raw bytes.

use std::collections::HashMap;

use serde::Serialize;

const MULTIPART_PREFIX: &str = "multipart/";
const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

const TEXT_TYPES: &[&str] = &[
    "application/json",
    "application/xml",
    "application/soap+xml",
    "application/atom+xml",
    "application/xhtml+xml",
    "application/javascript",
    "text/json",
    "text/xml",
    "text/html",
    "text/plain",
    "text/css",
    "text/csv",
    "text/javascript",
];

const MULTIPART_TYPES: &[&str] = &[
    "multipart/form-data",
    "multipart/mixed",
    "multipart/alternative",
    "multipart/related",
    "multipart/digest",
];

/// How a body is decoded for display.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum BodyKind {
    Text,
    Form,
    Multipart,
    Binary,
}

/// Immutable mapping from lowercased mime types to body kinds.
///
/// [`BodyTypeMap::default`] carries the usual text types, [`BodyTypeMap::empty`] relies
/// on the built-in fallbacks only. Changing a table means building a new one with
/// [`BodyTypeMap::with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyTypeMap {
    inner: HashMap<String, BodyKind>,
}

impl BodyTypeMap {
    pub fn empty() -> Self {
        Self { inner: HashMap::new() }
    }

    /// Returns a table with `mime_type` mapped to `kind`, replacing any previous mapping.
    #[must_use]
    pub fn with(mut self, mime_type: impl AsRef<str>, kind: BodyKind) -> Self {
        self.inner.insert(mime_type.as_ref().trim().to_ascii_lowercase(), kind);
        self
    }

    /// Returns a table without a mapping for `mime_type`.
    #[must_use]
    pub fn without(mut self, mime_type: impl AsRef<str>) -> Self {
        self.inner.remove(&mime_type.as_ref().trim().to_ascii_lowercase());
        self
    }

    /// Exact, case-insensitive lookup without any fallback.
    pub fn get(&self, mime_type: &str) -> Option<BodyKind> {
        if mime_type.bytes().any(|b| b.is_ascii_uppercase()) {
            self.inner.get(&mime_type.to_ascii_lowercase()).copied()
        } else {
            self.inner.get(mime_type).copied()
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, BodyKind)> {
        self.inner.iter().map(|(mime_type, kind)| (mime_type.as_str(), *kind))
    }
}

impl Default for BodyTypeMap {
    fn default() -> Self {
        let text = TEXT_TYPES.iter().map(|mime_type| (*mime_type, BodyKind::Text));
        let multipart = MULTIPART_TYPES.iter().map(|mime_type| (*mime_type, BodyKind::Multipart));
        let form = std::iter::once((FORM_URLENCODED, BodyKind::Form));
        text.chain(multipart).chain(form).collect()
    }
}

impl<S: AsRef<str>> FromIterator<(S, BodyKind)> for BodyTypeMap {
    fn from_iter<T: IntoIterator<Item = (S, BodyKind)>>(iter: T) -> Self {
        iter.into_iter().fold(Self::empty(), |map, (mime_type, kind)| map.with(mime_type, kind))
    }
}

/// Classifies a mime type, parameters after `;` are ignored.
///
/// The table wins over the built-in fallbacks, so a caller may map a `multipart/*` type
/// to anything else.
pub fn classify(mime_type: &str, table: &BodyTypeMap) -> BodyKind {
    let essence = mime_type.split(';').next().unwrap_or_default().trim();

    if let Some(kind) = table.get(essence) {
        return kind;
    }

    let prefix_matches = essence
        .get(..MULTIPART_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(MULTIPART_PREFIX));
    if prefix_matches {
        BodyKind::Multipart
    } else if essence.eq_ignore_ascii_case(FORM_URLENCODED) {
        BodyKind::Form
    } else {
        BodyKind::Binary
    }
}
