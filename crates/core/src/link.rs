//! Artifact links and cross-references

use std::cmp::Ordering;
use std::fmt;

/// Reference to another artifact
///
/// A link is either direct (a bare numeric id) or a cross-reference string of
/// the form `"NAME#id"`. When a reference is set it is the authoritative
/// source of the id; the stored numeric id only matters when the reference is
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactLink {
    raw_id: i64,
    /// Cross-reference string, e.g. `"BUG#42"`
    pub reference: Option<String>,
    /// Browse URL of the referenced artifact, when the service provides one
    pub url: Option<String>,
    /// Whether this entry came from the reverse-link list
    pub is_reverse: bool,
}

impl ArtifactLink {
    /// A forward link to a bare numeric artifact id
    pub fn direct(id: i64) -> Self {
        Self {
            raw_id: id,
            ..Self::default()
        }
    }

    /// A reverse link to a bare numeric artifact id
    pub fn reverse(id: i64) -> Self {
        Self {
            raw_id: id,
            is_reverse: true,
            ..Self::default()
        }
    }

    /// A cross-reference link (`"NAME#id"` plus optional URL)
    pub fn cross(reference: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            reference: Some(reference.into()),
            url: if url.is_empty() { None } else { Some(url) },
            ..Self::default()
        }
    }

    /// Overwrite the stored numeric id
    ///
    /// Only meaningful while `reference` is empty; a non-empty reference
    /// keeps winning in [`ArtifactLink::id`].
    pub fn set_id(&mut self, id: i64) {
        self.raw_id = id;
    }

    /// Effective artifact id
    ///
    /// Parses the integer after `#` when a reference is set; falls back to
    /// the stored id when the reference is empty or malformed.
    pub fn id(&self) -> i64 {
        match self.reference.as_deref() {
            Some(reference) if !reference.trim().is_empty() => reference
                .rsplit('#')
                .next()
                .and_then(|part| part.trim().parse().ok())
                .unwrap_or(self.raw_id),
            _ => self.raw_id,
        }
    }
}

impl fmt::Display for ArtifactLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl Ord for ArtifactLink {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id().cmp(&other.id())
    }
}

impl PartialOrd for ArtifactLink {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
