//! File identifiers for tracking loaded documents.

use std::fmt;

/// An interned identifier for a document.
///
/// `FileId` is a lightweight handle (just a u32) that uniquely identifies
/// a document within the workspace. The actual path is stored by the
/// [`AnalysisHost`](crate::ide::AnalysisHost).
///
/// Ids are handed out in load order, which makes them the tie-breaker
/// when two documents declare the same def name.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct FileId(pub u32);

impl FileId {
    /// Create a new FileId from a raw index.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Debug for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileId({})", self.0)
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file#{}", self.0)
    }
}

impl From<u32> for FileId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}
