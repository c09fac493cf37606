//! Entity identifiers and id generation
//!
//! Every line, word and subword carries an [`EntityId`] that is unique across
//! the whole document. New ids come from an injected [`IdGenerator`] so that
//! hosts get random uuids while tests get predictable sequences.

use ahash::AHashSet;
use core::fmt;

use super::document::AlignmentDocument;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Opaque identifier shared by all three entity levels
///
/// A single id type lets heterogeneous id lists (selection, delete-by-ids)
/// address any level without tagging.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct EntityId(String);

impl EntityId {
    /// Wrap an existing identifier string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Source of fresh entity ids
///
/// Implementations must never hand out the same id twice for the lifetime of
/// a session; paste relies on this to keep duplicated subtrees disjoint.
pub trait IdGenerator: fmt::Debug + Send {
    /// Mint a new, never-before-returned id
    fn next_id(&mut self) -> EntityId;
}

/// Deterministic generator producing `prefix-1`, `prefix-2`, ...
///
/// # Examples
///
/// ```
/// use kara_core::{IdGenerator, SequentialIdGenerator};
///
/// let mut ids = SequentialIdGenerator::new("n");
/// assert_eq!(ids.next_id().as_str(), "n-1");
/// assert_eq!(ids.next_id().as_str(), "n-2");
/// ```
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    prefix: String,
    counter: u64,
}

impl SequentialIdGenerator {
    /// Create a generator whose ids start with `prefix`
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: 0,
        }
    }

    /// Number of ids handed out so far
    #[must_use]
    pub const fn issued(&self) -> u64 {
        self.counter
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new("id")
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> EntityId {
        self.counter += 1;
        EntityId(format!("{}-{}", self.prefix, self.counter))
    }
}

/// Random v4 uuid generator used by interactive hosts
#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

#[cfg(feature = "uuid")]
impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> EntityId {
        EntityId(uuid::Uuid::new_v4().to_string())
    }
}

/// Generator adapter that skips ids a document already uses
///
/// A session that loads a document minted elsewhere (a restored snapshot,
/// another session's output) cannot assume its own generator never produced
/// those ids. Wrapping the generator re-draws until the id is free.
#[derive(Debug)]
pub struct UnusedIds<'a> {
    inner: &'a mut dyn IdGenerator,
    taken: AHashSet<&'a EntityId>,
}

impl<'a> UnusedIds<'a> {
    /// Wrap `inner`, treating every id in `document` as taken
    pub fn new(inner: &'a mut dyn IdGenerator, document: &'a AlignmentDocument) -> Self {
        Self {
            inner,
            taken: document.ids().collect(),
        }
    }
}

impl IdGenerator for UnusedIds<'_> {
    fn next_id(&mut self) -> EntityId {
        loop {
            let id = self.inner.next_id();
            if !self.taken.contains(&id) {
                return id;
            }
            tracing::trace!(%id, "skipped id already in document");
        }
    }
}
