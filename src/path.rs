//! Field path representation for locating values in nested structures.
//!
//! This module provides [`Path`] and [`PathSegment`]. A path is a persistent,
//! append-only list: deriving a child path shares the parent's segments instead
//! of copying them, and no operation ever mutates an existing path.

use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Rendering of the root path.
pub const ROOT_SENTINEL: &str = "<nil>";

/// A segment of a field path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A struct field or object member (e.g. `spec`, `name`)
    Field(String),
    /// A position in a list (e.g. `[0]`, `[42]`)
    Index(usize),
    /// A key in a map (e.g. `["app"]`)
    Key(String),
}

#[derive(Debug)]
struct Node {
    segment: PathSegment,
    parent: Option<Arc<Node>>,
}

/// An immutable path to a value in a nested structure.
///
/// `Path` represents locations like `spec.containers[0].ports["http"]`.
/// Paths are cheap to clone and to extend: [`child`](Path::child),
/// [`index`](Path::index) and [`key`](Path::key) return a new path that shares
/// the receiver's segments.
///
/// # Example
///
/// ```rust
/// use fieldcheck::Path;
///
/// let base = Path::root().child("servers");
/// let first = base.index(0).child("port");
/// let second = base.index(1).child("port");
///
/// assert_eq!(base.to_string(), "servers");
/// assert_eq!(first.to_string(), "servers[0].port");
/// assert_eq!(second.to_string(), "servers[1].port");
/// assert_eq!(Path::root().to_string(), "<nil>");
/// ```
#[derive(Clone, Default)]
pub struct Path {
    tail: Option<Arc<Node>>,
    len: usize,
}

impl Path {
    /// Creates an empty path representing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from a single field segment.
    pub fn new(name: impl Into<String>) -> Self {
        Self::root().child(name)
    }

    /// Returns a new path with a field segment appended.
    pub fn child(&self, name: impl Into<String>) -> Self {
        self.push(PathSegment::Field(name.into()))
    }

    /// Returns a new path with an index segment appended.
    pub fn index(&self, index: usize) -> Self {
        self.push(PathSegment::Index(index))
    }

    /// Returns a new path with a map key segment appended.
    pub fn key(&self, key: impl Into<String>) -> Self {
        self.push(PathSegment::Key(key.into()))
    }

    fn push(&self, segment: PathSegment) -> Self {
        Self {
            tail: Some(Arc::new(Node {
                segment,
                parent: self.tail.clone(),
            })),
            len: self.len + 1,
        }
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.tail.is_none()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns an iterator over the segments, from the root outwards.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        let mut collected = Vec::with_capacity(self.len);
        let mut node = self.tail.as_deref();
        while let Some(current) = node {
            collected.push(&current.segment);
            node = current.parent.as_deref();
        }
        collected.into_iter().rev()
    }

    /// Returns the parent path, or None if this is root.
    ///
    /// The parent is shared, not rebuilt.
    pub fn parent(&self) -> Option<Self> {
        self.tail.as_ref().map(|node| Self {
            tail: node.parent.clone(),
            len: self.len - 1,
        })
    }

    /// Returns the last segment, or None if this is root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.tail.as_deref().map(|node| &node.segment)
    }

    /// Returns the human-facing name of the addressed field.
    ///
    /// This is the rendering of the trailing segments starting at the last
    /// field name: `servers[0].port` gives `port`, `labels["app"]` gives
    /// `labels["app"]`. The root path gives an empty string.
    pub fn field_name(&self) -> String {
        let segments: Vec<&PathSegment> = self.segments().collect();
        let start = segments
            .iter()
            .rposition(|s| matches!(s, PathSegment::Field(_)))
            .unwrap_or(0);
        render(&segments[start..])
    }
}

fn render(segments: &[&PathSegment]) -> String {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        match segment {
            PathSegment::Field(name) => {
                if i > 0 {
                    out.push('.');
                }
                out.push_str(name);
            }
            PathSegment::Index(idx) => out.push_str(&format!("[{}]", idx)),
            PathSegment::Key(key) => out.push_str(&format!("[{:?}]", key)),
        }
    }
    out
}

impl Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str(ROOT_SENTINEL);
        }
        let segments: Vec<&PathSegment> = self.segments().collect();
        f.write_str(&render(&segments))
    }
}

impl Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Path")
            .field(&self.segments().collect::<Vec<_>>())
            .finish()
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        if self.len != other.len {
            return false;
        }
        match (&self.tail, &other.tail) {
            (Some(a), Some(b)) if Arc::ptr_eq(a, b) => true,
            _ => self.segments().eq(other.segments()),
        }
    }
}

impl Eq for Path {}

impl Hash for Path {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for segment in self.segments() {
            segment.hash(state);
        }
    }
}

// Unlinks the chain iteratively so dropping a long path cannot overflow the
// stack. Stops at the first node that is still shared.
impl Drop for Path {
    fn drop(&mut self) {
        let mut next = self.tail.take();
        while let Some(node) = next {
            next = match Arc::into_inner(node) {
                Some(mut node) => node.parent.take(),
                None => None,
            };
        }
    }
}

impl From<&str> for Path {
    fn from(name: &str) -> Self {
        Path::new(name)
    }
}
