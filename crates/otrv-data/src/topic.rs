//! Topic type representing a hierarchical, delimiter-separated path

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::DEFAULT_SEPARATOR;

/// Error type for invalid topic operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TopicError {
    #[error("topic path contains no non-empty segments")]
    EmptyPath,

    #[error("`{base}` is not an ancestor of `{topic}`")]
    NotAncestor {
        /// Path of the topic the suffix was requested from
        topic: String,
        /// Path of the base that was expected to be a prefix
        base: String,
    },
}

/// Represents a hierarchical topic path (e.g., "sensors/boiler/temperature")
///
/// A topic is a chain of named segments linked through parent references,
/// built by splitting a path string on a separator (default `/`). Empty
/// segments produced by leading, trailing, or repeated separators are
/// discarded, so `//my/topic` and `my//topic//` both normalize to
/// `my/topic`. Topics are immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Topic {
    name: String,
    parent: Option<Box<Topic>>,
    sep: char,
}

impl Topic {
    /// Parse a `/`-separated topic path
    pub fn new(path: impl AsRef<str>) -> Result<Self, TopicError> {
        Self::with_parent_and_sep(path, None, DEFAULT_SEPARATOR)
    }

    /// Parse a topic path with a custom separator
    pub fn with_sep(path: impl AsRef<str>, sep: char) -> Result<Self, TopicError> {
        Self::with_parent_and_sep(path, None, sep)
    }

    /// Parse a `/`-separated topic path rooted under an existing topic
    pub fn with_parent(path: impl AsRef<str>, parent: Topic) -> Result<Self, TopicError> {
        Self::with_parent_and_sep(path, Some(parent), DEFAULT_SEPARATOR)
    }

    /// Parse a topic path with an optional explicit parent and separator
    ///
    /// Each non-empty segment of `path` becomes one link in the chain, with
    /// the last segment as the new topic's name. The explicit parent, when
    /// given, becomes the ancestor of the outermost parsed segment. A path
    /// with no non-empty segments is an error.
    pub fn with_parent_and_sep(
        path: impl AsRef<str>,
        parent: Option<Topic>,
        sep: char,
    ) -> Result<Self, TopicError> {
        let mut segments = path.as_ref().split(sep).filter(|s| !s.is_empty());
        let first = segments.next().ok_or(TopicError::EmptyPath)?;

        let mut topic = Self {
            name: first.to_string(),
            parent: parent.map(Box::new),
            sep,
        };
        for segment in segments {
            topic = Self {
                name: segment.to_string(),
                parent: Some(Box::new(topic)),
                sep,
            };
        }
        Ok(topic)
    }

    /// Get the topic name (the last path segment)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the parent topic, if any
    pub fn parent(&self) -> Option<&Topic> {
        self.parent.as_deref()
    }

    /// Get the separator this topic was constructed with
    pub fn separator(&self) -> char {
        self.sep
    }

    /// Render the full path from the root ancestor to this topic
    ///
    /// Segments are joined with the construction separator; no leading or
    /// trailing separator is produced.
    pub fn path(&self) -> String {
        self.path_with(self.sep)
    }

    /// Render the full path joined with an explicit separator
    pub fn path_with(&self, sep: char) -> String {
        self.segments().join(&sep.to_string())
    }

    /// Get the segment names ordered from root ancestor to this topic
    pub fn segments(&self) -> Vec<&str> {
        let mut segments = Vec::new();
        let mut current = Some(self);
        while let Some(topic) = current {
            segments.push(topic.name.as_str());
            current = topic.parent.as_deref();
        }
        segments.reverse();
        segments
    }

    /// Compute the path suffix of this topic relative to an ancestor
    ///
    /// `base` must be a strict prefix of this topic's path; the returned
    /// topic holds the remaining segments and inherits this topic's
    /// separator. Reports [`TopicError::NotAncestor`] when `base` is not a
    /// strict prefix (including when the paths are equal).
    pub fn relative_to(&self, base: &Topic) -> Result<Topic, TopicError> {
        let prefix = base.segments();
        let full = self.segments();
        if full.len() <= prefix.len() || full[..prefix.len()] != prefix[..] {
            return Err(TopicError::NotAncestor {
                topic: self.path(),
                base: base.path(),
            });
        }

        let mut topic = Self {
            name: full[prefix.len()].to_string(),
            parent: None,
            sep: self.sep,
        };
        for segment in &full[prefix.len() + 1..] {
            topic = Self {
                name: (*segment).to_string(),
                parent: Some(Box::new(topic)),
                sep: self.sep,
            };
        }
        Ok(topic)
    }
}

impl PartialEq for Topic {
    fn eq(&self, other: &Self) -> bool {
        // Structural equality over the ancestor chains; the separator is a
        // rendering detail and takes no part in it.
        let mut a = Some(self);
        let mut b = Some(other);
        loop {
            match (a, b) {
                (None, None) => return true,
                (Some(x), Some(y)) => {
                    if x.name != y.name {
                        return false;
                    }
                    a = x.parent.as_deref();
                    b = y.parent.as_deref();
                }
                _ => return false,
            }
        }
    }
}

impl Eq for Topic {}

impl FromStr for Topic {
    type Err = TopicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Topic {
    type Error = TopicError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Topic> for String {
    fn from(topic: Topic) -> String {
        // Always the `/`-joined form, whatever separator the topic was
        // constructed with, so the string parses back to the same chain.
        topic.path_with(DEFAULT_SEPARATOR)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}
