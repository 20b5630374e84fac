use std::fmt;
use thiserror::Error;

/// Why an identifier failed to resolve to a playable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceFault {
    Missing,
    NotMedia,
}

impl fmt::Display for ReferenceFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceFault::Missing => write!(f, "no element has that id"),
            ReferenceFault::NotMedia => write!(f, "element is not a media element"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MirrorError {
    #[error("invalid media reference `{id}`: {fault}")]
    InvalidReference { id: String, fault: ReferenceFault },
}

impl MirrorError {
    pub fn missing(id: impl Into<String>) -> Self {
        Self::InvalidReference {
            id: id.into(),
            fault: ReferenceFault::Missing,
        }
    }

    pub fn not_media(id: impl Into<String>) -> Self {
        Self::InvalidReference {
            id: id.into(),
            fault: ReferenceFault::NotMedia,
        }
    }
}

/// A start request the element refused (autoplay policy, aborted load, ...).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("play request rejected: {0}")]
pub struct PlayRejected(pub String);
