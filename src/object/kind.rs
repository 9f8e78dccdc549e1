use std::fmt::{self, Display, Formatter};

/// Describes the fundamental object type (blob or commit).
/// We use the word `kind` here to avoid conflict with the Rust reserved word `type`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Kind {
    Blob,
    Commit,
}

impl Kind {
    /// Parse the kind tag that leads a loose-object header.
    pub(crate) fn from_bytes(kind: &[u8]) -> Option<Kind> {
        match kind {
            b"blob" => Some(Kind::Blob),
            b"commit" => Some(Kind::Commit),
            _ => None,
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Kind::Blob => write!(f, "blob"),
            Kind::Commit => write!(f, "commit"),
        }
    }
}
