//! Represents the concept of an "object": a tuple of object kind and
//! binary content, identified by the hash of a header plus that content.
//!
//! Two kinds exist. A [`Blob`] snapshots one working file (name and
//! bytes). A [`Commit`] snapshots the whole tree: a message, a
//! timestamp, parent links, and a name-to-blob table.

use sha1::{Digest, Sha1};
use thiserror::Error;

mod blob;
pub use blob::Blob;

mod commit;
pub use commit::Commit;

mod id;
pub use id::{Id, ParseIdError};

mod kind;
pub use kind::Kind;

pub(crate) mod parse_utils;

/// An error which can be returned when decoding a loose object.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The `kind length\0` header is missing or unparseable.
    #[error("malformed object header")]
    Header,

    /// The header names a kind this crate does not store.
    #[error("unknown object kind")]
    UnknownKind,

    /// The header's length does not match the body.
    #[error("content length does not match header")]
    Length,

    /// The body does not parse as the named kind.
    #[error("malformed {0} body")]
    Body(&'static str),

    /// The object parses, but its content hashes to a different ID.
    #[error("content hashes to a different ID")]
    WrongId,

    /// An object of another kind sits where this kind was expected.
    #[error("object is not of the expected kind")]
    WrongKind,

    /// The deflate stream itself cannot be inflated.
    #[error("invalid zlib stream")]
    Compression,

    /// An embedded object ID does not parse.
    #[error(transparent)]
    Id(#[from] ParseIdError),
}

/// Compute the ID for an object of the given kind and body.
///
/// The hash covers a `kind length\0` header followed by the body, so
/// two objects with identical bytes but different kinds get distinct IDs.
pub(crate) fn hash_object(kind: Kind, body: &[u8]) -> Id {
    let mut hasher = Sha1::new();

    hasher.update(kind.to_string());
    hasher.update(b" ");

    let lstr = body.len().to_string();
    hasher.update(lstr);
    hasher.update(b"\0");

    hasher.update(body);

    let final_hash = hasher.finalize();
    let id: &[u8] = &final_hash[..];

    // We use unwrap here because hasher is guaranteed
    // to return a 20-byte slice.
    Id::new(id).unwrap()
}

/// Prefix the body with its `kind length\0` header, yielding the exact
/// bytes the ID was computed over.
pub(crate) fn encode(kind: Kind, body: &[u8]) -> Vec<u8> {
    let header = format!("{} {}\0", kind, body.len());

    let mut bytes = Vec::with_capacity(header.len() + body.len());
    bytes.extend_from_slice(header.as_bytes());
    bytes.extend_from_slice(body);
    bytes
}

/// Split encoded object bytes back into kind and body.
pub(crate) fn decode(bytes: &[u8]) -> Result<(Kind, &[u8]), DecodeError> {
    let nul = bytes
        .iter()
        .position(|b| *b == 0)
        .ok_or(DecodeError::Header)?;

    let (kind, len) = parse_utils::split_once(&bytes[..nul], &b' ');
    let kind = Kind::from_bytes(kind).ok_or(DecodeError::UnknownKind)?;
    let len = parse_utils::parse_usize(len).ok_or(DecodeError::Header)?;

    let body = &bytes[nul + 1..];
    if len != body.len() {
        return Err(DecodeError::Length);
    }

    Ok((kind, body))
}
