use std::collections::BTreeMap;

use super::{hash_object, parse_utils, DecodeError, Id, Kind};

/// A commit snapshots the whole tree: a log message, a timestamp,
/// links to parent commits, and a table mapping each tracked filename
/// to the blob holding its content.
///
/// The table is a `BTreeMap`, so the encoded form lists files in
/// sorted order and identical snapshots hash identically everywhere.
#[derive(Clone, Debug, PartialEq)]
pub struct Commit {
    id: Id,
    message: String,
    timestamp: i64,
    parents: Vec<Id>,
    files: BTreeMap<String, Id>,
}

impl Commit {
    /// The root commit every repository starts from: no parents, no
    /// files, timestamp zero. Every store derives the identical ID for
    /// it, which gives any two repositories a shared ancestor.
    pub fn initial() -> Commit {
        Commit::new("initial commit", 0, Vec::new(), BTreeMap::new())
    }

    /// Create a commit. The ID is computed eagerly from the encoded body.
    pub fn new(
        message: &str,
        timestamp: i64,
        parents: Vec<Id>,
        files: BTreeMap<String, Id>,
    ) -> Commit {
        let body = body_of(message, timestamp, &parents, &files);
        let id = hash_object(Kind::Commit, &body);

        Commit {
            id,
            message: message.to_string(),
            timestamp,
            parents,
            files,
        }
    }

    /// Return the ID of the commit.
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// Return the log message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Return the commit time as seconds since the Unix epoch.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Return the parent IDs. Empty for the root commit; two entries
    /// for a merge commit, the current branch's tip first.
    pub fn parents(&self) -> &[Id] {
        &self.parents
    }

    /// Return the first parent, which the plain log follows.
    pub fn first_parent(&self) -> Option<&Id> {
        self.parents.first()
    }

    /// Return the file table.
    pub fn files(&self) -> &BTreeMap<String, Id> {
        &self.files
    }

    /// Return the blob ID this commit tracks for `filename`, if any.
    pub fn tracked(&self, filename: &str) -> Option<&Id> {
        self.files.get(filename)
    }

    /// Encode the commit body: header lines, a blank line, then the
    /// message bytes.
    pub(crate) fn body(&self) -> Vec<u8> {
        body_of(&self.message, self.timestamp, &self.parents, &self.files)
    }

    /// Decode a commit body.
    ///
    /// The ID is taken from a hash of the raw bytes rather than from a
    /// re-encoding, so a stored object keeps the ID it was filed under.
    pub(crate) fn from_body(body: &[u8]) -> Result<Commit, DecodeError> {
        let mut timestamp = None;
        let mut parents = Vec::new();
        let mut files = BTreeMap::new();

        let mut rest = body;

        loop {
            let (line, tail) = parse_utils::split_once(rest, &b'\n');
            rest = tail;

            if line.is_empty() {
                break;
            }

            if let Some(value) = parse_utils::header(line, b"timestamp") {
                timestamp =
                    Some(parse_utils::parse_i64(value).ok_or(DecodeError::Body("commit"))?);
            } else if let Some(value) = parse_utils::header(line, b"parent") {
                parents.push(Id::from_hex(value)?);
            } else if let Some(value) = parse_utils::header(line, b"file") {
                let (id, name) = parse_utils::split_once(value, &b' ');
                let name =
                    std::str::from_utf8(name).map_err(|_| DecodeError::Body("commit"))?;
                files.insert(name.to_string(), Id::from_hex(id)?);
            } else {
                return Err(DecodeError::Body("commit"));
            }
        }

        let message =
            std::str::from_utf8(rest).map_err(|_| DecodeError::Body("commit"))?;
        let timestamp = timestamp.ok_or(DecodeError::Body("commit"))?;

        Ok(Commit {
            id: hash_object(Kind::Commit, body),
            message: message.to_string(),
            timestamp,
            parents,
            files,
        })
    }
}

fn body_of(
    message: &str,
    timestamp: i64,
    parents: &[Id],
    files: &BTreeMap<String, Id>,
) -> Vec<u8> {
    let mut body = Vec::new();

    body.extend_from_slice(format!("timestamp {}\n", timestamp).as_bytes());

    for parent in parents {
        body.extend_from_slice(format!("parent {}\n", parent).as_bytes());
    }

    for (name, id) in files {
        body.extend_from_slice(format!("file {} {}\n", id, name).as_bytes());
    }

    body.push(b'\n');
    body.extend_from_slice(message.as_bytes());
    body
}
