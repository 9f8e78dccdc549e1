use super::{hash_object, DecodeError, Id, Kind};

/// A blob snapshots one working file: its name and its exact bytes.
///
/// The name participates in the hash, so the same bytes saved under two
/// names yield two distinct blobs.
#[derive(Clone, Debug, PartialEq)]
pub struct Blob {
    id: Id,
    filename: String,
    content: Vec<u8>,
}

impl Blob {
    /// Snapshot the given file content. The ID is computed eagerly.
    pub fn new(filename: &str, content: Vec<u8>) -> Blob {
        let body = body_of(filename, &content);
        let id = hash_object(Kind::Blob, &body);

        Blob {
            id,
            filename: filename.to_string(),
            content,
        }
    }

    /// Return the ID of the blob.
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// Return the name of the file this blob snapshots.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Return the snapshotted bytes.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Encode the blob body: the filename, a NUL, then the content.
    pub(crate) fn body(&self) -> Vec<u8> {
        body_of(&self.filename, &self.content)
    }

    /// Decode a blob body. The first NUL ends the filename; the content
    /// may itself contain NULs.
    pub(crate) fn from_body(body: &[u8]) -> Result<Blob, DecodeError> {
        let nul = body
            .iter()
            .position(|b| *b == 0)
            .ok_or(DecodeError::Body("blob"))?;

        let filename =
            std::str::from_utf8(&body[..nul]).map_err(|_| DecodeError::Body("blob"))?;

        Ok(Blob {
            id: hash_object(Kind::Blob, body),
            filename: filename.to_string(),
            content: body[nul + 1..].to_vec(),
        })
    }
}

fn body_of(filename: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(filename.len() + 1 + content.len());
    body.extend_from_slice(filename.as_bytes());
    body.push(0);
    body.extend_from_slice(content);
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_input_same_id() {
        let a = Blob::new("wug.txt", b"This is a wug.\n".to_vec());
        let b = Blob::new("wug.txt", b"This is a wug.\n".to_vec());
        assert_eq!(a.id(), b.id());
        assert_eq!(a, b);
    }

    #[test]
    fn name_participates_in_id() {
        let a = Blob::new("wug.txt", b"This is a wug.\n".to_vec());
        let b = Blob::new("notwug.txt", b"This is a wug.\n".to_vec());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn content_participates_in_id() {
        let a = Blob::new("wug.txt", b"This is a wug.\n".to_vec());
        let b = Blob::new("wug.txt", b"This is not a wug.\n".to_vec());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn body_round_trip() {
        let blob = Blob::new("wug.txt", b"binary\0bytes\nallowed".to_vec());

        let back = Blob::from_body(&blob.body()).unwrap();
        assert_eq!(back.id(), blob.id());
        assert_eq!(back.filename(), "wug.txt");
        assert_eq!(back.content(), b"binary\0bytes\nallowed");
    }

    #[test]
    fn empty_content_round_trip() {
        let blob = Blob::new("empty", Vec::new());

        let back = Blob::from_body(&blob.body()).unwrap();
        assert_eq!(back.id(), blob.id());
        assert!(back.content().is_empty());
    }

    #[test]
    fn from_body_rejects_missing_nul() {
        assert!(matches!(
            Blob::from_body(b"no separator"),
            Err(DecodeError::Body("blob"))
        ));
    }
}
