//! On-disk, content-addressed storage for loose objects.
//!
//! Each object lives at `objects/xx/xxxx...` where the path is its
//! 40-digit hex ID split after two digits, deflated with zlib. Writes
//! go through a temp file in the same tree and land with an atomic
//! rename, and a put of an ID that already exists is a no-op, so the
//! store only ever grows and never holds a half-written object under a
//! final name.
//!
//! The store also owns the `staging/` side table, where blobs wait
//! between `add` and `commit` in the same encoding. A commit promotes
//! them into `objects/` with a rename.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use tempfile::NamedTempFile;

use crate::object::{self, Blob, Commit, DecodeError, Id, Kind};
use crate::repo::{Error, Result};

/// Write `bytes` to `target` through a temp file in `tmp_dir` and an
/// atomic rename. Both paths must be on the same filesystem.
pub(crate) fn write_atomic(tmp_dir: &Path, target: &Path, bytes: &[u8]) -> io::Result<()> {
    fs::create_dir_all(tmp_dir)?;
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut temp = NamedTempFile::new_in(tmp_dir)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(target).map_err(|err| err.error)?;
    Ok(())
}

#[derive(Debug)]
pub(crate) struct ObjectStore {
    objects_dir: PathBuf,
    staging_dir: PathBuf,
}

impl ObjectStore {
    pub(crate) fn new(state_dir: &Path) -> ObjectStore {
        ObjectStore {
            objects_dir: state_dir.join("objects"),
            staging_dir: state_dir.join("staging"),
        }
    }

    fn object_path(&self, id: &Id) -> PathBuf {
        let hex = id.to_string();
        let (fan_out, rest) = hex.split_at(2);
        self.objects_dir.join(fan_out).join(rest)
    }

    /// Return true if the store holds an object with this ID.
    pub(crate) fn contains(&self, id: &Id) -> bool {
        self.object_path(id).is_file()
    }

    /// Store a blob. A no-op if the store already holds its ID.
    pub(crate) fn put_blob(&self, blob: &Blob) -> Result<()> {
        self.put_encoded(blob.id(), &object::encode(Kind::Blob, &blob.body()))
    }

    /// Store a commit. A no-op if the store already holds its ID.
    pub(crate) fn put_commit(&self, commit: &Commit) -> Result<()> {
        self.put_encoded(commit.id(), &object::encode(Kind::Commit, &commit.body()))
    }

    fn put_encoded(&self, id: &Id, encoded: &[u8]) -> Result<()> {
        let path = self.object_path(id);
        if path.is_file() {
            return Ok(());
        }

        write_atomic(&self.objects_dir, &path, &deflate(encoded)?)?;
        Ok(())
    }

    /// Load the blob with this ID. The content is verified against the
    /// ID before it is returned.
    pub(crate) fn blob(&self, id: &Id) -> Result<Blob> {
        match self.read_object(id)? {
            Some((Kind::Blob, body)) => {
                Blob::from_body(&body).map_err(|err| Error::corrupt(id, err))
            }
            Some((Kind::Commit, _)) => Err(Error::corrupt(id, DecodeError::WrongKind)),
            None => Err(Error::MissingObject(id.to_string())),
        }
    }

    /// Load the commit with this ID. The content is verified against
    /// the ID before it is returned.
    pub(crate) fn commit(&self, id: &Id) -> Result<Commit> {
        match self.commit_if_present(id)? {
            Some(commit) => Ok(commit),
            None => Err(Error::NoSuchCommit(id.to_string())),
        }
    }

    /// Load the commit with this ID, or `None` if the store has no such
    /// object or holds a blob under it.
    pub(crate) fn commit_if_present(&self, id: &Id) -> Result<Option<Commit>> {
        match self.read_object(id)? {
            Some((Kind::Commit, body)) => Commit::from_body(&body)
                .map(Some)
                .map_err(|err| Error::corrupt(id, err)),
            Some((Kind::Blob, _)) => Ok(None),
            None => Ok(None),
        }
    }

    fn read_object(&self, id: &Id) -> Result<Option<(Kind, Vec<u8>)>> {
        let compressed = match fs::read(self.object_path(id)) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let encoded = inflate(&compressed).map_err(|err| Error::corrupt(id, err))?;

        let (kind, body) = object::decode(&encoded).map_err(|err| Error::corrupt(id, err))?;
        if object::hash_object(kind, body) != *id {
            return Err(Error::corrupt(id, DecodeError::WrongId));
        }

        Ok(Some((kind, body.to_vec())))
    }

    /// Resolve a hex prefix of at least six digits to the ID of a
    /// stored commit. A 40-digit string must match exactly; shorter
    /// prefixes scan the fan-out directory, and an ambiguous prefix
    /// resolves to the lexicographically first commit that carries it.
    pub(crate) fn resolve_commit_prefix(&self, prefix: &str) -> Result<Id> {
        let not_found = || Error::NoSuchCommit(prefix.to_string());

        if prefix.len() == 40 {
            let id = Id::from_hex(prefix).map_err(|_| not_found())?;
            return match self.commit_if_present(&id)? {
                Some(_) => Ok(id),
                None => Err(not_found()),
            };
        }

        if prefix.len() < 6 || prefix.len() > 40 || !prefix.bytes().all(is_hex_digit) {
            return Err(not_found());
        }

        let (fan_out, rest) = prefix.split_at(2);
        let dir = self.objects_dir.join(fan_out);

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Err(not_found()),
            Err(err) => return Err(err.into()),
        };

        let mut candidates = Vec::new();
        for entry in entries {
            let entry = entry?;
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(_) => continue,
            };
            if !name.starts_with(rest) {
                continue;
            }
            if let Ok(id) = Id::from_hex(format!("{}{}", fan_out, name)) {
                candidates.push(id);
            }
        }

        candidates.sort();
        for id in candidates {
            if self.commit_if_present(&id)?.is_some() {
                return Ok(id);
            }
        }

        Err(not_found())
    }

    /// Load every commit in the store, ordered by ID.
    pub(crate) fn commits(&self) -> Result<Vec<Commit>> {
        let mut out = Vec::new();

        for fan_entry in fs::read_dir(&self.objects_dir)? {
            let fan_entry = fan_entry?;
            if !fan_entry.file_type()?.is_dir() {
                continue;
            }
            let fan_out = match fan_entry.file_name().into_string() {
                Ok(name) => name,
                Err(_) => continue,
            };

            for entry in fs::read_dir(fan_entry.path())? {
                let entry = entry?;
                let name = match entry.file_name().into_string() {
                    Ok(name) => name,
                    Err(_) => continue,
                };
                let id = match Id::from_hex(format!("{}{}", fan_out, name)) {
                    Ok(id) => id,
                    Err(_) => continue,
                };
                if let Some(commit) = self.commit_if_present(&id)? {
                    out.push(commit);
                }
            }
        }

        out.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(out)
    }

    /// Read an object's deflated bytes exactly as stored, for copying
    /// into another store.
    pub(crate) fn read_raw(&self, id: &Id) -> Result<Vec<u8>> {
        match fs::read(self.object_path(id)) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(Error::MissingObject(id.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// File raw deflated bytes from another store under the given ID.
    /// A no-op if the store already holds it.
    pub(crate) fn put_raw(&self, id: &Id, compressed: &[u8]) -> Result<()> {
        let path = self.object_path(id);
        if path.is_file() {
            return Ok(());
        }

        write_atomic(&self.objects_dir, &path, compressed)?;
        Ok(())
    }

    fn staged_path(&self, id: &Id) -> PathBuf {
        self.staging_dir.join(id.to_string())
    }

    /// Park a blob in the staging side table until the next commit
    /// promotes or discards it.
    pub(crate) fn stage_blob(&self, blob: &Blob) -> Result<()> {
        let path = self.staged_path(blob.id());
        if path.is_file() {
            return Ok(());
        }

        let encoded = object::encode(Kind::Blob, &blob.body());
        write_atomic(&self.staging_dir, &path, &deflate(&encoded)?)?;
        Ok(())
    }

    /// Drop one parked blob. Already gone is fine.
    pub(crate) fn discard_staged(&self, id: &Id) -> Result<()> {
        match fs::remove_file(self.staged_path(id)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Drop every parked blob.
    pub(crate) fn discard_all_staged(&self) -> Result<()> {
        for entry in fs::read_dir(&self.staging_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                fs::remove_file(entry.path())?;
            }
        }
        Ok(())
    }

    /// Move every parked blob into the permanent store. Runs before
    /// the commit's branch ref moves, so a crash in between leaves at
    /// worst unreferenced objects, never a dangling ref.
    pub(crate) fn promote_staged(&self) -> Result<()> {
        for entry in fs::read_dir(&self.staging_dir)? {
            let entry = entry?;
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(_) => continue,
            };
            if name.len() != 40 {
                continue;
            }

            let (fan_out, rest) = name.split_at(2);
            let target_dir = self.objects_dir.join(fan_out);
            fs::create_dir_all(&target_dir)?;
            fs::rename(entry.path(), target_dir.join(rest))?;
        }
        Ok(())
    }
}

fn deflate(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    Ok(encoder.finish()?)
}

fn inflate(compressed: &[u8]) -> std::result::Result<Vec<u8>, DecodeError> {
    let mut decoder = ZlibDecoder::new(compressed);
    let mut bytes = Vec::new();
    decoder
        .read_to_end(&mut bytes)
        .map_err(|_| DecodeError::Compression)?;
    Ok(bytes)
}

fn is_hex_digit(b: u8) -> bool {
    matches!(b, b'0'..=b'9' | b'a'..=b'f')
}
