use std::fs;
use std::path::{Path, PathBuf};

use mingit::repo::{Repository, STATE_DIR};

/// A throwaway working directory with an initialized repository in it.
pub struct TempRepo {
    dir: tempfile::TempDir,
}

#[allow(dead_code)]
impl TempRepo {
    pub fn new() -> TempRepo {
        let dir = tempfile::tempdir().unwrap();
        Repository::init(dir.path()).unwrap();
        TempRepo { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn repo(&self) -> Repository {
        Repository::open(self.dir.path()).unwrap()
    }

    pub fn write_file(&self, name: &str, content: &str) {
        fs::write(self.dir.path().join(name), content).unwrap();
    }

    pub fn read_file(&self, name: &str) -> String {
        String::from_utf8(fs::read(self.dir.path().join(name)).unwrap()).unwrap()
    }

    pub fn exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    pub fn objects_dir(&self) -> PathBuf {
        self.dir.path().join(STATE_DIR).join("objects")
    }
}
