//! Shared utilities for integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A route table exercising handlers, params, ALL and nested mounts.
#[allow(dead_code)]
pub const SAMPLE_TABLE: &str = r#"
[settings]
param_conflict = "reject"

[[routes]]
path = "/"
handler = "index"

[[routes]]
path = "/health"
method = "ALL"
handler = "health"

[[routes]]
path = "/api"
mount = "api"

[[tables.api.routes]]
path = "/users/:id"
method = "GET"
handler = "get_user"

[[tables.api.routes]]
path = "/users/:id"
method = "ALL"
mount = "user"

[[tables.user.routes]]
path = "/posts/:post"
method = "delete"
handler = "delete_post"
"#;

/// A route table file in its own temp directory. The directory is removed
/// when this is dropped, so keep it alive for as long as the file is used.
pub struct TableFile {
    _dir: TempDir,
    path: PathBuf,
}

impl TableFile {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Write `contents` to `name` in a fresh temp directory.
pub fn write_table(name: &str, contents: &str) -> TableFile {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    TableFile { _dir: dir, path }
}
