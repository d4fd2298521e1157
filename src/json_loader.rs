//! JSON snapshot loader.
//!
//! Loads the four source collections from per-concern JSON files in a
//! snapshot directory. A missing file yields an empty collection (the engine
//! tolerates empty inputs); an unreadable or malformed file is a real error.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::LoadError;
use crate::types::{ContentPost, Meeting, Task, User};

/// One snapshot of the source collections, as read from disk.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub tasks: Vec<Task>,
    pub meetings: Vec<Meeting>,
    pub posts: Vec<ContentPost>,
    pub users: Vec<User>,
}

/// Load `tasks.json`, `meetings.json`, `posts.json`, and `users.json` from
/// `dir`. Each file holds a JSON array of records in the upstream camelCase
/// shape.
pub fn load_snapshot(dir: &Path) -> Result<Snapshot, LoadError> {
    Ok(Snapshot {
        tasks: load_collection(dir, "tasks.json")?,
        meetings: load_collection(dir, "meetings.json")?,
        posts: load_collection(dir, "posts.json")?,
        users: load_collection(dir, "users.json")?,
    })
}

fn load_collection<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<Vec<T>, LoadError> {
    let path = dir.join(name);
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(&path).map_err(|source| LoadError::Io {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| LoadError::Parse { path, source })
}
