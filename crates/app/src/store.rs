//! Persisted session identity.
//!
//! A single JSON file under the user data directory holds the logged-in
//! user id. Absence means login is required; `logout` deletes the file.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use citycard_core::UserId;

#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    user_id: UserId,
}

fn session_path() -> anyhow::Result<PathBuf> {
    let dir = dirs::data_dir()
        .context("no user data directory on this platform")?
        .join("citycard");
    Ok(dir.join("session.json"))
}

pub fn load() -> anyhow::Result<Option<UserId>> {
    let path = session_path()?;
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read session file at {}", path.display()))?;
    let session: StoredSession =
        serde_json::from_str(&raw).context("malformed session file")?;
    Ok(Some(session.user_id))
}

pub fn save(user_id: UserId) -> anyhow::Result<()> {
    let path = session_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let raw = serde_json::to_string(&StoredSession { user_id })?;
    fs::write(&path, raw)
        .with_context(|| format!("failed to write session file at {}", path.display()))?;
    Ok(())
}

pub fn clear() -> anyhow::Result<()> {
    let path = session_path()?;
    if path.exists() {
        fs::remove_file(&path)
            .with_context(|| format!("failed to remove session file at {}", path.display()))?;
    }
    Ok(())
}
