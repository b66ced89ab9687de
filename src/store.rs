//! Persisted saved games with tamper-evident signatures.
//!
//! A save file is `MAGIC | version | tag | payload` where the payload is
//! the bincode-encoded session and the tag is HMAC-SHA256 over the
//! payload bytes. The MAC key lives in its own file inside the data
//! directory and is never written into a save file, so a player who
//! edits a payload cannot produce a matching tag. Verification happens
//! before a single payload byte is decoded.

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use hmac::{Hmac, Mac};
use log::{info, warn};
use rand::RngCore;
use sha2::Sha256;

use crate::common::StoreError;
use crate::game::GameSession;

type HmacSha256 = Hmac<Sha256>;

const MAGIC: &[u8; 4] = b"BSAV";
const FORMAT_VERSION: u8 = 1;
const TAG_LEN: usize = 32;
const KEY_LEN: usize = 32;
const SAVE_EXT: &str = "sav";
const KEY_FILE: &str = "save.key";

/// Store of named saved games under a data directory.
pub struct SaveStore {
    dir: PathBuf,
    key: Vec<u8>,
}

impl SaveStore {
    /// Open the store rooted at `data_dir`, creating the directory layout
    /// and the MAC key on first use.
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        let dir = data_dir.join("saved_games");
        fs::create_dir_all(&dir)?;
        let key = load_or_create_key(&data_dir.join(KEY_FILE))?;
        Ok(SaveStore { dir, key })
    }

    /// Serialize and sign `session` under `name`.
    ///
    /// Existing names are rejected with `NameConflict`; saves are never
    /// overwritten. The write goes through a temp file and rename, so a
    /// failure leaves no partial save behind.
    pub fn save_game(&self, session: &GameSession, name: &str) -> Result<(), StoreError> {
        let path = self.save_path(name)?;
        if path.exists() {
            return Err(StoreError::NameConflict(name.to_string()));
        }
        let payload =
            bincode::serialize(session).map_err(|e| StoreError::Io(io::Error::other(e)))?;
        let tag = self.sign(&payload);
        let mut bytes = Vec::with_capacity(MAGIC.len() + 1 + TAG_LEN + payload.len());
        bytes.extend_from_slice(MAGIC);
        bytes.push(FORMAT_VERSION);
        bytes.extend_from_slice(&tag);
        bytes.extend_from_slice(&payload);
        write_atomic(&path, &bytes)?;
        info!("saved game \"{}\" ({} payload bytes)", name, payload.len());
        Ok(())
    }

    /// Verify and load the save named `name`.
    ///
    /// Fail-closed: any header, tag, or decode problem is reported as
    /// `IntegrityCheckFailed` and no session is constructed.
    pub fn load_game(&self, name: &str) -> Result<GameSession, StoreError> {
        let path = self.save_path(name)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(name.to_string()))
            }
            Err(e) => return Err(StoreError::Io(e)),
        };
        let payload = self.verify(name, &bytes)?;
        let session = bincode::deserialize(payload).map_err(|_| {
            warn!("save \"{}\" passed its signature but failed to decode", name);
            StoreError::IntegrityCheckFailed
        })?;
        info!("loaded game \"{}\"", name);
        Ok(session)
    }

    /// Names of all saved games, sorted.
    pub fn list_games(&self) -> Result<Vec<String>, StoreError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some(SAVE_EXT) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Delete the save named `name`.
    pub fn delete_game(&self, name: &str) -> Result<(), StoreError> {
        let path = self.save_path(name)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                info!("deleted saved game \"{}\"", name);
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(name.to_string()))
            }
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    fn save_path(&self, name: &str) -> Result<PathBuf, StoreError> {
        let file_name = sanitize_name(name).ok_or(StoreError::InvalidName)?;
        Ok(self.dir.join(format!("{}.{}", file_name, SAVE_EXT)))
    }

    fn sign(&self, payload: &[u8]) -> [u8; TAG_LEN] {
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .expect("HMAC-SHA256 accepts keys of any length");
        mac.update(payload);
        mac.finalize().into_bytes().into()
    }

    fn verify<'a>(&self, name: &str, bytes: &'a [u8]) -> Result<&'a [u8], StoreError> {
        let header_len = MAGIC.len() + 1 + TAG_LEN;
        if bytes.len() < header_len || &bytes[..MAGIC.len()] != MAGIC {
            warn!("save \"{}\" has a malformed header", name);
            return Err(StoreError::IntegrityCheckFailed);
        }
        if bytes[MAGIC.len()] != FORMAT_VERSION {
            warn!("save \"{}\" has an unsupported format version", name);
            return Err(StoreError::IntegrityCheckFailed);
        }
        let (tag, payload) = bytes[MAGIC.len() + 1..].split_at(TAG_LEN);
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .expect("HMAC-SHA256 accepts keys of any length");
        mac.update(payload);
        mac.verify_slice(tag).map_err(|_| {
            warn!("integrity check failed for save \"{}\"", name);
            StoreError::IntegrityCheckFailed
        })?;
        Ok(payload)
    }
}

/// Build a safe file name from user input: whitelist of letters, digits
/// and `-_.() `, spaces replaced with underscores. `None` when nothing
/// usable remains.
fn sanitize_name(name: &str) -> Option<String> {
    let safe: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || "-_.() ".contains(*c))
        .map(|c| if c == ' ' { '_' } else { c })
        .collect();
    let safe = safe.trim_matches('.').to_string();
    if safe.is_empty() {
        None
    } else {
        Some(safe)
    }
}

fn load_or_create_key(path: &Path) -> Result<Vec<u8>, StoreError> {
    match fs::read(path) {
        Ok(key) if !key.is_empty() => return Ok(key),
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(StoreError::Io(e)),
    }
    let mut key = vec![0u8; KEY_LEN];
    rand::rng().fill_bytes(&mut key);
    write_atomic(path, &key)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }
    info!("created new save signing key at {}", path.display());
    Ok(key)
}

/// Write `bytes` to `path` through a temp file in the same directory and
/// an atomic rename, so a crash mid-write cannot leave a torn file.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let tmp = path.with_extension("tmp");
    let mut file = fs::File::create(&tmp)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(StoreError::Io(e));
    }
    Ok(())
}

/// Platform data directory, overridable through `BATTLESHIPS_HOME`.
pub fn default_data_dir() -> PathBuf {
    if let Ok(dir) = env::var("BATTLESHIPS_HOME") {
        return PathBuf::from(dir);
    }
    if cfg!(windows) {
        if let Ok(base) = env::var("LOCALAPPDATA") {
            return Path::new(&base).join("battleships");
        }
    } else if let Ok(home) = env::var("HOME") {
        return if cfg!(target_os = "macos") {
            Path::new(&home).join("Library/battleships")
        } else {
            Path::new(&home).join(".battleships")
        };
    }
    PathBuf::from(".")
}
