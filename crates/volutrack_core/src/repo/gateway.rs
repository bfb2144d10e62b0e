//! Key-value persistence contract and in-memory implementation.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Error raised by gateway implementations and value codecs.
#[derive(Debug)]
pub enum GatewayError {
    Sqlite(rusqlite::Error),
    /// Storage file was written by a newer schema than this binary knows.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    Encode(serde_json::Error),
    Decode { key: String, message: String },
    /// Backend refused the operation (quota, offline, injected failure).
    Unavailable(String),
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite error: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "storage schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Encode(err) => write!(f, "failed to encode stored value: {err}"),
            Self::Decode { key, message } => {
                write!(f, "failed to decode stored value `{key}`: {message}")
            }
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for GatewayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::Decode { .. } | Self::Unavailable(_) => {
                None
            }
        }
    }
}

impl From<rusqlite::Error> for GatewayError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Opaque key-value storage used to survive restarts.
pub trait PersistenceGateway {
    /// Returns the stored value, or `None` when the key was never written.
    fn load(&self, key: &str) -> GatewayResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> GatewayResult<()>;
}

impl<G: PersistenceGateway + ?Sized> PersistenceGateway for &G {
    fn load(&self, key: &str) -> GatewayResult<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> GatewayResult<()> {
        (**self).save(key, value)
    }
}

/// Process-local gateway backed by a sorted map.
///
/// Saves can be made to fail on demand to exercise degraded paths.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    values: RefCell<BTreeMap<String, String>>,
    fail_saves: Cell<bool>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates one key, e.g. with legacy or corrupted data.
    pub fn with_value(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.borrow_mut().insert(key.into(), value.into());
        self
    }

    /// Makes every subsequent `save` fail with `Unavailable` until reset.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }

    /// Raw stored value, for inspection.
    pub fn value(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl PersistenceGateway for MemoryGateway {
    fn load(&self, key: &str) -> GatewayResult<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> GatewayResult<()> {
        if self.fail_saves.get() {
            return Err(GatewayError::Unavailable(format!(
                "save rejected for `{key}`"
            )));
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
