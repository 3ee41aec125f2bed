//! Token Storage
//!
//! Cookie-backed persistence for the bearer record, plus the plain key/value
//! stores holding the remember-me flag and per-tab session markers.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::Clock;
use crate::error::{SessionError, StorageError};

/// SameSite cookie attribute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SameSite {
    #[default]
    Strict,
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "Strict",
            Self::Lax => "Lax",
            Self::None => "None",
        }
    }
}

/// Attributes a cookie is written with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieOptions {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    pub secure: bool,
    pub same_site: SameSite,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
}

impl CookieOptions {
    /// Path-scoped, strict same-site options.
    pub fn scoped(path: impl Into<String>, secure: bool) -> Self {
        Self {
            path: path.into(),
            domain: None,
            secure,
            same_site: SameSite::Strict,
            expires: None,
        }
    }

    /// Set the expiration from epoch milliseconds. Out-of-range values clamp
    /// to the representable bounds.
    pub fn expires_at_ms(mut self, expires_ms: i64) -> Self {
        let expires = DateTime::<Utc>::from_timestamp_millis(expires_ms).unwrap_or(
            if expires_ms < 0 {
                DateTime::<Utc>::MIN_UTC
            } else {
                DateTime::<Utc>::MAX_UTC
            },
        );
        self.expires = Some(expires);
        self
    }

    /// Expiration in epoch milliseconds.
    pub fn expires_ms(&self) -> Option<i64> {
        self.expires.map(|e| e.timestamp_millis())
    }

    /// Render a `Set-Cookie` header value.
    pub fn to_header(&self, name: &str, value: &str) -> String {
        let mut parts = vec![format!(
            "{}={}",
            urlencoding::encode(name),
            urlencoding::encode(value)
        )];

        parts.push(format!("Path={}", self.path));
        if let Some(domain) = &self.domain {
            parts.push(format!("Domain={}", domain));
        }
        if let Some(expires) = &self.expires {
            parts.push(format!(
                "Expires={}",
                expires.format("%a, %d %b %Y %H:%M:%S GMT")
            ));
        }
        if self.secure {
            parts.push("Secure".to_string());
        }
        parts.push(format!("SameSite={}", self.same_site.as_str()));

        parts.join("; ")
    }
}

/// Cookie storage interface.
pub trait CookieStore: Send + Sync {
    /// Read a cookie value. Expired cookies read as absent.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Write a cookie.
    fn set_item(&self, key: &str, value: &str, options: CookieOptions) -> Result<(), SessionError>;

    /// Remove a cookie.
    fn remove_item(&self, key: &str) -> Result<(), SessionError>;
}

/// Cookie value with its attributes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCookie {
    pub value: String,
    pub options: CookieOptions,
}

impl StoredCookie {
    fn is_expired(&self, now_ms: i64) -> bool {
        self.options
            .expires_ms()
            .map(|exp| exp <= now_ms)
            .unwrap_or(false)
    }
}

/// In-memory cookie jar.
pub struct InMemoryCookieStore {
    clock: Arc<dyn Clock>,
    cookies: Mutex<HashMap<String, StoredCookie>>,
}

impl InMemoryCookieStore {
    /// Create an empty jar that expires cookies against `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            cookies: Mutex::new(HashMap::new()),
        }
    }

    /// Attributes of a live cookie.
    pub fn options(&self, key: &str) -> Option<CookieOptions> {
        self.cookie(key).map(|c| c.options)
    }

    /// Write a raw value, bypassing serialization. Used to seed records.
    pub fn insert_raw(&self, key: &str, value: &str, options: CookieOptions) {
        self.cookies.lock().insert(
            key.to_string(),
            StoredCookie {
                value: value.to_string(),
                options,
            },
        );
    }

    fn cookie(&self, key: &str) -> Option<StoredCookie> {
        let now = self.clock.now_ms();
        let mut cookies = self.cookies.lock();

        match cookies.get(key) {
            Some(cookie) if cookie.is_expired(now) => {
                cookies.remove(key);
                None
            }
            Some(cookie) => Some(cookie.clone()),
            None => None,
        }
    }
}

impl CookieStore for InMemoryCookieStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.cookie(key).map(|c| c.value)
    }

    fn set_item(&self, key: &str, value: &str, options: CookieOptions) -> Result<(), SessionError> {
        self.insert_raw(key, value, options);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), SessionError> {
        self.cookies.lock().remove(key);
        Ok(())
    }
}

/// Cookie jar persisted as a JSON file, so a session survives restarts.
pub struct FileCookieStore {
    path: PathBuf,
    clock: Arc<dyn Clock>,
    lock: Mutex<()>,
}

impl FileCookieStore {
    /// Create a jar backed by `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            path: path.into(),
            clock,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<HashMap<String, StoredCookie>, SessionError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            SessionError::Storage(StorageError::ReadFailed {
                message: e.to_string(),
            })
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            SessionError::Storage(StorageError::Serialization {
                message: e.to_string(),
            })
        })
    }

    fn save(&self, cookies: &HashMap<String, StoredCookie>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SessionError::Storage(StorageError::WriteFailed {
                    message: e.to_string(),
                })
            })?;
        }

        let contents = serde_json::to_string_pretty(cookies).map_err(|e| {
            SessionError::Storage(StorageError::Serialization {
                message: e.to_string(),
            })
        })?;

        std::fs::write(&self.path, contents).map_err(|e| {
            SessionError::Storage(StorageError::WriteFailed {
                message: e.to_string(),
            })
        })
    }
}

impl CookieStore for FileCookieStore {
    fn get_item(&self, key: &str) -> Option<String> {
        let _guard = self.lock.lock();

        match self.load() {
            Ok(cookies) => cookies
                .get(key)
                .filter(|c| !c.is_expired(self.clock.now_ms()))
                .map(|c| c.value.clone()),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "unreadable cookie file");
                None
            }
        }
    }

    fn set_item(&self, key: &str, value: &str, options: CookieOptions) -> Result<(), SessionError> {
        let _guard = self.lock.lock();

        let mut cookies = self.load().unwrap_or_default();
        let now = self.clock.now_ms();
        cookies.retain(|_, c| !c.is_expired(now));
        cookies.insert(
            key.to_string(),
            StoredCookie {
                value: value.to_string(),
                options,
            },
        );
        self.save(&cookies)
    }

    fn remove_item(&self, key: &str) -> Result<(), SessionError> {
        let _guard = self.lock.lock();

        let mut cookies = self.load().unwrap_or_default();
        if cookies.remove(key).is_some() {
            self.save(&cookies)?;
        }
        Ok(())
    }
}

/// Mock cookie store for testing.
///
/// Ignores expiry, records every write and can fail the next write.
#[derive(Default)]
pub struct MockCookieStore {
    cookies: Mutex<HashMap<String, StoredCookie>>,
    writes: Mutex<Vec<(String, CookieOptions)>>,
    fail_next_write: Mutex<Option<String>>,
}

impl MockCookieStore {
    /// Create new mock store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `set_item` with a write error.
    pub fn fail_next_write(&self, message: impl Into<String>) -> &Self {
        *self.fail_next_write.lock() = Some(message.into());
        self
    }

    /// Keys and options of every successful write, in order.
    pub fn get_writes(&self) -> Vec<(String, CookieOptions)> {
        self.writes.lock().clone()
    }
}

impl CookieStore for MockCookieStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.cookies.lock().get(key).map(|c| c.value.clone())
    }

    fn set_item(&self, key: &str, value: &str, options: CookieOptions) -> Result<(), SessionError> {
        if let Some(message) = self.fail_next_write.lock().take() {
            return Err(SessionError::Storage(StorageError::WriteFailed { message }));
        }
        self.writes.lock().push((key.to_string(), options.clone()));
        self.cookies.lock().insert(
            key.to_string(),
            StoredCookie {
                value: value.to_string(),
                options,
            },
        );
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), SessionError> {
        self.cookies.lock().remove(key);
        Ok(())
    }
}

/// Plain string key/value store.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str);

    fn remove(&self, key: &str);
}

/// In-memory key/value store.
#[derive(Default)]
pub struct InMemoryKeyValueStore {
    values: Mutex<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys starting with `prefix`, sorted.
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut keys: Vec<String> = self
            .values
            .lock()
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        keys
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .lock()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values.lock().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MockClock;
    use std::time::Duration;

    #[test]
    fn test_in_memory_cookie_expiry() {
        let clock = Arc::new(MockClock::new(1_000));
        let store = InMemoryCookieStore::new(clock.clone());

        store
            .set_item("k", "v", CookieOptions::scoped("/", false).expires_at_ms(2_000))
            .unwrap();
        assert_eq!(store.get_item("k"), Some("v".to_string()));
        assert_eq!(store.options("k").unwrap().expires_ms(), Some(2_000));

        clock.advance(Duration::from_secs(1));
        assert_eq!(store.get_item("k"), None);
    }

    #[test]
    fn test_in_memory_cookie_remove() {
        let store = InMemoryCookieStore::new(Arc::new(MockClock::new(0)));
        store.set_item("k", "v", CookieOptions::scoped("/", false)).unwrap();
        store.remove_item("k").unwrap();

        assert_eq!(store.get_item("k"), None);
    }

    #[test]
    fn test_expires_out_of_range_clamps() {
        let far = CookieOptions::scoped("/", false).expires_at_ms(i64::MAX);
        assert_eq!(far.expires, Some(DateTime::<Utc>::MAX_UTC));

        let past = CookieOptions::scoped("/", false).expires_at_ms(i64::MIN);
        assert_eq!(past.expires, Some(DateTime::<Utc>::MIN_UTC));
    }

    #[test]
    fn test_set_cookie_header() {
        let options = CookieOptions::scoped("/admin", true).expires_at_ms(0);
        let header = options.to_header("bearerAuth", "{\"a\":1}");

        assert_eq!(
            header,
            "bearerAuth=%7B%22a%22%3A1%7D; Path=/admin; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Secure; SameSite=Strict"
        );
    }

    #[test]
    fn test_file_cookie_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let clock: Arc<dyn Clock> = Arc::new(MockClock::new(1_000));
        let path = dir.path().join("cookies.json");

        let store = FileCookieStore::new(&path, clock.clone());
        store
            .set_item("bearerAuth", "record", CookieOptions::scoped("/", false).expires_at_ms(5_000))
            .unwrap();

        let reopened = FileCookieStore::new(&path, clock);
        assert_eq!(reopened.get_item("bearerAuth"), Some("record".to_string()));

        reopened.remove_item("bearerAuth").unwrap();
        assert_eq!(store.get_item("bearerAuth"), None);
    }

    #[test]
    fn test_file_cookie_store_corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileCookieStore::new(&path, Arc::new(MockClock::new(0)));
        assert_eq!(store.get_item("bearerAuth"), None);

        store.set_item("k", "v", CookieOptions::scoped("/", false)).unwrap();
        assert_eq!(store.get_item("k"), Some("v".to_string()));
    }

    #[test]
    fn test_key_value_store() {
        let store = InMemoryKeyValueStore::new();
        store.set("route_b", "2");
        store.set("route_a", "1");
        store.set("other", "x");

        assert_eq!(store.keys_with_prefix("route_"), vec!["route_a", "route_b"]);

        store.remove("other");
        assert_eq!(store.get("other"), None);
    }
}
