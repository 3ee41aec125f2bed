//! Navigation Types
//!
//! Route descriptors and screen snapshots used when forwarding a logout.

use base64::Engine;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Route name of the standard login screen.
pub const LOGIN_ROUTE: &str = "sw.login.index";

/// Route name of the "session expired" login screen.
pub const INACTIVITY_LOGIN_ROUTE: &str = "sw.inactivity.login.index";

/// Route the user was on when the session ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteInfo {
    pub full_path: String,
    pub name: Option<String>,
}

impl RouteInfo {
    pub fn new(full_path: impl Into<String>, name: Option<String>) -> Self {
        Self {
            full_path: full_path.into(),
            name,
        }
    }
}

/// Named navigation target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteTarget {
    pub name: String,
    pub params: BTreeMap<String, String>,
}

impl RouteTarget {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// Captured image of the current screen.
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl Snapshot {
    /// JPEG snapshot.
    pub fn jpeg(bytes: Vec<u8>) -> Self {
        Self {
            mime_type: "image/jpeg".to_string(),
            bytes,
        }
    }

    /// Render as a `data:` URL.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}
