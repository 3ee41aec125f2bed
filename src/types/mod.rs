//! Session Types
//!
//! Core type definitions for session management.

pub mod auth;
pub mod config;
pub mod navigation;

pub use auth::*;
pub use config::*;
pub use navigation::*;
