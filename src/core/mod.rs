//! Session Core Components
//!
//! Collaborators the session manager is built on: HTTP transport, clock,
//! delayed task scheduling, user activity and navigation.

pub mod activity;
pub mod clock;
pub mod navigation;
pub mod scheduler;
pub mod transport;

pub use activity::*;
pub use clock::*;
pub use navigation::*;
pub use scheduler::*;
pub use transport::*;
