//! # Rewind Demos
//!
//! Scripted editing sessions that drive a [`rewind_scene::Scene`] through a
//! [`rewind_core::History`].
//!
//! ## Available Demos
//!
//! - `history_session` - builds a small scene, drags, retimes and undoes it

pub mod config;
pub mod session;

/// Demos library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
