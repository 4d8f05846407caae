//! Clipview Viewer Library Crate
//!
//! This library contains the runnable half of the live session client: the
//! environment-based configuration, the WebSocket connection loop, the
//! display surface seam, and the stdin control surface. The `viewer` binary
//! is a thin wrapper around this library.

pub mod config;
pub mod connection;
pub mod controls;
pub mod render;
