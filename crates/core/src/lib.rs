//! Clipview Core
//!
//! Transport-free domain logic for the live session client. This crate holds
//! the wire protocol types, the incrementally growing chart state, and the
//! session dispatch that turns inbound server events and local UI actions
//! into ordered lists of effects. Nothing here performs I/O; the
//! `clipview-viewer` service owns the socket and the display surface.

pub mod chart;
pub mod protocol;
pub mod session;
