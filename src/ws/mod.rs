//! WebSocket layer: connection handling, message routing, subscriptions.
//!
//! The WebSocket endpoint at `/ws` streams review events (submitted,
//! approved, rejected) to clients that follow the submitters involved.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
