//! # event-desk
//!
//! REST and WebSocket service for submitting event requests and
//! reviewing them from an admin dashboard.
//!
//! A submitter fills in the event form, reviews the validated draft and
//! confirms it; confirmation uploads the image to object storage and
//! stores the request as `pending`. Administrators approve or reject
//! pending requests and follow the aggregate counts on the dashboard.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── RequestService (service/)
//!     ├── EventBus, DraftStore (domain/)
//!     │
//!     ├── ImageStore (storage/)
//!     └── RequestStore: PostgreSQL or memory (persistence/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod storage;
pub mod ws;
