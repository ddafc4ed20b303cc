//! Service layer: business logic orchestration.
//!
//! [`RequestService`] runs the submission workflow and review actions and
//! emits events through the [`super::domain::EventBus`].

pub mod request_service;

pub use request_service::RequestService;
