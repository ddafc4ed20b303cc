//! Domain layer: the event request model, submission rules, drafts,
//! dashboard aggregates and the review event system.

pub mod caller;
pub mod draft;
pub mod event_bus;
pub mod event_request;
pub mod ids;
pub mod review_event;
pub mod stats;
pub mod submission;

pub use caller::Caller;
pub use draft::{Draft, DraftStore};
pub use event_bus::EventBus;
pub use event_request::{Category, Decision, EventRequest, NewEventRequest, RequestStatus};
pub use ids::{DraftId, RequestId, UserId};
pub use review_event::ReviewEvent;
pub use stats::DashboardSummary;
pub use submission::{ImageUpload, Submission, SubmissionFields};
