//! Separation workflow: request lifecycle, clearance checklist, and the
//! calculate → approve → pay settlement flow.

mod service;
mod summary;

pub use service::SeparationService;
pub use summary::OffboardingSummary;
