//! Order device capture
//!
//! - `record`: the persisted classification of one order
//! - `repository`: persistence port
//! - `memory`: in-memory repository
//! - `coordinator`: idempotent, failure-contained capture

mod coordinator;
mod memory;
mod record;
mod repository;

pub use coordinator::{CaptureOutcome, OrderCaptureCoordinator, OrderPlaced, RequestContext};
pub use memory::InMemoryCaptureRepository;
pub use record::DeviceCaptureRecord;
pub use repository::DeviceCaptureRepository;
