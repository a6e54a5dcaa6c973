//! Core module - emitting engine, sample batches, continuous scheduling

mod batch;
mod engine;
mod scheduler;

pub use batch::{BatchSummary, BEAMFORMING_EVENTS, DOA_EVENTS, RADAR_EVENTS, TDOA_EVENTS};
pub use engine::Engine;
pub use scheduler::Scheduler;
