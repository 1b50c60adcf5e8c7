//! Result aggregation modules
//!
//! Turns detected peaks into the final transcription:
//! - Velocity mapping
//! - Note event assembly
//! - Result types

pub mod assembler;
pub mod result;
pub mod velocity;
