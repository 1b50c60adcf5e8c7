//! Feature extraction modules
//!
//! Per-class detection features:
//! - Short-time RMS envelope (decay-dominated classes)
//! - Onset/peak detection (adaptive and static-threshold variants)

pub mod envelope;
pub mod onset;
