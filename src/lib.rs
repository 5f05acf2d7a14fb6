//! Report-to-findings pipeline for free-form medical-report text.
//!
//! Raw OCR'd or typed text is normalized into a canonical form, pattern-matched
//! into structured lab measurements, and evaluated by a findings engine that is
//! either rule-based (fixed thresholds, always available) or backed by a
//! trained multi-label classifier. Human feedback on prior findings feeds a
//! batch retraining loop that produces a replacement classifier artifact.

pub mod analysis;
pub mod config;
pub mod db;
pub mod ml;
pub mod models;
pub mod pipeline;
pub mod retrain;
