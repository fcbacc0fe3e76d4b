//! Core engine for Mindful Mirror, a CBT-based self-talk reframer.
//!
//! This crate is intentionally surface-agnostic. The rule table and classifier
//! own detection and reframe generation; rendering, stats, and whatever chat
//! surface delivers the replies live behind the boundary (see `surface`).

pub mod classifier;
pub mod config;
pub mod errors;
pub mod formatting;
pub mod logging;
pub mod rules;
pub mod stats;
pub mod surface;

pub use errors::{Error, Result};
