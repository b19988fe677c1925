//! # Engine Module
//!
//! This module implements the transformation engine that turns a validated sparse
//! building characterization into a fully specified building description.
//!
//! ## Overview
//!
//! The engine owns everything the ordered transformation steps share: the run
//! configuration, the error taxonomy, progress reporting, and the immutable
//! [`context::TranslationContext`] that carries the derived building shape and the lookup
//! tables into every step. Steps never mutate shared state; each one reads the source
//! document through the context and returns typed output fragments.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Run options and default assumptions (doors, ducts)
//! - **Context** ([`context`]) - Read-only inputs shared by every step
//! - **Steps** ([`steps`]) - One module per subsystem of the building description
//! - **Progress Monitoring** ([`progress`]) - Optional callback-based progress reporting
//! - **Error Handling** ([`error`]) - Fatal translation errors

pub mod config;
pub mod context;
pub mod error;
pub mod progress;
pub mod steps;
