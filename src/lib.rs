//! Full-and-Final Settlement Engine
//!
//! This crate computes the final payout owed to a departing employee, with an
//! itemised breakdown and a numbered audit trace, and drives the separation
//! workflow (clearance checklist, settlement approval and payment) around it.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod registry;
pub mod workflow;
