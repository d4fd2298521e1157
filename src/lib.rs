//! Work-item aggregation and prioritization engine.
//!
//! Unifies heterogeneous scheduled entities (tasks, meetings, scheduled
//! content posts) into a single timeline for one viewer, classifies urgent
//! items, estimates in-flight progress, and computes rolling productivity
//! statistics. Everything is a pure, synchronous, re-computable projection
//! over a snapshot of the source collections plus one captured `now` — no
//! incremental state, no I/O outside the optional snapshot loader.
//!
//! Callers must thread a single `now` through one invocation (or use
//! [`dashboard::build_dashboard_at_current_time`], which captures the clock
//! exactly once); components taking independent clock reads would disagree
//! on the present moment.

pub mod dashboard;
pub mod error;
pub mod json_loader;
pub mod progress;
pub mod stats;
pub mod timeutil;
pub mod types;
pub mod unifier;
pub mod upcoming;
pub mod urgency;
pub mod window;
