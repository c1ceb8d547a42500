//! Concurrency layer for sift
//!
//! This crate provides the sharded score accumulator used by parallel
//! ranking:
//! - ConcurrentAccumulator: key -> running total, one lock per shard
//! - Consolidation into an ordinary ordered map once all writers joined

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod accumulator;

pub use accumulator::ConcurrentAccumulator;
