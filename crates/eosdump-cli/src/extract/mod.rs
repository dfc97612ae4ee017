//! Per-category data extraction.
//!
//! Each category queries through the SDK facade, builds a flat JSON document
//! with a pure function over the copied records, and persists it. Categories
//! are independently best-effort: the binary catches each one's error so a
//! failure never prevents attempting the others.

pub mod achievements;
pub mod catalog;
pub mod entitlements;
pub mod leaderboards;
pub mod stats;
pub mod title_storage;
