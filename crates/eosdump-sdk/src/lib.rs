//! Runtime binding to the Epic Online Services SDK.
//!
//! The SDK ships as a shared library whose exact file is only known at
//! process start, exposes a C API with per-release request-struct versions,
//! and completes asynchronous operations through one-shot callbacks driven by
//! a cooperative tick. This crate turns that into something a linear program
//! can use:
//!
//! - [`module`] loads the library and resolves symbols, recovering
//!   calling-convention-decorated names on the one target where the system
//!   loader cannot;
//! - [`bind`] fills typed per-feature function tables, distinguishing
//!   mandatory entry points (startup fails without them) from optional ones
//!   (the owning feature group is disabled);
//! - [`shim`] converts owned closures into the context-pointer-plus-free-
//!   function shape the native callbacks expect, with a hard exactly-once
//!   guarantee;
//! - [`pump`] ticks the platform on a background thread while [`wait`]
//!   blocks the calling flow on a per-operation result slot;
//! - [`api`] is the typed facade: one [`Sdk`] context value, a [`Platform`]
//!   created from it, and feature-group accessors whose blocking methods run
//!   the version-fallback ladder from `eosdump-core`.

pub mod api;
pub mod bind;
pub mod error;
pub mod ffi;
pub mod model;
pub mod module;
pub mod pump;
pub mod shim;
pub mod wait;

pub use api::{Platform, PlatformConfig, Sdk};
pub use error::SdkError;
pub use ffi::EosResult;
pub use model::{
    AchievementDefinition, AchievementDefinitionV1, CatalogItem, CatalogOffer, Entitlement,
    FileMetadata, LeaderboardDefinition, PlayerStat, StatThreshold, UserAuthToken,
};
pub use pump::TickPump;
pub use wait::WaitPolicy;
