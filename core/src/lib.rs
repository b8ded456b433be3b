//! # crprobe core
//!
//! * [`api`]: endpoint model and the HTTP client for the game-statistics API.
//! * [`pacing`]: batch timing rules for the burst prober.
//! * [`prober`]: the sequential and burst rate-limit probers.
//! * [`admin`]: user deletion through the auth backend's admin interface.

pub mod admin;
pub mod api;
pub mod error;
pub mod pacing;
pub mod prober;

pub use reqwest::StatusCode;
