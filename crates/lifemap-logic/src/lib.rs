//! Pure state logic for the life map.
//!
//! This crate holds everything the map view reacts to, independent of any
//! renderer or UI framework. Operations take plain data and mutate
//! explicit state holders, so a host (web, native, or the headless
//! harness) only has to forward input events and project the resulting
//! state.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`activity`] | Append-only activity log, newest entry first |
//! | [`config`] | Camera/fog tuning, JSON loading and validation |
//! | [`constants`] | Canvas size, camera limits, fog thresholds |
//! | [`error`] | Runtime contract violations and config load failures |
//! | [`fog`] | Per-node neglect levels with relief and bulk operators |
//! | [`icons`] | Icon identifier table with a fallback glyph |
//! | [`layout`] | Sector catalog and seeded node placement |
//! | [`presentation`] | Fog- and focus-derived visual rules for renderers |
//! | [`session`] | Event-driven coordinator tying the pieces together |
//! | [`viewport`] | Camera state and the pan/rotate/zoom/focus state machine |

pub mod activity;
pub mod config;
pub mod constants;
pub mod error;
pub mod fog;
pub mod icons;
pub mod layout;
pub mod presentation;
pub mod session;
pub mod viewport;

pub use error::LifeMapError;
