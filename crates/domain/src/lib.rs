//! # maxwindow-domain
//!
//! Pure domain model for the maxwindow window-watch daemon.
//!
//! ## Responsibilities
//! - Foundational types: radio addresses, error conventions
//! - Define the **Directory** (rooms and devices announced by the Cube)
//! - Define **Status records** (per-device flag bytes reported by the Cube)
//! - Resolve **window sensor states** by joining the two
//! - Bundle one decoded dump as a **Cube snapshot**
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod radio;

pub mod directory;
pub mod snapshot;
pub mod status;
pub mod window;
