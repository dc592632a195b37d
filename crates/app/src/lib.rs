//! # maxwindow-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `CubeGateway`: pull and decode one status dump from the Cube
//!   - `TemperatureProvider`: current outside temperature for a city
//!   - `Notifier`: deliver a text notification
//!   - `RandomSource`: randomness for the simulation mode
//! - Define **driving/inbound** use-cases:
//!   - `WindowService`: window report, optionally with a simulated open window
//!   - `WindowMonitor`: one poll cycle: temperature gate, open-window detection, notify
//! - Provide **in-process infrastructure** that doesn't need IO (`ThreadRandom`)
//!
//! ## Dependency rule
//! Depends on `maxwindow-domain` only (plus `rand` for the default random source).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod random;
pub mod services;
