//! Application services.
//!
//! Services are generic over the ports they drive, so the daemon plugs in
//! real adapters and tests plug in in-memory fakes.

pub mod monitor;
pub mod window_service;
