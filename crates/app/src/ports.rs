//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.
//!
//! All ports are blocking: the daemon runs one poll cycle at a time on a
//! single thread.

pub mod cube;
pub mod notifier;
pub mod random;
pub mod weather;

pub use cube::CubeGateway;
pub use notifier::{Delivery, Notifier};
pub use random::RandomSource;
pub use weather::TemperatureProvider;
