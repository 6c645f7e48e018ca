pub mod bounds;
pub mod coords;
pub mod math;
pub mod time;

// Foundation crate: small, well-tested geographic primitives only.
pub use bounds::*;
pub use coords::*;
pub use time::*;
