pub mod cluster;
pub mod frame;
pub mod location;
pub mod sink;
pub mod symbology;

pub use cluster::*;
pub use frame::*;
pub use sink::*;
