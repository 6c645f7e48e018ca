pub mod angle;
pub mod mercator;
pub mod vec;

pub use angle::*;
pub use mercator::*;
pub use vec::*;
