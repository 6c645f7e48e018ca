pub mod collected;
pub mod dataset;
pub mod display;
pub mod search;
pub mod target;
pub mod visibility;
pub mod wire;

pub use collected::*;
pub use dataset::*;
pub use display::*;
pub use target::*;
