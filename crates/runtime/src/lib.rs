pub mod notices;
pub mod tick;

pub use notices::*;
pub use tick::*;
