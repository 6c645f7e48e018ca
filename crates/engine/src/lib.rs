//! Session context tying the map layers together.
//!
//! A [`Session`] owns the target dataset, the selected player's collected
//! set, the location tracker and the rendering surface. Every input (viewport
//! change, selection result, location event, tick) is handled synchronously
//! and ends with the surface holding a complete, up-to-date frame.

pub mod config;
pub mod selection;
pub mod session;
pub mod tracker;

pub use config::*;
pub use selection::*;
pub use session::*;
