// Shared containers for the game crates

pub mod arena;

pub use arena::{Arena, HasId};
