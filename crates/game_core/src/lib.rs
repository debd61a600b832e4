// Top-level library for the `game-core` crate.
// Re-exports the nested world crates and hosts the quick-stack storage core.

// Re-export the nested crates so other crates can reach them as
// `game_core::objects` / `game_core::world` instead of depending on them directly.
pub use game_objects as objects;
pub use game_world as world;

mod binding;
pub mod config;
pub mod error;
pub mod quick_stack;

pub use config::QuickStackConfig;
pub use error::{ConfigError, QuickStackError};
pub use quick_stack::{QuickStack, Role};
