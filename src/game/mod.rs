// Game module - the framework-agnostic simulation
//
// This module contains:
// - world.rs: Game struct with init / step / shutdown
// - types.rs: Viewport and SessionSummary value types

pub mod types;
pub mod world;

// Re-export types for convenience
pub use types::*;
pub use world::Game;
