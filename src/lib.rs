// Library exports for the Battlesnake bot
// This allows the replay tool, the server binary and tests to share the decision core

pub mod bot;
pub mod config;
pub mod connectivity;
pub mod debug_logger;
pub mod error;
pub mod food_distance;
pub mod grid;
pub mod move_selector;
pub mod replay;
pub mod types;
