pub mod config;
pub mod driver;
pub mod engine;
pub mod fill;
pub mod grid;
pub mod render;
pub mod rule_set;
