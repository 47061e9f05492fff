pub mod color;
pub mod config;
pub mod controls;
pub mod engine;
pub mod grid;
pub mod interaction;
pub mod scheduler;
pub mod session;
pub mod surface;
pub mod terminal;
pub mod universe;
pub mod view;
