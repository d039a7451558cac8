pub mod pieces;
pub mod types;
pub mod error;
pub mod rules;
pub mod board;
pub mod game;
pub mod input;
pub mod session;
