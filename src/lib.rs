//! Learns the rules of Rock-Paper-Scissors with a feed-forward network trained on one-hot
//! encoded pairs of moves, then saves the network and reloads it.

pub mod config;
pub mod driver;
pub mod error;
pub mod evaluator;
pub mod game;
pub mod network;
pub mod report;
pub mod sample;
pub mod trainer;

pub use error::{Result, RpsErr};
