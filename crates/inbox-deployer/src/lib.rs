pub mod artifact;
pub mod chain;
pub mod config;
pub mod constants;
pub mod deploy;
pub mod errors;
pub mod network;
