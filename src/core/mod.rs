pub mod api;
pub mod append;
pub mod backup;
pub mod check;
pub mod config;
pub mod generate;
pub mod log;
pub mod opening;
pub mod random;
pub mod sampler;
pub mod scheduler;
