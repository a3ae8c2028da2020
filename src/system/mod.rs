pub mod collector;
pub mod error;
mod platform;
pub mod sampler;
pub mod snapshot;
