/// Full-resolution reconstruction from a sampled grid
pub mod reconstruction;
/// Top-left-corner grid sampling of a bitmap
pub mod sampler;

pub use reconstruction::{reconstruct, reconstruct_parallel};
pub use sampler::sample;
