pub mod artifact;
pub mod config;
pub mod device;
pub mod document;
pub mod fuzzer;
pub mod preference;
pub mod range;
pub mod sampler;
