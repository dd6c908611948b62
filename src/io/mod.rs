//! Audio input types
//!
//! Decoding lives outside this crate; callers hand over decoded mono samples.

pub mod sample_buffer;

pub use sample_buffer::SampleBuffer;
