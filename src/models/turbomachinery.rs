//! Turbomachinery models.

pub mod compressor;
