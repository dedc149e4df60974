//! Coupled system models.

pub mod solar_cooling;
