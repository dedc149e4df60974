//! Thermal systems models.
//!
//! This module contains the solar Stirling engine equilibrium model and the
//! vortex-tube cooling correlation.

pub mod solar_stirling;
pub mod vortex_tube;
