//! # Solar Stirling Models
//!
//! Steady-state models of a hybrid energy system built on
//! [Twine](https://github.com/isentropic-dev/twine): a parabolic solar
//! collector feeding a Stirling engine, whose shaft power drives an air
//! compressor that supplies a vortex-tube cooler.
//!
//! ## Crate layout
//!
//! - [`models`]: Domain models, each with a [`twine_core::Model`] adapter
//!   where it makes sense.
//!   - [`models::thermal::solar_stirling`]: equilibrium temperatures, power
//!     output and supplemental heat of the engine.
//!   - [`models::thermal::vortex_tube`]: fitted temperature-drop correlation.
//!   - [`models::turbomachinery::compressor`]: isentropic ideal-gas compressor.
//!   - [`models::systems::solar_cooling`]: the coupled system and its
//!     parameter sweeps.
//! - [`support`]: Numeric constraints, unit extensions, and the root-finding
//!   and least-squares solvers the models are built on.
//!
//! ## Threading
//!
//! Every model is immutable after construction, so shared references can be
//! evaluated from many threads at once. The reference vortex-tube fit is
//! computed on first use and shared afterwards.

pub mod models;
pub mod support;
