mod environment;
mod error;
mod hot_side;
mod intermediate;
mod load_side;
mod parameters;
mod power;
mod simulation;

pub use environment::Environment;
pub use error::SimulationError;
pub use hot_side::{
    HotSideRates, STEFAN_BOLTZMANN, heat_load, heat_supplement, heat_transfer, hot_side_rates,
    solve_hot_side_temperature,
};
pub use intermediate::{
    Convergence, IntermediateConfig, IntermediateSolution, solve_intermediate_temperature,
};
pub use load_side::{
    LoadSideRates, LoadTemperatures, load_heat_rate, load_side_rates, refined_outlet,
};
pub use parameters::{CycleVolumes, StirlingParameters};
pub use power::power_output;
pub use simulation::{SimulationConfig, SimulationResult};

pub(super) use simulation::run_simulation;
