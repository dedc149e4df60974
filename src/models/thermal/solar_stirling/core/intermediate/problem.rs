//! Problem formulation for the intermediate temperature search.

use std::convert::Infallible;

use twine_core::{EquationProblem, Model};
use uom::si::{f64::ThermodynamicTemperature, power::watt, thermodynamic_temperature::kelvin};

use crate::support::hx::LogMeanError;

use super::super::{
    StirlingParameters,
    load_side::{LoadSideRates, LoadTemperatures, load_side_rates},
};

/// Model adapter exposing `T_I` as the sole input to the load-side rates.
pub(super) struct LoadSideModel<'a> {
    parameters: &'a StirlingParameters,
    load: LoadTemperatures,
}

impl<'a> LoadSideModel<'a> {
    pub(super) fn new(parameters: &'a StirlingParameters, load: LoadTemperatures) -> Self {
        Self { parameters, load }
    }
}

impl Model for LoadSideModel<'_> {
    type Input = ThermodynamicTemperature;
    type Output = LoadSideRates;
    type Error = LogMeanError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        load_side_rates(self.parameters, *input, self.load)
    }
}

/// Load-side balance with residual `supplement - transfer`.
pub(super) struct LoadSideBalance;

impl EquationProblem<1> for LoadSideBalance {
    type Input = ThermodynamicTemperature;
    type Output = LoadSideRates;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(ThermodynamicTemperature::new::<kelvin>(x[0]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([output.imbalance().get::<watt>()])
    }
}
