//! # Solar Cooling Sweep
//!
//! Prints the engine power curve for a few wind and ambient conditions, the
//! cooling curve at the reference conditions, and the cooling-system report
//! at 700 W/m².
//!
//! To run this example:
//!
//! ```sh
//! cargo run --example cooling_sweep --release
//! ```

use std::error::Error;

use solar_stirling_models::models::{
    systems::solar_cooling::{Conditions, SolarCoolingSystem, power_curve},
    thermal::solar_stirling::Environment,
};
use uom::si::{
    f64::{HeatFluxDensity, ThermodynamicTemperature, Velocity},
    heat_flux_density::watt_per_square_meter,
    power::{kilowatt, watt},
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin,
    velocity::meter_per_second,
};

/// Irradiance sweep, in W/m².
const IRRADIANCE_START: f64 = 200.0;
const IRRADIANCE_STEP: f64 = 50.0;
const IRRADIANCE_POINTS: u32 = 17;

/// Wind speed (m/s) and ambient temperature (K) pairs for the power curve.
const CONDITIONS: [(f64, f64); 3] = [(0.0, 293.15), (5.0, 293.15), (0.0, 313.15)];

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let system = SolarCoolingSystem::reference()?;

    let irradiances: Vec<HeatFluxDensity> = (0..IRRADIANCE_POINTS)
        .map(|i| {
            HeatFluxDensity::new::<watt_per_square_meter>(
                IRRADIANCE_START + IRRADIANCE_STEP * f64::from(i),
            )
        })
        .collect();

    let conditions: Vec<Conditions> = CONDITIONS
        .iter()
        .map(|&(wind, ambient)| Conditions {
            wind_speed: Velocity::new::<meter_per_second>(wind),
            ambient_temperature: ThermodynamicTemperature::new::<kelvin>(ambient),
        })
        .collect();

    println!("Power curve");
    for curve in power_curve(system.engine(), &conditions, &irradiances) {
        println!(
            "  wind {:.1} m/s, ambient {:.2} K",
            curve.conditions.wind_speed.get::<meter_per_second>(),
            curve.conditions.ambient_temperature.get::<kelvin>()
        );
        for point in &curve.points {
            let irradiance = point.irradiance.get::<watt_per_square_meter>();
            match &point.outcome {
                Ok(result) => println!(
                    "    {irradiance:>6.0} W/m²  P = {:>7.3} kW  Q_H = {:>8.1} W",
                    result.power.get::<kilowatt>(),
                    result.hot_side_supplement.get::<watt>()
                ),
                Err(err) => println!("    {irradiance:>6.0} W/m²  failed: {err}"),
            }
        }
    }

    println!("Cooling curve");
    for point in system.cooling_curve(conditions[0], &irradiances) {
        let irradiance = point.irradiance.get::<watt_per_square_meter>();
        match point.outcome {
            Ok(cooling) => println!(
                "  {irradiance:>6.0} W/m²  Q_c = {:>7.1} W  COP = {:.3}  η = {:.4}{}",
                cooling.cooling_capacity.get::<watt>(),
                cooling.coefficient_of_performance,
                cooling.total_efficiency,
                if cooling.flow_limited { "  (below minimum flow)" } else { "" }
            ),
            Err(err) => println!("  {irradiance:>6.0} W/m²  failed: {err}"),
        }
    }

    let environment = Environment::new(
        HeatFluxDensity::new::<watt_per_square_meter>(700.0),
        Velocity::new::<meter_per_second>(0.0),
        ThermodynamicTemperature::new::<kelvin>(293.15),
    )?;
    let report = system.simulate_cooling_system(&environment)?;

    println!("Cooling system at 700 W/m²");
    println!(
        "  compressor: T2 = {:.2} K, w = {:.2} kJ/kg",
        report.compression.outlet_temperature.get::<kelvin>(),
        report.compression.specific_work_j_per_kg() / 1000.0
    );
    println!("  solar power: {:.3} kW", report.solar.power.get::<kilowatt>());
    for point in &report.vortex {
        println!(
            "  μ = {:.2}  Pe = {:.0}  ΔT_c = {:>6.3} K  T_c = {:.2} K",
            point.viscosity_ratio,
            point.peclet_number,
            point.temperature_drop.get::<delta_kelvin>(),
            point.cold_outlet_temperature.get::<kelvin>()
        );
    }

    Ok(())
}
