//-------------------------------------------------------------------//
//       sheath-pic : 1d1v electrostatic PIC plasma sheath code      //
//-------------------------------------------------------------------//
// Disclaimer: sheath-pic is free software: you can redistribute it  //
// and/or modify it under the terms of the GNU General Public License//
// as published by the Free Software Foundation, version 3.          //
// This program is distributed in the hope that it will be useful,   //
// but WITHOUT ANY WARRANTY; without even the implied warranty of    //
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU  //
// General Public License for more details at                        //
// https://www.gnu.org/licenses/gpl-3.0.html.                        //
//-------------------------------------------------------------------//

//! Stability and accuracy conditions of an explicit electrostatic PIC run,
//! evaluated from the configured (unperturbed) plasma.

use log::{info, warn};

use crate::config::SimulationConfig;
use crate::constants::{E_CHARGE, E_MASS};

pub const MAX_PLASMA_FREQUENCY_DT: f64 = 0.2; // omega_p * dt must stay below
pub const MAX_DX_OVER_DEBYE: f64       = 1.0; // dx / lambda_D must stay below

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityReport {
    pub plasma_frequency: f64,    // electron plasma frequency [rad/s]
    pub debye_length: f64,        // electron Debye length [m]
    pub plasma_frequency_dt: f64, // omega_p * dt
    pub dx_over_debye: f64,       // dx / lambda_D
    pub cfl_energy: f64,          // electron energy with v*dt = dx [eV]
}

impl StabilityReport {
    pub fn from_config(config: &SimulationConfig) -> Self {
        let density = config.plasma.density;
        let eps0 = config.plasma.permittivity;
        let dx = config.domain.cell_spacing;
        let dt = config.time.time_step;

        let plasma_frequency = E_CHARGE * (density / eps0 / E_MASS).sqrt();
        let kt = config.plasma.electron_temperature * E_CHARGE;
        let debye_length = (eps0 * kt / density).sqrt() / E_CHARGE;
        let v_max = dx / dt;

        StabilityReport {
            plasma_frequency,
            debye_length,
            plasma_frequency_dt: plasma_frequency * dt,
            dx_over_debye: dx / debye_length,
            cfl_energy: 0.5 * E_MASS * v_max * v_max / E_CHARGE,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.plasma_frequency_dt <= MAX_PLASMA_FREQUENCY_DT && self.dx_over_debye <= MAX_DX_OVER_DEBYE
    }

    pub fn log(&self) {
        info!("Plasma frequency                      = {:1.6e} [rad/s]", self.plasma_frequency);
        info!("Debye length                          = {:1.6e} [m]", self.debye_length);
        info!("Max e- energy for CFL condition       = {:10.4} [eV]", self.cfl_energy);
        if self.plasma_frequency_dt > MAX_PLASMA_FREQUENCY_DT {
            warn!(
                "Plasma frequency * DT = {:.4} exceeds {:.2}, refine the time step",
                self.plasma_frequency_dt, MAX_PLASMA_FREQUENCY_DT
            );
        }
        if self.dx_over_debye > MAX_DX_OVER_DEBYE {
            warn!(
                "DX / Debye length = {:.4} exceeds {:.2}, refine the grid",
                self.dx_over_debye, MAX_DX_OVER_DEBYE
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_run_resolves_debye_length() {
        let report = StabilityReport::from_config(&SimulationConfig::default());
        assert!((report.debye_length - 1.05e-4).abs() < 0.01e-4, "{}", report.debye_length);
        assert!(report.dx_over_debye < MAX_DX_OVER_DEBYE);
        assert!((report.plasma_frequency - 5.64e9).abs() < 0.01e9, "{}", report.plasma_frequency);
    }

    #[test]
    fn reference_time_step_is_flagged() {
        // omega_p * dt is about 0.28 for dt = 5e-11
        let mut config = SimulationConfig::default();
        assert!(!StabilityReport::from_config(&config).is_ok());
        config.time.time_step = 2.5e-11;
        assert!(StabilityReport::from_config(&config).is_ok());
    }

    #[test]
    fn cold_electrons_fail_debye_check() {
        let mut config = SimulationConfig::default();
        config.plasma.electron_temperature = 0.0;
        let report = StabilityReport::from_config(&config);
        assert!(report.dx_over_debye.is_infinite());
        assert!(!report.is_ok());
    }
}
