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

//! Run configuration, loaded from a TOML parameter file.
//!
//! Every section is optional; a missing section or key falls back to the
//! reference sheath run (see [`crate::constants`]). An example file that
//! spells out the defaults:
//!
//! ```toml
//! [plasma]
//! density = 1e16               # plasma density [m^-3]
//! electron_temperature = 2.0   # [eV]
//! ion_temperature = 0.1        # [eV]
//! ion_mass_amu = 40.0          # Ar+
//! permittivity = 8.85418782e-12
//!
//! [domain]
//! cells = 400
//! cell_spacing = 1e-4          # [m]
//! origin = 0.0                 # [m]
//!
//! [time]
//! time_step = 5e-11            # [s]
//! steps = 10000
//! diagnostic_interval = 200
//!
//! [particles]
//! ions = 30000
//! electrons = 80000
//! seed = 0
//! velocity_loader = "sum_of_uniforms"   # or "normal"
//! reinjection = "none"                  # or "uniform"
//!
//! [solver]
//! kind = "direct"              # or "sor"
//! startup = "sor"
//! omega = 1.4
//! tolerance = 1e-4
//! check_interval = 25
//! max_iterations = 200000
//! # noise_floor_density = 1e8  # zero |rho| below this density * e
//!
//! [output]
//! results = "results.dat"
//! kinetic_energy = "ke.dat"
//! physical_kinetic_energy = false
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

/// Top-level configuration of a sheath run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub plasma: PlasmaConfig,
    pub domain: DomainConfig,
    pub time: TimeConfig,
    pub particles: ParticleConfig,
    pub solver: SolverConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlasmaConfig {
    pub density: f64,              // plasma density [m^-3]
    pub electron_temperature: f64, // [eV]
    pub ion_temperature: f64,      // [eV]
    pub ion_mass_amu: f64,         // ion mass in atomic mass units
    pub permittivity: f64,         // vacuum permittivity [F/m]
}

impl Default for PlasmaConfig {
    fn default() -> Self {
        Self {
            density: DEFAULT_PLASMA_DENSITY,
            electron_temperature: DEFAULT_ELECTRON_TEMP,
            ion_temperature: DEFAULT_ION_TEMP,
            ion_mass_amu: DEFAULT_ION_MASS_AMU,
            permittivity: EPSILON0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DomainConfig {
    pub cells: usize,      // number of cells, nodes = cells + 1
    pub cell_spacing: f64, // [m]
    pub origin: f64,       // position of node 0 [m]
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            cells: DEFAULT_CELLS,
            cell_spacing: DEFAULT_DX,
            origin: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimeConfig {
    pub time_step: f64,             // [s]
    pub steps: usize,               // last step index, the run executes steps 0..=steps
    pub diagnostic_interval: usize, // diagnostics on every step divisible by this
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_step: DEFAULT_DT,
            steps: DEFAULT_STEPS,
            diagnostic_interval: DEFAULT_DIAG_INTERVAL,
        }
    }
}

/// Initial velocity distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VelocityLoader {
    /// `v_th*sqrt(2)*(r1+r2+r3-1.5)`, the reference loader.
    SumOfUniforms,
    /// Gaussian with the same variance.
    Normal,
}

/// What happens to particles absorbed at the walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReinjectionPolicy {
    /// Absorbed particles are gone for good.
    None,
    /// Every absorbed particle is replaced by a freshly sampled one.
    Uniform,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParticleConfig {
    pub ions: usize,
    pub electrons: usize,
    pub seed: u64,
    pub velocity_loader: VelocityLoader,
    pub reinjection: ReinjectionPolicy,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            ions: DEFAULT_NUM_IONS,
            electrons: DEFAULT_NUM_ELECTRONS,
            seed: 0,
            velocity_loader: VelocityLoader::SumOfUniforms,
            reinjection: ReinjectionPolicy::None,
        }
    }
}

/// Field solver algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverKind {
    /// Thomas algorithm on the tridiagonal Poisson system.
    Direct,
    /// Gauss-Seidel with successive over-relaxation.
    Sor,
}

impl FromStr for SolverKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "direct" | "thomas" => Ok(SolverKind::Direct),
            "sor" | "gauss_seidel" => Ok(SolverKind::Sor),
            other => Err(format!("unknown solver `{}`, expected `direct` or `sor`", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    pub kind: SolverKind,    // solver used on every step
    pub startup: SolverKind, // solver used once before the velocity rewind
    pub omega: f64,
    pub tolerance: f64,
    pub check_interval: usize,
    pub max_iterations: usize,
    /// Zero charge densities below `noise_floor_density * e`. Off when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noise_floor_density: Option<f64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            kind: SolverKind::Direct,
            startup: SolverKind::Sor,
            omega: SOR_OMEGA,
            tolerance: SOR_TOLERANCE,
            check_interval: SOR_CHECK_INTERVAL,
            max_iterations: SOR_MAX_ITERATIONS,
            noise_floor_density: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub results: PathBuf,
    pub kinetic_energy: PathBuf,
    /// Report `0.5*m*spwt*sum(v^2)` instead of the reference energy formula.
    pub physical_kinetic_energy: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results: PathBuf::from("results.dat"),
            kinetic_energy: PathBuf::from("ke.dat"),
            physical_kinetic_energy: false,
        }
    }
}

impl SimulationConfig {
    /// Read and validate a TOML parameter file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SimulationConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Length of the simulation domain [m].
    pub fn domain_length(&self) -> f64 {
        self.domain.cells as f64 * self.domain.cell_spacing
    }

    pub fn ion_mass(&self) -> f64 {
        self.plasma.ion_mass_amu * AMU
    }

    /// Reject parameter sets the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("plasma.density", self.plasma.density)?;
        non_negative("plasma.electron_temperature", self.plasma.electron_temperature)?;
        non_negative("plasma.ion_temperature", self.plasma.ion_temperature)?;
        positive("plasma.ion_mass_amu", self.plasma.ion_mass_amu)?;
        positive("plasma.permittivity", self.plasma.permittivity)?;

        if self.domain.cells < 2 {
            return Err(ConfigError::invalid("domain.cells", "need at least 2 cells"));
        }
        positive("domain.cell_spacing", self.domain.cell_spacing)?;
        if !self.domain.origin.is_finite() {
            return Err(ConfigError::invalid("domain.origin", "must be finite"));
        }

        positive("time.time_step", self.time.time_step)?;
        if self.time.diagnostic_interval == 0 {
            return Err(ConfigError::invalid("time.diagnostic_interval", "must be at least 1"));
        }

        if self.particles.ions == 0 {
            return Err(ConfigError::invalid("particles.ions", "must be at least 1"));
        }
        if self.particles.electrons == 0 {
            return Err(ConfigError::invalid("particles.electrons", "must be at least 1"));
        }

        if !(self.solver.omega > 0.0 && self.solver.omega < 2.0) {
            return Err(ConfigError::invalid(
                "solver.omega",
                format!("{} is outside the open interval (0, 2)", self.solver.omega),
            ));
        }
        positive("solver.tolerance", self.solver.tolerance)?;
        if self.solver.check_interval == 0 {
            return Err(ConfigError::invalid("solver.check_interval", "must be at least 1"));
        }
        if self.solver.max_iterations == 0 {
            return Err(ConfigError::invalid("solver.max_iterations", "must be at least 1"));
        }
        if let Some(floor) = self.solver.noise_floor_density {
            non_negative("solver.noise_floor_density", floor)?;
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(name, format!("{} is not a positive number", value)))
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(name, format!("{} is not a non-negative number", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_run() {
        let config = SimulationConfig::default();
        assert_eq!(config.domain.cells, 400);
        assert_eq!(config.particles.ions, 30_000);
        assert_eq!(config.particles.electrons, 80_000);
        assert_eq!(config.time.diagnostic_interval, 200);
        assert_eq!(config.solver.kind, SolverKind::Direct);
        assert_eq!(config.solver.noise_floor_density, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let config: SimulationConfig = toml::from_str(
            r#"
            [domain]
            cells = 50

            [solver]
            kind = "sor"
            noise_floor_density = 1e8
            "#,
        )
        .unwrap();
        assert_eq!(config.domain.cells, 50);
        assert_eq!(config.domain.cell_spacing, DEFAULT_DX);
        assert_eq!(config.solver.kind, SolverKind::Sor);
        assert_eq!(config.solver.noise_floor_density, Some(1e8));
        assert_eq!(config.plasma, PlasmaConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let parsed: Result<SimulationConfig, _> = toml::from_str("[domain]\ncels = 10\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn dumped_config_parses_back() {
        let mut config = SimulationConfig::default();
        config.particles.reinjection = ReinjectionPolicy::Uniform;
        config.particles.velocity_loader = VelocityLoader::Normal;
        let text = config.to_toml_string().unwrap();
        let parsed: SimulationConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn validation_catches_bad_values() {
        let mut config = SimulationConfig::default();
        config.domain.cells = 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { name: "domain.cells", .. })
        ));

        let mut config = SimulationConfig::default();
        config.solver.omega = 2.0;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.time.time_step = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.particles.electrons = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn solver_names_parse() {
        assert_eq!("direct".parse::<SolverKind>(), Ok(SolverKind::Direct));
        assert_eq!("SOR".parse::<SolverKind>(), Ok(SolverKind::Sor));
        assert!("multigrid".parse::<SolverKind>().is_err());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = SimulationConfig::from_toml_file("/nonexistent/sheath.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
