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

//! 1D-1V electrostatic particle-in-cell simulation of a plasma sheath.
//!
//! Ions and electrons are loaded uniformly into a grounded box with absorbing
//! walls; the faster electrons leave first and the remaining positive space
//! charge builds the sheath potential. Each step scatters the particles onto
//! the grid, solves Poisson's equation, and pushes the particles with a
//! leapfrog integrator.

pub mod checkpoint;
pub mod config;
pub mod constants;
pub mod deposit;
pub mod diagnostics;
pub mod error;
pub mod grid;
pub mod output;
pub mod pusher;
pub mod sampler;
pub mod simulation;
pub mod solver;
pub mod species;
pub mod stability;

pub use config::{ReinjectionPolicy, SimulationConfig, SolverKind, VelocityLoader};
pub use diagnostics::EnergyRecord;
pub use error::{CheckpointError, ConfigError, PicError, SolverError};
pub use grid::{Geometry, Grid, NodeRecord};
pub use output::{EnergyLog, ResultsWriter};
pub use pusher::WallLosses;
pub use simulation::{Simulation, StepReport};
pub use species::{Particle, Species, SpeciesKind};
pub use stability::StabilityReport;
