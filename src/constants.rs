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

//! Physical constants and the reference run parameters.
//!
//! The `DEFAULT_*` values are the parameters of the reference sheath run; every
//! one of them can be overridden through [`crate::config::SimulationConfig`].

// physical constants

pub const EPSILON0: f64          = 8.85418782e-12;       // permittivity of free space [F/m]
pub const K_BOLTZMANN: f64       = 1.38065e-23;          // Boltzmann's constant [J/K]
pub const E_MASS: f64            = 9.10938215e-31;       // mass of electron [kg]
pub const E_CHARGE: f64          = 1.602176565e-19;      // elementary charge [C]
pub const AMU: f64               = 1.660538921e-27;      // atomic mass unit [kg]
pub const EV_TO_K: f64           = 11604.52;             // eV <-> Kelvin conversion factor

// reference simulation parameters

pub const DEFAULT_PLASMA_DENSITY: f64   = 1.0e16;        // plasma density [m^-3]
pub const DEFAULT_DX: f64               = 1.0e-4;        // cell spacing [m]
pub const DEFAULT_DT: f64               = 5.0e-11;       // time step [s]
pub const DEFAULT_ELECTRON_TEMP: f64    = 2.0;           // electron temperature [eV]
pub const DEFAULT_ION_TEMP: f64         = 0.1;           // ion temperature [eV]
pub const DEFAULT_ION_MASS_AMU: f64     = 40.0;          // Ar+ ion mass [amu]
pub const DEFAULT_NUM_IONS: usize       = 30_000;        // number of simulation ions
pub const DEFAULT_NUM_ELECTRONS: usize  = 80_000;        // number of simulation electrons
pub const DEFAULT_CELLS: usize          = 400;           // number of cells
pub const DEFAULT_STEPS: usize          = 10_000;        // number of time steps
pub const DEFAULT_DIAG_INTERVAL: usize  = 200;           // diagnostics written every N steps

// iterative field solver

pub const SOR_OMEGA: f64                = 1.4;           // over-relaxation factor
pub const SOR_TOLERANCE: f64            = 1.0e-4;        // residual norm for convergence
pub const SOR_CHECK_INTERVAL: usize     = 25;            // residual evaluated every N iterations
pub const SOR_MAX_ITERATIONS: usize     = 200_000;       // iteration cap

