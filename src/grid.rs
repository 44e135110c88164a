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

//! Mesh geometry and the per-node field arrays.
//!
//! The grid hands out its arrays one stage at a time: every mutating method
//! reads some arrays and writes exactly one kind of quantity, so the per-step
//! order (deposit -> charge -> potential -> field) is the only way data flows.

use serde::{Deserialize, Serialize};

use crate::constants::E_CHARGE;
use crate::deposit::{scatter_species, scatter_species_velocity};
use crate::error::{ConfigError, SolverError};
use crate::solver::{compute_electric_field, PotentialSolver, SolveReport};
use crate::species::{Species, SpeciesKind};

/// Uniform 1D mesh: `nodes` points spaced `dx`, starting at `x0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    ni: usize,  // number of nodes
    x0: f64,    // position of node 0
    dx: f64,    // cell spacing
    xl: f64,    // domain length
    xmax: f64,  // domain maximum position
}

impl Geometry {
    pub fn new(cells: usize, dx: f64, x0: f64) -> Result<Self, ConfigError> {
        if cells < 2 {
            return Err(ConfigError::invalid("domain.cells", "need at least 2 cells"));
        }
        if !(dx.is_finite() && dx > 0.0) {
            return Err(ConfigError::invalid("domain.cell_spacing", format!("{} is not a positive number", dx)));
        }
        if !x0.is_finite() {
            return Err(ConfigError::invalid("domain.origin", "must be finite"));
        }
        let ni = cells + 1;
        let xl = (ni - 1) as f64 * dx;
        Ok(Geometry { ni, x0, dx, xl, xmax: x0 + xl })
    }

    pub fn nodes(&self) -> usize { self.ni }
    pub fn x0(&self) -> f64 { self.x0 }
    pub fn dx(&self) -> f64 { self.dx }
    pub fn length(&self) -> f64 { self.xl }
    pub fn xmax(&self) -> f64 { self.xmax }

    /// Physical position -> logical (fractional node) coordinate.
    #[inline]
    pub fn x_to_l(&self, x: f64) -> f64 {
        (x - self.x0) / self.dx
    }

    pub fn node_position(&self, i: usize) -> f64 {
        self.x0 + i as f64 * self.dx
    }

    /// True for positions inside `[x0, xmax)`.
    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        x >= self.x0 && x < self.xmax
    }
}

/// One line of the field/density snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeRecord {
    pub position: f64,
    pub ion_density: f64,
    pub electron_density: f64,
    pub charge_density: f64,
    pub ion_velocity: f64,
    pub electron_velocity: f64,
    pub potential: f64,
    pub field: f64,
}

#[derive(Debug, Clone)]
pub struct Grid {
    geometry: Geometry,
    phi: Vec<f64>,           // electric potential
    ef: Vec<f64>,            // electric field
    rho: Vec<f64>,           // charge density
    density: [Vec<f64>; 2],  // number density, per species
    velocity: [Vec<f64>; 2], // flux density n*u, per species
}

impl Grid {
    pub fn new(geometry: Geometry) -> Self {
        let ni = geometry.nodes();
        Grid {
            geometry,
            phi: vec![0.0; ni],
            ef: vec![0.0; ni],
            rho: vec![0.0; ni],
            density: [vec![0.0; ni], vec![0.0; ni]],
            velocity: [vec![0.0; ni], vec![0.0; ni]],
        }
    }

    pub fn geometry(&self) -> &Geometry { &self.geometry }
    pub fn potential(&self) -> &[f64] { &self.phi }
    pub fn electric_field(&self) -> &[f64] { &self.ef }
    pub fn charge_density(&self) -> &[f64] { &self.rho }

    pub fn density(&self, kind: SpeciesKind) -> &[f64] {
        &self.density[kind.index()]
    }

    /// Velocity moment as deposited, i.e. the particle flux density `n*u`.
    pub fn velocity(&self, kind: SpeciesKind) -> &[f64] {
        &self.velocity[kind.index()]
    }

    /// Mean velocity `u = (n*u)/n`, zero on nodes without particles.
    pub fn bulk_velocity(&self, kind: SpeciesKind) -> Vec<f64> {
        self.velocity(kind)
            .iter()
            .zip(self.density(kind))
            .map(|(&flux, &n)| if n > 0.0 { flux / n } else { 0.0 })
            .collect()
    }

    //------------------------------------------------------------------//
    // per-step stages                                                  //
    //------------------------------------------------------------------//

    /// Number density of one species.
    pub fn deposit_density(&mut self, species: &Species) {
        let field = &mut self.density[species.kind().index()];
        scatter_species(species, &self.geometry, field);
    }

    /// Velocity moment of one species.
    pub fn deposit_velocity(&mut self, species: &Species) {
        let field = &mut self.velocity[species.kind().index()];
        scatter_species_velocity(species, &self.geometry, field);
    }

    /// `rho = q_i*n_i + q_e*n_e`, with an optional noise floor given as a number
    /// density below which `|rho|` is zeroed.
    pub fn assemble_charge_density(&mut self, ions: &Species, electrons: &Species, noise_floor: Option<f64>) {
        let ndi = &self.density[SpeciesKind::Ion.index()];
        let nde = &self.density[SpeciesKind::Electron.index()];
        let (qi, qe) = (ions.charge(), electrons.charge());
        for (i, rho) in self.rho.iter_mut().enumerate() {
            *rho = qi * ndi[i] + qe * nde[i];
        }
        if let Some(floor) = noise_floor {
            let threshold = floor * E_CHARGE;
            for rho in self.rho.iter_mut() {
                if rho.abs() < threshold { *rho = 0.0; }
            }
        }
    }

    pub fn solve_potential(&mut self, solver: &dyn PotentialSolver) -> Result<SolveReport, SolverError> {
        solver.solve(&self.geometry, &self.rho, &mut self.phi)
    }

    pub fn compute_electric_field(&mut self) {
        compute_electric_field(&self.phi, self.geometry.dx(), &mut self.ef);
    }

    //------------------------------------------------------------------//
    // queries                                                          //
    //------------------------------------------------------------------//

    /// `max(phi) - phi[0]`, the potential drop across the sheath.
    pub fn potential_drop(&self) -> f64 {
        let max_phi = self.phi.iter().cloned().fold(self.phi[0], f64::max);
        max_phi - self.phi[0]
    }

    pub fn node_records(&self) -> impl Iterator<Item = NodeRecord> + '_ {
        let ion = SpeciesKind::Ion.index();
        let ele = SpeciesKind::Electron.index();
        (0..self.geometry.nodes()).map(move |i| NodeRecord {
            position: self.geometry.node_position(i),
            ion_density: self.density[ion][i],
            electron_density: self.density[ele][i],
            charge_density: self.rho[i],
            ion_velocity: self.velocity[ion][i],
            electron_velocity: self.velocity[ele][i],
            potential: self.phi[i],
            field: self.ef[i],
        })
    }
}
