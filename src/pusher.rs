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

//! Leapfrog particle push with absorbing walls.
//!
//! Velocities live half a step behind positions: `v(t - dt/2)`, `x(t)`.
//! [`rewind_species`] sets up that offset once, right after loading.

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

use crate::deposit::gather;
use crate::grid::Geometry;
use crate::species::Species;

/// Particles absorbed at each wall.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallLosses {
    pub left: usize,  // crossed x0
    pub right: usize, // reached xmax
}

impl WallLosses {
    pub fn total(&self) -> usize {
        self.left + self.right
    }
}

impl AddAssign for WallLosses {
    fn add_assign(&mut self, other: WallLosses) {
        self.left += other.left;
        self.right += other.right;
    }
}

//----------------------------------------------------------------------//
// move particles in E-field                                            //
//----------------------------------------------------------------------//

/// Advance every particle by one step in the field `ef` and drop the ones
/// that leave `[x0, xmax)`. Survivors keep their order.
pub fn push_species(species: &mut Species, geometry: &Geometry, ef: &[f64], dt: f64) -> WallLosses {
    let qm = species.charge_to_mass();
    let mut losses = WallLosses::default();
    species.particles.retain_mut(|part| {
        let part_ef = gather(geometry.x_to_l(part.x), ef);
        part.v += dt * qm * part_ef;
        part.x += dt * part.v;

        if part.x < geometry.x0() {
            losses.left += 1;
            false
        } else if part.x >= geometry.xmax() {
            losses.right += 1;
            false
        } else {
            true
        }
    });
    losses
}

/// Pull velocities back by half a step: `v -= 0.5*dt*(q/m)*E`.
pub fn rewind_species(species: &mut Species, geometry: &Geometry, ef: &[f64], dt: f64) {
    let qm = species.charge_to_mass();
    for part in species.particles.iter_mut() {
        let part_ef = gather(geometry.x_to_l(part.x), ef);
        part.v -= 0.5 * dt * qm * part_ef;
    }
}
