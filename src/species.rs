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

//! Macroparticles and the species that own them.

use serde::{Deserialize, Serialize};

use crate::constants::{AMU, E_CHARGE, E_MASS};

/// Coordinates of one macroparticle (one spatial, one velocity component).
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone, Copy)]
pub struct Particle {
    pub x: f64,  // position [m]
    pub v: f64,  // velocity [m/s]
    pub id: u64, // unique within the species, never reused
}

/// The two populations of the sheath problem.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum SpeciesKind {
    Ion,
    Electron,
}

impl SpeciesKind {
    /// Slot of this species in per-species grid arrays.
    pub fn index(self) -> usize {
        match self {
            SpeciesKind::Ion => 0,
            SpeciesKind::Electron => 1,
        }
    }
}

/// A population of macroparticles sharing mass, charge and specific weight.
///
/// Particles are kept in insertion order in a contiguous store. After loading,
/// the store only shrinks, unless reinjection is switched on.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct Species {
    name: String,
    kind: SpeciesKind,
    mass: f64,
    charge: f64,
    spwt: f64,
    initial_count: usize,
    temperature: f64,
    pub(crate) particles: Vec<Particle>,
    next_id: u64,
}

impl Species {
    /// Create an empty species. The specific weight is fixed here as
    /// `plasma_density * domain_length / initial_count`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        kind: SpeciesKind,
        mass: f64,
        charge: f64,
        plasma_density: f64,
        domain_length: f64,
        initial_count: usize,
        temperature: f64,
    ) -> Self {
        let spwt = (plasma_density * domain_length) / (initial_count as f64);
        Species {
            name: name.into(),
            kind,
            mass,
            charge,
            spwt,
            initial_count,
            temperature,
            particles: Vec::with_capacity(initial_count),
            next_id: 0,
        }
    }

    /// Singly charged ions of the given mass in amu.
    pub fn ions(mass_amu: f64, plasma_density: f64, domain_length: f64, count: usize, temperature: f64) -> Self {
        let name = if mass_amu == 40.0 { "Ar+ Ions" } else { "Ions" };
        Species::new(name, SpeciesKind::Ion, mass_amu * AMU, E_CHARGE, plasma_density, domain_length, count, temperature)
    }

    pub fn electrons(plasma_density: f64, domain_length: f64, count: usize, temperature: f64) -> Self {
        Species::new("Electrons", SpeciesKind::Electron, E_MASS, -E_CHARGE, plasma_density, domain_length, count, temperature)
    }

    /// Append a particle, assigning it the next identity. Returns that identity.
    pub fn add(&mut self, x: f64, v: f64) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.particles.push(Particle { x, v, id });
        id
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn kind(&self) -> SpeciesKind { self.kind }
    pub fn mass(&self) -> f64 { self.mass }
    pub fn charge(&self) -> f64 { self.charge }
    pub fn spwt(&self) -> f64 { self.spwt }
    pub fn initial_count(&self) -> usize { self.initial_count }
    pub fn temperature(&self) -> f64 { self.temperature } // [eV]

    pub fn charge_to_mass(&self) -> f64 {
        self.charge / self.mass
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
