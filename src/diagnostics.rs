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

//! Side-effect free queries over the simulation state.

use crate::constants::E_CHARGE;
use crate::species::Species;

/// Kinetic energy diagnostic of the reference code, in eV:
/// `(sum(v^2) + 0.5*spwt*mass) / e`.
///
/// The mass/weight term is added once per call rather than multiplying the
/// velocity sum, so the result is not the physical kinetic energy of the
/// species. It is kept as is so that `ke.dat` stays comparable with reference
/// output; see [`physical_kinetic_energy_ev`] for the physical quantity.
pub fn kinetic_energy_ev(species: &Species) -> f64 {
    let mut ke = 0.0;
    for p in species.particles() {
        ke += p.v * p.v;
    }
    ke += 0.5 * (species.spwt() * species.mass());
    ke / E_CHARGE
}

/// `0.5*mass*spwt*sum(v^2) / e`, the kinetic energy of all real particles the
/// macroparticles stand for, in eV.
pub fn physical_kinetic_energy_ev(species: &Species) -> f64 {
    let sum_v2: f64 = species.particles().iter().map(|p| p.v * p.v).sum();
    0.5 * species.mass() * species.spwt() * sum_v2 / E_CHARGE
}

/// One line of `ke.dat`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyRecord {
    pub time: f64,
    pub ions: f64,
    pub electrons: f64,
}

impl EnergyRecord {
    pub fn new(time: f64, ions: &Species, electrons: &Species, physical: bool) -> Self {
        let energy: fn(&Species) -> f64 = if physical { physical_kinetic_energy_ev } else { kinetic_energy_ev };
        EnergyRecord {
            time,
            ions: energy(ions),
            electrons: energy(electrons),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::SpeciesKind;

    fn species_with(velocities: &[f64]) -> Species {
        let mut s = Species::new("test", SpeciesKind::Ion, 4.0, 1.0, 10.0, 1.0, 5, 0.0);
        for (k, &v) in velocities.iter().enumerate() {
            s.add(k as f64 * 0.1, v);
        }
        s
    }

    #[test]
    fn reference_formula_adds_weight_term_once() {
        // spwt = 10*1/5 = 2, term = 0.5*2*4 = 4
        let s = species_with(&[1.0, 2.0, 3.0]);
        let expected = (1.0 + 4.0 + 9.0 + 4.0) / E_CHARGE;
        assert!((kinetic_energy_ev(&s) - expected).abs() <= 1e-12 * expected);

        let empty = species_with(&[]);
        assert!((kinetic_energy_ev(&empty) - 4.0 / E_CHARGE).abs() <= 1e-12 * 4.0 / E_CHARGE);
    }

    #[test]
    fn physical_formula_scales_with_weight() {
        let s = species_with(&[1.0, 2.0, 3.0]);
        let expected = 0.5 * 4.0 * 2.0 * 14.0 / E_CHARGE;
        assert!((physical_kinetic_energy_ev(&s) - expected).abs() <= 1e-12 * expected);
        assert_eq!(physical_kinetic_energy_ev(&species_with(&[])), 0.0);
    }

    #[test]
    fn record_picks_formula() {
        let ions = species_with(&[1.0]);
        let electrons = species_with(&[2.0]);
        let reference = EnergyRecord::new(1.5, &ions, &electrons, false);
        let physical = EnergyRecord::new(1.5, &ions, &electrons, true);
        assert_eq!(reference.time, 1.5);
        assert_eq!(reference.ions, kinetic_energy_ev(&ions));
        assert_eq!(physical.electrons, physical_kinetic_energy_ev(&electrons));
    }
}
