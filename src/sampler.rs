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

//! Initial particle loading from an explicitly seeded random stream.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

use crate::config::VelocityLoader;
use crate::constants::{EV_TO_K, K_BOLTZMANN};
use crate::grid::Geometry;
use crate::species::Species;

/// `v_th = sqrt(2kT/m)` for a temperature in Kelvin.
pub fn thermal_velocity(temperature: f64, mass: f64) -> f64 {
    (2.0 * K_BOLTZMANN * temperature / mass).sqrt()
}

pub struct ParticleSampler {
    rng: ChaCha8Rng,
    loader: VelocityLoader,
}

impl ParticleSampler {
    pub fn new(seed: u64, loader: VelocityLoader) -> Self {
        ParticleSampler {
            rng: ChaCha8Rng::seed_from_u64(seed),
            loader,
        }
    }

    /// Uniform draw from [0, 1).
    pub fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Uniform position in `[x0, xmax)`.
    pub fn sample_position(&mut self, geometry: &Geometry) -> f64 {
        loop {
            let x = geometry.x0() + self.uniform() * (geometry.nodes() - 1) as f64 * geometry.dx();
            // rounding can land a draw close to 1 exactly on xmax
            if x < geometry.xmax() {
                return x;
            }
        }
    }

    /// Thermal velocity for a temperature in eV.
    ///
    /// The default loader is the sum-of-uniforms approximation of Birdsall,
    /// `v_th*sqrt(2)*(r1 + r2 + r3 - 1.5)`, whose variance is `kT/m`. The
    /// normal loader draws a true Gaussian with that variance.
    pub fn sample_velocity(&mut self, temperature: f64, mass: f64) -> f64 {
        let v_th = thermal_velocity(temperature * EV_TO_K, mass);
        match self.loader {
            VelocityLoader::SumOfUniforms => {
                v_th * 2f64.sqrt() * (self.uniform() + self.uniform() + self.uniform() - 1.5)
            }
            VelocityLoader::Normal => {
                let z: f64 = self.rng.sample(StandardNormal);
                v_th / 2f64.sqrt() * z
            }
        }
    }

    /// Add `count` particles with uniform positions and thermal velocities.
    pub fn load(&mut self, species: &mut Species, geometry: &Geometry, count: usize) {
        let (temperature, mass) = (species.temperature(), species.mass());
        for _ in 0..count {
            let x = self.sample_position(geometry);
            let v = self.sample_velocity(temperature, mass);
            species.add(x, v);
        }
    }
}
