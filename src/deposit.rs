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

//! Particle <-> mesh coupling with linear (cloud-in-cell) weights.
//!
//! `scatter` and `gather` share the same weights, which is what keeps the
//! particle-mesh coupling free of self-forces.

use crate::grid::Geometry;
use crate::species::Species;

/// Split a logical coordinate into its left node and the weight of the right
/// node. The node index is clamped to `nodes - 2`: a position that rounds onto
/// the last node puts all its weight there.
#[inline]
pub fn cell(lc: f64, nodes: usize) -> (usize, f64) {
    let i = (lc.trunc() as usize).min(nodes - 2);
    (i, lc - i as f64)
}

/// Deposit `value` on the two nodes around `lc`.
#[inline]
pub fn scatter(lc: f64, value: f64, field: &mut [f64]) {
    let (i, di) = cell(lc, field.len());
    field[i]   += value * (1.0 - di);
    field[i+1] += value * di;
}

/// Interpolate `field` at `lc`.
#[inline]
pub fn gather(lc: f64, field: &[f64]) -> f64 {
    let (i, di) = cell(lc, field.len());
    field[i] * (1.0 - di) + field[i+1] * di
}

//----------------------------------------------------------------------//
// species moments on the mesh                                          //
//----------------------------------------------------------------------//

/// Number density of `species` [m^-3].
pub fn scatter_species(species: &Species, geometry: &Geometry, field: &mut [f64]) {
    field.iter_mut().for_each(|f| *f = 0.0);
    let spwt = species.spwt();
    for p in species.particles() {
        scatter(geometry.x_to_l(p.x), spwt, field);
    }
    to_density(field, geometry.dx());
}

/// Particle flux density `n*u` of `species` [m^-2 s^-1].
pub fn scatter_species_velocity(species: &Species, geometry: &Geometry, field: &mut [f64]) {
    field.iter_mut().for_each(|f| *f = 0.0);
    let spwt = species.spwt();
    for p in species.particles() {
        scatter(geometry.x_to_l(p.x), spwt * p.v, field);
    }
    to_density(field, geometry.dx());
}

// divide by the cell volume; boundary nodes only own half a cell
fn to_density(field: &mut [f64], dx: f64) {
    for f in field.iter_mut() {
        *f /= dx;
    }
    let last = field.len() - 1;
    field[0]    *= 2.0;
    field[last] *= 2.0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::SpeciesKind;

    fn geometry(cells: usize) -> Geometry {
        Geometry::new(cells, 0.5, 0.0).unwrap()
    }

    #[test]
    fn scatter_splits_linearly() {
        let mut field = vec![0.0; 5];
        scatter(1.25, 4.0, &mut field);
        assert_eq!(field, vec![0.0, 3.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn gather_uses_scatter_weights() {
        let field = vec![1.0, 3.0, 7.0, 2.0];
        assert_eq!(gather(1.5, &field), 5.0);
        assert_eq!(gather(0.0, &field), 1.0);
        assert_eq!(gather(2.75, &field), 7.0 * 0.25 + 2.0 * 0.75);
    }

    #[test]
    fn last_node_is_reachable() {
        let mut field = vec![0.0; 4];
        scatter(3.0, 2.0, &mut field);
        assert_eq!(field, vec![0.0, 0.0, 0.0, 2.0]);
        assert_eq!(gather(3.0, &[0.0, 0.0, 1.0, 5.0]), 5.0);
    }

    #[test]
    fn boundary_nodes_are_doubled() {
        // two particles per cell at 1/4 and 3/4 give every node the same share
        let cells = 8;
        let g = geometry(cells);
        let density = 1.0e15;
        let mut species = Species::new("test", SpeciesKind::Ion, 1.0, 1.0, density, g.length(), 2 * cells, 0.0);
        for k in 0..2 * cells {
            species.add((k as f64 + 0.5) * g.dx() / 2.0, 0.0);
        }
        let mut field = vec![0.0; g.nodes()];
        scatter_species(&species, &g, &mut field);
        for n in &field {
            assert!((n / density - 1.0).abs() < 1e-12, "{:?}", field);
        }
    }

    #[test]
    fn flux_carries_particle_velocity() {
        let g = geometry(4);
        let mut species = Species::new("test", SpeciesKind::Electron, 1.0, -1.0, 1.0, g.length(), 1, 0.0);
        species.add(0.75, 3.0);
        let mut field = vec![0.0; g.nodes()];
        scatter_species_velocity(&species, &g, &mut field);
        // lc = 1.5, spwt = 2.0, value 6.0 split evenly over nodes 1 and 2
        assert_eq!(field, vec![0.0, 6.0, 6.0, 0.0, 0.0]);
    }

    #[test]
    fn stale_values_are_cleared() {
        let g = geometry(4);
        let species = Species::new("empty", SpeciesKind::Ion, 1.0, 1.0, 1.0, g.length(), 1, 0.0);
        let mut field = vec![9.0; g.nodes()];
        scatter_species(&species, &g, &mut field);
        assert!(field.iter().all(|&f| f == 0.0));
    }
}
