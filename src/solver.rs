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

//! Electrostatic field solve: Poisson's equation for the potential with
//! grounded walls, then the field as the negated potential gradient.
//!
//! Two interchangeable solvers implement [`PotentialSolver`]:
//! - [`ThomasSolver`]: direct tridiagonal elimination, used every step
//! - [`SorSolver`]: Gauss-Seidel with successive over-relaxation

use log::{debug, warn};

use crate::config::{SolverConfig, SolverKind};
use crate::constants::*;
use crate::error::SolverError;
use crate::grid::Geometry;

/// Outcome of one potential solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveReport {
    pub iterations: usize,     // sweeps performed, 1 for the direct solver
    pub residual: Option<f64>, // last residual norm of an iterative solve
    pub converged: bool,
}

/// Charge density in, potential out, `phi[0] = phi[ni-1] = 0`.
pub trait PotentialSolver {
    /// Solve for `phi`. On entry `phi` holds the previous potential, which
    /// iterative solvers use as their initial guess.
    fn solve(&self, geometry: &Geometry, rho: &[f64], phi: &mut [f64]) -> Result<SolveReport, SolverError>;

    fn name(&self) -> &'static str;
}

/// Build the solver selected in the configuration.
pub fn build_solver(kind: SolverKind, config: &SolverConfig, epsilon0: f64) -> Box<dyn PotentialSolver> {
    match kind {
        SolverKind::Direct => Box::new(ThomasSolver { epsilon0 }),
        SolverKind::Sor => Box::new(SorSolver {
            epsilon0,
            omega: config.omega,
            tolerance: config.tolerance,
            check_interval: config.check_interval,
            max_iterations: config.max_iterations,
        }),
    }
}

fn check_inputs(geometry: &Geometry, rho: &[f64], phi: &[f64]) -> Result<(), SolverError> {
    let expected = geometry.nodes();
    if rho.len() != expected {
        return Err(SolverError::LengthMismatch { array: "charge density", expected, found: rho.len() });
    }
    if phi.len() != expected {
        return Err(SolverError::LengthMismatch { array: "potential", expected, found: phi.len() });
    }
    if let Some((node, &value)) = rho.iter().enumerate().find(|(_, r)| !r.is_finite()) {
        return Err(SolverError::NonFiniteChargeDensity { node, value });
    }
    Ok(())
}

//----------------------------------------------------------------------//
// direct solver (Thomas algorithm)                                     //
//----------------------------------------------------------------------//

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThomasSolver {
    pub epsilon0: f64,
}

impl Default for ThomasSolver {
    fn default() -> Self {
        ThomasSolver { epsilon0: EPSILON0 }
    }
}

impl PotentialSolver for ThomasSolver {
    fn solve(&self, geometry: &Geometry, rho: &[f64], x: &mut [f64]) -> Result<SolveReport, SolverError> {
        check_inputs(geometry, rho, x)?;
        let ni = geometry.nodes();
        let dx2 = geometry.dx() * geometry.dx();

        // second difference on interior rows, identity rows for the Dirichlet walls
        let mut a = vec![1.0; ni];
        let mut b = vec![-2.0; ni];
        let mut c = vec![1.0; ni];
        a[0] = 0.0;    b[0] = 1.0;    c[0] = 0.0;
        a[ni-1] = 0.0; b[ni-1] = 1.0; c[ni-1] = 0.0;

        // right hand side, overwritten with the solution
        for i in 1..(ni-1) {
            x[i] = -rho[i] * dx2 / self.epsilon0;
        }
        x[0] = 0.0;
        x[ni-1] = 0.0;

        // forward elimination
        c[0] /= b[0];
        x[0] /= b[0];
        for i in 1..ni {
            let id = b[i] - c[i-1] * a[i];
            if id.abs() < f64::EPSILON {
                return Err(SolverError::DegeneratePivot { node: i, pivot: id });
            }
            c[i] /= id;
            x[i] = (x[i] - x[i-1] * a[i]) / id;
        }

        // back substitution
        for i in (0..(ni-1)).rev() {
            x[i] -= c[i] * x[i+1];
        }

        Ok(SolveReport { iterations: 1, residual: None, converged: true })
    }

    fn name(&self) -> &'static str {
        "direct"
    }
}

//----------------------------------------------------------------------//
// iterative solver (Gauss-Seidel + SOR)                                //
//----------------------------------------------------------------------//

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SorSolver {
    pub epsilon0: f64,
    pub omega: f64,            // over-relaxation factor
    pub tolerance: f64,        // convergence limit of the residual norm
    pub check_interval: usize, // residual evaluated every N sweeps
    pub max_iterations: usize,
}

impl Default for SorSolver {
    fn default() -> Self {
        SorSolver {
            epsilon0: EPSILON0,
            omega: SOR_OMEGA,
            tolerance: SOR_TOLERANCE,
            check_interval: SOR_CHECK_INTERVAL,
            max_iterations: SOR_MAX_ITERATIONS,
        }
    }
}

impl SorSolver {
    /// `sqrt(sum R^2) / ni` over interior nodes, `R = -rho/eps0 - d2phi/dx2`.
    pub fn residual(&self, geometry: &Geometry, rho: &[f64], phi: &[f64]) -> f64 {
        let ni = geometry.nodes();
        let dx2 = geometry.dx() * geometry.dx();
        let mut sum = 0.0;
        for i in 1..(ni-1) {
            let r = -rho[i] / self.epsilon0 - (phi[i-1] - 2.0 * phi[i] + phi[i+1]) / dx2;
            sum += r * r;
        }
        sum.sqrt() / ni as f64
    }
}

impl PotentialSolver for SorSolver {
    fn solve(&self, geometry: &Geometry, rho: &[f64], phi: &mut [f64]) -> Result<SolveReport, SolverError> {
        check_inputs(geometry, rho, phi)?;
        let ni = geometry.nodes();
        let dx2 = geometry.dx() * geometry.dx();

        phi[0] = 0.0;
        phi[ni-1] = 0.0;

        let mut l2 = f64::INFINITY;
        for it in 0..self.max_iterations {
            for i in 1..(ni-1) {
                let g = 0.5 * (phi[i-1] + phi[i+1] + dx2 * rho[i] / self.epsilon0);
                phi[i] += self.omega * (g - phi[i]);
            }
            if it % self.check_interval == 0 {
                l2 = self.residual(geometry, rho, phi);
                if l2 < self.tolerance {
                    debug!("SOR converged after {} iterations, L2 = {:e}", it + 1, l2);
                    return Ok(SolveReport { iterations: it + 1, residual: Some(l2), converged: true });
                }
            }
        }

        warn!("Gauss-Seidel solver failed to converge after {} iterations, L2 = {:e}", self.max_iterations, l2);
        Ok(SolveReport { iterations: self.max_iterations, residual: Some(l2), converged: false })
    }

    fn name(&self) -> &'static str {
        "sor"
    }
}

//----------------------------------------------------------------------//
// electric field from the potential                                    //
//----------------------------------------------------------------------//

/// `E = -dphi/dx`: central differences inside, one-sided at the walls.
pub fn compute_electric_field(phi: &[f64], dx: f64, ef: &mut [f64]) {
    let ni = phi.len();
    for i in 1..(ni-1) {
        ef[i] = -(phi[i+1] - phi[i-1]) / (2.0 * dx);
    }
    ef[0]    = -(phi[1] - phi[0]) / dx;
    ef[ni-1] = -(phi[ni-1] - phi[ni-2]) / dx;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn max_abs(v: &[f64]) -> f64 {
        v.iter().fold(0.0, |m, x| f64::max(m, x.abs()))
    }

    #[test]
    fn direct_solver_matches_parabola() {
        let g = Geometry::new(40, 1.0e-3, 0.0).unwrap();
        let rho0 = 1.0e-6;
        let rho = vec![rho0; g.nodes()];
        let mut phi = vec![0.0; g.nodes()];
        let report = ThomasSolver::default().solve(&g, &rho, &mut phi).unwrap();
        assert!(report.converged);

        // phi'' = -rho/eps0 with phi(0) = phi(L) = 0
        let l = g.length();
        let exact: Vec<f64> = (0..g.nodes())
            .map(|i| {
                let x = g.node_position(i);
                rho0 / (2.0 * EPSILON0) * x * (l - x)
            })
            .collect();
        let scale = max_abs(&exact);
        for (p, e) in phi.iter().zip(&exact) {
            assert!((p - e).abs() <= 1e-9 * scale, "{} vs {}", p, e);
        }
        assert_eq!(phi[0], 0.0);
        assert_eq!(phi[g.nodes() - 1], 0.0);
    }

    #[test]
    fn solvers_agree() {
        let g = Geometry::new(40, 1.0e-3, 0.0).unwrap();
        let rho: Vec<f64> = (0..g.nodes())
            .map(|i| 1.0e-6 * (1.0 + (i as f64 * 0.3).sin()))
            .collect();

        let mut direct = vec![0.0; g.nodes()];
        ThomasSolver::default().solve(&g, &rho, &mut direct).unwrap();

        let mut iterative = vec![0.0; g.nodes()];
        let report = SorSolver::default().solve(&g, &rho, &mut iterative).unwrap();
        assert!(report.converged);
        assert!(report.residual.unwrap() < SOR_TOLERANCE);

        let scale = max_abs(&direct);
        for (d, s) in direct.iter().zip(&iterative) {
            assert!((d - s).abs() <= 1e-3 * scale, "{} vs {}", d, s);
        }
    }

    #[test]
    fn sor_reports_non_convergence() {
        let g = Geometry::new(40, 1.0e-3, 0.0).unwrap();
        let rho = vec![1.0e-6; g.nodes()];
        let mut phi = vec![0.0; g.nodes()];
        let solver = SorSolver { max_iterations: 10, ..SorSolver::default() };
        let report = solver.solve(&g, &rho, &mut phi).unwrap();
        assert!(!report.converged);
        assert_eq!(report.iterations, 10);
        // the partial potential is still handed back
        assert!(phi[20] > 0.0);
    }

    #[test]
    fn zero_charge_gives_zero_potential() {
        let g = Geometry::new(10, 1.0e-4, 0.0).unwrap();
        let rho = vec![0.0; g.nodes()];
        let mut phi = vec![3.0; g.nodes()];
        ThomasSolver::default().solve(&g, &rho, &mut phi).unwrap();
        assert!(phi.iter().all(|&p| p == 0.0));
        let mut phi = vec![0.0; g.nodes()];
        let report = SorSolver::default().solve(&g, &rho, &mut phi).unwrap();
        assert!(report.converged);
        assert_eq!(report.iterations, 1);
    }

    #[test]
    fn bad_input_is_rejected() {
        let g = Geometry::new(10, 1.0e-4, 0.0).unwrap();
        let mut phi = vec![0.0; g.nodes()];
        let mut rho = vec![0.0; g.nodes()];
        rho[4] = f64::NAN;
        assert!(matches!(
            ThomasSolver::default().solve(&g, &rho, &mut phi),
            Err(SolverError::NonFiniteChargeDensity { node: 4, .. })
        ));
        let short = vec![0.0; 3];
        assert!(matches!(
            SorSolver::default().solve(&g, &short, &mut phi),
            Err(SolverError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn linear_potential_gives_uniform_field() {
        let dx = 0.1;
        let phi: Vec<f64> = (0..11).map(|i| i as f64 * dx).collect();
        let mut ef = vec![0.0; phi.len()];
        compute_electric_field(&phi, dx, &mut ef);
        for e in &ef {
            assert!((e + 1.0).abs() < 1e-9, "{:?}", ef);
        }
    }

    #[test]
    fn builder_selects_solver() {
        let config = SolverConfig::default();
        assert_eq!(build_solver(SolverKind::Direct, &config, EPSILON0).name(), "direct");
        assert_eq!(build_solver(SolverKind::Sor, &config, EPSILON0).name(), "sor");
    }
}
