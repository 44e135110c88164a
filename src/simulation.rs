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

//! The simulation context: owns the grid, both species, the sampler and the
//! field solver, and advances them one PIC cycle at a time.

use log::{debug, info, warn};

use crate::checkpoint::Checkpoint;
use crate::config::{ReinjectionPolicy, SimulationConfig};
use crate::error::{CheckpointError, ConfigError, PicError};
use crate::grid::{Geometry, Grid};
use crate::pusher::{push_species, rewind_species, WallLosses};
use crate::sampler::ParticleSampler;
use crate::solver::{build_solver, PotentialSolver, SolveReport};
use crate::species::{Species, SpeciesKind};

/// What happened during one call to [`Simulation::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    pub step: usize,
    pub time: f64, // elapsed time at the start of the step [s]
    pub solve: SolveReport,
    pub losses: [WallLosses; 2], // this step only, indexed by species kind
}

pub struct Simulation {
    config: SimulationConfig,
    grid: Grid,
    ions: Species,
    electrons: Species,
    sampler: ParticleSampler,
    solver: Box<dyn PotentialSolver>,
    step: usize,
    time: f64,
    losses: [WallLosses; 2],
}

impl Simulation {
    /// Set up an empty run: grid allocated, species created without particles.
    pub fn new(config: SimulationConfig) -> Result<Self, PicError> {
        config.validate()?;
        let geometry = geometry_of(&config)?;
        let ions = Species::ions(
            config.plasma.ion_mass_amu,
            config.plasma.density,
            geometry.length(),
            config.particles.ions,
            config.plasma.ion_temperature,
        );
        let electrons = Species::electrons(
            config.plasma.density,
            geometry.length(),
            config.particles.electrons,
            config.plasma.electron_temperature,
        );
        Ok(Self::assemble(config, geometry, ions, electrons))
    }

    /// Set up a run with caller-built species. Species that already hold
    /// particles are not loaded again by [`Simulation::initialize`].
    pub fn with_species(config: SimulationConfig, ions: Species, electrons: Species) -> Result<Self, PicError> {
        config.validate()?;
        let geometry = geometry_of(&config)?;
        if ions.kind() != SpeciesKind::Ion {
            return Err(ConfigError::invalid("ions", format!("`{}` is not an ion species", ions.name())).into());
        }
        if electrons.kind() != SpeciesKind::Electron {
            return Err(ConfigError::invalid("electrons", format!("`{}` is not an electron species", electrons.name())).into());
        }
        Ok(Self::assemble(config, geometry, ions, electrons))
    }

    /// Continue a run from a snapshot. The sampler is reseeded from the
    /// snapshot's seed and step, and the velocities are not rewound again.
    pub fn resume(config: SimulationConfig, checkpoint: Checkpoint) -> Result<Self, PicError> {
        config.validate()?;
        let geometry = geometry_of(&config)?;
        if checkpoint.geometry != geometry {
            return Err(mismatch(format!(
                "grid of {} nodes with dx = {:e} does not match the configured {} nodes with dx = {:e}",
                checkpoint.geometry.nodes(),
                checkpoint.geometry.dx(),
                geometry.nodes(),
                geometry.dx()
            )));
        }
        if checkpoint.ions.kind() != SpeciesKind::Ion || checkpoint.electrons.kind() != SpeciesKind::Electron {
            return Err(mismatch("species are stored in the wrong slots".to_string()));
        }
        let fresh = Simulation::new(config.clone())?;
        for (stored, configured) in [(&checkpoint.ions, &fresh.ions), (&checkpoint.electrons, &fresh.electrons)] {
            if stored.spwt() != configured.spwt() || stored.mass() != configured.mass() {
                return Err(mismatch(format!(
                    "{}: specific weight {:e} and mass {:e} differ from the configured {:e} and {:e}",
                    stored.name(),
                    stored.spwt(),
                    stored.mass(),
                    configured.spwt(),
                    configured.mass()
                )));
            }
        }
        if checkpoint.seed != config.particles.seed {
            warn!(
                "checkpoint was written with seed {}, ignoring configured seed {}",
                checkpoint.seed, config.particles.seed
            );
        }

        let mut sim = Self::assemble(config, geometry, checkpoint.ions, checkpoint.electrons);
        sim.config.particles.seed = checkpoint.seed;
        sim.sampler = ParticleSampler::new(
            checkpoint.seed.wrapping_add(checkpoint.step as u64),
            sim.config.particles.velocity_loader,
        );
        sim.step = checkpoint.step;
        sim.time = checkpoint.time;
        sim.losses = checkpoint.losses;
        Ok(sim)
    }

    fn assemble(config: SimulationConfig, geometry: Geometry, ions: Species, electrons: Species) -> Self {
        let sampler = ParticleSampler::new(config.particles.seed, config.particles.velocity_loader);
        let solver = build_solver(config.solver.kind, &config.solver, config.plasma.permittivity);
        Simulation {
            grid: Grid::new(geometry),
            ions,
            electrons,
            sampler,
            solver,
            step: 0,
            time: 0.0,
            losses: [WallLosses::default(); 2],
            config,
        }
    }

    //------------------------------------------------------------------//
    // startup                                                          //
    //------------------------------------------------------------------//

    /// Load particles, solve the initial field and pull the velocities back
    /// half a step.
    pub fn initialize(&mut self) -> Result<SolveReport, PicError> {
        let geometry = *self.grid.geometry();
        let dt = self.config.time.time_step;

        // ions first, then electrons: the draw order fixes the random stream
        if self.ions.is_empty() {
            let count = self.ions.initial_count();
            self.sampler.load(&mut self.ions, &geometry, count);
        }
        if self.electrons.is_empty() {
            let count = self.electrons.initial_count();
            self.sampler.load(&mut self.electrons, &geometry, count);
        }
        log_species(&self.ions);
        log_species(&self.electrons);

        self.grid.deposit_density(&self.ions);
        self.grid.deposit_density(&self.electrons);
        self.grid.deposit_velocity(&self.ions);
        self.grid.deposit_velocity(&self.electrons);
        self.grid.assemble_charge_density(&self.ions, &self.electrons, self.config.solver.noise_floor_density);

        let startup = build_solver(self.config.solver.startup, &self.config.solver, self.config.plasma.permittivity);
        let report = self.grid.solve_potential(startup.as_ref())?;
        debug!("initial potential solved with {} solver in {} iterations", startup.name(), report.iterations);
        self.grid.compute_electric_field();

        rewind_species(&mut self.ions, &geometry, self.grid.electric_field(), dt);
        rewind_species(&mut self.electrons, &geometry, self.grid.electric_field(), dt);
        Ok(report)
    }

    //------------------------------------------------------------------//
    // main cycle                                                       //
    //------------------------------------------------------------------//

    /// One PIC cycle: deposit, solve, push.
    pub fn step(&mut self) -> Result<StepReport, PicError> {
        let geometry = *self.grid.geometry();
        let dt = self.config.time.time_step;

        self.grid.deposit_density(&self.ions);
        self.grid.deposit_density(&self.electrons);
        self.grid.deposit_velocity(&self.ions);
        self.grid.deposit_velocity(&self.electrons);
        self.grid.assemble_charge_density(&self.ions, &self.electrons, self.config.solver.noise_floor_density);

        let solve = self.grid.solve_potential(self.solver.as_ref())?;
        self.grid.compute_electric_field();

        let ion_losses = push_species(&mut self.ions, &geometry, self.grid.electric_field(), dt);
        let electron_losses = push_species(&mut self.electrons, &geometry, self.grid.electric_field(), dt);

        if self.config.particles.reinjection == ReinjectionPolicy::Uniform {
            self.sampler.load(&mut self.ions, &geometry, ion_losses.total());
            self.sampler.load(&mut self.electrons, &geometry, electron_losses.total());
        }

        self.losses[SpeciesKind::Ion.index()] += ion_losses;
        self.losses[SpeciesKind::Electron.index()] += electron_losses;
        if ion_losses.total() + electron_losses.total() > 0 {
            debug!(
                "step {}: absorbed ions {}/{}, electrons {}/{} (left/right)",
                self.step, ion_losses.left, ion_losses.right, electron_losses.left, electron_losses.right
            );
        }

        let report = StepReport {
            step: self.step,
            time: self.time,
            solve,
            losses: [ion_losses, electron_losses],
        };
        self.step += 1;
        self.time += dt;
        Ok(report)
    }

    /// Run steps up to and including `time.steps`, calling `on_diagnostic`
    /// after every step whose index is a multiple of the diagnostic interval.
    pub fn run<F>(&mut self, mut on_diagnostic: F) -> Result<(), PicError>
    where
        F: FnMut(&Simulation, &StepReport) -> Result<(), PicError>,
    {
        let last = self.config.time.steps;
        let interval = self.config.time.diagnostic_interval;
        info!("running steps {}..={}", self.step, last);
        while self.step <= last {
            let report = self.step()?;
            if report.step % interval == 0 {
                let [ions, electrons] = self.losses;
                info!(
                    "TS: {:8}  delta_phi: {:10.4}  #i = {:8}  #e = {:8}  lost i = {:8}  lost e = {:8}",
                    report.step,
                    self.grid.potential_drop(),
                    self.ions.len(),
                    self.electrons.len(),
                    ions.total(),
                    electrons.total()
                );
                on_diagnostic(self, &report)?;
            }
        }
        Ok(())
    }

    /// Snapshot of the particle state for a later [`Simulation::resume`].
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            step: self.step,
            time: self.time,
            seed: self.config.particles.seed,
            geometry: *self.grid.geometry(),
            ions: self.ions.clone(),
            electrons: self.electrons.clone(),
            losses: self.losses,
        }
    }

    pub fn config(&self) -> &SimulationConfig { &self.config }
    pub fn grid(&self) -> &Grid { &self.grid }
    pub fn ions(&self) -> &Species { &self.ions }
    pub fn electrons(&self) -> &Species { &self.electrons }
    pub fn step_index(&self) -> usize { self.step }
    pub fn time(&self) -> f64 { self.time }

    pub fn species(&self, kind: SpeciesKind) -> &Species {
        match kind {
            SpeciesKind::Ion => &self.ions,
            SpeciesKind::Electron => &self.electrons,
        }
    }

    /// Cumulative wall losses of one species.
    pub fn wall_losses(&self, kind: SpeciesKind) -> WallLosses {
        self.losses[kind.index()]
    }
}

fn geometry_of(config: &SimulationConfig) -> Result<Geometry, ConfigError> {
    Geometry::new(config.domain.cells, config.domain.cell_spacing, config.domain.origin)
}

fn mismatch(reason: String) -> PicError {
    CheckpointError::Mismatch(reason).into()
}

fn log_species(species: &Species) {
    info!(
        "{:10}: mass = {:1.4e} kg, charge = {:1.4e} C, spwt = {:1.4e}, particles = {}",
        species.name(),
        species.mass(),
        species.charge(),
        species.spwt(),
        species.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> SimulationConfig {
        let mut config = SimulationConfig::default();
        config.domain.cells = 20;
        config.particles.ions = 400;
        config.particles.electrons = 400;
        config.time.steps = 20;
        config.time.diagnostic_interval = 5;
        config.particles.seed = 3;
        config
    }

    #[test]
    fn initialize_loads_each_species_with_its_own_count() {
        let mut config = small_config();
        config.particles.electrons = 700;
        let mut sim = Simulation::new(config).unwrap();
        sim.initialize().unwrap();
        assert_eq!(sim.ions().len(), 400);
        assert_eq!(sim.electrons().len(), 700);
        let g = *sim.grid().geometry();
        assert!(sim.ions().particles().iter().all(|p| g.contains(p.x)));
    }

    #[test]
    fn cold_neutral_plasma_stays_put() {
        let config = small_config();
        let length = config.domain_length();
        let mut ions = Species::ions(40.0, config.plasma.density, length, 100, 0.0);
        let mut electrons = Species::electrons(config.plasma.density, length, 100, 0.0);
        for k in 0..100 {
            let x = (k as f64 + 0.5) * length / 100.0;
            ions.add(x, 0.0);
            electrons.add(x, 0.0);
        }
        let start: Vec<f64> = electrons.particles().iter().map(|p| p.x).collect();

        let mut sim = Simulation::with_species(config, ions, electrons).unwrap();
        sim.initialize().unwrap();
        for _ in 0..10 {
            let report = sim.step().unwrap();
            assert_eq!(report.losses[0].total() + report.losses[1].total(), 0);
        }
        assert!(sim.grid().charge_density().iter().all(|&rho| rho == 0.0));
        assert!(sim.grid().potential().iter().all(|&phi| phi == 0.0));
        let end: Vec<f64> = sim.electrons().particles().iter().map(|p| p.x).collect();
        assert_eq!(start, end);
        assert_eq!(sim.step_index(), 10);
    }

    #[test]
    fn species_slots_are_checked() {
        let config = small_config();
        let length = config.domain_length();
        let ions = Species::ions(40.0, 1.0e16, length, 10, 0.0);
        let electrons = Species::electrons(1.0e16, length, 10, 0.0);
        assert!(Simulation::with_species(config, electrons, ions).is_err());
    }

    #[test]
    fn diagnostics_fire_on_the_interval() {
        let mut sim = Simulation::new(small_config()).unwrap();
        sim.initialize().unwrap();
        let mut seen = Vec::new();
        sim.run(|s, report| {
            assert_eq!(s.step_index(), report.step + 1);
            seen.push(report.step);
            Ok(())
        })
        .unwrap();
        assert_eq!(seen, vec![0, 5, 10, 15, 20]);
        assert_eq!(sim.step_index(), 21);
        assert!((sim.time() - 21.0 * sim.config().time.time_step).abs() < 1e-20);
    }

    #[test]
    fn particles_only_leave_without_reinjection() {
        let mut config = small_config();
        config.time.steps = 200;
        let mut sim = Simulation::new(config).unwrap();
        sim.initialize().unwrap();
        let mut counts = vec![(sim.ions().len(), sim.electrons().len())];
        sim.run(|s, _| {
            counts.push((s.ions().len(), s.electrons().len()));
            Ok(())
        })
        .unwrap();
        for pair in counts.windows(2) {
            assert!(pair[1].0 <= pair[0].0);
            assert!(pair[1].1 <= pair[0].1);
        }
        let lost = sim.wall_losses(SpeciesKind::Electron).total();
        assert!(lost > 0);
        assert_eq!(sim.electrons().len() + lost, 400);
    }

    #[test]
    fn reinjection_keeps_counts() {
        let mut config = small_config();
        config.time.steps = 200;
        config.particles.reinjection = ReinjectionPolicy::Uniform;
        let mut sim = Simulation::new(config).unwrap();
        sim.initialize().unwrap();
        sim.run(|_, _| Ok(())).unwrap();
        assert_eq!(sim.ions().len(), 400);
        assert_eq!(sim.electrons().len(), 400);
        assert!(sim.wall_losses(SpeciesKind::Electron).total() > 0);
        // replacements get fresh identities
        let max_id = sim.electrons().particles().iter().map(|p| p.id).max().unwrap();
        assert!(max_id >= 400);
    }

    #[test]
    fn resumed_run_matches_checkpoint() {
        let mut sim = Simulation::new(small_config()).unwrap();
        sim.initialize().unwrap();
        for _ in 0..7 {
            sim.step().unwrap();
        }
        let snapshot = sim.checkpoint();
        let resumed = Simulation::resume(small_config(), snapshot.clone()).unwrap();
        assert_eq!(resumed.step_index(), 7);
        assert_eq!(resumed.time(), sim.time());
        assert_eq!(resumed.electrons(), sim.electrons());
        assert_eq!(resumed.wall_losses(SpeciesKind::Ion), sim.wall_losses(SpeciesKind::Ion));

        let mut other = small_config();
        other.particles.ions = 500;
        assert!(matches!(
            Simulation::resume(other, snapshot),
            Err(PicError::Checkpoint(CheckpointError::Mismatch(_)))
        ));
    }
}
