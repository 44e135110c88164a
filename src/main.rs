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

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};

use sheath_pic::checkpoint;
use sheath_pic::{EnergyLog, EnergyRecord, ResultsWriter, Simulation, SimulationConfig, SolverKind, StabilityReport};

/// sheath-pic - 1d1v electrostatic PIC simulation of a plasma sheath
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Index of the last time step (overrides config file)
    #[arg(short = 'n', long, value_name = "COUNT")]
    steps: Option<usize>,

    /// Seed of the particle sampler (overrides config file)
    #[arg(short, long, value_name = "SEED")]
    seed: Option<u64>,

    /// Field solver used on every step: direct or sor
    #[arg(long, value_name = "KIND")]
    solver: Option<SolverKind>,

    /// Write diagnostics every N steps (overrides config file)
    #[arg(short = 'd', long, value_name = "N")]
    diagnostic_interval: Option<usize>,

    /// Directory for results.dat and ke.dat
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Save the particle state to FILE at the end of the run
    #[arg(long, value_name = "FILE")]
    checkpoint: Option<PathBuf>,

    /// Continue the run stored in FILE
    #[arg(long, value_name = "FILE")]
    resume: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    dump_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_toml_file(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(steps) = args.steps { config.time.steps = steps; }
    if let Some(seed) = args.seed { config.particles.seed = seed; }
    if let Some(kind) = args.solver { config.solver.kind = kind; }
    if let Some(interval) = args.diagnostic_interval { config.time.diagnostic_interval = interval; }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    env_logger::Builder::new().filter_level(level).parse_default_env().init();

    let config = load_config(&args)?;
    if args.dump_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    info!("sheath-pic {}: 1d1v electrostatic PIC sheath simulation", env!("CARGO_PKG_VERSION"));
    StabilityReport::from_config(&config).log();

    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("unable to create output directory {}", args.output_dir.display()))?;
    let results = ResultsWriter::new(args.output_dir.join(&config.output.results));
    let ke_path = args.output_dir.join(&config.output.kinetic_energy);
    let physical_ke = config.output.physical_kinetic_energy;

    let (mut sim, mut energy_log) = match &args.resume {
        Some(path) => {
            let snapshot = checkpoint::load(path)?;
            (Simulation::resume(config, snapshot)?, EnergyLog::append_to(ke_path)?)
        }
        None => {
            let mut sim = Simulation::new(config)?;
            let startup = sim.initialize()?;
            info!(
                "initial potential: {} iterations, converged = {}",
                startup.iterations, startup.converged
            );
            (sim, EnergyLog::create(ke_path)?)
        }
    };

    sim.run(|sim, report| {
        energy_log.record(&EnergyRecord::new(report.time, sim.ions(), sim.electrons(), physical_ke))?;
        results.write(sim.grid())
    })?;

    if let Some(path) = &args.checkpoint {
        checkpoint::save(path, &sim.checkpoint())?;
    }
    info!("simulation completed, results in {}", results.path().display());
    Ok(())
}
