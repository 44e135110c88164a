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

//! Binary snapshot of the particle state for restarting a run.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::CheckpointError;
use crate::grid::Geometry;
use crate::pusher::WallLosses;
use crate::species::Species;

/// Everything needed to continue a run: the field arrays are recomputed from
/// the particles on the next step.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct Checkpoint {
    pub step: usize,               // next step to execute
    pub time: f64,                 // elapsed simulated time [s]
    pub seed: u64,                 // seed of the run that wrote the snapshot
    pub geometry: Geometry,
    pub ions: Species,
    pub electrons: Species,
    pub losses: [WallLosses; 2],   // cumulative, indexed by species kind
}

pub fn save(path: impl AsRef<Path>, checkpoint: &Checkpoint) -> Result<(), CheckpointError> {
    let path = path.as_ref();
    let io_err = |source| CheckpointError::Io { path: path.to_path_buf(), source };
    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    bincode::serialize_into(&mut writer, checkpoint)?;
    writer.flush().map_err(io_err)?;
    info!(
        "checkpoint written to {} at step {} ({} ions, {} electrons)",
        path.display(),
        checkpoint.step,
        checkpoint.ions.len(),
        checkpoint.electrons.len()
    );
    Ok(())
}

pub fn load(path: impl AsRef<Path>) -> Result<Checkpoint, CheckpointError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| CheckpointError::Io { path: path.to_path_buf(), source })?;
    let checkpoint: Checkpoint = bincode::deserialize_from(BufReader::new(file))?;
    info!("checkpoint loaded from {}, continuing at step {}", path.display(), checkpoint.step);
    Ok(checkpoint)
}
