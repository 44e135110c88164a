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

//! Text output: the per-node snapshot (`results.dat`) and the kinetic energy
//! history (`ke.dat`).

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::diagnostics::EnergyRecord;
use crate::error::PicError;
use crate::grid::Grid;

fn output_error(path: &Path) -> impl Fn(std::io::Error) -> PicError + '_ {
    move |source| PicError::Output { path: path.to_path_buf(), source }
}

/// Node snapshot, replaced on every write.
#[derive(Debug, Clone)]
pub struct ResultsWriter {
    path: PathBuf,
}

impl ResultsWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ResultsWriter { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `position ni ne rho ui ue phi ef`, one line per node.
    pub fn write(&self, grid: &Grid) -> Result<(), PicError> {
        let err = output_error(&self.path);
        let mut file = BufWriter::new(File::create(&self.path).map_err(&err)?);
        for r in grid.node_records() {
            writeln!(
                file,
                "{:1.6e} \t{:1.6e} \t{:1.6e} \t{:1.6e} \t{:1.6e} \t{:1.6e} \t{:1.6e} \t{:1.6e}",
                r.position,
                r.ion_density,
                r.electron_density,
                r.charge_density,
                r.ion_velocity,
                r.electron_velocity,
                r.potential,
                r.field
            )
            .map_err(&err)?;
        }
        file.flush().map_err(&err)
    }
}

/// Append-only `time ke_ions ke_electrons` log.
#[derive(Debug)]
pub struct EnergyLog {
    path: PathBuf,
    file: BufWriter<File>,
}

impl EnergyLog {
    /// Start a new log, truncating an existing file.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, PicError> {
        let path = path.into();
        let file = File::create(&path).map_err(output_error(&path))?;
        Ok(EnergyLog { file: BufWriter::new(file), path })
    }

    /// Continue an existing log, as when resuming from a checkpoint.
    pub fn append_to(path: impl Into<PathBuf>) -> Result<Self, PicError> {
        let path = path.into();
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .map_err(output_error(&path))?;
        Ok(EnergyLog { file: BufWriter::new(file), path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(&mut self, record: &EnergyRecord) -> Result<(), PicError> {
        let err = output_error(&self.path);
        writeln!(self.file, "{:1.6e} \t{:1.6e} \t{:1.6e}", record.time, record.ions, record.electrons).map_err(&err)?;
        self.file.flush().map_err(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Geometry;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sheath-pic-{}-{}", std::process::id(), name))
    }

    #[test]
    fn results_file_is_replaced() {
        let path = temp_path("results.dat");
        let writer = ResultsWriter::new(&path);
        let grid = Grid::new(Geometry::new(4, 0.5, 0.0).unwrap());
        writer.write(&grid).unwrap();
        writer.write(&grid).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        let columns: Vec<f64> = lines[2].split_whitespace().map(|c| c.parse().unwrap()).collect();
        assert_eq!(columns.len(), 8);
        assert_eq!(columns[0], 1.0);
    }

    #[test]
    fn energy_log_truncates_then_appends() {
        let path = temp_path("ke.dat");
        let record = EnergyRecord { time: 1.0e-9, ions: 2.0, electrons: 3.0 };
        {
            let mut log = EnergyLog::create(&path).unwrap();
            log.record(&record).unwrap();
            log.record(&record).unwrap();
        }
        {
            let mut log = EnergyLog::create(&path).unwrap();
            log.record(&record).unwrap();
        }
        {
            let mut log = EnergyLog::append_to(&path).unwrap();
            log.record(&EnergyRecord { time: 2.0e-9, ..record }).unwrap();
        }
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let last: Vec<f64> = lines[1].split_whitespace().map(|c| c.parse().unwrap()).collect();
        assert_eq!(last, vec![2.0e-9, 2.0, 3.0]);
    }

    #[test]
    fn unwritable_path_is_reported() {
        let writer = ResultsWriter::new("/nonexistent/dir/results.dat");
        let grid = Grid::new(Geometry::new(4, 0.5, 0.0).unwrap());
        assert!(matches!(writer.write(&grid), Err(PicError::Output { .. })));
    }
}
