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

//! Crate-level error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read configuration file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to parse configuration file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unable to serialize configuration")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid parameter `{name}`: {reason}")]
    Invalid { name: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid { name, reason: reason.into() }
    }
}

#[derive(Debug, Error)]
pub enum SolverError {
    #[error("degenerate pivot {pivot:e} at node {node} in tridiagonal elimination")]
    DegeneratePivot { node: usize, pivot: f64 },

    #[error("non-finite charge density {value} at node {node}")]
    NonFiniteChargeDensity { node: usize, value: f64 },

    #[error("{array} has {found} entries, grid has {expected} nodes")]
    LengthMismatch {
        array: &'static str,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("checkpoint i/o failed for {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("checkpoint encoding failed")]
    Encoding(#[from] bincode::Error),

    #[error("checkpoint does not match the configuration: {0}")]
    Mismatch(String),
}

#[derive(Debug, Error)]
pub enum PicError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error(transparent)]
    Checkpoint(#[from] CheckpointError),

    #[error("unable to write {}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
