// routesim: Inter-Domain Routing Simulator
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Module that contains the error type of the topology loader

use crate::AsId;
use thiserror::Error;

/// The topology description is invalid. No network is produced in this case.
#[derive(Debug, Error)]
pub enum TopologyError {
    /// Io Error
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
    /// The file is not a valid topology description
    #[error("Cannot parse the topology: {0}")]
    JsonError(#[from] serde_json::Error),
    /// A relationship references an AS which was not declared
    #[error("Unknown AS: {0}")]
    UnknownAs(AsId),
    /// The same AS number is declared twice
    #[error("AS {0} is declared more than once")]
    DuplicateAs(AsId),
    /// The same prefix is originated by two ASes
    #[error("Prefix {0} is originated by more than one AS")]
    DuplicatePrefix(String),
    /// An AS has a relationship with itself
    #[error("AS {0} cannot have a relationship with itself")]
    SelfRelationship(AsId),
    /// Two ASes have more than one relationship
    #[error("AS {0} and AS {1} have more than one relationship")]
    DuplicateRelationship(AsId, AsId),
    /// The customer-provider relationships form a cycle, containing the given AS
    #[error("Customer-provider relationships form a cycle through AS {0}")]
    ProviderCycle(AsId),
}
