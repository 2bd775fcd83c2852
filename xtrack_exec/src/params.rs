//! # Cross Track Executable Parameters
//!
//! This module provides the parameters of the cross track analysis executable. Every section is
//! optional in the parameter file, missing values take their defaults.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::{analysis::AnalysisParams, batch::BatchParams, export::ArchiveParams};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XtrackExecParams {
    /// Parameters of the analysis of each file
    pub analysis: AnalysisParams,

    /// Parameters of the batch driver
    pub batch: BatchParams,

    /// Parameters of the result archives
    pub archive: ArchiveParams,
}
