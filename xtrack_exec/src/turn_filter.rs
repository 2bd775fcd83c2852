//! # Turn segment filter
//!
//! A trajectory log usually covers much more than the manoeuvre of interest. The turn segment
//! is delimited by the turn status codes carried on each record:
//!
//! - the segment starts at the first record with a status of `START`,
//! - it ends at the first record with a status of `END` when a `MARKER` status appears within
//!   the last `WINDOW_LEN` statuses appended to the segment (the end record included).
//!
//! The filter is a small state machine processed record by record. Each mode is handled by a
//! `mode_xyz` function.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::trace;
use serde::{Deserialize, Serialize};

use crate::record::{TrajectoryRecord, FIELD_TURN_STATUS};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Status which starts the segment
pub const STATUS_START: i64 = 0;

/// Status which can end the segment
pub const STATUS_END: i64 = 1;

/// Status which must have been seen recently for `STATUS_END` to end the segment
pub const STATUS_MARKER: i64 = 3;

/// Number of appended statuses searched for the marker
pub const WINDOW_LEN: usize = 5;

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// Parameters of the turn filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnFilterParams {
    /// Name of the field holding the turn status
    pub status_field: String,

    /// What to do with records whose status cannot be read once the segment has started
    pub unparseable_status: UnparseableStatusPolicy,
}

/// The turn filter state machine.
#[derive(Debug, Clone)]
pub struct TurnFilter {
    status_field: String,
    policy: UnparseableStatusPolicy,

    mode: Mode,

    window: StatusWindow,
}

/// Fixed capacity ring buffer of the most recent statuses appended to the segment.
///
/// `None` entries are records without a readable status, they occupy a slot but never match.
#[derive(Debug, Clone, Copy, Default)]
struct StatusWindow {
    buf: [Option<i64>; WINDOW_LEN],
    head: usize,
    len: usize,
}

// ------------------------------------------------------------------------------------------------
// ENUMERATIONS
// ------------------------------------------------------------------------------------------------

/// The possible modes of the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Waiting for the start status
    Idle,

    /// Inside the segment
    Active,

    /// The segment has ended
    Done,
}

/// What the caller shall do with the record just given to the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterAction {
    /// The record belongs to the segment
    Append,

    /// The record is outside the segment
    Discard,

    /// The segment is complete, no further records need to be given
    Stop,
}

/// Handling of records without a readable status inside the segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnparseableStatusPolicy {
    /// Append the record, it occupies a window slot without matching
    Keep,

    /// Skip the record entirely
    Drop,
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl Default for TurnFilterParams {
    fn default() -> Self {
        Self {
            status_field: FIELD_TURN_STATUS.into(),
            unparseable_status: UnparseableStatusPolicy::Keep,
        }
    }
}

impl Default for UnparseableStatusPolicy {
    fn default() -> Self {
        Self::Keep
    }
}

impl TurnFilter {
    /// Create a new filter reading the default status field.
    pub fn new(policy: UnparseableStatusPolicy) -> Self {
        Self::from_params(&TurnFilterParams {
            unparseable_status: policy,
            ..Default::default()
        })
    }

    pub fn from_params(params: &TurnFilterParams) -> Self {
        Self {
            status_field: params.status_field.clone(),
            policy: params.unparseable_status,
            mode: Mode::Idle,
            window: StatusWindow::default(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Process the next record.
    pub fn step(&mut self, record: &TrajectoryRecord) -> FilterAction {
        let status = record.get_i64(&self.status_field);

        match self.mode {
            Mode::Idle => self.mode_idle(status),
            Mode::Active => self.mode_active(record, status),
            Mode::Done => FilterAction::Stop,
        }
    }

    fn mode_idle(&mut self, status: Option<i64>) -> FilterAction {
        if status != Some(STATUS_START) {
            return FilterAction::Discard;
        }

        trace!("Turn segment started");

        self.window.push(status);
        self.mode = Mode::Active;
        FilterAction::Append
    }

    fn mode_active(&mut self, record: &TrajectoryRecord, status: Option<i64>) -> FilterAction {
        if status.is_none() && self.policy == UnparseableStatusPolicy::Drop {
            trace!(
                "Dropping record with unreadable status {:?}",
                record.get(&self.status_field)
            );
            return FilterAction::Discard;
        }

        self.window.push(status);

        if status == Some(STATUS_END) && self.window.contains(STATUS_MARKER) {
            trace!("Turn segment ended");
            self.mode = Mode::Done;
        }

        FilterAction::Append
    }
}

impl StatusWindow {
    fn push(&mut self, status: Option<i64>) {
        self.buf[self.head] = status;
        self.head = (self.head + 1) % WINDOW_LEN;
        self.len = (self.len + 1).min(WINDOW_LEN);
    }

    fn contains(&self, status: i64) -> bool {
        // Until the buffer wraps the occupied slots are the first len ones
        self.buf[..self.len].iter().any(|s| *s == Some(status))
    }
}

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Extract the turn segment from a sequence of records.
///
/// If no record carries the start status the segment is empty.
pub fn filter_turn_segment<'a, I>(records: I, params: &TurnFilterParams) -> Vec<&'a TrajectoryRecord>
where
    I: IntoIterator<Item = &'a TrajectoryRecord>,
{
    let mut filter = TurnFilter::from_params(params);
    let mut segment = Vec::new();

    for record in records {
        match filter.step(record) {
            FilterAction::Append => segment.push(record),
            FilterAction::Discard => (),
            FilterAction::Stop => break,
        }
    }

    segment
}
