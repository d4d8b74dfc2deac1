// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Quorum arithmetic for bid awards.

use serde::{Deserialize, Serialize};

/// Approval and rejection counts recorded for a single bid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub applied: u32,
    pub rejected: u32,
}

impl VoteTally {
    #[must_use]
    pub const fn new(applied: u32, rejected: u32) -> Self {
        Self { applied, rejected }
    }

    /// Returns true once any rejection has been recorded.
    ///
    /// A single rejection permanently blocks the bid.
    #[must_use]
    pub const fn is_blocked(&self) -> bool {
        self.rejected > 0
    }
}

/// Returns true if `applied` approvals meet the quorum for an organization
/// with `representatives` representatives.
///
/// The threshold is `representatives / 2 <= applied`, compared in floating
/// point: one representative needs one approval, three need two, four need
/// two. An organization with no representatives is satisfied by any tally.
#[must_use]
pub fn quorum_reached(representatives: u32, applied: u32) -> bool {
    f64::from(representatives) / 2.0 <= f64::from(applied)
}
