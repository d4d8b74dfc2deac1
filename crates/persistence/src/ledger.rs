// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` vote ledger.
//!
//! A `SqliteLedger` borrows a connection that is already inside an
//! `IMMEDIATE` transaction (see `Persistence::decision_transaction`). The
//! write lock is taken when the transaction begins, so the tally read, the
//! vote insert and the tender close of one decision cannot interleave with
//! another decision's.

use diesel::SqliteConnection;
use tender_market::{Ballot, DecisionLedger, RecordOutcome};
use tender_market_domain::{BidId, OrganizationId, TenderId, TenderStatus, VoteTally};
use tracing::warn;

use crate::error::PersistenceError;
use crate::{mutations, queries};

/// Vote ledger over a transaction-scoped `SQLite` connection.
pub struct SqliteLedger<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> SqliteLedger<'a> {
    pub(crate) const fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }
}

impl DecisionLedger for SqliteLedger<'_> {
    type Error = PersistenceError;

    fn tender_status(&mut self, tender_id: &TenderId) -> Result<TenderStatus, Self::Error> {
        queries::tenders::get_tender_status(self.conn, tender_id)
    }

    fn tally(&mut self, bid_id: &BidId) -> Result<VoteTally, Self::Error> {
        queries::decisions::tally_votes(self.conn, bid_id)
    }

    fn record_vote(&mut self, ballot: &Ballot) -> Result<RecordOutcome, Self::Error> {
        match mutations::decisions::insert_vote(self.conn, ballot) {
            Ok(()) => Ok(RecordOutcome::Recorded),
            Err(PersistenceError::UniqueViolation(_)) => {
                warn!(bid_id = %ballot.bid_id, voter_id = %ballot.voter_id, "Duplicate vote refused");
                Ok(RecordOutcome::AlreadyVoted)
            }
            Err(PersistenceError::ForeignKeyViolation(message)) => {
                Ok(RecordOutcome::InvalidReference(message))
            }
            Err(e) => Err(e),
        }
    }

    fn count_representatives(
        &mut self,
        organization_id: &OrganizationId,
    ) -> Result<u32, Self::Error> {
        queries::directory::count_representatives(self.conn, organization_id)
    }

    fn close_tender(&mut self, tender_id: &TenderId) -> Result<(), Self::Error> {
        mutations::tenders::set_tender_status(self.conn, tender_id, TenderStatus::Closed, None)
            .map(|_| ())
    }
}
