// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Actor, Affiliation, Ballot, DecisionLedger, IdentityDirectory, RecordOutcome,
};
use std::collections::{HashMap, HashSet};
use tender_market_domain::{
    BidId, Decision, OrganizationId, TenderId, TenderStatus, UserId, VoteTally,
};

/// Error type for the in-memory fakes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeStoreError(pub String);

impl std::fmt::Display for FakeStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fake store: {}", self.0)
    }
}

/// Username -> user id, user id -> organization.
#[derive(Debug, Default)]
pub struct FakeDirectory {
    pub users: HashMap<String, UserId>,
    pub representatives: HashMap<UserId, OrganizationId>,
    pub fail: bool,
}

impl FakeDirectory {
    pub fn with_user(mut self, username: &str, organization: Option<&str>) -> Self {
        let user_id = UserId::new(format!("user-{username}"));
        if let Some(org) = organization {
            self.representatives
                .insert(user_id.clone(), OrganizationId::new(org));
        }
        self.users.insert(username.to_string(), user_id);
        self
    }
}

impl IdentityDirectory for FakeDirectory {
    type Error = FakeStoreError;

    fn find_user_id(&mut self, username: &str) -> Result<Option<UserId>, Self::Error> {
        if self.fail {
            return Err(FakeStoreError(String::from("directory offline")));
        }
        Ok(self.users.get(username).cloned())
    }

    fn find_organization(
        &mut self,
        user_id: &UserId,
    ) -> Result<Option<OrganizationId>, Self::Error> {
        Ok(self.representatives.get(user_id).cloned())
    }
}

/// A single tender with its votes, keyed by (voter, bid).
#[derive(Debug)]
pub struct FakeLedger {
    pub tender_id: TenderId,
    pub status: TenderStatus,
    pub representatives: u32,
    pub votes: HashMap<(UserId, BidId), Decision>,
    pub known_bids: HashSet<BidId>,
    pub close_calls: u32,
}

impl FakeLedger {
    pub fn new(representatives: u32) -> Self {
        let mut known_bids = HashSet::new();
        known_bids.insert(bid_id());
        Self {
            tender_id: tender_id(),
            status: TenderStatus::Published,
            representatives,
            votes: HashMap::new(),
            known_bids,
            close_calls: 0,
        }
    }
}

impl DecisionLedger for FakeLedger {
    type Error = FakeStoreError;

    fn tender_status(&mut self, tender_id: &TenderId) -> Result<TenderStatus, Self::Error> {
        if *tender_id == self.tender_id {
            Ok(self.status)
        } else {
            Err(FakeStoreError(format!("no tender {tender_id}")))
        }
    }

    fn tally(&mut self, bid_id: &BidId) -> Result<VoteTally, Self::Error> {
        let mut tally = VoteTally::default();
        for ((_, bid), decision) in &self.votes {
            if bid == bid_id {
                if decision.is_approval() {
                    tally.applied += 1;
                } else {
                    tally.rejected += 1;
                }
            }
        }
        Ok(tally)
    }

    fn record_vote(&mut self, ballot: &Ballot) -> Result<RecordOutcome, Self::Error> {
        if !self.known_bids.contains(&ballot.bid_id) {
            return Ok(RecordOutcome::InvalidReference(format!(
                "bid {} does not exist",
                ballot.bid_id
            )));
        }
        let key = (ballot.voter_id.clone(), ballot.bid_id.clone());
        if self.votes.contains_key(&key) {
            return Ok(RecordOutcome::AlreadyVoted);
        }
        self.votes.insert(key, ballot.decision);
        Ok(RecordOutcome::Recorded)
    }

    fn count_representatives(
        &mut self,
        _organization_id: &OrganizationId,
    ) -> Result<u32, Self::Error> {
        Ok(self.representatives)
    }

    fn close_tender(&mut self, _tender_id: &TenderId) -> Result<(), Self::Error> {
        self.status = TenderStatus::Closed;
        self.close_calls += 1;
        Ok(())
    }
}

pub fn tender_id() -> TenderId {
    TenderId::new("tender-1")
}

pub fn bid_id() -> BidId {
    BidId::new("bid-1")
}

pub fn owner_org() -> OrganizationId {
    OrganizationId::new("org-owner")
}

pub fn ballot(voter: &str, decision: Decision) -> Ballot {
    Ballot {
        voter_id: UserId::new(voter),
        organization_id: owner_org(),
        tender_id: tender_id(),
        bid_id: bid_id(),
        decision,
    }
}

pub fn actor(username: &str, organization: Option<&str>) -> Actor {
    let affiliation = organization.map_or(Affiliation::Unaffiliated, |org| {
        Affiliation::Organization(OrganizationId::new(org))
    });
    Actor::new(
        username.to_string(),
        UserId::new(format!("user-{username}")),
        affiliation,
    )
}
