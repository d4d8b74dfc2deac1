// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Field names follow the wire format of the public marketplace API, which
//! is camelCase for tenders and feedback and `snake_case` for bids.

use tender_market_domain::{Bid, Feedback, Tender};

/// API request to create a new tender.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTenderRequest {
    pub name: String,
    pub description: String,
    /// One of `Construction`, `Delivery`, `Manufacture`.
    pub service_type: String,
    /// The organization publishing the tender.
    pub organization_id: String,
    /// Must represent `organization_id`.
    pub creator_username: String,
}

/// API request to edit a tender. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditTenderRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub service_type: Option<String>,
}

/// API request to create a new bid.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBidRequest {
    pub name: String,
    pub description: String,
    pub tender_id: String,
    /// `Organization` or `User`, case-insensitive.
    pub author_type: String,
    /// A user id or an organization id, matching `author_type`.
    pub author_id: String,
}

/// API request to edit a bid. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EditBidRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// A tender as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenderResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: String,
    pub service_type: String,
    pub version: i32,
    pub created_at: String,
}

impl From<Tender> for TenderResponse {
    fn from(tender: Tender) -> Self {
        Self {
            id: tender.id.into_inner(),
            name: tender.name,
            description: tender.description,
            status: tender.status.as_str().to_string(),
            service_type: tender.service_type.as_str().to_string(),
            version: tender.version,
            created_at: tender.created_at,
        }
    }
}

/// A bid as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BidResponse {
    pub id: String,
    pub name: String,
    pub status: String,
    pub author_type: String,
    pub author_id: String,
    pub version: i32,
    pub created_at: String,
}

impl From<Bid> for BidResponse {
    fn from(bid: Bid) -> Self {
        Self {
            id: bid.id.into_inner(),
            name: bid.name,
            status: bid.status.as_str().to_string(),
            author_type: bid.author_type.as_str().to_string(),
            author_id: bid.author_id,
            version: bid.version,
            created_at: bid.created_at,
        }
    }
}

/// API response for a submitted decision.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DecisionResponse {
    /// The bid the decision was made on.
    pub bid: BidResponse,
    /// True if this decision closed the tender in the bid's favour.
    pub is_winner: bool,
}

/// A feedback entry as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    pub id: String,
    pub description: String,
    pub created_at: String,
}

impl From<Feedback> for FeedbackResponse {
    fn from(feedback: Feedback) -> Self {
        Self {
            id: feedback.id.into_inner(),
            description: feedback.description,
            created_at: feedback.created_at,
        }
    }
}
