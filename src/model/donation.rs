//! Donation requests against a listing, answered by the listing owner.

use chrono::Utc;

use super::{StatusTable, TimeStamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, minicbor::Encode, minicbor::Decode)]
pub enum RequestStatus {
    #[n(0)]
    Pending,
    #[n(1)]
    Accepted,
    #[n(2)]
    Rejected,
}

impl StatusTable for RequestStatus {
    fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Rejected => "rejected",
        }
    }

    fn allowed_targets(self) -> &'static [RequestStatus] {
        match self {
            RequestStatus::Pending => &[RequestStatus::Accepted, RequestStatus::Rejected],
            RequestStatus::Accepted => &[],
            RequestStatus::Rejected => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, minicbor::Encode, minicbor::Decode)]
pub struct DonationRequest {
    #[n(0)]
    pub id: String,
    #[n(1)]
    pub listing: String,
    #[n(2)]
    pub requester: String, // unique per (listing, requester)
    #[n(3)]
    pub message: Option<String>,
    #[n(4)]
    pub status: RequestStatus,
    #[n(5)]
    pub created_at: TimeStamp<Utc>,
    #[n(6)]
    pub updated_at: TimeStamp<Utc>,
}
