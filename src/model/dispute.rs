//! Disputes raised by a transaction participant, resolved by an admin.

use chrono::Utc;

use super::{StatusTable, TimeStamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, minicbor::Encode, minicbor::Decode)]
pub enum DisputeStatus {
    #[n(0)]
    Open,
    #[n(1)]
    Resolved,
    #[n(2)]
    Rejected,
}

impl StatusTable for DisputeStatus {
    fn as_str(self) -> &'static str {
        match self {
            DisputeStatus::Open => "open",
            DisputeStatus::Resolved => "resolved",
            DisputeStatus::Rejected => "rejected",
        }
    }

    fn allowed_targets(self) -> &'static [DisputeStatus] {
        match self {
            DisputeStatus::Open => &[DisputeStatus::Resolved, DisputeStatus::Rejected],
            DisputeStatus::Resolved => &[],
            DisputeStatus::Rejected => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, minicbor::Encode, minicbor::Decode)]
pub struct Dispute {
    #[n(0)]
    pub id: String,
    #[n(1)]
    pub transaction: String,
    #[n(2)]
    pub raised_by: String, // must be a participant of the transaction
    #[n(3)]
    pub reason: String,
    #[n(4)]
    pub status: DisputeStatus,
    #[n(5)]
    pub created_at: TimeStamp<Utc>,
    // set only when the dispute reaches a terminal status
    #[n(6)]
    pub resolved_at: Option<TimeStamp<Utc>>,
    #[n(7)]
    pub resolved_by: Option<String>,
    #[n(8)]
    pub resolution_notes: Option<String>,
}
