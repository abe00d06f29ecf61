//! Rental transactions between a vendor (listing owner) and a consumer.

use chrono::Utc;

use super::{StatusTable, TimeStamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, minicbor::Encode, minicbor::Decode)]
pub enum TransactionStatus {
    #[n(0)]
    Pending,
    #[n(1)]
    Active,
    #[n(2)]
    Completed,
    #[n(3)]
    Cancelled,
    #[n(4)]
    Disputed,
}

impl StatusTable for TransactionStatus {
    fn as_str(self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Active => "active",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Cancelled => "cancelled",
            TransactionStatus::Disputed => "disputed",
        }
    }

    // pending -> active -> completed; pending/active -> cancelled; any -> disputed
    fn allowed_targets(self) -> &'static [TransactionStatus] {
        match self {
            TransactionStatus::Pending => &[
                TransactionStatus::Active,
                TransactionStatus::Cancelled,
                TransactionStatus::Disputed,
            ],
            TransactionStatus::Active => &[
                TransactionStatus::Completed,
                TransactionStatus::Cancelled,
                TransactionStatus::Disputed,
            ],
            TransactionStatus::Completed => &[TransactionStatus::Disputed],
            TransactionStatus::Cancelled => &[TransactionStatus::Disputed],
            TransactionStatus::Disputed => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, minicbor::Encode, minicbor::Decode)]
pub struct Transaction {
    #[n(0)]
    pub id: String,
    #[n(1)]
    pub listing: String,
    #[n(2)]
    pub vendor: String, // derived from the listing owner, never caller-supplied
    #[n(3)]
    pub consumer: String,
    #[n(4)]
    pub start_date: TimeStamp<Utc>,
    #[n(5)]
    pub end_date: TimeStamp<Utc>,
    #[n(6)]
    pub total_price: u64, // cents, fixed at creation
    #[n(7)]
    pub status: TransactionStatus,
    #[n(8)]
    pub is_refunded: bool,
    #[n(9)]
    pub payment_hold_expires: Option<TimeStamp<Utc>>,
    #[n(10)]
    pub created_at: TimeStamp<Utc>,
}

impl Transaction {
    /// Whole days between start and end, truncated.
    pub fn duration_days(&self) -> i64 {
        self.start_date.whole_days_until(&self.end_date)
    }
}
