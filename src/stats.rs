//! Derived aggregates: rating statistics and per-actor status breakdowns.

use std::cmp::Ordering;

use crate::model::{DisputeStatus, Rating, RequestStatus, TransactionStatus};

/// Aggregate rating for one user. `average` is the arithmetic mean rounded
/// half-to-even to one decimal, 0 when there are no reviews.
/// `distribution[k-1]` counts ratings in `[k - 0.5, k + 0.5)` stars.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingStats {
    pub average: f64,
    pub total: u64,
    pub distribution: [u64; 5],
}

pub fn rating_stats(ratings: &[Rating]) -> RatingStats {
    let total = ratings.len() as u64;
    let mut distribution = [0u64; 5];
    if total == 0 {
        return RatingStats {
            average: 0.0,
            total,
            distribution,
        };
    }

    let mut sum_tenths: u64 = 0;
    for rating in ratings {
        sum_tenths += u64::from(rating.tenths());
        // bucket k covers [10k - 5, 10k + 5) tenths; below 0.5 stars falls in no bucket
        let bucket = (u64::from(rating.tenths()) + 5) / 10;
        if (1..=5).contains(&bucket) {
            distribution[bucket as usize - 1] += 1;
        }
    }

    // mean in tenths, rounded half-to-even so 2.25 reports as 2.2
    let quotient = sum_tenths / total;
    let remainder = sum_tenths % total;
    let avg_tenths = match (2 * remainder).cmp(&total) {
        Ordering::Less => quotient,
        Ordering::Greater => quotient + 1,
        Ordering::Equal => quotient + (quotient % 2),
    };
    let average = avg_tenths as f64 / 10.0;
    RatingStats {
        average,
        total,
        distribution,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisputeCounts {
    pub total: u64,
    pub open: u64,
    pub resolved: u64,
    pub rejected: u64,
}

impl DisputeCounts {
    pub fn tally<I: IntoIterator<Item = DisputeStatus>>(statuses: I) -> Self {
        let mut counts = Self::default();
        for status in statuses {
            counts.total += 1;
            match status {
                DisputeStatus::Open => counts.open += 1,
                DisputeStatus::Resolved => counts.resolved += 1,
                DisputeStatus::Rejected => counts.rejected += 1,
            }
        }
        counts
    }
}

/// Disputes the actor raised versus disputes on transactions they take part in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisputeStats {
    pub raised_by_me: DisputeCounts,
    pub involving_me: DisputeCounts,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestCounts {
    pub total: u64,
    pub pending: u64,
    pub accepted: u64,
    pub rejected: u64,
}

impl RequestCounts {
    pub fn tally<I: IntoIterator<Item = RequestStatus>>(statuses: I) -> Self {
        let mut counts = Self::default();
        for status in statuses {
            counts.total += 1;
            match status {
                RequestStatus::Pending => counts.pending += 1,
                RequestStatus::Accepted => counts.accepted += 1,
                RequestStatus::Rejected => counts.rejected += 1,
            }
        }
        counts
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DonationStats {
    pub requests_made: RequestCounts,
    pub requests_received: RequestCounts,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionCounts {
    pub total: u64,
    pub pending: u64,
    pub active: u64,
    pub completed: u64,
    pub cancelled: u64,
    pub disputed: u64,
}

impl TransactionCounts {
    pub fn tally<I: IntoIterator<Item = TransactionStatus>>(statuses: I) -> Self {
        let mut counts = Self::default();
        for status in statuses {
            counts.total += 1;
            match status {
                TransactionStatus::Pending => counts.pending += 1,
                TransactionStatus::Active => counts.active += 1,
                TransactionStatus::Completed => counts.completed += 1,
                TransactionStatus::Cancelled => counts.cancelled += 1,
                TransactionStatus::Disputed => counts.disputed += 1,
            }
        }
        counts
    }
}

/// Per-actor transaction breakdown. The money totals sum `total_price` over
/// completed transactions only: earnings on the vendor side, spend on the
/// consumer side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionStats {
    pub as_vendor: TransactionCounts,
    pub as_consumer: TransactionCounts,
    pub total_earnings: u64,
    pub total_spent: u64,
}
