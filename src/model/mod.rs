//! Entity records and their status tables.
//!
//! Every record is encoded with minicbor for storage. Statuses are closed
//! enums; each carries its own legal-transition table via [`StatusTable`], so
//! an illegal transition is caught by an exhaustive match rather than a string
//! comparison.

use chrono::{DateTime, TimeZone, Utc};

use crate::error::ValidationError;

pub mod dispute;
pub mod donation;
pub mod kyc;
pub mod listing;
pub mod review;
pub mod transaction;
pub mod user;

pub use dispute::{Dispute, DisputeStatus};
pub use donation::{DonationRequest, RequestStatus};
pub use kyc::{DocumentType, Kyc, KycDraft, KycPublicStatus, KycStatus};
pub use listing::{Listing, ListingDraft, ListingType};
pub use review::{Rating, Review};
pub use transaction::{Transaction, TransactionStatus};
pub use user::{Role, User};

/// Legal-transition table for a status enum.
pub trait StatusTable: Copy + PartialEq + Sized + 'static {
    fn as_str(self) -> &'static str;
    /// Statuses reachable from `self`. Empty for terminal states.
    fn allowed_targets(self) -> &'static [Self];

    fn can_become(self, target: Self) -> bool {
        self.allowed_targets().contains(&target)
    }
    fn is_terminal(self) -> bool {
        self.allowed_targets().is_empty()
    }
}

/// Validate a requested transition against the entity's table. The error names
/// the allowed target set so the caller can correct and resubmit.
pub fn ensure_transition<S: StatusTable>(from: S, to: S) -> Result<(), ValidationError> {
    if from.can_become(to) {
        return Ok(());
    }
    let allowed = from
        .allowed_targets()
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    Err(ValidationError::IllegalTransition {
        from: from.as_str(),
        to: to.as_str(),
        allowed,
    })
}

#[derive(Debug, Clone)]
pub struct TimeStamp<T: TimeZone>(DateTime<T>);

impl<T: TimeZone> PartialEq for TimeStamp<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T: TimeZone> Eq for TimeStamp<T> {}

impl<T: TimeZone> PartialOrd for TimeStamp<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: TimeZone> Ord for TimeStamp<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl TimeStamp<Utc> {
    pub fn now() -> Self {
        Self(Utc::now())
    }
    pub fn new_with(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Self {
        Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
            .unwrap()
            .into()
    }
    pub fn to_datetime_utc(&self) -> DateTime<Utc> {
        self.0
    }
    /// Whole days until `later`, truncated toward zero.
    pub fn whole_days_until(&self, later: &TimeStamp<Utc>) -> i64 {
        (later.0 - self.0).num_days()
    }
}

impl<T: TimeZone> From<DateTime<T>> for TimeStamp<T> {
    fn from(value: DateTime<T>) -> Self {
        TimeStamp(value)
    }
}

impl<C> minicbor::Encode<C> for TimeStamp<Utc> {
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut minicbor::Encoder<W>,
        _: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        if let Some(nsec) = self.0.timestamp_nanos_opt() {
            return e.i64(nsec)?.ok();
        }

        Err(minicbor::encode::Error::message(
            "failed to encode timestamp. timestamp_nanos_opt returned None",
        ))
    }
}

impl<'b, C> minicbor::Decode<'b, C> for TimeStamp<Utc> {
    fn decode(d: &mut minicbor::Decoder<'b>, _: &mut C) -> Result<Self, minicbor::decode::Error> {
        let nsecs = d.i64()?;

        Ok(TimeStamp(DateTime::from_timestamp_nanos(nsecs)))
    }
}
