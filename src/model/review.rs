//! Peer reviews with a bounded one-decimal rating.

use chrono::Utc;

use super::TimeStamp;
use crate::error::ValidationError;

/// Rating in tenths of a star, 0 to 50 inclusive. Integer storage keeps the
/// aggregate arithmetic exact until the final rounding step.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, minicbor::Encode, minicbor::Decode,
)]
#[cbor(transparent)]
pub struct Rating(#[n(0)] u8);

impl Rating {
    pub const MAX_TENTHS: u8 = 50;

    pub fn from_tenths(tenths: u8) -> Result<Self, ValidationError> {
        if tenths > Self::MAX_TENTHS {
            return Err(ValidationError::RatingOutOfRange);
        }
        Ok(Rating(tenths))
    }

    /// Accepts a star value such as `2.5`, keeping one decimal of precision.
    pub fn from_stars(stars: f64) -> Result<Self, ValidationError> {
        if !stars.is_finite() || !(0.0..=5.0).contains(&stars) {
            return Err(ValidationError::RatingOutOfRange);
        }
        Ok(Rating((stars * 10.0).round() as u8))
    }

    pub fn tenths(self) -> u8 {
        self.0
    }
    pub fn stars(self) -> f64 {
        f64::from(self.0) / 10.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, minicbor::Encode, minicbor::Decode)]
pub struct Review {
    #[n(0)]
    pub id: String,
    #[n(1)]
    pub reviewer: String, // unique per (reviewer, reviewed)
    #[n(2)]
    pub reviewed: String,
    #[n(3)]
    pub rating: Rating,
    #[n(4)]
    pub comment: Option<String>,
    #[n(5)]
    pub created_at: TimeStamp<Utc>,
}
