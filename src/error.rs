//! Error taxonomy for workflow operations.
//!
//! Validation failures carry the field or the allowed-value set so callers can
//! correct and resubmit. Authorization failures never distinguish "exists but
//! is not yours" from "does not exist"; both surface as [`AccessError::NotFound`].

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("end date must be after start date")]
    EndBeforeStart,
    #[error("available_to must not precede available_from")]
    InvalidWindow,
    #[error("listing is not active")]
    ListingInactive,
    #[error("{0} must not be empty")]
    MissingField(&'static str),
    #[error("rating must be between 0.0 and 5.0")]
    RatingOutOfRange,
    #[error("users cannot review themselves")]
    SelfReview,
    #[error("rejection reason is required when rejecting a KYC submission")]
    MissingRejectionReason,
    #[error("cannot move from '{from}' to '{to}'. allowed targets: [{allowed}]")]
    IllegalTransition {
        from: &'static str,
        to: &'static str,
        allowed: String,
    },
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum AccessError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("duplicate {0}")]
    Conflict(&'static str),
    #[error("admin access required")]
    AdminOnly,
}
