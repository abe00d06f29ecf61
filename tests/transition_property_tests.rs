//! Property-based tests for the status transition tables
//!
//! This module uses the proptest crate to verify that the transition tables
//! behave consistently across every (from, to) pair, not just the specific
//! paths the scenario tests exercise. The tables are small enough that random
//! sampling effectively covers the full cross product.

use proptest::prelude::*;

use peershare::error::ValidationError;
use peershare::model::{
    DisputeStatus, KycStatus, RequestStatus, StatusTable, TransactionStatus, ensure_transition,
};

// PROPERTY TEST STRATEGIES

fn transaction_status_strategy() -> impl Strategy<Value = TransactionStatus> {
    prop_oneof![
        Just(TransactionStatus::Pending),
        Just(TransactionStatus::Active),
        Just(TransactionStatus::Completed),
        Just(TransactionStatus::Cancelled),
        Just(TransactionStatus::Disputed),
    ]
}

fn dispute_status_strategy() -> impl Strategy<Value = DisputeStatus> {
    prop_oneof![
        Just(DisputeStatus::Open),
        Just(DisputeStatus::Resolved),
        Just(DisputeStatus::Rejected),
    ]
}

fn request_status_strategy() -> impl Strategy<Value = RequestStatus> {
    prop_oneof![
        Just(RequestStatus::Pending),
        Just(RequestStatus::Accepted),
        Just(RequestStatus::Rejected),
    ]
}

fn kyc_status_strategy() -> impl Strategy<Value = KycStatus> {
    prop_oneof![
        Just(KycStatus::Pending),
        Just(KycStatus::UnderReview),
        Just(KycStatus::Approved),
        Just(KycStatus::Rejected),
    ]
}

/// Shared assertion: `ensure_transition` succeeds exactly when the target is
/// in the source's allowed set, and the error carries the full allowed set.
fn check_table<S: StatusTable + std::fmt::Debug>(from: S, to: S) -> Result<(), TestCaseError> {
    let expected_ok = from.allowed_targets().iter().any(|t| t.as_str() == to.as_str());
    let result = ensure_transition(from, to);

    prop_assert_eq!(
        result.is_ok(),
        expected_ok,
        "transition {:?} -> {:?} disagreed with the allowed set",
        from,
        to
    );

    if let Err(ValidationError::IllegalTransition { from: f, to: t, allowed }) = result {
        prop_assert_eq!(f, from.as_str());
        prop_assert_eq!(t, to.as_str());
        for target in from.allowed_targets() {
            prop_assert!(
                allowed.contains(target.as_str()),
                "error message omits allowed target {:?}",
                target
            );
        }
    }
    Ok(())
}

// PROPERTY TESTS
proptest! {
    /// Property: the transaction table and ensure_transition never disagree.
    #[test]
    fn prop_transaction_transitions_match_table(
        from in transaction_status_strategy(),
        to in transaction_status_strategy(),
    ) {
        check_table(from, to)?;
    }

    /// Property: terminal statuses reject every target, including themselves.
    #[test]
    fn prop_terminal_statuses_reject_everything(
        to in transaction_status_strategy(),
        dispute_to in dispute_status_strategy(),
        request_to in request_status_strategy(),
        kyc_to in kyc_status_strategy(),
    ) {
        prop_assert!(ensure_transition(TransactionStatus::Disputed, to).is_err());
        prop_assert!(ensure_transition(DisputeStatus::Resolved, dispute_to).is_err());
        prop_assert!(ensure_transition(DisputeStatus::Rejected, dispute_to).is_err());
        prop_assert!(ensure_transition(RequestStatus::Accepted, request_to).is_err());
        prop_assert!(ensure_transition(RequestStatus::Rejected, request_to).is_err());
        prop_assert!(ensure_transition(KycStatus::Approved, kyc_to).is_err());
        prop_assert!(ensure_transition(KycStatus::Rejected, kyc_to).is_err());
    }

    /// Property: no status allows a transition to itself. Every workflow move
    /// is a real state change.
    #[test]
    fn prop_no_self_transitions(
        txn in transaction_status_strategy(),
        dispute in dispute_status_strategy(),
        request in request_status_strategy(),
        kyc in kyc_status_strategy(),
    ) {
        prop_assert!(ensure_transition(txn, txn).is_err());
        prop_assert!(ensure_transition(dispute, dispute).is_err());
        prop_assert!(ensure_transition(request, request).is_err());
        prop_assert!(ensure_transition(kyc, kyc).is_err());
    }

    /// Property: is_terminal agrees with an empty allowed set.
    #[test]
    fn prop_terminal_means_empty_allowed_set(
        txn in transaction_status_strategy(),
        dispute in dispute_status_strategy(),
        request in request_status_strategy(),
        kyc in kyc_status_strategy(),
    ) {
        prop_assert_eq!(txn.is_terminal(), txn.allowed_targets().is_empty());
        prop_assert_eq!(dispute.is_terminal(), dispute.allowed_targets().is_empty());
        prop_assert_eq!(request.is_terminal(), request.allowed_targets().is_empty());
        prop_assert_eq!(kyc.is_terminal(), kyc.allowed_targets().is_empty());
    }

    /// Property: the dispute and kyc tables match ensure_transition too.
    #[test]
    fn prop_other_tables_match_ensure_transition(
        dispute_from in dispute_status_strategy(),
        dispute_to in dispute_status_strategy(),
        request_from in request_status_strategy(),
        request_to in request_status_strategy(),
        kyc_from in kyc_status_strategy(),
        kyc_to in kyc_status_strategy(),
    ) {
        check_table(dispute_from, dispute_to)?;
        check_table(request_from, request_to)?;
        check_table(kyc_from, kyc_to)?;
    }
}
