//! Service layer API for marketplace workflow operations.
//!
//! Every operation takes the acting identity explicitly, narrows the entity
//! set through the visibility capability, validates any requested status
//! transition against the entity's table, and writes back through the store.
//! An operation that fails validation leaves the record untouched.

use chrono::Utc;
use sled::Db;
use std::sync::Arc;

use crate::actor::Actor;
use crate::auth::Visibility;
use crate::error::{AccessError, ValidationError};
use crate::ids;
use crate::model::{
    Dispute, DisputeStatus, DonationRequest, Kyc, KycDraft, KycPublicStatus, KycStatus, Listing,
    ListingDraft, ListingType, Rating, RequestStatus, Review, Role, StatusTable, TimeStamp,
    Transaction, TransactionStatus, User, ensure_transition,
};
use crate::stats::{
    DisputeCounts, DisputeStats, DonationStats, RatingStats, RequestCounts, TransactionCounts,
    TransactionStats, rating_stats,
};
use crate::store::EntityStore;

pub struct MarketService {
    store: EntityStore,
}

impl MarketService {
    pub fn new(instance: Arc<Db>) -> anyhow::Result<Self> {
        Ok(Self {
            store: EntityStore::open(instance)?,
        })
    }

    // ACCOUNTS

    /// Register a minimal account record. Credential handling lives with the
    /// external identity provider; this only establishes the ownership anchor
    /// other entities reference.
    pub fn register_user(&self, email: &str, full_name: &str, role: Role) -> anyhow::Result<User> {
        if email.trim().is_empty() {
            return Err(ValidationError::MissingField("email").into());
        }

        let id = ids::mint(ids::USER)?;
        let email_key = email.trim().to_lowercase();
        if !EntityStore::claim(&self.store.user_emails, email_key.as_bytes(), &id)? {
            return Err(AccessError::Conflict("email").into());
        }

        let user = User {
            id,
            email: email_key,
            full_name: full_name.to_owned(),
            role,
            is_verified: false,
            is_active: true,
            created_at: TimeStamp::now(),
        };
        EntityStore::put(&self.store.users, &user.id, &user)?;

        tracing::debug!(user = %user.id, "registered user");
        Ok(user)
    }

    fn load_user(&self, id: &str) -> anyhow::Result<Option<User>> {
        EntityStore::get(&self.store.users, id)
    }

    // LISTINGS

    pub fn create_listing(&self, actor: &Actor, draft: ListingDraft) -> anyhow::Result<Listing> {
        let id = ids::mint(ids::LISTING)?;
        let listing = draft.validate_and_build(id, actor.id.clone(), true, TimeStamp::now())?;
        EntityStore::put(&self.store.listings, &listing.id, &listing)?;

        tracing::debug!(listing = %listing.id, owner = %listing.owner, "created listing");
        Ok(listing)
    }

    /// Public browse: active listings only, newest first, optionally narrowed
    /// by listing type.
    pub fn browse_listings(
        &self,
        listing_type: Option<ListingType>,
    ) -> anyhow::Result<Vec<Listing>> {
        let mut listings: Vec<Listing> = EntityStore::scan(&self.store.listings)?
            .into_iter()
            .filter(|l: &Listing| l.is_active)
            .filter(|l| listing_type.is_none_or(|t| l.listing_type == t))
            .collect();
        listings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listings)
    }

    /// The actor's own listings, active or not.
    pub fn my_listings(&self, actor: &Actor) -> anyhow::Result<Vec<Listing>> {
        let mut listings: Vec<Listing> = EntityStore::scan(&self.store.listings)?
            .into_iter()
            .filter(|l: &Listing| l.owner == actor.id)
            .collect();
        listings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listings)
    }

    fn owned_listing(&self, actor: &Actor, listing_id: &str) -> anyhow::Result<Listing> {
        let listing: Listing = EntityStore::get(&self.store.listings, listing_id)?
            .ok_or(AccessError::NotFound("listing"))?;
        if listing.owner != actor.id {
            return Err(AccessError::NotFound("listing").into());
        }
        Ok(listing)
    }

    /// Replace the caller-editable fields of an owned listing. Identity,
    /// ownership and the active flag are preserved.
    pub fn update_listing(
        &self,
        actor: &Actor,
        listing_id: &str,
        draft: ListingDraft,
    ) -> anyhow::Result<Listing> {
        let existing = self.owned_listing(actor, listing_id)?;
        let updated = draft.validate_and_build(
            existing.id.clone(),
            existing.owner.clone(),
            existing.is_active,
            existing.created_at.clone(),
        )?;
        EntityStore::put(&self.store.listings, &updated.id, &updated)?;
        Ok(updated)
    }

    pub fn toggle_listing_active(
        &self,
        actor: &Actor,
        listing_id: &str,
    ) -> anyhow::Result<Listing> {
        let mut listing = self.owned_listing(actor, listing_id)?;
        listing.is_active = !listing.is_active;
        EntityStore::put(&self.store.listings, &listing.id, &listing)?;

        tracing::debug!(listing = %listing.id, active = listing.is_active, "toggled listing");
        Ok(listing)
    }

    pub fn delete_listing(&self, actor: &Actor, listing_id: &str) -> anyhow::Result<()> {
        let listing = self.owned_listing(actor, listing_id)?;
        EntityStore::remove(&self.store.listings, &listing.id)?;
        Ok(())
    }

    // TRANSACTIONS

    /// Create a rental transaction against an active listing. The actor
    /// becomes the consumer; the vendor is always the listing owner. The total
    /// price is derived once here and never recomputed, so later listing price
    /// edits do not touch existing transactions.
    pub fn request_rental(
        &self,
        actor: &Actor,
        listing_id: &str,
        start_date: TimeStamp<Utc>,
        end_date: TimeStamp<Utc>,
    ) -> anyhow::Result<Transaction> {
        let listing: Listing = EntityStore::get(&self.store.listings, listing_id)?
            .ok_or(AccessError::NotFound("listing"))?;
        if !listing.is_active {
            return Err(ValidationError::ListingInactive.into());
        }
        if start_date >= end_date {
            return Err(ValidationError::EndBeforeStart.into());
        }

        let days = start_date.whole_days_until(&end_date).max(0) as u64;
        let total_price = listing.price_per_day.unwrap_or(0).saturating_mul(days);

        let transaction = Transaction {
            id: ids::mint(ids::TRANSACTION)?,
            listing: listing.id.clone(),
            vendor: listing.owner.clone(),
            consumer: actor.id.clone(),
            start_date,
            end_date,
            total_price,
            status: TransactionStatus::Pending,
            is_refunded: false,
            payment_hold_expires: None,
            created_at: TimeStamp::now(),
        };
        EntityStore::put(&self.store.transactions, &transaction.id, &transaction)?;

        tracing::info!(
            transaction = %transaction.id,
            vendor = %transaction.vendor,
            consumer = %transaction.consumer,
            total_price = transaction.total_price,
            "rental requested"
        );
        Ok(transaction)
    }

    pub fn list_transactions(&self, actor: &Actor) -> anyhow::Result<Vec<Transaction>> {
        let mut transactions: Vec<Transaction> = EntityStore::scan(&self.store.transactions)?
            .into_iter()
            .filter(|t: &Transaction| t.visible_to(actor, &()))
            .collect();
        transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(transactions)
    }

    pub fn get_transaction(&self, actor: &Actor, id: &str) -> anyhow::Result<Transaction> {
        let transaction: Transaction = EntityStore::get(&self.store.transactions, id)?
            .ok_or(AccessError::NotFound("transaction"))?;
        if !transaction.visible_to(actor, &()) {
            return Err(AccessError::NotFound("transaction").into());
        }
        Ok(transaction)
    }

    /// Move a transaction along its lifecycle. Only the vendor may do this; a
    /// non-vendor gets "not found" rather than confirmation the record exists.
    pub fn update_transaction_status(
        &self,
        actor: &Actor,
        id: &str,
        target: TransactionStatus,
    ) -> anyhow::Result<Transaction> {
        let mut transaction: Transaction = EntityStore::get(&self.store.transactions, id)?
            .ok_or(AccessError::NotFound("transaction"))?;
        if transaction.vendor != actor.id {
            return Err(AccessError::NotFound("transaction").into());
        }
        ensure_transition(transaction.status, target)?;

        transaction.status = target;
        EntityStore::put(&self.store.transactions, &transaction.id, &transaction)?;

        tracing::info!(transaction = %transaction.id, status = target.as_str(), "transaction status updated");
        Ok(transaction)
    }

    pub fn transaction_stats(&self, actor: &Actor) -> anyhow::Result<TransactionStats> {
        let transactions: Vec<Transaction> = EntityStore::scan(&self.store.transactions)?;
        let as_vendor = TransactionCounts::tally(
            transactions
                .iter()
                .filter(|t| t.vendor == actor.id)
                .map(|t| t.status),
        );
        let as_consumer = TransactionCounts::tally(
            transactions
                .iter()
                .filter(|t| t.consumer == actor.id)
                .map(|t| t.status),
        );
        let completed_total = |mine: fn(&Transaction, &str) -> bool| {
            transactions
                .iter()
                .filter(|t| mine(t, &actor.id) && t.status == TransactionStatus::Completed)
                .fold(0u64, |acc, t| acc.saturating_add(t.total_price))
        };
        Ok(TransactionStats {
            as_vendor,
            as_consumer,
            total_earnings: completed_total(|t, id| t.vendor == id),
            total_spent: completed_total(|t, id| t.consumer == id),
        })
    }

    /// Admin view of every transaction, optionally narrowed by status.
    pub fn admin_list_transactions(
        &self,
        actor: &Actor,
        status: Option<TransactionStatus>,
    ) -> anyhow::Result<Vec<Transaction>> {
        if !actor.is_admin() {
            return Err(AccessError::AdminOnly.into());
        }
        let mut transactions: Vec<Transaction> = EntityStore::scan(&self.store.transactions)?
            .into_iter()
            .filter(|t: &Transaction| status.is_none_or(|s| t.status == s))
            .collect();
        transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(transactions)
    }

    // DISPUTES

    /// Raise a dispute on a transaction the actor takes part in.
    pub fn raise_dispute(
        &self,
        actor: &Actor,
        transaction_id: &str,
        reason: &str,
    ) -> anyhow::Result<Dispute> {
        let transaction: Transaction =
            EntityStore::get(&self.store.transactions, transaction_id)?
                .ok_or(AccessError::NotFound("transaction"))?;
        if transaction.vendor != actor.id && transaction.consumer != actor.id {
            return Err(AccessError::NotFound("transaction").into());
        }
        if reason.trim().is_empty() {
            return Err(ValidationError::MissingField("reason").into());
        }

        let dispute = Dispute {
            id: ids::mint(ids::DISPUTE)?,
            transaction: transaction.id.clone(),
            raised_by: actor.id.clone(),
            reason: reason.to_owned(),
            status: DisputeStatus::Open,
            created_at: TimeStamp::now(),
            resolved_at: None,
            resolved_by: None,
            resolution_notes: None,
        };
        EntityStore::put(&self.store.disputes, &dispute.id, &dispute)?;

        tracing::info!(dispute = %dispute.id, transaction = %dispute.transaction, "dispute raised");
        Ok(dispute)
    }

    fn linked_transaction(&self, dispute: &Dispute) -> anyhow::Result<Option<Transaction>> {
        EntityStore::get(&self.store.transactions, &dispute.transaction)
    }

    pub fn list_disputes(&self, actor: &Actor) -> anyhow::Result<Vec<Dispute>> {
        let mut disputes = Vec::new();
        for dispute in EntityStore::scan::<Dispute>(&self.store.disputes)? {
            let linked = self.linked_transaction(&dispute)?;
            if dispute.visible_to(actor, &linked) {
                disputes.push(dispute);
            }
        }
        disputes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(disputes)
    }

    pub fn get_dispute(&self, actor: &Actor, id: &str) -> anyhow::Result<Dispute> {
        let dispute: Dispute = EntityStore::get(&self.store.disputes, id)?
            .ok_or(AccessError::NotFound("dispute"))?;
        let linked = self.linked_transaction(&dispute)?;
        if !dispute.visible_to(actor, &linked) {
            return Err(AccessError::NotFound("dispute").into());
        }
        Ok(dispute)
    }

    /// Admin view of every dispute, optionally narrowed by status.
    pub fn admin_list_disputes(
        &self,
        actor: &Actor,
        status: Option<DisputeStatus>,
    ) -> anyhow::Result<Vec<Dispute>> {
        if !actor.is_admin() {
            return Err(AccessError::AdminOnly.into());
        }
        let mut disputes: Vec<Dispute> = EntityStore::scan(&self.store.disputes)?
            .into_iter()
            .filter(|d: &Dispute| status.is_none_or(|s| d.status == s))
            .collect();
        disputes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(disputes)
    }

    /// Admin-only terminal transition. Stamps the resolver and the resolution
    /// instant exactly once; a second attempt fails on the transition table.
    pub fn resolve_dispute(
        &self,
        actor: &Actor,
        id: &str,
        target: DisputeStatus,
        resolution_notes: Option<String>,
    ) -> anyhow::Result<Dispute> {
        if !actor.is_admin() {
            return Err(AccessError::NotFound("dispute").into());
        }
        let mut dispute: Dispute = EntityStore::get(&self.store.disputes, id)?
            .ok_or(AccessError::NotFound("dispute"))?;
        ensure_transition(dispute.status, target)?;

        dispute.status = target;
        dispute.resolved_by = Some(actor.id.clone());
        dispute.resolved_at = Some(TimeStamp::now());
        dispute.resolution_notes = resolution_notes;
        EntityStore::put(&self.store.disputes, &dispute.id, &dispute)?;

        tracing::info!(dispute = %dispute.id, status = target.as_str(), "dispute resolved");
        Ok(dispute)
    }

    pub fn dispute_stats(&self, actor: &Actor) -> anyhow::Result<DisputeStats> {
        let mut raised = Vec::new();
        let mut involving = Vec::new();
        for dispute in EntityStore::scan::<Dispute>(&self.store.disputes)? {
            if dispute.raised_by == actor.id {
                raised.push(dispute.status);
            }
            if let Some(txn) = self.linked_transaction(&dispute)?
                && (txn.vendor == actor.id || txn.consumer == actor.id)
            {
                involving.push(dispute.status);
            }
        }
        Ok(DisputeStats {
            raised_by_me: DisputeCounts::tally(raised),
            involving_me: DisputeCounts::tally(involving),
        })
    }

    // DONATION REQUESTS

    /// Request a donation from a listing. One request per (listing, requester)
    /// pair; the pair is claimed atomically so a duplicate is a conflict even
    /// under concurrent submissions.
    pub fn request_donation(
        &self,
        actor: &Actor,
        listing_id: &str,
        message: Option<String>,
    ) -> anyhow::Result<DonationRequest> {
        let listing: Listing = EntityStore::get(&self.store.listings, listing_id)?
            .ok_or(AccessError::NotFound("listing"))?;

        let id = ids::mint(ids::DONATION_REQUEST)?;
        let pair = EntityStore::pair_key(&listing.id, &actor.id);
        if !EntityStore::claim(&self.store.donation_pairs, &pair, &id)? {
            return Err(AccessError::Conflict("donation request").into());
        }

        let now = TimeStamp::now();
        let request = DonationRequest {
            id,
            listing: listing.id.clone(),
            requester: actor.id.clone(),
            message,
            status: RequestStatus::Pending,
            created_at: now.clone(),
            updated_at: now,
        };
        EntityStore::put(&self.store.donation_requests, &request.id, &request)?;

        tracing::debug!(request = %request.id, listing = %request.listing, "donation requested");
        Ok(request)
    }

    pub fn my_donation_requests(&self, actor: &Actor) -> anyhow::Result<Vec<DonationRequest>> {
        let mut requests: Vec<DonationRequest> =
            EntityStore::scan(&self.store.donation_requests)?
                .into_iter()
                .filter(|r: &DonationRequest| r.requester == actor.id)
                .collect();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(requests)
    }

    /// Requests received against any of the actor's listings.
    pub fn received_donation_requests(
        &self,
        actor: &Actor,
    ) -> anyhow::Result<Vec<DonationRequest>> {
        let mut requests = Vec::new();
        for request in EntityStore::scan::<DonationRequest>(&self.store.donation_requests)? {
            let listing: Option<Listing> =
                EntityStore::get(&self.store.listings, &request.listing)?;
            if listing.is_some_and(|l| l.owner == actor.id) {
                requests.push(request);
            }
        }
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(requests)
    }

    pub fn get_donation_request(
        &self,
        actor: &Actor,
        id: &str,
    ) -> anyhow::Result<DonationRequest> {
        let request: DonationRequest = EntityStore::get(&self.store.donation_requests, id)?
            .ok_or(AccessError::NotFound("donation request"))?;
        let listing: Option<Listing> = EntityStore::get(&self.store.listings, &request.listing)?;
        if !request.visible_to(actor, &listing) {
            return Err(AccessError::NotFound("donation request").into());
        }
        Ok(request)
    }

    /// Accept or reject a pending request. Only the listing owner may answer;
    /// anyone else sees "not found".
    pub fn respond_to_donation_request(
        &self,
        actor: &Actor,
        id: &str,
        target: RequestStatus,
    ) -> anyhow::Result<DonationRequest> {
        let mut request: DonationRequest = EntityStore::get(&self.store.donation_requests, id)?
            .ok_or(AccessError::NotFound("donation request"))?;
        let listing: Option<Listing> = EntityStore::get(&self.store.listings, &request.listing)?;
        if !listing.is_some_and(|l| l.owner == actor.id) {
            return Err(AccessError::NotFound("donation request").into());
        }
        ensure_transition(request.status, target)?;

        request.status = target;
        request.updated_at = TimeStamp::now();
        EntityStore::put(&self.store.donation_requests, &request.id, &request)?;

        tracing::info!(request = %request.id, status = target.as_str(), "donation request answered");
        Ok(request)
    }

    /// Public: accepted requests for one listing.
    pub fn accepted_donation_requests(
        &self,
        listing_id: &str,
    ) -> anyhow::Result<Vec<DonationRequest>> {
        let mut requests: Vec<DonationRequest> =
            EntityStore::scan(&self.store.donation_requests)?
                .into_iter()
                .filter(|r: &DonationRequest| {
                    r.listing == listing_id && r.status == RequestStatus::Accepted
                })
                .collect();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(requests)
    }

    pub fn donation_stats(&self, actor: &Actor) -> anyhow::Result<DonationStats> {
        let mut made = Vec::new();
        let mut received = Vec::new();
        for request in EntityStore::scan::<DonationRequest>(&self.store.donation_requests)? {
            if request.requester == actor.id {
                made.push(request.status);
            }
            let listing: Option<Listing> =
                EntityStore::get(&self.store.listings, &request.listing)?;
            if listing.is_some_and(|l| l.owner == actor.id) {
                received.push(request.status);
            }
        }
        Ok(DonationStats {
            requests_made: RequestCounts::tally(made),
            requests_received: RequestCounts::tally(received),
        })
    }

    // REVIEWS

    /// Leave a review for another user. One review per (reviewer, reviewed)
    /// pair; reviewing yourself is rejected outright.
    pub fn submit_review(
        &self,
        actor: &Actor,
        reviewed: &str,
        rating: Rating,
        comment: Option<String>,
    ) -> anyhow::Result<Review> {
        if reviewed == actor.id {
            return Err(ValidationError::SelfReview.into());
        }
        if self.load_user(reviewed)?.is_none() {
            return Err(AccessError::NotFound("user").into());
        }

        let id = ids::mint(ids::REVIEW)?;
        let pair = EntityStore::pair_key(&actor.id, reviewed);
        if !EntityStore::claim(&self.store.review_pairs, &pair, &id)? {
            return Err(AccessError::Conflict("review").into());
        }

        let review = Review {
            id,
            reviewer: actor.id.clone(),
            reviewed: reviewed.to_owned(),
            rating,
            comment,
            created_at: TimeStamp::now(),
        };
        EntityStore::put(&self.store.reviews, &review.id, &review)?;

        tracing::debug!(review = %review.id, reviewed = %review.reviewed, "review submitted");
        Ok(review)
    }

    /// Reviews the actor has written.
    pub fn my_reviews(&self, actor: &Actor) -> anyhow::Result<Vec<Review>> {
        let mut reviews: Vec<Review> = EntityStore::scan(&self.store.reviews)?
            .into_iter()
            .filter(|r: &Review| r.reviewer == actor.id)
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reviews)
    }

    pub fn my_reviews_received(&self, actor: &Actor) -> anyhow::Result<Vec<Review>> {
        self.reviews_received(&actor.id)
    }

    /// Public: reviews received by any user.
    pub fn reviews_received(&self, user_id: &str) -> anyhow::Result<Vec<Review>> {
        let mut reviews: Vec<Review> = EntityStore::scan(&self.store.reviews)?
            .into_iter()
            .filter(|r: &Review| r.reviewed == user_id)
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reviews)
    }

    fn authored_review(&self, actor: &Actor, id: &str) -> anyhow::Result<Review> {
        let review: Review = EntityStore::get(&self.store.reviews, id)?
            .ok_or(AccessError::NotFound("review"))?;
        if review.reviewer != actor.id {
            return Err(AccessError::NotFound("review").into());
        }
        Ok(review)
    }

    pub fn update_review(
        &self,
        actor: &Actor,
        id: &str,
        rating: Rating,
        comment: Option<String>,
    ) -> anyhow::Result<Review> {
        let mut review = self.authored_review(actor, id)?;
        review.rating = rating;
        review.comment = comment;
        EntityStore::put(&self.store.reviews, &review.id, &review)?;
        Ok(review)
    }

    /// Delete an authored review and free the pair, so the author may review
    /// the same user again later.
    pub fn delete_review(&self, actor: &Actor, id: &str) -> anyhow::Result<()> {
        let review = self.authored_review(actor, id)?;
        let pair = EntityStore::pair_key(&review.reviewer, &review.reviewed);
        EntityStore::remove(&self.store.reviews, &review.id)?;
        EntityStore::release(&self.store.review_pairs, &pair)?;
        Ok(())
    }

    /// Public rating aggregate for a user; zero reviews reports average 0 and
    /// an all-zero distribution.
    pub fn rating_stats(&self, user_id: &str) -> anyhow::Result<RatingStats> {
        let ratings: Vec<Rating> = EntityStore::scan::<Review>(&self.store.reviews)?
            .into_iter()
            .filter(|r| r.reviewed == user_id)
            .map(|r| r.rating)
            .collect();
        Ok(rating_stats(&ratings))
    }

    // KYC

    /// Submit identity documents. One submission per user; the document
    /// number+type pair is globally unique.
    pub fn submit_kyc(&self, actor: &Actor, draft: KycDraft) -> anyhow::Result<Kyc> {
        let id = ids::mint(ids::KYC)?;

        let doc_key = draft
            .document_key()
            .map(|(doc, num)| EntityStore::pair_key(doc.as_str(), num.trim()));
        if let Some(key) = &doc_key
            && !EntityStore::claim(&self.store.kyc_docs, key, &id)?
        {
            return Err(AccessError::Conflict("kyc document").into());
        }
        if !EntityStore::claim(&self.store.kyc_by_user, actor.id.as_bytes(), &id)? {
            if let Some(key) = &doc_key {
                EntityStore::release(&self.store.kyc_docs, key)?;
            }
            return Err(AccessError::Conflict("kyc").into());
        }

        let kyc = match draft.validate_and_build(id, actor.id.clone(), TimeStamp::now()) {
            Ok(kyc) => kyc,
            Err(err) => {
                // roll back the claims so a corrected resubmission can win them
                if let Some(key) = &doc_key {
                    EntityStore::release(&self.store.kyc_docs, key)?;
                }
                EntityStore::release(&self.store.kyc_by_user, actor.id.as_bytes())?;
                return Err(err.into());
            }
        };
        EntityStore::put(&self.store.kyc, &kyc.id, &kyc)?;

        tracing::debug!(kyc = %kyc.id, user = %kyc.user, "kyc submitted");
        Ok(kyc)
    }

    pub fn my_kyc(&self, actor: &Actor) -> anyhow::Result<Kyc> {
        let id = EntityStore::lookup(&self.store.kyc_by_user, actor.id.as_bytes())?
            .ok_or(AccessError::NotFound("kyc"))?;
        EntityStore::get(&self.store.kyc, &id)?
            .ok_or_else(|| AccessError::NotFound("kyc").into())
    }

    pub fn admin_list_kyc(
        &self,
        actor: &Actor,
        status: Option<KycStatus>,
    ) -> anyhow::Result<Vec<Kyc>> {
        if !actor.is_admin() {
            return Err(AccessError::AdminOnly.into());
        }
        let mut records: Vec<Kyc> = EntityStore::scan(&self.store.kyc)?
            .into_iter()
            .filter(|k: &Kyc| status.is_none_or(|s| k.kyc_status == s))
            .collect();
        records.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(records)
    }

    /// Admin approval or rejection. Approval stamps the verifier and the
    /// approval instant and derives `is_verified`; rejection requires a
    /// non-empty reason and never sets `verified_at`.
    pub fn review_kyc(
        &self,
        actor: &Actor,
        kyc_id: &str,
        target: KycStatus,
        rejection_reason: Option<String>,
    ) -> anyhow::Result<Kyc> {
        if !actor.is_admin() {
            return Err(AccessError::NotFound("kyc").into());
        }
        let mut kyc: Kyc =
            EntityStore::get(&self.store.kyc, kyc_id)?.ok_or(AccessError::NotFound("kyc"))?;
        ensure_transition(kyc.kyc_status, target)?;

        let approved = target == KycStatus::Approved;
        if !approved && rejection_reason.as_deref().is_none_or(|r| r.trim().is_empty()) {
            return Err(ValidationError::MissingRejectionReason.into());
        }

        kyc.kyc_status = target;
        kyc.is_verified = approved;
        kyc.verified_by = Some(actor.id.clone());
        kyc.verified_at = approved.then(TimeStamp::now);
        kyc.rejection_reason = if approved { None } else { rejection_reason };
        EntityStore::put(&self.store.kyc, &kyc.id, &kyc)?;

        // mirror the derived flag onto the account record
        if let Some(mut user) = self.load_user(&kyc.user)? {
            user.is_verified = approved;
            EntityStore::put(&self.store.users, &user.id, &user)?;
        }

        tracing::info!(kyc = %kyc.id, status = target.as_str(), "kyc reviewed");
        Ok(kyc)
    }

    /// Public verification state for any user.
    pub fn kyc_public_status(&self, user_id: &str) -> anyhow::Result<KycPublicStatus> {
        let id = EntityStore::lookup(&self.store.kyc_by_user, user_id.as_bytes())?
            .ok_or(AccessError::NotFound("kyc"))?;
        let kyc: Kyc =
            EntityStore::get(&self.store.kyc, &id)?.ok_or(AccessError::NotFound("kyc"))?;
        Ok(KycPublicStatus {
            user: kyc.user,
            is_verified: kyc.is_verified,
            kyc_status: kyc.kyc_status,
            verified_at: kyc.verified_at,
        })
    }
}
