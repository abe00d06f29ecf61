//! Authorization-scoped visibility.
//!
//! A single capability evaluated per (actor, entity): each resource declares
//! which related records its predicate needs via `Linked`, and the service
//! loads those fresh on every call. Nothing here is cached; visibility always
//! reflects live ownership state. Admins bypass ownership filters.

use crate::actor::Actor;
use crate::model::{DonationRequest, Dispute, Listing, Transaction};

pub trait Visibility {
    /// Related records required to evaluate the predicate. `Option` where the
    /// referenced row may no longer exist (e.g. a deleted listing).
    type Linked;

    fn visible_to(&self, actor: &Actor, linked: &Self::Linked) -> bool;
}

impl Visibility for Transaction {
    type Linked = ();

    fn visible_to(&self, actor: &Actor, _: &()) -> bool {
        actor.is_admin() || self.vendor == actor.id || self.consumer == actor.id
    }
}

impl Visibility for Dispute {
    type Linked = Option<Transaction>;

    fn visible_to(&self, actor: &Actor, transaction: &Option<Transaction>) -> bool {
        if actor.is_admin() || self.raised_by == actor.id {
            return true;
        }
        match transaction {
            Some(txn) => txn.vendor == actor.id || txn.consumer == actor.id,
            None => false,
        }
    }
}

impl Visibility for DonationRequest {
    type Linked = Option<Listing>;

    fn visible_to(&self, actor: &Actor, listing: &Option<Listing>) -> bool {
        if actor.is_admin() || self.requester == actor.id {
            return true;
        }
        match listing {
            Some(listing) => listing.owner == actor.id,
            None => false,
        }
    }
}
