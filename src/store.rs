//! Sled-backed entity store.
//!
//! One named tree per entity type, records encoded with minicbor. Composite
//! uniqueness (donation pairs, review pairs, KYC documents, emails) lives in
//! index trees keyed by a sha256 digest of the composite key; a claim is a
//! compare-and-swap from vacant, so two concurrent creates cannot both win.

use sled::{Db, Tree};
use std::sync::Arc;

pub struct EntityStore {
    pub users: Tree,
    pub listings: Tree,
    pub transactions: Tree,
    pub disputes: Tree,
    pub donation_requests: Tree,
    pub reviews: Tree,
    pub kyc: Tree,

    // uniqueness / lookup indexes
    pub user_emails: Tree,
    pub donation_pairs: Tree,
    pub review_pairs: Tree,
    pub kyc_by_user: Tree,
    pub kyc_docs: Tree,
}

impl EntityStore {
    pub fn open(db: Arc<Db>) -> anyhow::Result<Self> {
        Ok(Self {
            users: db.open_tree("users")?,
            listings: db.open_tree("listings")?,
            transactions: db.open_tree("transactions")?,
            disputes: db.open_tree("disputes")?,
            donation_requests: db.open_tree("donation_requests")?,
            reviews: db.open_tree("reviews")?,
            kyc: db.open_tree("kyc")?,
            user_emails: db.open_tree("idx_user_emails")?,
            donation_pairs: db.open_tree("idx_donation_pairs")?,
            review_pairs: db.open_tree("idx_review_pairs")?,
            kyc_by_user: db.open_tree("idx_kyc_by_user")?,
            kyc_docs: db.open_tree("idx_kyc_docs")?,
        })
    }

    pub fn put<T: minicbor::Encode<()>>(tree: &Tree, id: &str, record: &T) -> anyhow::Result<()> {
        tree.insert(id.as_bytes(), minicbor::to_vec(record)?)?;
        Ok(())
    }

    pub fn get<T: for<'b> minicbor::Decode<'b, ()>>(
        tree: &Tree,
        id: &str,
    ) -> anyhow::Result<Option<T>> {
        match tree.get(id.as_bytes())? {
            Some(bytes) => Ok(Some(minicbor::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn remove(tree: &Tree, id: &str) -> anyhow::Result<()> {
        tree.remove(id.as_bytes())?;
        Ok(())
    }

    /// Decode every record in a tree. Visibility filtering happens above; the
    /// store itself has no notion of actors.
    pub fn scan<T: for<'b> minicbor::Decode<'b, ()>>(tree: &Tree) -> anyhow::Result<Vec<T>> {
        let mut records = Vec::new();
        for entry in tree.iter() {
            let (_, bytes) = entry?;
            records.push(minicbor::decode(&bytes)?);
        }
        Ok(records)
    }

    /// Atomically claim a uniqueness key for `id`. Returns false when another
    /// record already holds the key.
    pub fn claim(index: &Tree, key: &[u8], id: &str) -> anyhow::Result<bool> {
        let outcome = index.compare_and_swap(key, None as Option<&[u8]>, Some(id.as_bytes()))?;
        Ok(outcome.is_ok())
    }

    pub fn release(index: &Tree, key: &[u8]) -> anyhow::Result<()> {
        index.remove(key)?;
        Ok(())
    }

    /// Id currently holding an index key, if any.
    pub fn lookup(index: &Tree, key: &[u8]) -> anyhow::Result<Option<String>> {
        match index.get(key)? {
            Some(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            None => Ok(None),
        }
    }

    /// Digest for a two-part composite key. The separator keeps ("ab", "c")
    /// distinct from ("a", "bc").
    pub fn pair_key(a: &str, b: &str) -> Vec<u8> {
        sha256::digest(format!("{a}|{b}")).into_bytes()
    }
}
