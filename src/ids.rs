//! Identifier minting for entity records.
//!
//! Every record gets a fresh uuid7, rendered as a bech32m string under a
//! per-entity human-readable prefix so ids are self-describing in logs and
//! storage dumps.

use bech32::Bech32m;
use uuid7::uuid7;

pub const USER: &str = "user_";
pub const LISTING: &str = "lst_";
pub const TRANSACTION: &str = "txn_";
pub const DISPUTE: &str = "dsp_";
pub const DONATION_REQUEST: &str = "don_";
pub const REVIEW: &str = "rev_";
pub const KYC: &str = "kyc_";

/// Mint a unique id: uuid7 encoded as bech32m under the given prefix.
pub fn mint(hrp: &str) -> anyhow::Result<String> {
    let hrp = bech32::Hrp::parse(hrp)?;
    let encoded = bech32::encode::<Bech32m>(hrp, uuid7().as_bytes())?;
    Ok(encoded)
}
