//! Listings: products and services offered for rent, or items for donation.

use chrono::Utc;

use super::TimeStamp;
use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, minicbor::Encode, minicbor::Decode)]
pub enum ListingType {
    #[n(0)]
    Product,
    #[n(1)]
    Service,
    #[n(2)]
    Donation,
}

impl ListingType {
    pub fn as_str(self) -> &'static str {
        match self {
            ListingType::Product => "product",
            ListingType::Service => "service",
            ListingType::Donation => "donation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, minicbor::Encode, minicbor::Decode)]
pub struct Listing {
    #[n(0)]
    pub id: String,
    #[n(1)]
    pub owner: String,
    #[n(2)]
    pub title: String,
    #[n(3)]
    pub description: String,
    #[n(4)]
    pub listing_type: ListingType,
    #[n(5)]
    pub price_per_day: Option<u64>, // integer cents; None for donations
    #[n(6)]
    pub location: Option<String>,
    #[n(7)]
    pub is_active: bool,
    #[n(8)]
    pub available_from: Option<TimeStamp<Utc>>,
    #[n(9)]
    pub available_to: Option<TimeStamp<Utc>>,
    #[n(10)]
    pub created_at: TimeStamp<Utc>,
}

/// Caller-supplied listing fields. On build we run validation checks and stamp
/// the ownership and identity fields the caller never controls.
#[derive(Debug, Default)]
pub struct ListingDraft {
    title: Option<String>,
    description: Option<String>,
    listing_type: Option<ListingType>,
    price_per_day: Option<u64>,
    location: Option<String>,
    available_from: Option<TimeStamp<Utc>>,
    available_to: Option<TimeStamp<Utc>>,
}

impl ListingDraft {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_owned());
        self
    }
    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_owned());
        self
    }
    pub fn listing_type(mut self, listing_type: ListingType) -> Self {
        self.listing_type = Some(listing_type);
        self
    }
    pub fn price_per_day(mut self, cents: u64) -> Self {
        self.price_per_day = Some(cents);
        self
    }
    pub fn location(mut self, location: &str) -> Self {
        self.location = Some(location.to_owned());
        self
    }
    pub fn available_from(mut self, from: TimeStamp<Utc>) -> Self {
        self.available_from = Some(from);
        self
    }
    pub fn available_to(mut self, to: TimeStamp<Utc>) -> Self {
        self.available_to = Some(to);
        self
    }

    /// Checks required fields and the availability window, then produces the
    /// record. `id`, `owner`, `is_active` and `created_at` are stamped by the
    /// service, never taken from the draft.
    pub fn validate_and_build(
        self,
        id: String,
        owner: String,
        is_active: bool,
        created_at: TimeStamp<Utc>,
    ) -> Result<Listing, ValidationError> {
        let title = match self.title {
            Some(t) if !t.trim().is_empty() => t,
            _ => return Err(ValidationError::MissingField("title")),
        };
        let listing_type = self
            .listing_type
            .ok_or(ValidationError::MissingField("listing_type"))?;

        if let (Some(from), Some(to)) = (&self.available_from, &self.available_to)
            && to < from
        {
            return Err(ValidationError::InvalidWindow);
        }

        Ok(Listing {
            id,
            owner,
            title,
            description: self.description.unwrap_or_default(),
            listing_type,
            price_per_day: self.price_per_day,
            location: self.location,
            is_active,
            available_from: self.available_from,
            available_to: self.available_to,
            created_at,
        })
    }
}
