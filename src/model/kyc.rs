//! Identity verification records, one per user.

use chrono::Utc;

use super::{StatusTable, TimeStamp};
use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, minicbor::Encode, minicbor::Decode)]
pub enum DocumentType {
    #[n(0)]
    License,
    #[n(1)]
    Passport,
    #[n(2)]
    NationalId,
    #[n(3)]
    VoterId,
    #[n(4)]
    PanCard,
    #[n(5)]
    Aadhaar,
    #[n(6)]
    Other,
}

impl DocumentType {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentType::License => "license",
            DocumentType::Passport => "passport",
            DocumentType::NationalId => "national_id",
            DocumentType::VoterId => "voter_id",
            DocumentType::PanCard => "pan_card",
            DocumentType::Aadhaar => "aadhaar",
            DocumentType::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, minicbor::Encode, minicbor::Decode)]
pub enum KycStatus {
    #[n(0)]
    Pending,
    #[n(1)]
    Approved,
    #[n(2)]
    Rejected,
    #[n(3)]
    UnderReview,
}

impl StatusTable for KycStatus {
    fn as_str(self) -> &'static str {
        match self {
            KycStatus::Pending => "pending",
            KycStatus::Approved => "approved",
            KycStatus::Rejected => "rejected",
            KycStatus::UnderReview => "under_review",
        }
    }

    fn allowed_targets(self) -> &'static [KycStatus] {
        match self {
            KycStatus::Pending => &[KycStatus::Approved, KycStatus::Rejected],
            KycStatus::UnderReview => &[KycStatus::Approved, KycStatus::Rejected],
            KycStatus::Approved => &[],
            KycStatus::Rejected => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, minicbor::Encode, minicbor::Decode)]
pub struct Kyc {
    #[n(0)]
    pub id: String,
    #[n(1)]
    pub user: String, // one submission per user
    #[n(2)]
    pub gov_id_number: String, // unique per (gov_id_number, document_type)
    #[n(3)]
    pub document_type: DocumentType,
    #[n(4)]
    pub document_front: String,
    #[n(5)]
    pub document_back: Option<String>,
    #[n(6)]
    pub permanent_address: String,
    #[n(7)]
    pub temp_address: Option<String>,
    #[n(8)]
    pub is_verified: bool, // derived: true iff kyc_status == Approved
    #[n(9)]
    pub kyc_status: KycStatus,
    #[n(10)]
    pub submitted_at: TimeStamp<Utc>,
    #[n(11)]
    pub verified_at: Option<TimeStamp<Utc>>,
    #[n(12)]
    pub verified_by: Option<String>,
    #[n(13)]
    pub rejection_reason: Option<String>,
    // optional applicant profile, free-form and never validated here
    #[n(14)]
    pub date_of_birth: Option<TimeStamp<Utc>>,
    #[n(15)]
    pub nationality: Option<String>,
    #[n(16)]
    pub occupation: Option<String>,
    #[n(17)]
    pub annual_income: Option<u64>, // cents
    #[n(18)]
    pub emergency_contact_name: Option<String>,
    #[n(19)]
    pub emergency_contact_phone: Option<String>,
    #[n(20)]
    pub emergency_contact_relation: Option<String>,
}

/// Caller-supplied KYC fields; identity and verification fields are stamped by
/// the service on build.
#[derive(Debug, Default)]
pub struct KycDraft {
    gov_id_number: Option<String>,
    document_type: Option<DocumentType>,
    document_front: Option<String>,
    document_back: Option<String>,
    permanent_address: Option<String>,
    temp_address: Option<String>,
    date_of_birth: Option<TimeStamp<Utc>>,
    nationality: Option<String>,
    occupation: Option<String>,
    annual_income: Option<u64>,
    emergency_contact_name: Option<String>,
    emergency_contact_phone: Option<String>,
    emergency_contact_relation: Option<String>,
}

impl KycDraft {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn gov_id_number(mut self, number: &str) -> Self {
        self.gov_id_number = Some(number.to_owned());
        self
    }
    pub fn document_type(mut self, document_type: DocumentType) -> Self {
        self.document_type = Some(document_type);
        self
    }
    pub fn document_front(mut self, reference: &str) -> Self {
        self.document_front = Some(reference.to_owned());
        self
    }
    pub fn document_back(mut self, reference: &str) -> Self {
        self.document_back = Some(reference.to_owned());
        self
    }
    pub fn permanent_address(mut self, address: &str) -> Self {
        self.permanent_address = Some(address.to_owned());
        self
    }
    pub fn temp_address(mut self, address: &str) -> Self {
        self.temp_address = Some(address.to_owned());
        self
    }
    pub fn date_of_birth(mut self, date: TimeStamp<Utc>) -> Self {
        self.date_of_birth = Some(date);
        self
    }
    pub fn nationality(mut self, nationality: &str) -> Self {
        self.nationality = Some(nationality.to_owned());
        self
    }
    pub fn occupation(mut self, occupation: &str) -> Self {
        self.occupation = Some(occupation.to_owned());
        self
    }
    pub fn annual_income(mut self, cents: u64) -> Self {
        self.annual_income = Some(cents);
        self
    }
    pub fn emergency_contact(mut self, name: &str, phone: &str, relation: &str) -> Self {
        self.emergency_contact_name = Some(name.to_owned());
        self.emergency_contact_phone = Some(phone.to_owned());
        self.emergency_contact_relation = Some(relation.to_owned());
        self
    }

    pub fn document_key(&self) -> Option<(DocumentType, &str)> {
        match (&self.document_type, &self.gov_id_number) {
            (Some(doc), Some(num)) => Some((*doc, num.as_str())),
            _ => None,
        }
    }

    pub fn validate_and_build(
        self,
        id: String,
        user: String,
        submitted_at: TimeStamp<Utc>,
    ) -> Result<Kyc, ValidationError> {
        let gov_id_number = match self.gov_id_number {
            Some(n) if !n.trim().is_empty() => n,
            _ => return Err(ValidationError::MissingField("gov_id_number")),
        };
        let document_type = self
            .document_type
            .ok_or(ValidationError::MissingField("document_type"))?;
        let document_front = match self.document_front {
            Some(f) if !f.trim().is_empty() => f,
            _ => return Err(ValidationError::MissingField("document_front")),
        };
        let permanent_address = match self.permanent_address {
            Some(a) if !a.trim().is_empty() => a,
            _ => return Err(ValidationError::MissingField("permanent_address")),
        };

        Ok(Kyc {
            id,
            user,
            gov_id_number,
            document_type,
            document_front,
            document_back: self.document_back,
            permanent_address,
            temp_address: self.temp_address,
            is_verified: false,
            kyc_status: KycStatus::Pending,
            submitted_at,
            verified_at: None,
            verified_by: None,
            rejection_reason: None,
            date_of_birth: self.date_of_birth,
            nationality: self.nationality,
            occupation: self.occupation,
            annual_income: self.annual_income,
            emergency_contact_name: self.emergency_contact_name,
            emergency_contact_phone: self.emergency_contact_phone,
            emergency_contact_relation: self.emergency_contact_relation,
        })
    }
}

/// Public view of a user's verification state. Everything else on the record
/// stays private to the owner and admins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KycPublicStatus {
    pub user: String,
    pub is_verified: bool,
    pub kyc_status: KycStatus,
    pub verified_at: Option<TimeStamp<Utc>>,
}
