use chrono::Utc;

use super::TimeStamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, minicbor::Encode, minicbor::Decode)]
pub enum Role {
    #[n(0)]
    Member,
    #[n(1)]
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, minicbor::Encode, minicbor::Decode)]
pub struct User {
    #[n(0)]
    pub id: String, // uuid7, bech32 under "user_"
    #[n(1)]
    pub email: String,
    #[n(2)]
    pub full_name: String,
    #[n(3)]
    pub role: Role,
    #[n(4)]
    pub is_verified: bool,
    #[n(5)]
    pub is_active: bool,
    #[n(6)]
    pub created_at: TimeStamp<Utc>,
}
