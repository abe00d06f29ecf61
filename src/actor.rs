//! Authenticated caller identity.
//!
//! The identity provider sits outside this crate; every workflow call takes an
//! explicit [`Actor`] rather than reading any ambient "current user" state.

use crate::model::{Role, User};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: String,
    pub role: Role,
    pub is_verified: bool,
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Actor {
            id: user.id.clone(),
            role: user.role,
            is_verified: user.is_verified,
        }
    }
}
