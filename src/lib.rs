//! peershare: workflow core for a peer-to-peer rental and donation marketplace.
//!
//! Users list products, services or donations; other users request rentals or
//! donations; reviews, disputes and KYC verification provide the trust
//! mechanics. The crate covers three cooperating pieces: the durable entity
//! store ([`store`]), the authorization-scoped query layer ([`auth`]) and the
//! status-transition workflow ([`service`]). Presentation, identity-provider
//! and payment-gateway concerns live outside this crate.

pub mod actor;
pub mod auth;
pub mod error;
pub mod ids;
pub mod model;
pub mod service;
pub mod stats;
pub mod store;
