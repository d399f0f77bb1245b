//! Authentication-collaborator contract shared by taskdesk services.
//!
//! The gateway authenticates the caller and injects the account id as a
//! request header; services never see credentials or tokens. This crate
//! holds the extractor for that header.

pub mod identity;
