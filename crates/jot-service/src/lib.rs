//! The jot service layer: credential checking and the single logical "note"
//! abstraction over the relational store and the blob store.
//!
//! [`NoteService`] is generic over any [`jot_core::store::NoteStore`]
//! backend; the UI collaborator calls only this crate.

pub mod credentials;
pub mod error;
pub mod service;

pub use credentials::CredentialStore;
pub use error::{Error, Result};
pub use service::NoteService;
