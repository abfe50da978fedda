//! User — the thin identity row that owns notes.
//!
//! A user holds only its surrogate key and name. The password never appears
//! here; it lives (hashed) in the credential store.

use serde::{Deserialize, Serialize};

/// Surrogate key assigned by the store on insert.
pub type UserId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub user_id:   UserId,
  pub user_name: String,
}
