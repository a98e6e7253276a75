//! Company note domain model.

use serde::{Deserialize, Serialize};

/// A free-text note about one company, one per (user, company) pair.
///
/// Notes are created implicitly on first save and never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyNote {
    /// The company this note is keyed by.
    pub company_name: String,
    /// Note body.
    pub content: String,
    /// Store-assigned save timestamp, RFC3339, refreshed on every save.
    pub updated_at: String,
}
