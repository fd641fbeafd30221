//! Provider directory entries

use serde::{Deserialize, Serialize};

use super::types::ProviderId;

/// A provider from the provider report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    /// Provider identifier
    pub id: ProviderId,
    /// Short display name
    pub name: String,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Provider type (MD, NP, ...)
    pub provider_type: String,
}
