use serde::{Deserialize, Serialize};

/// Allergen declared on the user profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allergen {
    pub id: u64,
    pub name: String,
}
