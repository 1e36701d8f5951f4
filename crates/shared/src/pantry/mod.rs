use serde::{Deserialize, Serialize};
use time::Date;
use validator::Validate;

/// Item held in the user's storage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PantryItem {
    pub id: u64,
    pub name: String,
    pub quantity: u32,
    #[serde(default, with = "crate::iso_date::option")]
    pub expiration_date: Option<Date>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl PantryItem {
    pub fn key(&self) -> String {
        crate::normalize_name(&self.name)
    }
}

#[derive(Validate, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewPantryItem {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 1))]
    pub quantity: u32,
    #[serde(with = "crate::iso_date::option")]
    pub expiration_date: Option<Date>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

impl NewPantryItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_owned(),
            quantity: 1,
            expiration_date: None,
            notes: None,
        }
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn expires(mut self, date: impl Into<Option<Date>>) -> Self {
        self.expiration_date = date.into();
        self
    }

    pub fn notes(mut self, notes: impl Into<Option<String>>) -> Self {
        self.notes = notes.into();
        self
    }
}
