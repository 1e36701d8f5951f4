use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use time::Date;

use crate::recipe::Recipe;

#[derive(
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    /// Order of meals within a day.
    pub fn rank(self) -> u8 {
        match self {
            MealType::Breakfast => 0,
            MealType::Lunch => 1,
            MealType::Dinner => 2,
        }
    }
}

/// Calendar position of a scheduled meal. Date and meal type always travel
/// together.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MealSlot {
    #[serde(with = "crate::iso_date")]
    pub date: Date,
    pub meal_type: MealType,
}

impl MealSlot {
    pub fn new(date: Date, meal_type: MealType) -> Self {
        Self { date, meal_type }
    }
}

/// A recipe saved by the user, either as a reusable template (no slot) or
/// bound to a calendar slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MealRecord", into = "MealRecord")]
pub struct Meal {
    pub id: u64,
    pub recipe: Recipe,
    pub slot: Option<MealSlot>,
    pub user: String,
}

impl Meal {
    pub fn template(id: u64, recipe: Recipe, user: impl Into<String>) -> Self {
        Self {
            id,
            recipe,
            slot: None,
            user: user.into(),
        }
    }

    pub fn scheduled(id: u64, recipe: Recipe, slot: MealSlot, user: impl Into<String>) -> Self {
        Self {
            id,
            recipe,
            slot: Some(slot),
            user: user.into(),
        }
    }

    pub fn is_template(&self) -> bool {
        self.slot.is_none()
    }

    pub fn date(&self) -> Option<Date> {
        self.slot.map(|s| s.date)
    }

    pub fn meal_type(&self) -> Option<MealType> {
        self.slot.map(|s| s.meal_type)
    }
}

/// Wire shape of a meal, with date and meal type as separate nullable fields.
#[derive(Serialize, Deserialize)]
struct MealRecord {
    id: u64,
    recipe: Recipe,
    #[serde(default, with = "crate::iso_date::option")]
    date: Option<Date>,
    #[serde(default)]
    meal_type: Option<MealType>,
    #[serde(default)]
    user: String,
}

impl TryFrom<MealRecord> for Meal {
    type Error = crate::Error;

    fn try_from(record: MealRecord) -> Result<Self, Self::Error> {
        let slot = match (record.date, record.meal_type) {
            (Some(date), Some(meal_type)) => Some(MealSlot { date, meal_type }),
            (None, None) => None,
            _ => {
                return Err(crate::Error::InvalidAssignment(format!(
                    "meal {} has only one of date and meal type",
                    record.id
                )));
            }
        };

        Ok(Meal {
            id: record.id,
            recipe: record.recipe,
            slot,
            user: record.user,
        })
    }
}

impl From<Meal> for MealRecord {
    fn from(meal: Meal) -> Self {
        MealRecord {
            id: meal.id,
            recipe: meal.recipe,
            date: meal.slot.map(|s| s.date),
            meal_type: meal.slot.map(|s| s.meal_type),
            user: meal.user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_meal_type_parsing_and_rank() {
        assert_eq!(MealType::from_str("Dinner").unwrap(), MealType::Dinner);
        assert_eq!(MealType::from_str("lunch").unwrap(), MealType::Lunch);
        assert!(MealType::from_str("brunch").is_err());
        assert_eq!(MealType::Breakfast.to_string(), "breakfast");
        assert!(MealType::Breakfast.rank() < MealType::Lunch.rank());
        assert!(MealType::Lunch < MealType::Dinner);
    }

    #[test]
    fn test_meal_wire_format() {
        let template: Meal = serde_json::from_str(
            r#"{"id": 1, "recipe": {"id": 3, "name": "Soup"}, "date": null, "meal_type": null, "user": "me"}"#,
        )
        .unwrap();
        assert!(template.is_template());

        let scheduled: Meal = serde_json::from_str(
            r#"{"id": 2, "recipe": {"id": 3, "name": "Soup"}, "date": "2024-03-05", "meal_type": "dinner"}"#,
        )
        .unwrap();
        assert_eq!(scheduled.meal_type(), Some(MealType::Dinner));
        assert_eq!(scheduled.date(), Some(time::macros::date!(2024 - 03 - 05)));

        let json = serde_json::to_value(&scheduled).unwrap();
        assert_eq!(json["date"], "2024-03-05");
        assert_eq!(json["meal_type"], "dinner");
    }

    #[test]
    fn test_half_scheduled_meal_is_rejected() {
        let result = serde_json::from_str::<Meal>(
            r#"{"id": 1, "recipe": {"id": 3, "name": "Soup"}, "date": "2024-03-05"}"#,
        );
        assert!(result.is_err());

        let result = serde_json::from_str::<Meal>(
            r#"{"id": 1, "recipe": {"id": 3, "name": "Soup"}, "meal_type": "lunch"}"#,
        );
        assert!(result.is_err());
    }
}
