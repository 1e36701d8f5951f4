use std::str::FromStr;

use larder_shared::{
    Result, invalid_assignment,
    mealplan::{MealSlot, MealType},
    parse_date,
};
use time::Date;

/// Parses the raw date and meal type of a calendar cell or form.
pub fn parse_assignment(date: &str, meal_type: &str) -> Result<MealSlot> {
    let Ok(parsed_date) = parse_date(date) else {
        invalid_assignment!("'{}' is not a valid date", date.trim());
    };

    let Ok(parsed_type) = MealType::from_str(meal_type.trim()) else {
        invalid_assignment!(
            "'{}' is not one of breakfast, lunch or dinner",
            meal_type.trim()
        );
    };

    Ok(MealSlot::new(parsed_date, parsed_type))
}

/// Request to bind a template to a calendar slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Assignment {
    pub template_id: u64,
    pub slot: MealSlot,
}

/// Drag of a template onto a calendar cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DragState {
    dragging: Option<u64>,
}

impl DragState {
    pub fn start(&mut self, template_id: u64) {
        self.dragging = Some(template_id);
    }

    pub fn dragging(&self) -> Option<u64> {
        self.dragging
    }

    pub fn cancel(&mut self) {
        self.dragging = None;
    }

    /// Ends the drag on the cell carrying `date` and `meal_type`.
    pub fn drop(&mut self, date: &str, meal_type: &str) -> Result<Assignment> {
        let Some(template_id) = self.dragging.take() else {
            invalid_assignment!("no meal is being dragged");
        };

        Ok(Assignment {
            template_id,
            slot: parse_assignment(date, meal_type)?,
        })
    }
}

/// Date and meal-type picker opened for one template.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssignmentForm {
    template_id: Option<u64>,
    pub date: String,
    pub meal_type: String,
}

impl AssignmentForm {
    pub fn open(template_id: u64, date: Date) -> Self {
        Self {
            template_id: Some(template_id),
            date: larder_shared::format_date(date),
            meal_type: MealType::Dinner.to_string(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.template_id.is_some()
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn submit(&mut self) -> Result<Assignment> {
        let Some(template_id) = self.template_id else {
            invalid_assignment!("no meal selected");
        };

        let slot = parse_assignment(&self.date, &self.meal_type)?;
        self.close();

        Ok(Assignment { template_id, slot })
    }
}
