use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use time::{Date, Duration, Month, OffsetDateTime};

#[derive(
    EnumString,
    Display,
    AsRefStr,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    /// Days between the first day of the week and `date`.
    pub fn offset(self, date: Date) -> u8 {
        match self {
            WeekStart::Sunday => date.weekday().number_days_from_sunday(),
            WeekStart::Monday => date.weekday().number_days_from_monday(),
        }
    }
}

#[derive(
    EnumString, Display, AsRefStr, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    #[default]
    Week,
    Month,
}

/// The 7 dates of the week containing `anchor`.
pub fn week_of(anchor: Date, week_start: WeekStart) -> [Date; 7] {
    let first = anchor - Duration::days(week_start.offset(anchor).into());

    std::array::from_fn(|i| first + Duration::days(i as i64))
}

pub fn first_of_month(date: Date) -> Date {
    date - Duration::days(i64::from(date.day()) - 1)
}

pub fn days_in_month(date: Date) -> u8 {
    (29..=31)
        .rev()
        .find(|day| date.replace_day(*day).is_ok())
        .unwrap_or(28)
}

/// Month grid cells: `None` for the weekdays before the 1st, then every day
/// of the month.
pub fn month_grid(anchor: Date, week_start: WeekStart) -> Vec<Option<u8>> {
    let leading = week_start.offset(first_of_month(anchor));

    std::iter::repeat_n(None, leading.into())
        .chain((1..=days_in_month(anchor)).map(Some))
        .collect()
}

/// Moves `date` by `months`, clamping the day to the target month length.
pub fn add_months(date: Date, months: i32) -> Option<Date> {
    let index = date.year() * 12 + i32::from(u8::from(date.month())) - 1 + months;
    let year = index.div_euclid(12);
    let month = Month::try_from(u8::try_from(index.rem_euclid(12) + 1).ok()?).ok()?;

    let first = Date::from_calendar_date(year, month, 1).ok()?;
    let day = date.day().min(days_in_month(first));

    first.replace_day(day).ok()
}

/// Calendar navigation state. Moving around never touches meal records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Calendar {
    view: CalendarView,
    anchor: Date,
    week_start: WeekStart,
}

impl Calendar {
    pub fn new(view: CalendarView, anchor: Date, week_start: WeekStart) -> Self {
        Self {
            view,
            anchor,
            week_start,
        }
    }

    pub fn today_utc() -> Date {
        OffsetDateTime::now_utc().date()
    }

    pub fn view(&self) -> CalendarView {
        self.view
    }

    pub fn set_view(&mut self, view: CalendarView) {
        self.view = view;
    }

    pub fn anchor(&self) -> Date {
        self.anchor
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    pub fn previous(&mut self) -> Date {
        self.shift(-1)
    }

    pub fn next(&mut self) -> Date {
        self.shift(1)
    }

    pub fn today(&mut self, today: Date) -> Date {
        self.anchor = today;
        self.anchor
    }

    fn shift(&mut self, step: i32) -> Date {
        let moved = match self.view {
            CalendarView::Week => self.anchor.checked_add(Duration::weeks(step.into())),
            CalendarView::Month => add_months(self.anchor, step),
        };

        if let Some(anchor) = moved {
            self.anchor = anchor;
        }

        self.anchor
    }

    pub fn week(&self) -> [Date; 7] {
        week_of(self.anchor, self.week_start)
    }

    pub fn month_grid(&self) -> Vec<Option<u8>> {
        month_grid(self.anchor, self.week_start)
    }

    /// Every date visible in the current view.
    pub fn visible_dates(&self) -> Vec<Date> {
        match self.view {
            CalendarView::Week => self.week().to_vec(),
            CalendarView::Month => {
                let first = first_of_month(self.anchor);
                (0..days_in_month(self.anchor))
                    .map(|d| first + Duration::days(d.into()))
                    .collect()
            }
        }
    }

    pub fn title(&self) -> String {
        match self.view {
            CalendarView::Week => {
                let week = self.week();
                format!(
                    "{} - {}",
                    larder_shared::format_date(week[0]),
                    larder_shared::format_date(week[6])
                )
            }
            CalendarView::Month => format!("{} {}", self.anchor.month(), self.anchor.year()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_week_of_sunday_start() {
        let week = week_of(date!(2024 - 03 - 05), WeekStart::Sunday);
        assert_eq!(week[0], date!(2024 - 03 - 03));
        assert_eq!(week[6], date!(2024 - 03 - 09));

        let week = week_of(date!(2024 - 03 - 03), WeekStart::Sunday);
        assert_eq!(week[0], date!(2024 - 03 - 03));
    }

    #[test]
    fn test_week_of_monday_start() {
        let week = week_of(date!(2024 - 03 - 03), WeekStart::Monday);
        assert_eq!(week[0], date!(2024 - 02 - 26));
        assert_eq!(week[6], date!(2024 - 03 - 03));
    }

    #[test]
    fn test_month_grid() {
        // March 2024 starts on a Friday.
        let grid = month_grid(date!(2024 - 03 - 17), WeekStart::Sunday);
        assert_eq!(grid.len(), 5 + 31);
        assert!(grid[..5].iter().all(Option::is_none));
        assert_eq!(grid[5], Some(1));
        assert_eq!(grid.last(), Some(&Some(31)));

        let grid = month_grid(date!(2024 - 03 - 17), WeekStart::Monday);
        assert_eq!(grid.iter().take_while(|c| c.is_none()).count(), 4);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(date!(2024 - 02 - 10)), 29);
        assert_eq!(days_in_month(date!(2023 - 02 - 10)), 28);
        assert_eq!(days_in_month(date!(2024 - 04 - 30)), 30);
        assert_eq!(days_in_month(date!(2024 - 12 - 01)), 31);
    }

    #[test]
    fn test_month_navigation_clamps_day() {
        let mut calendar = Calendar::new(
            CalendarView::Month,
            date!(2024 - 01 - 31),
            WeekStart::Sunday,
        );

        assert_eq!(calendar.next(), date!(2024 - 02 - 29));
        assert_eq!(calendar.previous(), date!(2024 - 01 - 29));
        assert_eq!(add_months(date!(2024 - 12 - 15), 1), Some(date!(2025 - 01 - 15)));
        assert_eq!(add_months(date!(2024 - 01 - 15), -1), Some(date!(2023 - 12 - 15)));
    }

    #[test]
    fn test_week_navigation() {
        let mut calendar = Calendar::new(
            CalendarView::Week,
            date!(2024 - 03 - 05),
            WeekStart::Sunday,
        );

        assert_eq!(calendar.next(), date!(2024 - 03 - 12));
        assert_eq!(calendar.previous(), date!(2024 - 03 - 05));
        assert_eq!(calendar.today(date!(2024 - 06 - 01)), date!(2024 - 06 - 01));
        assert_eq!(calendar.title(), "2024-05-26 - 2024-06-01");

        calendar.set_view(CalendarView::Month);
        assert_eq!(calendar.title(), "June 2024");
        assert_eq!(calendar.visible_dates().len(), 30);
    }
}
