use std::io::Write;

use larder_mealplan::{AssignmentForm, Calendar, CalendarView, MealScheduler, week_of};
use larder_shared::{Notice, format_date};
use time::Date;

use crate::{App, cli::MealsCommand};

async fn load_scheduler(app: &mut App) -> Option<MealScheduler> {
    let result = MealScheduler::load(app.provider.as_ref()).await;
    app.notices.report(result)
}

pub async fn calendar(
    app: &mut App,
    view: CalendarView,
    date: Option<Date>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let anchor = date.unwrap_or_else(Calendar::today_utc);
    let calendar = Calendar::new(view, anchor, app.config.calendar.week_start);
    let scheduler = load_scheduler(app).await.unwrap_or_default();

    writeln!(out, "{}", calendar.title())?;

    match calendar.view() {
        CalendarView::Week => {
            for (day, meals) in scheduler.week_meals(&calendar.week()) {
                writeln!(out, "{} {}", day.weekday(), format_date(day))?;
                for meal in meals {
                    if let Some(meal_type) = meal.meal_type() {
                        writeln!(out, "  {meal_type}: {} (#{})", meal.recipe.name, meal.id)?;
                    }
                }
            }
        }
        CalendarView::Month => {
            let header = week_of(anchor, calendar.week_start())
                .iter()
                .map(|d| format!("{:>4}", &d.weekday().to_string()[..3]))
                .collect::<String>();
            writeln!(out, "{header}")?;

            let dates = calendar.visible_dates();
            let cells = calendar
                .month_grid()
                .into_iter()
                .map(|cell| match cell {
                    Some(day) => {
                        let busy = dates
                            .get(usize::from(day) - 1)
                            .is_some_and(|d| !scheduler.scheduled_on(*d).is_empty());
                        format!("{:>3}{}", day, if busy { "*" } else { " " })
                    }
                    None => "    ".to_owned(),
                })
                .collect::<Vec<_>>();

            for row in cells.chunks(7) {
                writeln!(out, "{}", row.concat().trim_end())?;
            }
        }
    }

    Ok(())
}

pub async fn schedule(
    app: &mut App,
    template_id: u64,
    date: String,
    meal_type: String,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let Some(mut scheduler) = load_scheduler(app).await else {
        return Ok(());
    };

    let mut form = AssignmentForm::open(template_id, Calendar::today_utc());
    form.date = date;
    form.meal_type = meal_type;

    let result = match form.submit() {
        Ok(assignment) => scheduler.assign(app.provider.as_ref(), assignment).await,
        Err(e) => Err(e),
    };

    if let Some(meal) = app.notices.report(result) {
        if let (Some(date), Some(meal_type)) = (meal.date(), meal.meal_type()) {
            writeln!(
                out,
                "#{} {} on {} for {meal_type}",
                meal.id,
                meal.recipe.name,
                format_date(date)
            )?;
        }
        app.notices.push(Notice::success("Meal scheduled."));
    }

    Ok(())
}

pub async fn meals(app: &mut App, command: MealsCommand, out: &mut impl Write) -> anyhow::Result<()> {
    let Some(mut scheduler) = load_scheduler(app).await else {
        return Ok(());
    };

    match command {
        MealsCommand::Templates => {
            for meal in scheduler.templates() {
                writeln!(out, "#{} {}", meal.id, meal.recipe.name)?;
            }
        }
        MealsCommand::Save { recipe_id, with } => {
            let pantry = larder_pantry::Pantry::load(app.provider.as_ref())
                .await
                .unwrap_or_default();
            let result =
                super::find_recipe(app.provider.as_ref(), recipe_id, &with, &pantry).await;
            let Some(recipe) = app.notices.report(result) else {
                return Ok(());
            };

            let result = scheduler.save_template(app.provider.as_ref(), recipe.id).await;
            if let Some(meal) = app.notices.report(result) {
                writeln!(out, "#{} {}", meal.id, meal.recipe.name)?;
                app.notices.push(Notice::success("Saved to your meals."));
            }
        }
        MealsCommand::Delete { id } => {
            let result = scheduler.delete(app.provider.as_ref(), id).await;
            if app.notices.report(result).is_some() {
                app.notices.push(Notice::success("Meal deleted."));
            }
        }
    }

    Ok(())
}
