use std::io::Write;

use larder_mealplan::Calendar;
use larder_pantry::Pantry;
use larder_shared::{
    Notice, format_date,
    pantry::{NewPantryItem, PantryItem},
};

use crate::{App, cli::PantryCommand};

pub async fn pantry(app: &mut App, command: PantryCommand, out: &mut impl Write) -> anyhow::Result<()> {
    let provider = app.provider.clone();
    let result = Pantry::load(provider.as_ref()).await;
    let Some(mut pantry) = app.notices.report(result) else {
        return Ok(());
    };

    match command {
        PantryCommand::List => {
            for item in pantry.items() {
                write_item(item, out)?;
            }
        }
        PantryCommand::Add {
            name,
            quantity,
            expires,
            notes,
        } => {
            let input = NewPantryItem::new(name)
                .quantity(quantity)
                .expires(expires)
                .notes(notes);
            let result = pantry.add(provider.as_ref(), input).await;
            if let Some(item) = app.notices.report(result) {
                app.notices
                    .push(Notice::success(format!("{} added to your pantry.", item.name)));
            }
        }
        PantryCommand::Set {
            id,
            quantity,
            notes,
        } => {
            if let Some(quantity) = quantity {
                let result = pantry.set_quantity(provider.as_ref(), id, quantity).await;
                app.notices.report(result);
            }
            if notes.is_some() {
                let result = pantry.set_notes(provider.as_ref(), id, notes).await;
                app.notices.report(result);
            }
            if let Some(item) = pantry.get(id) {
                write_item(item, out)?;
            }
        }
        PantryCommand::Remove { id } => {
            let result = pantry.remove(provider.as_ref(), id).await;
            if app.notices.report(result).is_some() {
                app.notices.push(Notice::success("Item removed from your pantry."));
            }
        }
        PantryCommand::Expiring { days } => {
            for item in pantry.expiring_within(Calendar::today_utc(), days) {
                write_item(item, out)?;
            }
        }
    }

    Ok(())
}

fn write_item(item: &PantryItem, out: &mut impl Write) -> std::io::Result<()> {
    write!(out, "#{} {} x{}", item.id, item.name, item.quantity)?;
    if let Some(date) = item.expiration_date {
        write!(out, " (expires {})", format_date(date))?;
    }
    if let Some(notes) = &item.notes {
        write!(out, " - {notes}")?;
    }

    writeln!(out)
}
