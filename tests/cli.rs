mod helpers;

use larder_shared::NoticeLevel;
use temp_dir::TempDir;

#[tokio::test]
async fn test_search_skips_allergenic_recipes() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut app = helpers::setup(&dir).await?;

    let out = helpers::exec(&mut app, &["search", "rice", "egg"]).await?;

    assert!(out.starts_with("Page 1/1 (2 recipes)"));
    assert!(out.contains("#1 Pancakes"));
    assert!(out.contains("#3 Tomato Rice"));
    assert!(!out.contains("Shrimp Fried Rice"));
    assert!(out.contains("  1. Fry onion and garlic"));

    Ok(())
}

#[tokio::test]
async fn test_search_prints_recipe_details() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut app = helpers::setup(&dir).await?;

    let out = helpers::exec(&mut app, &["search", "flour"]).await?;

    assert!(out.contains("  American | 20 min | easy"));
    assert!(out.contains("  Ingredients: flour, egg, milk, sugar"));
    assert!(out.contains("  2. Add egg and milk"));
    assert!(out.contains("#5 Eggplant Parmesan"));

    Ok(())
}

#[tokio::test]
async fn test_search_without_ingredients() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut app = helpers::setup(&dir).await?;

    let out = helpers::exec(&mut app, &["search"]).await?;

    assert!(out.is_empty());
    assert_eq!(
        helpers::messages(&mut app),
        ["Please select at least one ingredient!"]
    );

    Ok(())
}

#[tokio::test]
async fn test_search_from_pantry() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut app = helpers::setup(&dir).await?;
    app.config.recipes.page_size = 2;

    let out = helpers::exec(&mut app, &["search", "--pantry", "--page", "2"]).await?;

    assert!(out.starts_with("Page 2/2 (3 recipes)"));
    assert!(out.contains("#5 Eggplant Parmesan"));
    assert!(!out.contains("Satay Noodles"));

    Ok(())
}

#[tokio::test]
async fn test_missing_ingredients() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut app = helpers::setup(&dir).await?;

    let out = helpers::exec(&mut app, &["missing", "1"]).await?;
    assert_eq!(out, "Missing for Pancakes:\n  - egg\n  - milk\n");

    let out = helpers::exec(&mut app, &["missing", "42", "--with", "flour"]).await?;
    assert!(out.is_empty());
    assert_eq!(helpers::messages(&mut app), ["Recipe 42 not found."]);

    Ok(())
}

#[tokio::test]
async fn test_shopping_list_flow() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut app = helpers::setup(&dir).await?;

    let out = helpers::exec(&mut app, &["shopping", "add", "1"]).await?;
    assert!(out.contains("+ egg"));
    assert!(out.contains("+ milk"));
    assert_eq!(
        helpers::messages(&mut app),
        ["Added 2 items to your shopping list."]
    );

    helpers::exec(&mut app, &["shopping", "add", "1"]).await?;
    assert_eq!(
        helpers::messages(&mut app),
        ["Those ingredients are already on your shopping list."]
    );

    let out = helpers::exec(&mut app, &["shopping", "list"]).await?;
    assert!(out.contains("[ ] egg (Pancakes)"));
    assert!(out.ends_with("2 remaining, 0 completed\n"));

    let list = larder_pantry::ShoppingList::load(&app.config.shopping.path).await?;
    let egg = list.items().iter().find(|i| i.name == "egg").map(|i| i.id.clone());
    let Some(egg) = egg else {
        anyhow::bail!("egg missing from the saved list");
    };

    helpers::exec(&mut app, &["shopping", "toggle", &egg]).await?;
    let out = helpers::exec(&mut app, &["shopping", "clear", "--completed"]).await?;
    assert_eq!(out, "Removed 1 completed items\n");

    let out = helpers::exec(&mut app, &["shopping", "list"]).await?;
    assert!(!out.contains("egg"));
    assert!(out.ends_with("1 remaining, 0 completed\n"));

    Ok(())
}

#[tokio::test]
async fn test_pantry_commands() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut app = helpers::setup(&dir).await?;

    helpers::exec(&mut app, &["pantry", "add", "basil", "--quantity", "3"]).await?;
    assert_eq!(helpers::messages(&mut app), ["basil added to your pantry."]);

    let out = helpers::exec(&mut app, &["pantry", "list"]).await?;
    assert!(out.contains("#3 rice x1 (expires 2025-01-15)"));
    assert!(out.contains("#4 Peanuts x1 - salted"));
    assert!(out.contains("#5 basil x3"));

    let out = helpers::exec(&mut app, &["pantry", "set", "5", "--notes", "fresh"]).await?;
    assert_eq!(out, "#5 basil x3 - fresh\n");

    helpers::exec(&mut app, &["pantry", "add", "thyme", "--quantity", "0"]).await?;
    let notices = app.notices.drain();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Warning);

    helpers::exec(&mut app, &["pantry", "remove", "5"]).await?;
    let out = helpers::exec(&mut app, &["pantry", "list"]).await?;
    assert!(!out.contains("basil"));

    Ok(())
}

#[tokio::test]
async fn test_catalog_tiles() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut app = helpers::setup(&dir).await?;

    let out = helpers::exec(&mut app, &["catalog"]).await?;
    assert!(out.contains("[ ] egg\n"));
    assert!(out.contains("[ ] rice\n"));
    assert!(!out.contains("peanuts"));

    let out = helpers::exec(
        &mut app,
        &["catalog", "--select", "Peanuts", "--select", "egg"],
    )
    .await?;
    let lines = out.lines().collect::<Vec<_>>();
    assert_eq!(lines[0], "[x] egg");
    assert_eq!(lines[1], "[!] peanuts");
    assert_eq!(
        lines.last().copied(),
        Some("warning: Peanuts matches your allergies")
    );

    Ok(())
}

#[tokio::test]
async fn test_catalog_uses_stored_dietary_preference() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut app = helpers::setup(&dir).await?;

    let out = helpers::exec(&mut app, &["catalog", "--search", "chicken"]).await?;
    assert!(out.contains("[ ] chicken\n"));

    let mut app = helpers::setup_with(&dir, |fixture| {
        fixture.dietary_preference = Some(2);
    })
    .await?;

    let out = helpers::exec(&mut app, &["catalog", "--search", "chicken"]).await?;
    assert!(!out.contains("chicken"));
    assert!(out.contains("[ ] egg\n"));
    assert!(app.notices.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_calendar_week() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut app = helpers::setup(&dir).await?;

    let out = helpers::exec(&mut app, &["calendar", "week", "--date", "2024-03-05"]).await?;
    let lines = out.lines().collect::<Vec<_>>();

    assert_eq!(lines[0], "2024-03-03 - 2024-03-09");
    assert_eq!(lines[1], "Sunday 2024-03-03");
    assert!(out.contains("Tuesday 2024-03-05\n  breakfast: Pancakes (#2)\n"));

    Ok(())
}

#[tokio::test]
async fn test_calendar_month_marks_busy_days() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut app = helpers::setup(&dir).await?;

    let out = helpers::exec(&mut app, &["calendar", "month", "--date", "2024-03-20"]).await?;
    let lines = out.lines().collect::<Vec<_>>();

    assert_eq!(lines[0], "March 2024");
    assert_eq!(lines[1], " Sun Mon Tue Wed Thu Fri Sat");
    assert!(out.contains("  5*"));
    assert!(!out.contains("  6*"));

    Ok(())
}

#[tokio::test]
async fn test_schedule_template() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut app = helpers::setup(&dir).await?;

    let out = helpers::exec(&mut app, &["schedule", "1", "2024-03-06", "dinner"]).await?;
    assert_eq!(out, "#3 Tomato Rice on 2024-03-06 for dinner\n");
    assert_eq!(helpers::messages(&mut app), ["Meal scheduled."]);

    let out = helpers::exec(&mut app, &["meals", "templates"]).await?;
    assert_eq!(out, "#1 Tomato Rice\n");

    let out = helpers::exec(&mut app, &["calendar", "--date", "2024-03-06"]).await?;
    assert!(out.contains("Wednesday 2024-03-06\n  dinner: Tomato Rice (#3)\n"));

    Ok(())
}

#[tokio::test]
async fn test_schedule_rejects_bad_input() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut app = helpers::setup(&dir).await?;

    for (date, meal_type) in [("2024-03-06", "supper"), ("06/03/2024", "dinner")] {
        let out = helpers::exec(&mut app, &["schedule", "1", date, meal_type]).await?;
        assert!(out.is_empty());

        let messages = helpers::messages(&mut app);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("Could not schedule meal"));
    }

    helpers::exec(&mut app, &["schedule", "2", "2024-03-06", "dinner"]).await?;
    let messages = helpers::messages(&mut app);
    assert!(messages[0].starts_with("Could not schedule meal"));

    Ok(())
}

#[tokio::test]
async fn test_save_and_delete_template() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut app = helpers::setup(&dir).await?;

    let out = helpers::exec(&mut app, &["meals", "save", "5", "--with", "tomato"]).await?;
    assert_eq!(out, "#3 Eggplant Parmesan\n");
    assert_eq!(helpers::messages(&mut app), ["Saved to your meals."]);

    helpers::exec(&mut app, &["meals", "delete", "1"]).await?;
    let out = helpers::exec(&mut app, &["meals", "templates"]).await?;
    assert_eq!(out, "#3 Eggplant Parmesan\n");

    Ok(())
}
