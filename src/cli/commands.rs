use crate::app::{AppContext, JournalError, Result};
use crate::domain::{parse_date, DailyEntry, MAX_ITEMS_PER_DAY, MAX_ITEM_CHARS};
use crate::stats::{self, Stats};

pub async fn add_entry(ctx: &AppContext, items: &[String], no_comment: bool) -> Result<()> {
    validate_items(items)?;

    let entry = ctx.service.save_entry(items)?;
    println!("Saved {} item(s) for {}", entry.items.len(), entry.date);

    if no_comment || !ctx.auto_comment {
        return Ok(());
    }

    let results = ctx.orchestrator.run_pass(&entry.date, items).await;
    for (index, result) in &results {
        match result {
            Ok(comment) => println!("  {}. {}", index + 1, comment),
            Err(e) => eprintln!("  {}. (no comment: {})", index + 1, e),
        }
    }

    Ok(())
}

pub fn show_today(ctx: &AppContext) -> Result<()> {
    let entry = ctx.service.today_entry();
    if entry.items.is_empty() {
        println!("Nothing recorded for {} yet", entry.date);
        return Ok(());
    }
    print_entry(&entry);
    Ok(())
}

pub fn show_entry(ctx: &AppContext, date: &str, json: bool) -> Result<()> {
    parse_date(date)?;

    let entry = ctx
        .service
        .get_entry_by_date(date)?
        .ok_or_else(|| JournalError::NotFound {
            date: date.to_string(),
        })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
    } else {
        print_entry(&entry);
    }
    Ok(())
}

pub fn list_entries(
    ctx: &AppContext,
    from: Option<&str>,
    to: Option<&str>,
    json: bool,
) -> Result<()> {
    for bound in from.iter().chain(to.iter()) {
        parse_date(bound)?;
    }

    let all = ctx.service.all_entries();
    let entries = stats::filter_by_date_range(&all, from, to);

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No entries");
        return Ok(());
    }

    for entry in entries {
        print_entry(entry);
        println!();
    }
    Ok(())
}

pub fn edit_entry(ctx: &AppContext, date: &str, items: &[String]) -> Result<()> {
    parse_date(date)?;
    validate_items(items)?;

    ctx.service.update_entry(date, items)?;
    println!("Updated {}", date);
    Ok(())
}

pub fn delete_entry(ctx: &AppContext, date: &str) -> Result<()> {
    parse_date(date)?;

    ctx.service.delete_entry(date)?;
    println!("Deleted {}", date);
    Ok(())
}

pub async fn request_comment(ctx: &AppContext, date: &str, number: usize) -> Result<()> {
    parse_date(date)?;
    let index = number
        .checked_sub(1)
        .ok_or_else(|| JournalError::InvalidInput("Item numbers start at 1".into()))?;

    let comment = ctx.orchestrator.request_item_comment(date, index).await?;
    println!("{}. {}", number, comment);
    Ok(())
}

pub fn show_stats(ctx: &AppContext, json: bool) -> Result<()> {
    let entries = ctx.service.all_entries();
    let stats = Stats::compute(&entries, ctx.service.today());

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Current streak: {} day(s)", stats.streak);
    println!("Days recorded:  {}", stats.total_entries);
    println!("Good things:    {}", stats.total_items);
    println!("This week:      {}", stats.this_week);
    println!("This month:     {}", stats.this_month);
    Ok(())
}

/// Input limits live here rather than in the store.
pub fn validate_items(items: &[String]) -> Result<()> {
    if items.is_empty() || items.len() > MAX_ITEMS_PER_DAY {
        return Err(JournalError::InvalidInput(format!(
            "Expected 1 to {} items, got {}",
            MAX_ITEMS_PER_DAY,
            items.len()
        )));
    }

    if items.iter().all(|i| i.trim().is_empty()) {
        return Err(JournalError::InvalidInput("All items are blank".into()));
    }

    if let Some((n, _)) = items
        .iter()
        .enumerate()
        .find(|(_, i)| i.chars().count() > MAX_ITEM_CHARS)
    {
        return Err(JournalError::InvalidInput(format!(
            "Item {} is longer than {} characters",
            n + 1,
            MAX_ITEM_CHARS
        )));
    }

    Ok(())
}

fn print_entry(entry: &DailyEntry) {
    println!(
        "{} ({}/{} commented)",
        entry.date,
        entry.commented_count(),
        entry.items.len()
    );
    for (i, item) in entry.items.iter().enumerate() {
        println!("  {}. {}", i + 1, item.content);
        match (&item.ai_comment, item.has_requested_comment) {
            (Some(comment), _) => println!("     > {}", comment),
            (None, true) => println!("     > (comment requested)"),
            (None, false) => {}
        }
    }
}
