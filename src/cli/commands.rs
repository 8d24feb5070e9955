use crate::error::{SheetError, SheetResult};
use crate::extract::extract_steam_ids;
use crate::service::SheetService;
use crate::sheet::ProfileSheet;
use crate::types::{PlayerRecord, FIRST_DATA_ROW};
use colored::Colorize;

/// Execute the links command
pub fn links<S: SheetService>(sheet: &ProfileSheet<S>) -> SheetResult<()> {
    println!("{}", "🔗 Profile links".bold().green());
    println!("   Column: {}", sheet.link_column().to_string().cyan());
    println!();

    let links = sheet.get_profile_links()?;
    if links.is_empty() {
        println!("{}", "   No profile links below the header rows".yellow());
        return Ok(());
    }

    for (link, row) in links.iter().zip(FIRST_DATA_ROW..) {
        println!("   {:>5}  {}", row.to_string().bright_blue(), link);
    }
    println!();
    println!("   {} rows", links.len().to_string().bold());
    Ok(())
}

/// Execute the ids command
pub fn ids<S: SheetService>(sheet: &ProfileSheet<S>) -> SheetResult<()> {
    println!("{}", "🆔 Steam ids".bold().green());
    println!("   Column: {}", sheet.link_column().to_string().cyan());
    println!();

    let links = sheet.get_profile_links()?;
    let ids = extract_steam_ids(&links)?;
    for (id, row) in ids.iter().zip(FIRST_DATA_ROW..) {
        println!("   {:>5}  {}", row.to_string().bright_blue(), id);
    }
    println!();
    println!("   {} ids", ids.len().to_string().bold());
    Ok(())
}

/// Execute the update command
pub fn update<S: SheetService>(
    sheet: &ProfileSheet<S>,
    records: &[PlayerRecord],
    dry_run: bool,
) -> SheetResult<()> {
    println!("{}", "🚫 Updating game-ban counts".bold().green());
    println!(
        "   Links: {}   Bans: {}   Records: {}",
        sheet.link_column().to_string().cyan(),
        sheet.ban_column().to_string().cyan(),
        records.len()
    );
    println!();

    if dry_run {
        println!(
            "{}",
            "📋 DRY RUN MODE - No changes will be written\n".yellow()
        );
        let plan = sheet.plan_updates(records).inspect_err(report_nothing_written)?;
        for cell in &plan {
            println!(
                "   {}{} ← {}",
                cell.column,
                cell.row,
                cell.value.bold()
            );
        }
        println!();
        println!(
            "{}",
            format!("📋 Dry run complete - {} cells would be written", plan.len()).yellow()
        );
        return Ok(());
    }

    let response = sheet
        .update_profiles(records)
        .inspect_err(report_nothing_written)?;
    println!(
        "{}",
        format!(
            "✅ Updated {} cells across {} rows",
            response.total_updated_cells, response.total_updated_rows
        )
        .bold()
        .green()
    );
    Ok(())
}

/// Alignment is checked before the batch is sent, so the sheet is untouched.
fn report_nothing_written(err: &SheetError) {
    if err.is_alignment_failure() {
        eprintln!(
            "{}",
            "❌ Records do not match the sheet - nothing was written".red().bold()
        );
    }
}
