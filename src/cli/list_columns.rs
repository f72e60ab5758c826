// src/cli/list_columns.rs
use super::{CliContext, CliResult};

pub fn run(ctx: &CliContext, workbook: &str, sheet: &str) -> CliResult {
    let book = ctx.store.open_by_id(workbook)?;
    if let Some(path) = book.path() {
        println!("Opening: {}\n", path.display());
    }
    let target = book
        .sheet(sheet)?
        .ok_or_else(|| format!("sheet '{}' not found in workbook '{}'", sheet, workbook))?;

    let header = target.header()?;
    let filter = target.filter()?;

    println!("=== {} Columns ===\n", sheet);
    println!("{:<6} {:<30} {}", "Index", "Column Name", "Filter");
    println!("{}", "-".repeat(80));

    for (i, name) in header.iter().enumerate() {
        let criteria = filter
            .as_ref()
            .and_then(|f| f.column_criteria(i + 1))
            .map(|c| format!("{:?}", c))
            .unwrap_or_else(|| "-".to_string());
        println!("{:<6} {:<30} {}", i + 1, name, criteria);
    }

    match filter {
        Some(f) => println!("\nFilter range: A1:R{}C{}", f.last_row, f.last_column),
        None => println!("\nNo filter"),
    }
    Ok(())
}
