// src/cli/workbook.rs
// Minimal workbook maintenance: create sheets, append rows, print sheets

use super::{CliContext, CliResult};

pub fn create_sheet(ctx: &CliContext, workbook: &str, sheet: &str, headers: &[String]) -> CliResult {
    let book = ctx.store.open_or_create(workbook)?;
    book.create_sheet(sheet, headers)?;
    book.flush()?;
    println!("Created '{}' in '{}' with {} columns", sheet, workbook, headers.len());
    Ok(())
}

pub fn append_row(ctx: &CliContext, workbook: &str, sheet: &str, values: &[String]) -> CliResult {
    let book = ctx.store.open_by_id(workbook)?;
    let target = book
        .sheet(sheet)?
        .ok_or_else(|| format!("sheet '{}' not found in workbook '{}'", sheet, workbook))?;
    let row = target.append_row(values)?;
    target.flush()?;
    println!("Appended row {}", row);
    Ok(())
}

pub fn show(ctx: &CliContext, workbook: &str, sheet: &str, all: bool) -> CliResult {
    let book = ctx.store.open_by_id(workbook)?;
    let target = book
        .sheet(sheet)?
        .ok_or_else(|| format!("sheet '{}' not found in workbook '{}'", sheet, workbook))?;

    let header = target.header()?;
    let rows: Vec<(usize, Vec<String>)> = if all {
        target.snapshot()?.numbered_rows().map(|(r, cells)| (r, cells.to_vec())).collect()
    } else {
        target.visible_rows()?
    };

    println!("{:<5} {}", "Row", header.join(" | "));
    println!("{}", "-".repeat(80));
    for (row, cells) in &rows {
        println!("{:<5} {}", row, cells.join(" | "));
    }
    let total = target.data_row_count()?;
    if rows.len() < total {
        println!("\n({} of {} rows hidden by filter)", total - rows.len(), total);
    }
    Ok(())
}
