//! Plain-text tables for the terminal.

use finance_engine::{Entry, Totals, format_date, format_money};

const NONE: &str = "(none)";

/// Income or output list: id, date, description, amount.
pub fn entry_table(entries: &[Entry], symbol: &str) -> String {
    let rows = entries
        .iter()
        .map(|entry| {
            vec![
                entry.id.clone(),
                format_date(&entry.date),
                entry.desc.clone(),
                format_money(entry.amount, symbol),
            ]
        })
        .collect();
    table(&["ID", "DATE", "DESCRIPTION", "AMOUNT"], &[3], rows)
}

/// Recent activity: date, description, amount, type.
pub fn recent_table(entries: &[Entry], symbol: &str) -> String {
    let rows = entries
        .iter()
        .map(|entry| {
            vec![
                format_date(&entry.date),
                entry.desc.clone(),
                format_money(entry.amount, symbol),
                entry.kind.to_string(),
            ]
        })
        .collect();
    table(&["DATE", "DESCRIPTION", "AMOUNT", "TYPE"], &[2], rows)
}

pub fn totals_block(totals: &Totals, symbol: &str) -> String {
    let lines = [
        ("Total income:", totals.income),
        ("Total output:", totals.output),
        ("Balance:", totals.balance),
    ];
    let amounts: Vec<String> = lines
        .iter()
        .map(|(_, amount)| format_money(*amount, symbol))
        .collect();
    let width = amounts.iter().map(|a| a.chars().count()).max().unwrap_or(0);
    lines
        .iter()
        .zip(&amounts)
        .map(|((label, _), amount)| format!("{label:<15}{amount:>width$}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn table(headers: &[&str], right_aligned: &[usize], rows: Vec<Vec<String>>) -> String {
    if rows.is_empty() {
        return NONE.to_string();
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let render = |cells: Vec<&str>| {
        let line = cells
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(idx, (cell, &width))| {
                if right_aligned.contains(&idx) {
                    format!("{cell:>width$}")
                } else {
                    format!("{cell:<width$}")
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        line.trim_end().to_string()
    };

    let mut lines = vec![render(headers.to_vec())];
    lines.extend(
        rows.iter()
            .map(|row| render(row.iter().map(String::as_str).collect())),
    );
    lines.join("\n")
}
