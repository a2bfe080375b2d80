use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use cfx_cli::report::CodeReport;

pub fn print_check_report(reports: &[CodeReport]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Shape"),
        header_cell("CIN"),
        header_cell("Expected"),
        header_cell("Verified"),
        header_cell("Omocodia"),
        header_cell("Normalized"),
    ]);
    apply_report_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Center);
    align_column(&mut table, 5, CellAlignment::Center);
    for report in reports {
        let shape_ok = report.normalized.is_some();
        table.add_row(vec![
            Cell::new(&report.input)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            flag_cell(shape_ok),
            char_cell(report.found_cin),
            char_cell(report.expected_cin),
            flag_cell(report.verified),
            if report.omocodia {
                Cell::new("yes").fg(Color::Yellow)
            } else {
                dim_cell("-")
            },
            match &report.normalized {
                Some(code) => Cell::new(code),
                None => dim_cell("-"),
            },
        ]);
    }
    println!("{table}");

    let failures: Vec<&CodeReport> = reports.iter().filter(|r| !r.is_valid()).collect();
    if !failures.is_empty() {
        eprintln!("Problems:");
        for report in failures {
            if let Some(problem) = &report.problem {
                eprintln!("- {}: {problem}", report.input);
            }
        }
    }
}

fn apply_report_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn flag_cell(ok: bool) -> Cell {
    if ok {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("✗").fg(Color::Red).add_attribute(Attribute::Bold)
    }
}

fn char_cell(value: Option<char>) -> Cell {
    match value {
        Some(c) => Cell::new(c),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
