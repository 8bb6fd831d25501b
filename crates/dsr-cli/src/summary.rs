use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dsr_model::{MatchMethod, SectionMapping};

use crate::commands::{MapOutcome, ResolveOutcome};

const METHOD_ORDER: [MatchMethod; 7] = [
    MatchMethod::MappingTable,
    MatchMethod::ExactTitle,
    MatchMethod::VectorSimilarity,
    MatchMethod::TitleMatch,
    MatchMethod::ConceptualMatch,
    MatchMethod::ContentMatch,
    MatchMethod::NoMatch,
];

pub fn print_map_summary(outcome: &MapOutcome) {
    println!("Mappings: {}", outcome.output_path.display());
    let mut table = Table::new();
    table.set_header(vec![header_cell("Match method"), header_cell("Sections")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for method in METHOD_ORDER {
        let count = count_method(&outcome.mappings, method);
        table.add_row(vec![Cell::new(method.as_str()), method_count_cell(method, count)]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(outcome.mappings.len()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn print_resolve_summary(outcome: &ResolveOutcome) {
    println!("Resolutions: {}", outcome.output_path.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Template section"),
        header_cell("Sources"),
        header_cell("Found"),
        header_cell("Placeholders"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let mut total_found = 0usize;
    let mut total_missing = 0usize;
    for (section_id, records) in &outcome.resolved {
        let found = records.iter().filter(|r| r.found).count();
        let missing = records.len() - found;
        total_found += found;
        total_missing += missing;
        table.add_row(vec![
            Cell::new(section_id)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(records.len()),
            count_cell(found, Color::Green),
            count_cell(missing, Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_found + total_missing).add_attribute(Attribute::Bold),
        count_cell(total_found, Color::Green).add_attribute(Attribute::Bold),
        count_cell(total_missing, Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

fn count_method(mappings: &[SectionMapping], method: MatchMethod) -> usize {
    mappings.iter().filter(|m| m.match_method == method).count()
}

fn method_count_cell(method: MatchMethod, count: usize) -> Cell {
    if count == 0 {
        return dim_cell(count);
    }
    match method {
        MatchMethod::NoMatch => Cell::new(count).fg(Color::Red).add_attribute(Attribute::Bold),
        _ => Cell::new(count).fg(Color::Green),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count).fg(color)
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
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
