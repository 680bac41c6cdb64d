//! Terminal tables for analysis results.
//!
//! Every builder returns a `comfy_table::Table`; printing is left to the
//! caller. Answer and alternative labels are shortened with
//! [`truncate_label`], the values they label never are.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use survey_aggregate::{
    CrossTab, DisplayMode, Distribution, MAX_LABEL_CHARS, PairCounts, round2, truncate_label,
};
use survey_ingest::format_numeric;
use survey_model::{Question, Section};

/// Notice shown under multi-choice distributions.
pub const MULTI_CHOICE_NOTICE: &str = "summed multi-choice counts can exceed respondent count";

/// Width of the bar column in distribution tables.
const BAR_WIDTH: usize = 30;

const BAR_GLYPH: char = '█';

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_matrix_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
}

/// One row per answer: label, value and a bar scaled to the largest value.
pub fn distribution_table(distribution: &Distribution) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(&truncate_label(&distribution.title, MAX_LABEL_CHARS)),
        header_cell(distribution.mode.value_header()),
        header_cell(""),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    let max = distribution
        .rows
        .iter()
        .map(|row| row.value)
        .fold(0.0_f64, f64::max);
    for row in &distribution.rows {
        table.add_row(vec![
            Cell::new(truncate_label(&row.label, MAX_LABEL_CHARS)),
            value_cell(row.value, distribution.mode),
            Cell::new(bar(row.value, max)).fg(Color::Blue),
        ]);
    }
    if distribution.is_empty() {
        table.add_row(vec![dim_cell("(no answers)"), dim_cell("-"), dim_cell("")]);
    }
    table
}

/// Frequency table of two single-choice questions.
pub fn pair_counts_table(pairs: &PairCounts) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(&truncate_label(&pairs.matrix.row_title, MAX_LABEL_CHARS)),
        header_cell(&truncate_label(&pairs.matrix.column_title, MAX_LABEL_CHARS)),
        header_cell(DisplayMode::Count.value_header()),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for row in &pairs.rows {
        table.add_row(vec![
            Cell::new(truncate_label(&row.first, MAX_LABEL_CHARS)),
            Cell::new(truncate_label(&row.second, MAX_LABEL_CHARS)),
            Cell::new(row.count),
        ]);
    }
    table.add_row(vec![
        total_cell(),
        dim_cell("-"),
        Cell::new(pairs.total()).add_attribute(Attribute::Bold),
    ]);
    table
}

/// Heatmap-style matrix with row totals.
///
/// With `percent` each row is shown as percentages of its own total.
pub fn crosstab_table(matrix: &CrossTab, percent: bool) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell(&format!(
        "{} \\ {}",
        truncate_label(&matrix.row_title, MAX_LABEL_CHARS),
        truncate_label(&matrix.column_title, MAX_LABEL_CHARS)
    ))];
    header.extend(
        matrix
            .columns
            .iter()
            .map(|column| header_cell(&truncate_label(column, MAX_LABEL_CHARS))),
    );
    header.push(header_cell("Total"));
    table.set_header(header);
    apply_matrix_style(&mut table);
    for index in 1..=matrix.columns.len() + 1 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let percentages = percent.then(|| matrix.row_percentages());
    let totals = matrix.row_totals();
    for (r, label) in matrix.rows.iter().enumerate() {
        let mut cells = vec![Cell::new(truncate_label(label, MAX_LABEL_CHARS))];
        match &percentages {
            Some(percentages) => cells.extend(
                percentages[r]
                    .iter()
                    .map(|&value| value_cell(value, DisplayMode::Percent)),
            ),
            None => cells.extend(matrix.cells[r].iter().map(|&count| count_cell(count))),
        }
        cells.push(Cell::new(totals[r]).add_attribute(Attribute::Bold));
        table.add_row(cells);
    }
    table
}

pub fn sections_table(sections: &[Section]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Section"),
        header_cell("Title"),
        header_cell("Questions"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for section in sections {
        table.add_row(vec![
            Cell::new(&section.key)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&section.title),
            Cell::new(section.questions.len()),
        ]);
    }
    table
}

pub fn questions_table<'a>(questions: impl IntoIterator<Item = &'a Question>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Kind"),
        header_cell("Text"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Center);
    for question in questions {
        let kind = if question.is_multiple() {
            Cell::new(question.kind).fg(Color::Yellow)
        } else {
            Cell::new(question.kind)
        };
        table.add_row(vec![
            Cell::new(question.id),
            kind,
            Cell::new(truncate_label(&question.text, MAX_LABEL_CHARS)),
        ]);
    }
    table
}

/// Value as shown in tables: whole counts, two-decimal percentages.
pub fn format_value(value: f64, mode: DisplayMode) -> String {
    match mode {
        DisplayMode::Count => format_numeric(value),
        DisplayMode::Percent => format!("{:.2}", round2(value)),
    }
}

/// Bar of up to [`BAR_WIDTH`] glyphs proportional to `value / max`.
pub fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round() as usize;
    BAR_GLYPH.to_string().repeat(len.clamp(1, BAR_WIDTH))
}

fn value_cell(value: f64, mode: DisplayMode) -> Cell {
    Cell::new(format_value(value, mode))
}

fn count_cell(count: u64) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count)
    }
}

fn total_cell() -> Cell {
    Cell::new("TOTAL")
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
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
