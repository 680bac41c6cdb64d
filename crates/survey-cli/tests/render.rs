//! Tests for terminal rendering of analysis results.

use comfy_table::{ContentArrangement, Table};
use survey_aggregate::{
    Bivariate, CrossTab, DisplayMode, Distribution, DistributionRow, PairCount, PairCounts,
};
use survey_cli::render::{
    crosstab_table, distribution_table, pair_counts_table, questions_table, sections_table,
};
use survey_model::{QuestionCatalog, QuestionId};

fn plain(mut table: Table) -> String {
    table
        .force_no_tty()
        .set_content_arrangement(ContentArrangement::Disabled);
    table.to_string()
}

fn distribution(mode: DisplayMode, rows: &[(&str, f64)]) -> Distribution {
    Distribution {
        question: QuestionId::new(4),
        title: "Cargo atual".to_string(),
        mode,
        multi_choice: false,
        rows: rows
            .iter()
            .map(|(label, value)| DistributionRow {
                label: (*label).to_string(),
                value: *value,
            })
            .collect(),
    }
}

fn languages_by_role() -> CrossTab {
    CrossTab::new(
        "Cargo atual",
        "Linguagens",
        vec!["Analista".to_string(), "Cientista".to_string()],
        vec!["Python".to_string(), "SQL".to_string()],
        vec![vec![1, 3], vec![4, 0]],
    )
}

#[test]
fn distribution_table_lists_every_answer() {
    let rendered = plain(distribution_table(&distribution(
        DisplayMode::Count,
        &[("Analista", 3.0), ("Cientista", 2.0)],
    )));

    assert!(rendered.contains("Cargo atual"));
    assert!(rendered.contains("Quantidade"));
    assert!(rendered.contains("Analista"));
    assert!(rendered.contains("Cientista"));
    assert!(rendered.contains('█'));
}

#[test]
fn percent_values_have_two_decimals() {
    let rendered = plain(distribution_table(&distribution(
        DisplayMode::Percent,
        &[("Analista", 66.67), ("Cientista", 33.33)],
    )));

    assert!(rendered.contains("Percentual (%)"));
    assert!(rendered.contains("66.67"));
    assert!(rendered.contains("33.33"));
}

#[test]
fn long_labels_are_truncated_for_display() {
    let long = format!("{}{}", "a".repeat(60), "tail");
    let rendered = plain(distribution_table(&distribution(
        DisplayMode::Count,
        &[(long.as_str(), 1.0)],
    )));

    assert!(rendered.contains(&format!("{}...", "a".repeat(60))));
    assert!(!rendered.contains("tail"));
}

#[test]
fn empty_distribution_says_so() {
    let rendered = plain(distribution_table(&distribution(DisplayMode::Count, &[])));
    assert!(rendered.contains("(no answers)"));
}

#[test]
fn pair_counts_table_has_total_row() {
    let pairs = PairCounts {
        first: QuestionId::new(4),
        second: QuestionId::new(5),
        rows: vec![
            PairCount {
                first: "Analista".to_string(),
                second: "Sim".to_string(),
                count: 2,
            },
            PairCount {
                first: "Cientista".to_string(),
                second: "Não".to_string(),
                count: 1,
            },
        ],
        matrix: CrossTab::new(
            "Cargo atual",
            "Trabalha remoto?",
            vec!["Analista".to_string(), "Cientista".to_string()],
            vec!["Não".to_string(), "Sim".to_string()],
            vec![vec![0, 2], vec![1, 0]],
        ),
    };
    let rendered = plain(pair_counts_table(&pairs));

    assert!(rendered.contains("Trabalha remoto?"));
    assert!(rendered.contains("TOTAL"));
    assert_eq!(rendered.lines().filter(|line| line.contains("Analista")).count(), 1);
}

#[test]
fn crosstab_table_in_counts_and_percentages() {
    let matrix = languages_by_role();

    let counts = plain(crosstab_table(&matrix, false));
    assert!(counts.contains("Cargo atual \\ Linguagens"));
    assert!(counts.contains("Total"));

    let percentages = plain(crosstab_table(&matrix, true));
    assert!(percentages.contains("25.00"));
    assert!(percentages.contains("75.00"));
    assert!(percentages.contains("100.00"));
}

#[test]
fn catalog_tables() {
    let catalog = QuestionCatalog::builder()
        .single(1u32, "P1_a", "Faixa etária")
        .multiple(2u32, "Linguagens", [3u32])
        .alternative(3u32, "P4_d_1", "Python")
        .section("P1", "Dados demográficos", [1u32, 2])
        .build()
        .expect("valid catalog");

    let sections = plain(sections_table(catalog.sections()));
    assert!(sections.contains("Dados demográficos"));

    let questions = plain(questions_table(catalog.questions()));
    assert!(questions.contains("single"));
    assert!(questions.contains("multiple"));
    assert!(!questions.contains("Python"));
}

#[test]
fn bivariate_json_for_charting() {
    let json = serde_json::to_string_pretty(&Bivariate::SingleMulti(languages_by_role()))
        .expect("serialize");

    insta::assert_snapshot!(json, @r#"
    {
      "kind": "single_multi",
      "row_title": "Cargo atual",
      "column_title": "Linguagens",
      "rows": [
        "Analista",
        "Cientista"
      ],
      "columns": [
        "Python",
        "SQL"
      ],
      "cells": [
        [
          1,
          3
        ],
        [
          4,
          0
        ]
      ]
    }
    "#);
}
