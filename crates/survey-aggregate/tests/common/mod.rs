//! Shared survey fixture: five respondents, three single-choice questions
//! and two multi-choice questions.

#![allow(dead_code)]

use polars::prelude::{DataFrame, NamedFrom, Series};
use survey_aggregate::ResponseTable;
use survey_model::{QuestionCatalog, QuestionId};

pub const AGE: QuestionId = QuestionId::new(1);
pub const ROLE: QuestionId = QuestionId::new(2);
pub const REMOTE: QuestionId = QuestionId::new(3);
pub const LANGUAGES: QuestionId = QuestionId::new(10);
pub const PYTHON: QuestionId = QuestionId::new(11);
pub const TOOLS: QuestionId = QuestionId::new(20);

pub fn catalog() -> QuestionCatalog {
    QuestionCatalog::builder()
        .single(AGE, "P1_a", "Faixa etária")
        .single(ROLE, "P2_f", "Cargo atual")
        .single(REMOTE, "P2_r", "Trabalha remoto?")
        .multiple(LANGUAGES, "Linguagens utilizadas", [PYTHON, QuestionId::new(12)])
        .alternative(PYTHON, "P4_d_1", "Python")
        .alternative(12u32, "P4_d_2", "SQL")
        .multiple(TOOLS, "Ferramentas de BI", [21u32, 22])
        .alternative(21u32, "P4_g_1", "Power BI")
        .alternative(22u32, "P4_g_2", "Tableau")
        .section("P1", "Dados demográficos", [AGE])
        .section("P2", "Dados sobre carreira", [ROLE, REMOTE, LANGUAGES])
        .build()
        .expect("valid catalog")
}

pub fn responses() -> DataFrame {
    DataFrame::new(vec![
        Series::new("P1_a".into(), ["A", "A", "B", "A", "B"]).into(),
        Series::new(
            "P2_f".into(),
            [Some("X"), Some("X"), Some("X"), None, Some("Y")],
        )
        .into(),
        Series::new("P2_r".into(), ["Sim", "Sim", "Sim", "Sim", "Sim"]).into(),
        Series::new("P4_d_1".into(), [1i64, 1, 0, 1, 0]).into(),
        Series::new("P4_d_2".into(), [0i64, 0, 1, 0, 0]).into(),
        Series::new("P4_g_1".into(), [Some(1i64), None, Some(0), Some(1), None]).into(),
        Series::new("P4_g_2".into(), [Some(0i64), None, Some(1), Some(1), None]).into(),
    ])
    .expect("fixture frame")
}

pub fn table() -> ResponseTable {
    ResponseTable::new(responses(), &catalog()).expect("columns match catalog")
}
