//! Tests for question catalog construction and lookups.

use survey_model::{ModelError, QuestionCatalog, QuestionId, QuestionKind};

fn id(value: u32) -> QuestionId {
    QuestionId::new(value)
}

fn sample_catalog() -> QuestionCatalog {
    QuestionCatalog::builder()
        .single(1u32, "P1_a", "Idade")
        .single(2u32, "P1_b", "Gênero")
        .single(3u32, "P2_f", "Cargo atual")
        .multiple(10u32, "Quais linguagens você utiliza?", [11u32, 12, 13])
        .alternative(11u32, "P4_d_1", "Python")
        .alternative(12u32, "P4_d_2", "SQL")
        .alternative(13u32, "P4_d_3", "R")
        .section("P1", "Dados demográficos", [1u32, 2])
        .section("P2", "Dados sobre carreira", [3u32])
        .section("P4", "Conhecimentos na área de dados", [10u32])
        .build()
        .expect("valid catalog")
}

#[test]
fn every_question_has_exactly_one_kind() {
    let catalog = sample_catalog();
    for question in catalog.questions() {
        let kind = catalog.kind(question.id).expect("classified");
        assert_eq!(kind == QuestionKind::Single, question.column.is_some());
    }
    assert_eq!(catalog.len(), 4);
}

#[test]
fn unclassified_lookup_fails() {
    let catalog = sample_catalog();
    assert_eq!(
        catalog.kind(id(42)),
        Err(ModelError::UnclassifiedQuestion(id(42)))
    );
}

#[test]
fn alternatives_keep_questionnaire_order() {
    let catalog = sample_catalog();
    let texts: Vec<&str> = catalog
        .alternatives(id(10))
        .expect("multi choice")
        .into_iter()
        .map(|alternative| alternative.text.as_str())
        .collect();
    assert_eq!(texts, vec!["Python", "SQL", "R"]);
}

#[test]
fn alternatives_of_single_choice_fail() {
    let catalog = sample_catalog();
    assert_eq!(
        catalog.alternatives(id(1)).unwrap_err(),
        ModelError::NotMultipleChoice(id(1))
    );
    assert_eq!(
        catalog.single_column(id(10)).unwrap_err(),
        ModelError::NotSingleChoice(id(10))
    );
}

#[test]
fn find_by_text_exact_match() {
    let catalog = sample_catalog();
    assert_eq!(catalog.find_by_text("Cargo atual"), Ok(id(3)));
    assert_eq!(catalog.find_by_text("  Idade "), Ok(id(1)));
}

#[test]
fn find_by_text_miss_is_an_error() {
    let catalog = sample_catalog();
    assert_eq!(
        catalog.find_by_text("Cargo"),
        Err(ModelError::TextNotFound("Cargo".to_string()))
    );
    // Alternative texts are not question texts.
    assert!(catalog.find_by_text("Python").is_err());
}

#[test]
fn find_by_text_rejects_duplicates() {
    let catalog = QuestionCatalog::builder()
        .single(1u32, "A", "Qual o seu nível?")
        .single(2u32, "B", "Qual o seu nível?")
        .build()
        .expect("valid catalog");
    assert_eq!(
        catalog.find_by_text("Qual o seu nível?"),
        Err(ModelError::AmbiguousText {
            text: "Qual o seu nível?".to_string(),
            candidates: vec![id(1), id(2)],
        })
    );
}

#[test]
fn section_questions_in_section_order() {
    let catalog = sample_catalog();
    let ids: Vec<QuestionId> = catalog
        .section_questions("P1")
        .expect("known section")
        .into_iter()
        .map(|question| question.id)
        .collect();
    assert_eq!(ids, vec![id(1), id(2)]);
    assert_eq!(
        catalog.section("P9").unwrap_err(),
        ModelError::UnknownSection("P9".to_string())
    );
}

#[test]
fn build_rejects_conflicting_kinds() {
    let result = QuestionCatalog::builder()
        .single(1u32, "P1_a", "Idade")
        .multiple(1u32, "Idade", [2u32])
        .alternative(2u32, "P1_a_1", "18-21")
        .build();
    assert_eq!(result.unwrap_err(), ModelError::ConflictingKind(id(1)));
}

#[test]
fn build_rejects_duplicate_ids() {
    let result = QuestionCatalog::builder()
        .single(1u32, "P1_a", "Idade")
        .single(1u32, "P1_b", "Gênero")
        .build();
    assert_eq!(result.unwrap_err(), ModelError::DuplicateQuestion(id(1)));

    let result = QuestionCatalog::builder()
        .single(1u32, "P1_a", "Idade")
        .multiple(2u32, "Linguagens", [1u32])
        .alternative(1u32, "P4_d_1", "Python")
        .build();
    assert_eq!(result.unwrap_err(), ModelError::DuplicateQuestion(id(1)));
}

#[test]
fn build_rejects_broken_grouping() {
    let empty = QuestionCatalog::builder()
        .multiple(1u32, "Linguagens", Vec::<u32>::new())
        .build();
    assert_eq!(empty.unwrap_err(), ModelError::EmptyAlternatives(id(1)));

    let unknown = QuestionCatalog::builder()
        .multiple(1u32, "Linguagens", [2u32, 3])
        .alternative(2u32, "P4_d_1", "Python")
        .build();
    assert_eq!(
        unknown.unwrap_err(),
        ModelError::UnknownAlternative {
            question: id(1),
            alternative: id(3),
        }
    );
}

#[test]
fn alternatives_belong_to_exactly_one_question() {
    let shared = QuestionCatalog::builder()
        .multiple(1u32, "Linguagens", [3u32])
        .multiple(2u32, "Linguagens favoritas", [3u32])
        .alternative(3u32, "P4_d_1", "Python")
        .build();
    assert_eq!(
        shared.unwrap_err(),
        ModelError::SharedAlternative {
            alternative: id(3),
            first: id(1),
            second: id(2),
        }
    );

    let orphan = QuestionCatalog::builder()
        .multiple(1u32, "Linguagens", [3u32])
        .alternative(3u32, "P4_d_1", "Python")
        .alternative(4u32, "P4_d_2", "SQL")
        .build();
    assert_eq!(orphan.unwrap_err(), ModelError::OrphanAlternative(id(4)));
}

#[test]
fn build_rejects_blank_columns() {
    let result = QuestionCatalog::builder().single(1u32, "  ", "Idade").build();
    assert!(matches!(
        result.unwrap_err(),
        ModelError::InvalidColumn { id: bad, .. } if bad == id(1)
    ));
}

#[test]
fn build_rejects_bad_sections() {
    let unknown = QuestionCatalog::builder()
        .single(1u32, "P1_a", "Idade")
        .section("P1", "Dados demográficos", [1u32, 5])
        .build();
    assert_eq!(unknown.unwrap_err(), ModelError::UnknownQuestion(id(5)));

    let duplicate = QuestionCatalog::builder()
        .single(1u32, "P1_a", "Idade")
        .section("P1", "Dados demográficos", [1u32])
        .section("P1", "Outra", [1u32])
        .build();
    assert_eq!(
        duplicate.unwrap_err(),
        ModelError::DuplicateSection("P1".to_string())
    );
}

#[test]
fn question_id_serializes_transparently() {
    let json = serde_json::to_string(&id(7)).expect("serialize id");
    assert_eq!(json, "7");
    let parsed: QuestionId = " 12 ".parse().expect("parse id");
    assert_eq!(parsed, id(12));
}
