use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::{info, info_span};

use survey_aggregate::{
    Bivariate, Distribution, ResponseTable, analyze_pair, univariate, univariate_section,
};
use survey_cli::render::{
    MULTI_CHOICE_NOTICE, crosstab_table, distribution_table, pair_counts_table, questions_table,
    sections_table,
};
use survey_ingest::{load_catalog, read_responses};
use survey_model::{Question, QuestionCatalog, QuestionId};

use crate::cli::{BivariateArgs, InputArgs, QuestionsArgs, UnivariateArgs};

/// Catalog and checked response table backing an analysis command.
struct Session {
    catalog: QuestionCatalog,
    table: ResponseTable,
}

fn open_catalog(inputs: &InputArgs) -> Result<QuestionCatalog> {
    let path = inputs
        .catalog
        .as_deref()
        .ok_or_else(|| anyhow!("no question catalog given (use --catalog or SURVEY_CATALOG)"))?;
    let catalog = load_catalog(path).context("load question catalog")?;
    info!(
        path = %path.display(),
        questions = catalog.len(),
        sections = catalog.sections().len(),
        "catalog loaded"
    );
    Ok(catalog)
}

fn open_session(inputs: &InputArgs) -> Result<Session> {
    let catalog = open_catalog(inputs)?;
    let path = inputs
        .data
        .as_deref()
        .ok_or_else(|| anyhow!("no response table given (use --data or SURVEY_DATA)"))?;
    let table = open_table(path, &catalog)?;
    Ok(Session { catalog, table })
}

fn open_table(path: &Path, catalog: &QuestionCatalog) -> Result<ResponseTable> {
    let start = Instant::now();
    let data: DataFrame = read_responses(path).context("read response table")?;
    let table = ResponseTable::new(data, catalog).context("check response table")?;
    info!(
        path = %path.display(),
        respondents = table.respondents(),
        elapsed_ms = start.elapsed().as_millis(),
        "responses loaded"
    );
    Ok(table)
}

pub fn run_sections(inputs: &InputArgs, json: bool) -> Result<()> {
    let span = info_span!("sections");
    let _guard = span.enter();
    let catalog = open_catalog(inputs)?;
    if json {
        return print_json(catalog.sections());
    }
    println!("{}", sections_table(catalog.sections()));
    Ok(())
}

pub fn run_questions(inputs: &InputArgs, args: &QuestionsArgs, json: bool) -> Result<()> {
    let span = info_span!("questions", section = args.section.as_deref().unwrap_or("*"));
    let _guard = span.enter();
    let catalog = open_catalog(inputs)?;
    let questions: Vec<&Question> = match &args.section {
        Some(section) => catalog.section_questions(section)?,
        None => catalog.questions().collect(),
    };
    if json {
        return print_json(&questions);
    }
    println!("{}", questions_table(questions));
    Ok(())
}

pub fn run_univariate(inputs: &InputArgs, args: &UnivariateArgs, json: bool) -> Result<()> {
    let span = info_span!("univariate", mode = %args.mode);
    let _guard = span.enter();
    let session = open_session(inputs)?;
    let target = &args.target;

    let distributions = if let Some(section) = &target.section {
        univariate_section(&session.table, &session.catalog, section, args.mode)?
    } else {
        let question = resolve(&session.catalog, target.question, target.text.as_deref())?;
        vec![univariate(
            &session.table,
            &session.catalog,
            question,
            args.mode,
        )?]
    };
    info!(distributions = distributions.len(), "univariate complete");

    if json {
        return print_json(&distributions);
    }
    for distribution in &distributions {
        print_distribution(distribution);
    }
    Ok(())
}

pub fn run_bivariate(inputs: &InputArgs, args: &BivariateArgs, json: bool) -> Result<()> {
    let span = info_span!("bivariate", percent = args.percent);
    let _guard = span.enter();
    let session = open_session(inputs)?;
    let first = resolve(&session.catalog, args.first, args.first_text.as_deref())?;
    let second = resolve(&session.catalog, args.second, args.second_text.as_deref())?;

    let result = analyze_pair(&session.table, &session.catalog, first, second)?;
    let (rows, columns) = result.matrix().shape();
    info!(first = %first, second = %second, rows, columns, "bivariate complete");

    if json {
        return print_json(&result);
    }
    if let Bivariate::SingleSingle(pairs) = &result
        && !args.percent
    {
        println!("{}", pair_counts_table(pairs));
    }
    println!("{}", crosstab_table(result.matrix(), args.percent));
    if !matches!(result, Bivariate::SingleSingle(_)) {
        println!("note: {MULTI_CHOICE_NOTICE}");
    }
    Ok(())
}

/// Question from an explicit id, else from its exact display text.
fn resolve(
    catalog: &QuestionCatalog,
    id: Option<QuestionId>,
    text: Option<&str>,
) -> Result<QuestionId> {
    match (id, text) {
        (Some(id), _) => Ok(id),
        (None, Some(text)) => Ok(catalog.find_by_text(text)?),
        (None, None) => Err(anyhow!("select a question by id or by text")),
    }
}

fn print_distribution(distribution: &Distribution) {
    println!("{}", distribution_table(distribution));
    if distribution.is_multi_choice() {
        println!("note: {MULTI_CHOICE_NOTICE}");
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("serialize result")?;
    println!("{rendered}");
    Ok(())
}
