use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Result};
use serde::Serialize;

use markup_grader::config::{Command, Config};
use markup_grader::grading::{evaluate_checks, CheckResult, LessonChecks, Submission};
use markup_grader::lsp::serve;
use markup_grader::validation::validate_document_with;

/// Aggregated outcome of a grading attempt
#[derive(Debug, Serialize)]
struct GradeReport<'a> {
    passed: usize,
    total: usize,
    score: f64,
    results: &'a [CheckResult],
}

impl<'a> GradeReport<'a> {
    fn new(results: &'a [CheckResult]) -> Self {
        let passed = results.iter().filter(|r| r.passed).count();
        let total = results.len();
        let score = if total == 0 {
            100.0
        } else {
            passed as f64 * 100.0 / total as f64
        };

        Self {
            passed,
            total,
            score,
            results,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Parse configuration from command line and environment
    let config = Config::from_args_and_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    match config.command.clone() {
        Command::Serve => {
            serve(config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate { file, json } => run_validate(&config, &file, json),
        Command::Grade {
            checks,
            html,
            css,
            json,
        } => run_grade(&config, &checks, html.as_deref(), css.as_deref(), json),
    }
}

fn run_validate(config: &Config, file: &Path, json: bool) -> Result<ExitCode> {
    let templates = config.message_templates()?;
    let html = config.read_input(file)?;
    let result = validate_document_with(&html, &templates);

    if json {
        println!("{}", serde_json::to_string_pretty(&result.diagnostics)?);
    } else {
        for diagnostic in &result.diagnostics {
            println!(
                "{}:{}: {:?} [{}] {}",
                file.display(),
                diagnostic.position,
                diagnostic.severity,
                diagnostic.code.as_str(),
                diagnostic.message
            );
        }
        println!(
            "{} errors, {} warnings",
            result.error_count(),
            result.warning_count()
        );
    }

    Ok(if result.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run_grade(
    config: &Config,
    checks_path: &Path,
    html_path: Option<&Path>,
    css_path: Option<&Path>,
    json: bool,
) -> Result<ExitCode> {
    if html_path.is_none() && css_path.is_none() {
        bail!("nothing to grade: pass --html and/or --css");
    }

    let lesson = LessonChecks::load(checks_path)?;
    let html = html_path
        .map(|path| config.read_input(path))
        .transpose()?
        .unwrap_or_default();
    let css = css_path
        .map(|path| config.read_input(path))
        .transpose()?
        .unwrap_or_default();

    log::info!(
        "grading {} checks from {}",
        lesson.checks.len(),
        checks_path.display()
    );

    let results = evaluate_checks(&lesson.checks, &Submission::new(&html, &css));
    let report = GradeReport::new(&results);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for (check, result) in lesson.checks.iter().zip(&results) {
            let mark = if result.passed { "PASS" } else { "FAIL" };
            println!("{} {}: {}", mark, result.check_id, result.message);
            if !result.passed && !check.hint.is_empty() {
                println!("     hint: {}", check.hint);
            }
        }
        println!(
            "{}/{} checks passed ({:.0}%)",
            report.passed, report.total, report.score
        );
    }

    Ok(if report.passed == report.total {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
