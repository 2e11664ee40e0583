use anyhow::{Context, Result};
use clap::Parser;
use hypotest::cli::{Cli, Command, OutputFormat, QuizCommand, ScenarioCommand, TestArgs};
use hypotest::config::DashboardConfig;
use hypotest::critical_values::{self, memory_anchors};
use hypotest::distribution::StatrsDistributions;
use hypotest::evaluator::{self, TestInput, TestKind, TestResult};
use hypotest::guide;
use hypotest::glossary;
use hypotest::quiz::{Question, QuestionBank, QuizState};
use hypotest::report::{self, JsonReport, Walkthrough};
use hypotest::scenarios::ScenarioCatalog;
use serde::Serialize;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn load_config(path: Option<&Path>) -> Result<DashboardConfig> {
    match path {
        Some(path) => {
            let config = DashboardConfig::from_file(path)?;
            tracing::debug!(path = %path.display(), ?config, "loaded configuration");
            Ok(config)
        }
        None => Ok(DashboardConfig::default()),
    }
}

fn load_catalog(path: Option<&Path>) -> Result<ScenarioCatalog> {
    let catalog = match path {
        Some(path) => ScenarioCatalog::from_file(path)
            .with_context(|| format!("Failed to load scenarios from {}", path.display()))?,
        None => ScenarioCatalog::builtin()?,
    };
    Ok(catalog)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Summary block shared by `z`, `t` and `scenario run`
fn result_text(result: &TestResult, decimals: usize) -> String {
    let mut text = format!(
        "{} ({}, α = {})\n",
        result.kind,
        result.tail.label(),
        result.significance_level
    );
    if let Some(df) = result.degrees_of_freedom {
        text.push_str(&format!("  degrees of freedom  {df}\n"));
    }
    text.push_str(&format!(
        "  standard error      {:.*}\n",
        decimals, result.standard_error
    ));
    text.push_str(&format!(
        "  {} statistic         {:.*}\n",
        result.kind.symbol(),
        decimals,
        result.statistic
    ));
    text.push_str(&format!(
        "  critical value      {:.*}\n",
        decimals, result.critical_value
    ));
    text.push_str(&format!("  p-value             {:.*}\n", decimals, result.p_value));
    text.push_str(&format!("  decision            {}\n", result.decision_label()));
    text
}

fn run_test(
    kind: TestKind,
    args: &TestArgs,
    config: &DashboardConfig,
    format: OutputFormat,
) -> Result<()> {
    let input = args.to_input(config.significance_level);
    let result = evaluator::evaluate(kind, &input)?;
    let walkthrough = Walkthrough::new(&input, &result).with_decimals(config.decimals);
    let ci = if args.ci {
        Some(evaluator::confidence_interval(kind, &input)?)
    } else {
        None
    };
    let contrast = match args.contrast {
        Some(tail) => Some(report::direction_contrast(&input, kind, tail)?),
        None => None,
    };

    match format {
        OutputFormat::Json => {
            let mut json = JsonReport::new(&input, &result);
            if args.steps {
                json = json.with_steps(&walkthrough);
            }
            if let Some(ci) = ci {
                json = json.with_confidence_interval(ci);
            }
            if let Some(contrast) = contrast {
                json = json.with_contrast(contrast);
            }
            println!("{}", json.to_json()?);
        }
        OutputFormat::Text => {
            print!("{}", result_text(&result, config.decimals));
            if let Some(ci) = ci {
                println!(
                    "  {:.0}% CI              [{:.*}, {:.*}]",
                    ci.confidence_level * 100.0,
                    config.decimals,
                    ci.lower,
                    config.decimals,
                    ci.upper
                );
            }
            if args.steps {
                println!();
                print!("{}", walkthrough.to_report_string());
            }
            if let Some(contrast) = contrast {
                println!();
                print!("{}", contrast.to_report_string(config.decimals));
            }
        }
    }
    Ok(())
}

fn run_scenario(
    command: ScenarioCommand,
    config: &DashboardConfig,
    format: OutputFormat,
) -> Result<()> {
    match command {
        ScenarioCommand::List { domain, catalog } => {
            let catalog = load_catalog(catalog.as_deref())?;
            let scenarios: Vec<_> = catalog
                .iter()
                .filter(|s| domain.map_or(true, |d| s.domain == d))
                .collect();

            match format {
                OutputFormat::Json => print_json(&scenarios)?,
                OutputFormat::Text => {
                    for s in scenarios {
                        println!(
                            "{:<16} {:<8} {} {:<6} {}",
                            s.id,
                            s.domain,
                            s.kind.symbol(),
                            s.tail,
                            s.title
                        );
                    }
                }
            }
        }
        ScenarioCommand::Run {
            id,
            alpha,
            steps,
            catalog,
        } => {
            let catalog = load_catalog(catalog.as_deref())?;
            let scenario = catalog.get(&id)?;
            let input: TestInput = scenario.input(alpha);
            let result = scenario.evaluate(alpha)?;
            let walkthrough = Walkthrough::new(&input, &result).with_decimals(config.decimals);

            match format {
                OutputFormat::Json => {
                    let mut json = JsonReport::new(&input, &result).with_scenario(&scenario.id);
                    if steps {
                        json = json.with_steps(&walkthrough);
                    }
                    println!("{}", json.to_json()?);
                }
                OutputFormat::Text => {
                    println!("{} [{}]", scenario.title, scenario.field);
                    println!("{}", scenario.question);
                    println!(
                        "x̄ = {} {units}, μ₀ = {} {units}, dispersion = {}, n = {}",
                        scenario.sample_mean,
                        scenario.hypothesized_mean,
                        scenario.dispersion,
                        scenario.sample_size,
                        units = scenario.units
                    );
                    println!();
                    print!("{}", result_text(&result, config.decimals));
                    if steps {
                        println!();
                        print!("{}", walkthrough.to_report_string());
                    }
                }
            }
        }
    }
    Ok(())
}

fn run_table(config: &DashboardConfig, format: OutputFormat) -> Result<()> {
    let dist = StatrsDistributions::new();
    let rows = critical_values::reference_table(&dist, &config.alpha_grid, &config.reference_dfs)?;

    match format {
        OutputFormat::Json => print_json(&rows)?,
        OutputFormat::Text => {
            let d = config.decimals;
            let mut header = format!("{:<8} {:>10} {:>10}", "α", "z 1-tail", "z 2-tail");
            for df in &config.reference_dfs {
                header.push_str(&format!(" {:>10}", format!("t({df}) 2-t")));
            }
            println!("{header}");
            for row in &rows {
                let mut line = format!(
                    "{:<8} {:>10.*} {:>10.*}",
                    row.alpha, d, row.one_tail_z, d, row.two_tail_z
                );
                for (_, t) in &row.two_tail_t {
                    line.push_str(&format!(" {:>10.*}", d, t));
                }
                println!("{line}");
            }
            println!();
            let anchors: Vec<String> = memory_anchors()
                .iter()
                .map(|a| format!("{:.3}", a.z))
                .collect();
            println!("Memory anchors: {}", anchors.join(" → "));
        }
    }
    Ok(())
}

fn run_explore(
    alpha: Option<f64>,
    tail: hypotest::evaluator::Tail,
    dfs: &[u64],
    config: &DashboardConfig,
    format: OutputFormat,
) -> Result<()> {
    let alpha = alpha.unwrap_or(config.significance_level);
    let dfs = if dfs.is_empty() {
        config.reference_dfs.as_slice()
    } else {
        dfs
    };
    let exploration = critical_values::explore(&StatrsDistributions::new(), alpha, tail, dfs)?;

    match format {
        OutputFormat::Json => print_json(&exploration)?,
        OutputFormat::Text => {
            let d = config.decimals;
            println!("{} at α = {}", tail.label(), alpha);
            println!("  z          {:.*}", d, exploration.z_critical);
            for (df, t) in &exploration.t_critical {
                println!("  t(df={df:<4}) {:.*}", d, t);
            }
            if exploration.t_exceeds_z() {
                println!("t critical values exceed z: heavier tails need a larger statistic to reject.");
            }
        }
    }
    Ok(())
}

fn run_glossary(term: Option<String>, format: OutputFormat) -> Result<()> {
    let entries: Vec<&glossary::Term> = match term.as_deref() {
        None => glossary::GLOSSARY.iter().collect(),
        Some(query) => match glossary::lookup(query) {
            Some(entry) => vec![entry],
            None => glossary::search(query),
        },
    };
    if entries.is_empty() {
        anyhow::bail!("No glossary entry matches '{}'", term.unwrap_or_default());
    }

    match format {
        OutputFormat::Json => print_json(&entries)?,
        OutputFormat::Text => {
            for (i, entry) in entries.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                match entry.symbol {
                    Some(symbol) => println!("{}  [{}]", entry.term, symbol),
                    None => println!("{}", entry.term),
                }
                println!("  {}", entry.definition);
                println!("  Formula: {}", entry.formula);
                println!("  Example: {}", entry.example);
            }
        }
    }
    Ok(())
}

fn run_guide(claim: guide::Claim, sigma_known: bool, format: OutputFormat) -> Result<()> {
    let rec = guide::recommend(claim, sigma_known);
    match format {
        OutputFormat::Json => print_json(&rec)?,
        OutputFormat::Text => {
            println!("Use a {} {} (H₁: {})", rec.tail.label(), rec.kind, rec.alternative);
            for reason in &rec.rationale {
                println!("  - {reason}");
            }
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonQuizAnswer<'a> {
    id: &'a str,
    choice: usize,
    correct: bool,
    answer: usize,
    explanation: &'a str,
}

#[derive(Serialize)]
struct JsonQuizResult<'a> {
    answers: Vec<JsonQuizAnswer<'a>>,
    score: hypotest::quiz::QuizScore,
}

fn run_quiz(command: QuizCommand, format: OutputFormat) -> Result<()> {
    let bank = QuestionBank::builtin()?;

    match command {
        QuizCommand::List { level, topic } => {
            let questions: Vec<&Question> = bank.filter(level, topic.as_deref()).collect();
            match format {
                OutputFormat::Json => print_json(&questions)?,
                OutputFormat::Text => {
                    for q in &questions {
                        println!("[{}] {} / {}", q.id, q.level, q.topic);
                        println!("  {}", q.prompt);
                        for (i, option) in q.options.iter().enumerate() {
                            println!("    {}) {}", Question::option_label(i), option);
                        }
                    }
                    println!("{} question(s) shown", questions.len());
                }
            }
        }
        QuizCommand::Score { answers } => {
            let mut state = QuizState::new();
            let mut graded = Vec::with_capacity(answers.len());
            for (id, choice) in &answers {
                // one answer per question, so the graded list matches the score
                if state.answer(id).is_some() {
                    anyhow::bail!("Question '{id}' answered more than once");
                }
                let correct = state.record(&bank, id, *choice)?;
                let question = bank.get(id)?;
                graded.push(JsonQuizAnswer {
                    id: &question.id,
                    choice: *choice,
                    correct,
                    answer: question.answer,
                    explanation: &question.explanation,
                });
            }
            let score = state.score(&bank);

            match format {
                OutputFormat::Json => print_json(&JsonQuizResult {
                    answers: graded,
                    score,
                })?,
                OutputFormat::Text => {
                    for g in &graded {
                        let mark = if g.correct { "correct" } else { "incorrect" };
                        println!(
                            "{}: {} {} (answer {})",
                            g.id,
                            Question::option_label(g.choice),
                            mark,
                            Question::option_label(g.answer)
                        );
                        println!("  {}", g.explanation);
                    }
                    println!(
                        "Score: {}/{} ({:.0}%)",
                        score.correct, score.attempted, score.percent
                    );
                    if let Some(band) = score.band {
                        println!("Band: {band:?}");
                    }
                }
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(cli.debug);

    let config = load_config(cli.config.as_deref())?;
    let format = cli.format;

    match cli.command {
        Command::Z(args) => run_test(TestKind::Z, &args, &config, format),
        Command::T(args) => run_test(TestKind::T, &args, &config, format),
        Command::Scenario { action } => run_scenario(action, &config, format),
        Command::Table => run_table(&config, format),
        Command::Explore { alpha, tail, df } => run_explore(alpha, tail, &df, &config, format),
        Command::Glossary { term } => run_glossary(term, format),
        Command::Guide { claim, sigma_known } => run_guide(claim, sigma_known, format),
        Command::Quiz { action } => run_quiz(action, format),
    }
}
