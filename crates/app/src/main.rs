use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::model::{DEFAULT_QUESTION_LIMIT, QuestionBank, QuizConfig};
use services::HistoryService;
use storage::load_question_bank;
use storage::repository::Storage;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidLimit { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidLimit { raw } => write!(f, "invalid --limit value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    bank: Arc<QuestionBank>,
    config: QuizConfig,
    history: Arc<HistoryService>,
}

impl UiApp for DesktopApp {
    fn question_bank(&self) -> Arc<QuestionBank> {
        Arc::clone(&self.bank)
    }

    fn quiz_config(&self) -> QuizConfig {
        self.config.clone()
    }

    fn history(&self) -> Arc<HistoryService> {
        Arc::clone(&self.history)
    }
}

struct Args {
    bank_path: PathBuf,
    db_url: String,
    question_limit: i64,
    subject_name: String,
    verbose: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui      [--bank <path>] [--db <sqlite_url>] [--limit <n>]");
    eprintln!("                              [--subject <name>] [--verbose]");
    eprintln!("  cargo run -p app -- history [--db <sqlite_url>] [--verbose]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --bank questions.json");
    eprintln!("  --db sqlite://quiz.sqlite3");
    eprintln!("  --limit {DEFAULT_QUESTION_LIMIT}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_BANK, QUIZ_DB_URL, QUIZ_QUESTION_LIMIT, QUIZ_SUBJECT, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    History,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "history" => Some(Self::History),
            _ => None,
        }
    }
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut bank_path = std::env::var("QUIZ_BANK")
            .ok()
            .map_or_else(|| PathBuf::from("questions.json"), PathBuf::from);
        let mut db_url = std::env::var("QUIZ_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://quiz.sqlite3".into(), normalize_sqlite_url);
        // A malformed env value falls back to the default; a malformed flag is an error.
        let mut question_limit = std::env::var("QUIZ_QUESTION_LIMIT")
            .ok()
            .and_then(|value| value.trim().parse::<i64>().ok())
            .unwrap_or(DEFAULT_QUESTION_LIMIT);
        let mut subject_name = std::env::var("QUIZ_SUBJECT").unwrap_or_default();
        let mut verbose = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--bank" => {
                    bank_path = PathBuf::from(require_value(args, "--bank")?);
                }
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--limit" => {
                    let value = require_value(args, "--limit")?;
                    question_limit = value
                        .trim()
                        .parse()
                        .map_err(|_| ArgsError::InvalidLimit { raw: value.clone() })?;
                }
                "--subject" => {
                    subject_name = require_value(args, "--subject")?;
                }
                "--verbose" | "-v" => verbose = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            bank_path,
            db_url,
            question_limit,
            subject_name,
            verbose,
        })
    }

    fn quiz_config(&self) -> QuizConfig {
        QuizConfig::default()
            .with_question_limit(self.question_limit)
            .with_subject_name(self.subject_name.trim())
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand launches the UI.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with('-') => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with('-') {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing(parsed.verbose);

    // Open + migrate SQLite at startup so core/services stay free of I/O setup.
    prepare_sqlite_file(&parsed.db_url)?;
    let storage = Storage::sqlite(&parsed.db_url).await?;
    let history = Arc::new(HistoryService::new(Arc::clone(&storage.kv)));

    match cmd {
        Command::Ui => {
            let bank = load_question_bank(&parsed.bank_path).map_err(|err| {
                tracing::error!(path = %parsed.bank_path.display(), %err, "question bank unusable");
                err
            })?;
            if bank.is_empty() {
                tracing::warn!(path = %parsed.bank_path.display(), "question bank is empty");
            }

            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                bank: Arc::new(bank),
                config: parsed.quiz_config(),
                history,
            });
            let context = build_app_context(&app);

            let title = if parsed.subject_name.trim().is_empty() {
                "Quiz".to_string()
            } else {
                format!("Quiz - {}", parsed.subject_name.trim())
            };
            // Some window managers default new windows to always-on-top; keep it a normal window.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title(title)
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::History => {
            let list = history.list().await;
            if let Some(warning) = &list.warning {
                eprintln!("warning: {warning}");
            }
            if list.records.is_empty() {
                println!("No attempts recorded.");
            }
            for record in &list.records {
                let subject = if record.subject_name.is_empty() {
                    "-"
                } else {
                    record.subject_name.as_str()
                };
                println!(
                    "{}  {subject}  {}  {}/{} ({}%)",
                    record.timestamp.format("%Y-%m-%d %H:%M UTC"),
                    record.exam_label,
                    record.correct_count,
                    record.total_count,
                    record.score_percent
                );
            }
            Ok(())
        }
    }
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
