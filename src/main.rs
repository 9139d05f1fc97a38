use chrono::Utc;
use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ardent_study::domain::{LearningProgress, Quality};
use ardent_study::quiz::QuizQuestion;
use ardent_study::{config, db, services, srs};

#[derive(Parser)]
#[command(name = "ardent-study", about = "Spaced-repetition review scheduling for concepts", version)]
struct Cli {
  /// Database file (overrides config.toml and DATABASE_PATH)
  #[arg(long, global = true)]
  db: Option<PathBuf>,

  /// Output format
  #[arg(long, global = true, default_value = "plain")]
  format: OutputFormat,

  #[command(subcommand)]
  command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
enum OutputFormat {
  Plain,
  Json,
}

#[derive(Subcommand)]
enum Command {
  /// Record a review of a concept
  Submit {
    user: String,
    concept: String,
    /// Recall quality 0-5 (out-of-range values are clamped)
    #[arg(short, long, allow_hyphen_values = true)]
    quality: Option<i64>,
  },

  /// Grade a quiz and record the review it implies
  Quiz {
    user: String,
    concept: String,
    /// JSON array of questions
    #[arg(long)]
    questions: PathBuf,
    /// JSON object mapping question index to the chosen answer
    #[arg(long)]
    answers: PathBuf,
    /// Override the quality derived from the score
    #[arg(short, long, allow_hyphen_values = true)]
    quality: Option<i64>,
  },

  /// List concepts due for review, most overdue first
  Due { user: String },

  /// Show progress for every concept a learner has
  Progress { user: String },

  /// Make every concept of a learner due now
  MakeAllDue { user: String },
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() -> ExitCode {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config::DEFAULT_LOG_FILTER.into()),
    )
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .init();

  let cli = Cli::parse();
  let settings = config::load_settings();

  match run(cli, settings) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      tracing::error!("{}", e);
      ExitCode::FAILURE
    }
  }
}

fn run(cli: Cli, settings: config::Settings) -> CliResult {
  let db_path = cli.db.unwrap_or(settings.database_path);
  let pool = db::init_db(&db_path)?;
  let mut conn = db::try_lock(&pool)?;
  let now = Utc::now();

  match cli.command {
    Command::Submit { user, concept, quality } => {
      let quality = quality.map(Quality::clamped).unwrap_or(settings.default_quality);
      let progress = services::submit_review(&mut conn, &user, &concept, quality, now)?;
      print_records(&cli.format, &[progress])
    }
    Command::Quiz { user, concept, questions, answers, quality } => {
      let questions: Vec<QuizQuestion> = read_json(&questions)?;
      let answers: HashMap<String, String> = read_json(&answers)?;
      let submission = services::submit_quiz(
        &mut conn,
        &user,
        &concept,
        &questions,
        &answers,
        quality.map(Quality::clamped),
        now,
      )?;
      match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&submission)?),
        OutputFormat::Plain => {
          println!(
            "Score {}/{} ({:.0}%), quality {}",
            submission.score.score, submission.score.total, submission.score.percentage, submission.quality
          );
          print_records(&cli.format, &[submission.progress])?;
        }
      }
      Ok(())
    }
    Command::Due { user } => {
      let due = services::due_for_review(&conn, &user, now)?;
      if due.is_empty() && matches!(cli.format, OutputFormat::Plain) {
        println!("Nothing due for {}", user);
        return Ok(());
      }
      print_records(&cli.format, &due)
    }
    Command::Progress { user } => {
      let all = db::get_user_progress(&conn, &user)?;
      print_records(&cli.format, &all)
    }
    Command::MakeAllDue { user } => {
      let updated = db::make_all_due(&conn, &user)?;
      tracing::info!("Made {} concepts due for {}", updated, user);
      Ok(())
    }
  }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
  let contents = std::fs::read_to_string(path)
    .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
  Ok(serde_json::from_str(&contents)?)
}

fn print_records(format: &OutputFormat, records: &[LearningProgress]) -> CliResult {
  let now = Utc::now();
  match format {
    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(records)?),
    OutputFormat::Plain => {
      for p in records {
        let status = srs::ReviewStatus::from_next_review(p.state.next_review, now);
        println!(
          "{:<24} reviews {:>3}  mastery {:.1}  {:<9}  {}",
          p.concept_id,
          p.state.review_count,
          p.state.mastery_level,
          status.as_str(),
          srs::describe_next_review(p.state.next_review, now)
        );
      }
    }
  }
  Ok(())
}
