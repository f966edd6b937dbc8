/*!
# wellspring

Command-line front end for the wellness companion: a mood journal with
optional voice notes, a sleep log, mood and sleep analytics, guided exercises
and a simple chat companion.

## Usage

```text
wellspring [OPTIONS] <COMMAND>

Commands:
  journal    Write a journal entry
  list       List journal entries, newest first
  moods      Count entries per mood
  insights   Show insights about recent moods
  streak     Show the current journaling streak
  sleep      Log nights of sleep or review sleep statistics
  audio      Print the audio locator attached to an entry
  chat       Talk to the companion
  exercises  List guided exercises
  tip        Show a wellness tip

Options:
  -v, --verbose                  Print verbose output
      --log-format <LOG_FORMAT>  Log output format [default: text] [possible values: text, json]
```

## Configuration

- `WELLSPRING_DIR`: data directory (defaults to `~/.local/share/wellspring`)
- `WELLSPRING_DB`: SQLite store (defaults to `<data dir>/wellspring.db`)
- `WELLSPRING_SLEEP_GOAL`: nightly sleep goal in hours (defaults to 8)
*/

use chrono::Utc;
use clap::Parser;
use std::sync::Arc;
use tracing::{debug, error, info, info_span};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;
use wellspring::cli::{parse_date, CliArgs, Command, LogFormat, SleepCommand};
use wellspring::config::Config;
use wellspring::constants::{DEFAULT_LOG_LEVEL, TRACING_SERVICE_NAME};
use wellspring::content::{self, ExerciseCategory};
use wellspring::errors::{AppError, AppResult};
use wellspring::ops::{chat, sleep_goal_progress};
use wellspring::store::{SharedStore, SqliteStore};
use wellspring::Companion;

const LIST_PREVIEW_CHARS: usize = 60;

fn main() {
    let args = CliArgs::parse();
    init_tracing(args.log_format, args.verbose);

    let correlation_id = Uuid::new_v4();
    let span = info_span!(
        "app_invocation",
        service = TRACING_SERVICE_NAME,
        correlation_id = %correlation_id
    );
    let _guard = span.enter();

    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(format: LogFormat, verbose: bool) {
    let default_level = if verbose { "debug" } else { DEFAULT_LOG_LEVEL };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

fn run(args: CliArgs) -> AppResult<()> {
    debug!("CLI arguments: {:?}", args);
    info!("Starting wellspring (log format: {})", args.log_format.as_str());

    // Commands that only read static content never touch the store
    if print_content(&args.command) {
        return Ok(());
    }
    run_with_store(args.command)
}

/// Serves the static-content commands. Returns `false` for everything else.
fn print_content(command: &Command) -> bool {
    match command {
        Command::Chat { message } => print_chat(&message.join(" ")),
        Command::Exercises { category } => print_exercises(category.map(ExerciseCategory::from)),
        Command::Tip { random } => {
            let tip = if *random {
                content::random_tip(&mut rand::rng())
            } else {
                content::tip_of_the_day(Utc::now().date_naive())
            };
            println!("{}", tip);
        }
        _ => return false,
    }
    true
}

fn run_with_store(command: Command) -> AppResult<()> {
    let config = Config::load()?;
    config.validate()?;
    debug!("Configuration: {:?}", config);

    config.ensure_data_dir()?;
    let sqlite = SqliteStore::open(&config.db_path)?;
    sqlite.initialize_schema()?;
    let store: SharedStore = Arc::new(sqlite);

    let mut companion = Companion::new(store);
    let outcome = companion.load_all()?;
    if !outcome.issues.is_empty() {
        eprintln!(
            "Warning: {} data problem(s) found while loading; see the log for details",
            outcome.issues.len()
        );
    }

    match command {
        Command::Journal(journal) => {
            let entries =
                companion.create_entry(journal.mood, &journal.text, journal.audio.as_deref())?;
            if let Some(entry) = entries.last() {
                println!(
                    "Saved entry {} ({} {})",
                    entry.id,
                    entry.mood.known().map(|m| m.emoji()).unwrap_or("?"),
                    entry.mood
                );
            }
        }
        Command::List { limit } => {
            let entries = companion.list_entries();
            if entries.is_empty() {
                println!("No journal entries yet.");
            }
            for entry in entries.iter().rev().take(limit.unwrap_or(usize::MAX)) {
                println!(
                    "{}  {}  {} {:<10} {}{}",
                    entry.id,
                    entry.date.format("%Y-%m-%d %H:%M"),
                    entry.mood.known().map(|m| m.emoji()).unwrap_or("?"),
                    entry.mood.to_string(),
                    entry.preview(LIST_PREVIEW_CHARS),
                    if entry.has_audio { " [audio]" } else { "" }
                );
            }
        }
        Command::Moods { days: None } => {
            let frequencies = companion.mood_frequencies();
            for (mood, count) in &frequencies.counts {
                println!("{} {:<10} {}", mood.emoji(), mood.as_str(), count);
            }
            if frequencies.unrecognized > 0 {
                println!("  {:<10} {}", "unrecognized", frequencies.unrecognized);
            }
        }
        Command::Moods { days: Some(days) } => {
            let summary = companion.mood_summary(days);
            println!("Entries in the last {} days: {}", days, summary.total);
            for (mood, count) in summary.counts.iter().filter(|(_, &count)| count > 0) {
                println!("{} {:<10} {}", mood.emoji(), mood.as_str(), count);
            }
            if let Some(mood) = summary.most_common {
                println!("Most common: {} {}", mood.emoji(), mood);
            }
        }
        Command::Insights => {
            for insight in companion.insights() {
                println!("- {}", insight);
            }
        }
        Command::Streak => {
            let streak = companion.streak();
            println!(
                "Current streak: {} day{}",
                streak,
                if streak == 1 { "" } else { "s" }
            );
        }
        Command::Sleep(SleepCommand::Log {
            hours,
            quality,
            date,
        }) => {
            let date = date
                .as_deref()
                .map(parse_date)
                .transpose()
                .map_err(|e| AppError::Journal(format!("Invalid date format: {}", e)))?;
            let entries = companion.log_sleep(hours, &quality, date)?;
            if let Some(entry) = entries.last() {
                println!(
                    "Logged {} hours ({}) for {}",
                    entry.hours, entry.quality, entry.date
                );
            }
        }
        Command::Sleep(SleepCommand::Stats { days }) => {
            let stats = companion.sleep_stats(days);
            println!(
                "Last {} days: {} nights, average {} hours, best {} hours",
                days, stats.total, stats.average, stats.best
            );
            println!(
                "Goal progress: {}% of {} hours",
                sleep_goal_progress(stats.average, config.sleep_goal_hours),
                config.sleep_goal_hours
            );
        }
        Command::Audio { id } => match companion.audio_locator_for(id)? {
            Some(locator) => println!("{}", locator),
            None => println!("No audio attached to entry {}", id),
        },
        // Served by print_content
        Command::Chat { .. } | Command::Exercises { .. } | Command::Tip { .. } => {}
    }

    Ok(())
}

fn print_chat(message: &str) {
    if message.trim().is_empty() {
        println!("{}", chat::GREETING);
        println!("Try one of:");
        for suggestion in chat::QUICK_REPLIES {
            println!("  {}", suggestion);
        }
    } else {
        println!("{}", chat::reply(message));
    }
}

fn print_exercises(category: Option<ExerciseCategory>) {
    for group in ExerciseCategory::ALL
        .into_iter()
        .filter(|c| category.map_or(true, |wanted| wanted == *c))
    {
        println!("{}", group.title());
        println!("  {}", group.blurb());
        for exercise in content::exercises(Some(group)) {
            println!("  - {}", exercise);
        }
        if group == ExerciseCategory::SleepRelaxation {
            println!("  Sleep tips:");
            for tip in content::SLEEP_TIPS {
                println!("  * {}", tip);
            }
        }
    }
}
