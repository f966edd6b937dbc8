//! Command-line interface definitions.
//!
//! Every screen of the companion maps to a subcommand. Global flags control
//! logging and may appear anywhere on the command line.

use crate::constants::{
    APP_DESCRIPTION, APP_NAME, DEFAULT_PERIOD_DAYS, LOG_FORMAT_JSON, LOG_FORMAT_TEXT,
};
use crate::content::ExerciseCategory;
use crate::journal_core::Mood;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::str::FromStr;

/// Parsed command line.
#[derive(Parser, Debug)]
#[clap(name = APP_NAME, about = APP_DESCRIPTION)]
#[clap(author, version, long_about = None)]
pub struct CliArgs {
    /// Print verbose output
    #[clap(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Log output format
    #[clap(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    #[clap(subcommand)]
    pub command: Command,
}

/// Formatter used for log output on stderr.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Text => LOG_FORMAT_TEXT,
            LogFormat::Json => LOG_FORMAT_JSON,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a journal entry
    Journal(JournalArgs),

    /// List journal entries, newest first
    List {
        /// Show at most this many entries
        #[clap(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Count entries per mood
    Moods {
        /// Only count entries from the last N days
        #[clap(short, long)]
        days: Option<i64>,
    },

    /// Show insights about recent moods
    Insights,

    /// Show the current journaling streak
    Streak,

    /// Log nights of sleep or review sleep statistics
    #[clap(subcommand)]
    Sleep(SleepCommand),

    /// Print the audio locator attached to an entry
    Audio {
        /// Entry id as shown by `list`
        id: i64,
    },

    /// Talk to the companion
    Chat {
        /// Your message; leave empty for a greeting and suggestions
        message: Vec<String>,
    },

    /// List guided exercises
    Exercises {
        #[clap(short, long, value_enum)]
        category: Option<ExerciseKind>,
    },

    /// Show a wellness tip
    Tip {
        /// Pick a random tip instead of today's
        #[clap(short, long)]
        random: bool,
    },
}

#[derive(Args, Debug)]
pub struct JournalArgs {
    /// How you feel: happy, calm, neutral, sad, anxious or energetic
    #[clap(short, long)]
    pub mood: Option<Mood>,

    /// What happened today
    #[clap(short, long, default_value = "")]
    pub text: String,

    /// Locator of a recorded voice note to attach
    #[clap(short, long)]
    pub audio: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum SleepCommand {
    /// Log a night of sleep
    Log {
        /// Hours slept
        hours: f64,

        /// How the night felt, e.g. Good, Restless
        #[clap(short, long, default_value = "")]
        quality: String,

        /// Night being logged (format: YYYY-MM-DD or YYYYMMDD), defaults to today
        #[clap(short, long)]
        date: Option<String>,
    },

    /// Average and best sleep over a period
    Stats {
        /// Period length in days
        #[clap(short, long, default_value_t = DEFAULT_PERIOD_DAYS)]
        days: i64,
    },
}

/// Exercise categories as spelled on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExerciseKind {
    Breathing,
    Games,
    Sleep,
}

impl From<ExerciseKind> for ExerciseCategory {
    fn from(kind: ExerciseKind) -> Self {
        match kind {
            ExerciseKind::Breathing => ExerciseCategory::Breathing,
            ExerciseKind::Games => ExerciseCategory::MindfulnessGame,
            ExerciseKind::Sleep => ExerciseCategory::SleepRelaxation,
        }
    }
}

/// Parses a date in YYYY-MM-DD or YYYYMMDD format.
pub fn parse_date(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::from_str(date_str).or_else(|_| NaiveDate::parse_from_str(date_str, "%Y%m%d"))
}
