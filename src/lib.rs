/*!
# wellspring

wellspring is the data layer of a personal wellness companion. It keeps a mood
journal with optional voice notes, a sleep log, and derives simple analytics
from both: mood frequencies, heuristic insights, sleep averages and streaks.

## Architecture

- `store`: key-value persistence (in-memory and SQLite)
- `journal_core`: entry records and validation
- `journal`: repositories owning the journal and the sleep log
- `audio`: voice-note locators and the scoped audio session
- `ops`: pure analytics and the canned chat replies
- `content`: wellness tips and guided exercises
- `companion`: the facade a user interface talks to
- `config`, `cli`, `constants`, `errors`: ambient plumbing

## Usage Example

```rust
use std::sync::Arc;
use wellspring::journal_core::Mood;
use wellspring::store::SqliteStore;
use wellspring::Companion;

fn main() -> wellspring::AppResult<()> {
    let store = SqliteStore::open_in_memory()?;
    store.initialize_schema()?;

    let mut companion = Companion::new(Arc::new(store));
    companion.load_all()?;
    companion.create_entry(Some(Mood::Calm), "Long walk after class", None)?;

    for insight in companion.insights() {
        println!("{}", insight);
    }
    Ok(())
}
```
*/

/// Voice-note references and audio session handling
pub mod audio;
/// Command-line interface handling using clap
pub mod cli;
/// The user-interface boundary
pub mod companion;
/// Configuration loading and validation
pub mod config;
/// Application-wide constants
pub mod constants;
/// Static wellness content
pub mod content;
/// Error types and utilities for error handling
pub mod errors;
/// Journal and sleep repositories
pub mod journal;
/// Entry records and validation
pub mod journal_core;
/// Derived views and chat replies
pub mod ops;
/// Key-value persistence
pub mod store;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use companion::{Companion, LoadIssue, LoadOutcome};
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use journal_core::{Mood, MoodEntry, SleepEntry};
