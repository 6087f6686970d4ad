use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use directories::ProjectDirs;

use crate::catalog::Variant;
use crate::session::{Scorecard, SessionId};

/// One row of the session log.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRecord {
    pub date: String,
    pub session_id: String,
    pub variant: String,
    pub score: usize,
    pub total: usize,
    pub tier: String,
}

impl SessionRecord {
    pub fn new(session_id: &SessionId, variant: Variant, card: &Scorecard) -> Self {
        Self {
            date: Local::now().format("%c").to_string(),
            session_id: session_id.as_str().to_string(),
            variant: variant.to_string(),
            score: card.score,
            total: card.total,
            tier: card.tier.to_string(),
        }
    }
}

/// Where finished sessions get recorded. The quiz itself never touches
/// this; the app hands a record over after scoring and ignores failures.
pub trait ResultSink {
    fn record(&self, record: &SessionRecord) -> io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileResultSink {
    path: PathBuf,
}

impl FileResultSink {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "skeptik") {
            pd.config_dir().join("results.csv")
        } else {
            PathBuf::from("skeptik_results.csv")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileResultSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultSink for FileResultSink {
    fn record(&self, record: &SessionRecord) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // If the log doesn't exist yet, we need to emit a header
        let needs_header = !self.path.exists();

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        let mut wtr = csv::Writer::from_writer(file);

        if needs_header {
            wtr.write_record(["date", "session_id", "variant", "score", "total", "tier"])?;
        }

        wtr.write_record([
            record.date.as_str(),
            record.session_id.as_str(),
            record.variant.as_str(),
            &record.score.to_string(),
            &record.total.to_string(),
            record.tier.as_str(),
        ])?;
        wtr.flush()?;

        Ok(())
    }
}
