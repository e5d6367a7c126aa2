//! Season data storage.
//!
//! The engine treats persistence as an external collaborator: fixtures,
//! users and committed tips live in per-season JSONL files the host
//! could just as well replace with a spreadsheet or a database. There
//! is deliberately no locking and no uniqueness constraint on the tip
//! write path; at-most-one-tip-per-user-per-round is enforced after
//! the fact by the duplicate resolver.

mod jsonl;

pub use jsonl::{JsonlReader, JsonlWriter};

use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use crate::models::{CommittedTip, Fixture, User};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Directory holding one season's files.
    pub fn season_dir(&self, season: u32) -> PathBuf {
        self.data_dir.join(season.to_string())
    }

    pub fn fixtures_path(&self, season: u32) -> PathBuf {
        self.season_dir(season).join("fixtures.jsonl")
    }

    pub fn tips_path(&self, season: u32) -> PathBuf {
        self.season_dir(season).join("tips.jsonl")
    }

    pub fn users_path(&self, season: u32) -> PathBuf {
        self.season_dir(season).join("users.jsonl")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

/// Read/write access to one season's fixtures, users and tips.
pub struct SeasonStore {
    config: StorageConfig,
    season: u32,
}

impl SeasonStore {
    pub fn new(config: StorageConfig, season: u32) -> Self {
        Self { config, season }
    }

    pub fn season(&self) -> u32 {
        self.season
    }

    /// Load the season's fixture list.
    pub fn load_fixtures(&self) -> Result<Vec<Fixture>, StorageError> {
        JsonlReader::new(self.config.fixtures_path(self.season)).read_all()
    }

    /// Replace the season's fixture list (fixture feed refresh).
    pub fn save_fixtures(&self, fixtures: &[Fixture]) -> Result<usize, StorageError> {
        JsonlWriter::new(self.config.fixtures_path(self.season)).write_all(fixtures)
    }

    /// Load the registered participants.
    pub fn load_users(&self) -> Result<Vec<User>, StorageError> {
        JsonlReader::new(self.config.users_path(self.season)).read_all()
    }

    /// Replace the registered participant list.
    pub fn save_users(&self, users: &[User]) -> Result<usize, StorageError> {
        JsonlWriter::new(self.config.users_path(self.season)).write_all(users)
    }

    /// Find a participant by email, case-insensitively.
    pub fn find_user(&self, email: &str) -> Result<Option<User>, StorageError> {
        let matches = JsonlReader::<User>::new(self.config.users_path(self.season))
            .read_where(|u| u.matches_email(email))?;
        Ok(matches.into_iter().next())
    }

    /// Load every committed tip for the season.
    pub fn load_tips(&self) -> Result<Vec<CommittedTip>, StorageError> {
        JsonlReader::new(self.config.tips_path(self.season)).read_all()
    }

    /// Append one committed tip.
    ///
    /// Plain append: concurrent submissions can race and produce
    /// duplicates, which the cleanup pass resolves later.
    pub fn append_tip(&self, tip: &CommittedTip) -> Result<(), StorageError> {
        JsonlWriter::new(self.config.tips_path(self.season)).append(tip)?;
        info!(email = %tip.email, round = tip.round, team = %tip.team, "Stored tip");
        Ok(())
    }

    /// Delete one stored tip matching the given record exactly.
    ///
    /// Returns whether a matching record was found. Rewrites the file
    /// without the first matching line.
    pub fn delete_tip(&self, tip: &CommittedTip) -> Result<bool, StorageError> {
        let mut tips = self.load_tips()?;

        let Some(index) = tips.iter().position(|t| t == tip) else {
            return Ok(false);
        };
        tips.remove(index);

        JsonlWriter::new(self.config.tips_path(self.season)).write_all(&tips)?;
        info!(email = %tip.email, round = tip.round, team = %tip.team, "Deleted tip");
        Ok(true)
    }
}
