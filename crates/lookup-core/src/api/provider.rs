//! The single data-provider contract the rest of the crate consumes:
//! "give me every participant record, or tell me why you couldn't".

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::Config;
use crate::models::ParticipantRecord;

use super::client::parse_participants;
use super::ApiClient;

/// Where participant records come from.
#[derive(Debug, Clone)]
pub enum DataSource {
    Http(ApiClient),
    File(PathBuf),
}

impl DataSource {
    pub fn describe(&self) -> String {
        match self {
            DataSource::Http(client) => client.endpoint().to_string(),
            DataSource::File(path) => path.display().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParticipantProvider {
    source: DataSource,
    ignored_columns: Vec<String>,
}

impl ParticipantProvider {
    pub fn new(source: DataSource, ignored_columns: Vec<String>) -> Self {
        Self {
            source,
            ignored_columns,
        }
    }

    /// Build a provider from config. A file path, when given, replaces the
    /// configured HTTP endpoint.
    pub fn from_config(config: &Config, file: Option<PathBuf>) -> Result<Self> {
        let source = match file {
            Some(path) => DataSource::File(path),
            None => DataSource::Http(ApiClient::new(
                config.endpoint.clone(),
                config.request_timeout(),
            )?),
        };
        Ok(Self::new(source, config.ignored_columns.clone()))
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Fetch the full dataset. No retries.
    pub async fn fetch(&self) -> Result<Vec<ParticipantRecord>> {
        info!(source = %self.source.describe(), "Loading participants");

        let mut records = match &self.source {
            DataSource::Http(client) => client.fetch_participants().await?,
            DataSource::File(path) => {
                let contents = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                parse_participants(&contents)
                    .with_context(|| format!("Failed to parse {}", path.display()))?
            }
        };

        for record in &mut records {
            for column in &self.ignored_columns {
                record.remove_column(column);
            }
        }

        debug!(count = records.len(), "Participants loaded");
        Ok(records)
    }
}

/// User-facing message for a failed fetch.
pub fn fetch_error_message(error: &anyhow::Error) -> String {
    format!("Problem fetching the data: {:#}", error)
}
