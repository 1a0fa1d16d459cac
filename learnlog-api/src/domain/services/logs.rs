use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::domain::{
    import::{imported_log_entry, parse_reading_export},
    models::{
        AuthContext, ImportSummary, ImportedBook, LogEntry, LogExport, LogId, NewLogEntry, UserId,
    },
    ports::{
        inbound::LogService,
        outbound::{Clock, LogStore, SocialStore},
    },
    ImportError, LogError, SocialError,
};

/// Implementation of the LogService inbound port.
pub struct LogServiceImpl<L, S> {
    logs: Arc<L>,
    social: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<L, S> LogServiceImpl<L, S> {
    pub fn new(logs: Arc<L>, social: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            logs,
            social,
            clock,
        }
    }
}

fn require_user(auth: &AuthContext) -> Result<&UserId, LogError> {
    auth.user_id().ok_or(LogError::NotAuthenticated)
}

#[async_trait]
impl<L: LogStore, S: SocialStore> LogService for LogServiceImpl<L, S> {
    async fn create_log(
        &self,
        auth: &AuthContext,
        entry: &NewLogEntry,
    ) -> Result<LogEntry, LogError> {
        let user_id = require_user(auth)?;
        let log = self.logs.insert_log(user_id, entry).await?;
        tracing::info!(user_id = %user_id, log_id = %log.id, "created log");
        Ok(log)
    }

    async fn my_logs(&self, auth: &AuthContext) -> Result<Vec<LogEntry>, LogError> {
        self.logs.list_logs(require_user(auth)?).await
    }

    async fn feed(&self, auth: &AuthContext) -> Result<Vec<LogEntry>, LogError> {
        let user_id = require_user(auth)?;
        let following = self
            .social
            .following_ids(user_id)
            .await
            .map_err(|e| match e {
                SocialError::NotAuthenticated => LogError::NotAuthenticated,
                other => LogError::store(other.to_string()),
            })?;

        if following.is_empty() {
            return Ok(Vec::new());
        }

        self.logs.list_shared_logs(&following).await
    }

    async fn export_logs(&self, auth: &AuthContext) -> Result<LogExport, LogError> {
        let user_id = require_user(auth)?;
        let logs = self.logs.list_logs(user_id).await?;

        tracing::info!(user_id = %user_id, logs = logs.len(), "exported logs");
        Ok(LogExport {
            exported_at: self.clock.now(),
            logs,
        })
    }

    async fn delete_log(&self, auth: &AuthContext, log_id: &LogId) -> Result<(), LogError> {
        let user_id = require_user(auth)?;
        if !self.logs.delete_log(user_id, log_id).await? {
            return Err(LogError::NotFound(log_id.clone()));
        }
        tracing::info!(user_id = %user_id, log_id = %log_id, "deleted log");
        Ok(())
    }

    fn preview_import(&self, csv: &str) -> Result<Vec<ImportedBook>, ImportError> {
        parse_reading_export(csv, self.clock.now().date())
    }

    #[instrument(skip(self, books), fields(books = books.len()))]
    async fn import_books(
        &self,
        auth: &AuthContext,
        books: &[ImportedBook],
    ) -> Result<ImportSummary, LogError> {
        let user_id = require_user(auth)?;
        let mut summary = ImportSummary::default();

        for book in books {
            let inserted = match imported_log_entry(book) {
                Ok(entry) => self.logs.insert_log(user_id, &entry).await.map(|_| ()),
                Err(e) => Err(e),
            };

            match inserted {
                Ok(()) => summary.imported += 1,
                Err(e) => {
                    tracing::warn!(title = %book.title, error = %e, "failed to import book");
                    summary.failed += 1;
                }
            }
        }

        tracing::info!(
            user_id = %user_id,
            imported = summary.imported,
            failed = summary.failed,
            "imported books"
        );

        Ok(summary)
    }
}
