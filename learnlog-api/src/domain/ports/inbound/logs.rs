use async_trait::async_trait;

use crate::domain::{
    models::{
        AuthContext, ImportSummary, ImportedBook, LogEntry, LogExport, LogId, NewLogEntry,
    },
    ImportError, LogError,
};

/// Inbound port for learning log use cases.
#[async_trait]
pub trait LogService: Send + Sync + 'static {
    async fn create_log(&self, auth: &AuthContext, entry: &NewLogEntry)
        -> Result<LogEntry, LogError>;

    /// The caller's own entries, newest first.
    async fn my_logs(&self, auth: &AuthContext) -> Result<Vec<LogEntry>, LogError>;

    /// Shared entries of everyone the caller follows, newest first.
    async fn feed(&self, auth: &AuthContext) -> Result<Vec<LogEntry>, LogError>;

    /// Every entry the caller owns, stamped with the export time.
    async fn export_logs(&self, auth: &AuthContext) -> Result<LogExport, LogError>;

    async fn delete_log(&self, auth: &AuthContext, log_id: &LogId) -> Result<(), LogError>;

    /// Parse a reading-tracker CSV export without storing anything.
    fn preview_import(&self, csv: &str) -> Result<Vec<ImportedBook>, ImportError>;

    /// Store each book as a private log entry. A failing book is counted and
    /// skipped; it does not abort the rest.
    async fn import_books(
        &self,
        auth: &AuthContext,
        books: &[ImportedBook],
    ) -> Result<ImportSummary, LogError>;
}
