#[derive(Debug, Clone)]
pub struct RowStoreURL(String);

impl AsRef<str> for RowStoreURL {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl RowStoreURL {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self(base_url.into())
    }

    /// Append the given path to the URL.
    pub fn append_path(&self, path: &str) -> Self {
        let trimmed_url = self.0.trim_end_matches('/');
        let trimmed_path = path.trim_start_matches('/');
        Self(format!("{}/{}", trimmed_url, trimmed_path))
    }

    /// URL of a table exposed through the REST interface.
    pub fn table(&self, table: &str) -> Self {
        self.append_path("/rest/v1").append_path(table)
    }

    /// URL of the auth endpoint returning the user behind an access token.
    pub fn auth_user(&self) -> Self {
        self.append_path("/auth/v1/user")
    }
}
