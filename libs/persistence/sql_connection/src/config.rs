pub trait DbConnectConfig: serde::de::DeserializeOwned {
    fn uri(&self) -> &str;
}

/// Configure database connection pool data
pub trait DbOptionsConfig {
    fn max_conn(&self) -> Option<u32> { None }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct PostgresDbConfig {
    pub uri: String,
    pub max_conn: Option<u32>,
}

impl PostgresDbConfig {
    /// Reads `DATABASE_URL` and `DATABASE_MAX_CONN` through `lookup`.
    /// Returns `None` when no URL is configured.
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let uri = lookup("DATABASE_URL").filter(|uri| !uri.trim().is_empty())?;
        Some(Self {
            uri,
            max_conn: lookup("DATABASE_MAX_CONN")
                .and_then(|value| value.parse().ok()),
        })
    }
}

impl DbConnectConfig for PostgresDbConfig {
    fn uri(&self) -> &str { &self.uri }
}

impl DbOptionsConfig for PostgresDbConfig {
    fn max_conn(&self) -> Option<u32> { self.max_conn }
}
