/// Primary-key type for every table; Postgres BIGSERIAL maps to `i64`.
pub type DbId = i64;

/// Timestamps are stored and served in UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
