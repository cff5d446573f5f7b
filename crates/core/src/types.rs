/// Record identifiers are opaque strings assigned by the remote store.
pub type RecordId = String;

/// User identifiers are opaque strings issued by the auth provider.
pub type UserId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
