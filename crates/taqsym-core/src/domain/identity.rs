use chrono::{DateTime, Utc};

/// Identity resolved from a verified bearer credential.
///
/// Only a successful verification produces one; it lives for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityClaim {
    pub subject_id: i64,
    pub issued_at: Option<DateTime<Utc>>,
    pub expires_at: DateTime<Utc>,
}

