use ::time::OffsetDateTime;
use uuid::Uuid;

/// An opaque record id: a random part followed by the creation time.
/// Unique for all practical purposes, not a secret.
pub fn new_id() -> String {
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;

    format!("{}{millis:x}", Uuid::new_v4().simple())
}
