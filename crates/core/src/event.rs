use chrono::{DateTime, Utc};

/// A recorded fact about a domain object.
///
/// Events are immutable and only ever added at the head of a history; nothing
/// rewrites or compacts them.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name (e.g. "stock.bale.removed").
    fn event_type(&self) -> &'static str;

    /// When the event occurred (business time).
    fn occurred_at(&self) -> DateTime<Utc>;
}
