use chrono::{DateTime, Utc};

/// A domain-agnostic event.
///
/// Events are immutable facts: once published they describe something that
/// already happened, not something a subscriber may veto.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "shop.invoices.changed").
    fn event_type(&self) -> &'static str;

    /// When the event occurred (business time).
    fn occurred_at(&self) -> DateTime<Utc>;
}
