//! Cart Notices
//!
//! User-facing messages emitted by cart mutations, and the sinks that receive them.

use std::fmt;

/// What a notice reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    /// A new line was added.
    Added,

    /// An existing line's quantity was increased.
    Updated,

    /// A requested quantity was reduced to the available stock.
    StockLimit,

    /// A line was removed.
    Removed,

    /// The whole cart was emptied.
    Cleared,
}

/// How prominently a notice should be shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Informational.
    #[default]
    Default,

    /// Something the shopper asked for could not be done in full.
    Destructive,
}

/// A user-facing cart message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// What happened
    pub kind: NoticeKind,

    /// How prominently to show it
    pub severity: Severity,

    /// Short headline
    pub title: String,

    /// One-sentence detail
    pub detail: String,
}

impl Notice {
    pub(crate) fn added(product_name: &str) -> Self {
        Self::new(
            NoticeKind::Added,
            "Added to cart",
            format!("{product_name} has been added to your cart."),
        )
    }

    pub(crate) fn updated(product_name: &str, quantity: u32) -> Self {
        Self::new(
            NoticeKind::Updated,
            "Cart updated",
            format!("Updated {product_name} quantity to {quantity}."),
        )
    }

    pub(crate) fn stock_limit(stock: u32) -> Self {
        Self::new(
            NoticeKind::StockLimit,
            "Maximum stock reached",
            format!("Sorry, we only have {stock} units of this item in stock."),
        )
    }

    pub(crate) fn removed(product_name: &str) -> Self {
        Self::new(
            NoticeKind::Removed,
            "Removed from cart",
            format!("{product_name} has been removed from your cart."),
        )
    }

    pub(crate) fn cleared() -> Self {
        Self::new(
            NoticeKind::Cleared,
            "Cart cleared",
            "All items have been removed from your cart.".to_string(),
        )
    }

    fn new(kind: NoticeKind, title: &str, detail: String) -> Self {
        let severity = match kind {
            NoticeKind::StockLimit => Severity::Destructive,
            _ => Severity::Default,
        };

        Self {
            kind,
            severity,
            title: title.to_string(),
            detail,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.detail)
    }
}

/// Receives notices from the cart.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    /// Deliver a notice to the shopper.
    fn notify(&mut self, notice: &Notice);
}

/// Emits notices as tracing events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&mut self, notice: &Notice) {
        match notice.severity {
            Severity::Default => {
                tracing::info!(kind = ?notice.kind, title = %notice.title, "{}", notice.detail);
            }
            Severity::Destructive => {
                tracing::warn!(kind = ?notice.kind, title = %notice.title, "{}", notice.detail);
            }
        }
    }
}

/// Collects notices in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingNotifier {
    notices: Vec<Notice>,
}

impl RecordingNotifier {
    /// An empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices received so far, oldest first.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// The most recent notice.
    pub fn last(&self) -> Option<&Notice> {
        self.notices.last()
    }

    /// Take every recorded notice, leaving the recorder empty.
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_limit_notices_are_destructive() {
        assert_eq!(Notice::stock_limit(15).severity, Severity::Destructive);
        assert_eq!(Notice::added("Vanilla Dream").severity, Severity::Default);
        assert_eq!(Notice::cleared().severity, Severity::Default);
    }

    #[test]
    fn notice_text_names_product_and_quantity() {
        let notice = Notice::updated("Vanilla Dream", 4);

        assert_eq!(
            notice.to_string(),
            "Cart updated: Updated Vanilla Dream quantity to 4."
        );
        assert_eq!(
            Notice::stock_limit(15).detail,
            "Sorry, we only have 15 units of this item in stock."
        );
    }

    #[test]
    fn recording_notifier_keeps_order_and_drains() {
        let mut recorder = RecordingNotifier::new();

        recorder.notify(&Notice::added("Rose Garden"));
        recorder.notify(&Notice::removed("Rose Garden"));

        assert_eq!(recorder.notices().len(), 2);
        assert_eq!(recorder.last().map(|n| n.kind), Some(NoticeKind::Removed));

        let drained = recorder.drain();

        assert_eq!(drained.len(), 2);
        assert!(recorder.notices().is_empty());
    }
}
