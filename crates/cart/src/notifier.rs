//! Toast notifications for failed cart operations.

use std::sync::{Arc, Mutex, PoisonError};

/// User-facing message shown when a cart operation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartMessage {
    /// The requested amount exceeds the remote stock.
    OutOfStock,
    /// Adding a product failed for any other reason.
    AddFailed,
    /// Removing a product failed.
    RemoveFailed,
    /// Changing a product amount failed for any other reason.
    UpdateFailed,
}

impl CartMessage {
    /// Storefront copy for the toast.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::OutOfStock => "Quantidade solicitada fora de estoque",
            Self::AddFailed => "Erro na adição do produto",
            Self::RemoveFailed => "Erro na remoção do produto",
            Self::UpdateFailed => "Erro na alteração de quantidade do produto",
        }
    }
}

impl std::fmt::Display for CartMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

/// Surface for error toasts.
pub trait Notifier: Send + Sync {
    fn error(&self, message: CartMessage);
}

/// Emits toasts as `tracing` warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn error(&self, message: CartMessage) {
        tracing::warn!(toast = ?message, "{message}");
    }
}

/// Keeps every toast in memory.
///
/// Clones share the same list.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<CartMessage>>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toasts shown so far, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<CartMessage> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Take the recorded toasts, leaving the list empty.
    pub fn drain(&self) -> Vec<CartMessage> {
        std::mem::take(&mut *self.messages.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: CartMessage) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_shares_between_clones() {
        let notifier = RecordingNotifier::new();
        let handle = notifier.clone();

        notifier.error(CartMessage::OutOfStock);
        notifier.error(CartMessage::AddFailed);

        assert_eq!(
            handle.drain(),
            vec![CartMessage::OutOfStock, CartMessage::AddFailed]
        );
        assert!(notifier.messages().is_empty());
    }

    #[test]
    fn test_message_text() {
        assert_eq!(
            CartMessage::OutOfStock.to_string(),
            "Quantidade solicitada fora de estoque"
        );
        assert_eq!(
            CartMessage::UpdateFailed.text(),
            "Erro na alteração de quantidade do produto"
        );
    }
}
