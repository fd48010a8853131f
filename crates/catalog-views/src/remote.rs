//! Remote data state shared by every view.

use catalog_graph::FetchError;
use serde::Serialize;

/// The lifecycle of one remote value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum RemoteData<T> {
    Pending,
    /// Terminal for the activation; carries the message shown to users.
    Failure(String),
    Success(T),
}

impl<T> Default for RemoteData<T> {
    fn default() -> Self {
        RemoteData::Pending
    }
}

impl<T> RemoteData<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, RemoteData::Pending)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, RemoteData::Failure(_))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RemoteData::Success(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RemoteData::Failure(message) => Some(message),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            RemoteData::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            RemoteData::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RemoteData<U> {
        match self {
            RemoteData::Pending => RemoteData::Pending,
            RemoteData::Failure(message) => RemoteData::Failure(message),
            RemoteData::Success(value) => RemoteData::Success(f(value)),
        }
    }
}

impl<T> From<Result<T, FetchError>> for RemoteData<T> {
    fn from(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(value) => RemoteData::Success(value),
            Err(e) => RemoteData::Failure(e.message()),
        }
    }
}

/// Identifies one activation of a view.
///
/// A result is applied only if it was issued for the current activation;
/// anything older is discarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Activation(u64);

impl Activation {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Monotonic activation generator.
#[derive(Debug, Clone, Default)]
pub struct ActivationCounter {
    current: Activation,
}

impl ActivationCounter {
    /// Start a new activation, superseding the previous one.
    pub fn begin(&mut self) -> Activation {
        self.current = Activation(self.current.0 + 1);
        self.current
    }

    pub fn current(&self) -> Activation {
        self.current
    }

    pub fn is_current(&self, activation: Activation) -> bool {
        self.current == activation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === RemoteData Tests ===

    #[test]
    fn test_default_is_pending() {
        assert!(RemoteData::<u8>::default().is_pending());
    }

    #[test]
    fn test_from_result() {
        let ok: RemoteData<u8> = Ok(3).into();
        assert_eq!(ok.value(), Some(&3));

        let err: RemoteData<u8> = Err(FetchError::Transport("Failed to fetch".to_string())).into();
        assert_eq!(err.error(), Some("Failed to fetch"));
    }

    #[test]
    fn test_map_keeps_state() {
        assert_eq!(RemoteData::Success(2).map(|v| v * 2), RemoteData::Success(4));
        assert_eq!(
            RemoteData::<u8>::Failure("x".to_string()).map(|v| v * 2),
            RemoteData::Failure("x".to_string())
        );
        assert!(RemoteData::<u8>::Pending.map(|v| v * 2).is_pending());
    }

    #[test]
    fn test_serializes_tagged() {
        let json = serde_json::to_value(RemoteData::Success(1)).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "success", "value": 1 }));
    }

    // === Activation Tests ===

    #[test]
    fn test_activation_supersedes() {
        let mut counter = ActivationCounter::default();
        let first = counter.begin();
        let second = counter.begin();

        assert!(!counter.is_current(first));
        assert!(counter.is_current(second));
        assert!(second > first);
    }
}
