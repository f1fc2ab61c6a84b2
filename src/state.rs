use log::debug;
use serde::{Deserialize, Serialize};

use crate::FridgeError;

/// Loading lifecycle of a piece of screen data
///
/// Transitions:
/// - any state → `Loading` via [`LoadState::begin`]
/// - `Loading` → `Loaded` / `Failed` via [`LoadState::finish`],
///   [`LoadState::succeed`] or [`LoadState::fail`]
///
/// `finish` outside of `Loading` is ignored, so a result can never land on a
/// screen that was not waiting for one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum LoadState<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Idle
    }
}

impl<T> LoadState<T> {
    pub fn begin(&mut self) {
        *self = LoadState::Loading;
    }

    /// Settle a pending load. Returns false when no load was pending.
    pub fn finish(&mut self, result: Result<T, FridgeError>) -> bool {
        match result {
            Ok(data) => self.succeed(data),
            Err(e) => self.fail(&e),
        }
    }

    pub fn succeed(&mut self, data: T) -> bool {
        self.settle(LoadState::Loaded(data))
    }

    /// Record `err` as its user-facing message
    pub fn fail(&mut self, err: &FridgeError) -> bool {
        self.settle(LoadState::Failed(err.user_message()))
    }

    fn settle(&mut self, next: LoadState<T>) -> bool {
        if !self.is_loading() {
            debug!("Dropping result for a load that is no longer pending");
            return false;
        }
        *self = next;
        true
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match self {
            LoadState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        let state: LoadState<Vec<u32>> = LoadState::default();
        assert_eq!(state, LoadState::Idle);
        assert!(state.data().is_none());
    }

    #[test]
    fn test_success_transition() {
        let mut state = LoadState::Idle;
        state.begin();
        assert!(state.is_loading());
        assert!(state.finish(Ok(vec![1, 2])));
        assert_eq!(state.data(), Some(&vec![1, 2]));
        assert!(state.error().is_none());
    }

    #[test]
    fn test_failure_clears_data() {
        let mut state = LoadState::Loaded(vec![1]);
        state.begin();
        state.finish(Err(FridgeError::Http { status: 500 }));
        assert!(state.data().is_none());
        assert_eq!(state.error(), Some("Request failed with status 500"));
    }

    #[test]
    fn test_finish_without_begin_is_ignored() {
        let mut state = LoadState::Loaded(vec![1]);
        assert!(!state.finish(Ok(vec![2])));
        assert_eq!(state.data(), Some(&vec![1]));
    }

    #[test]
    fn test_serialized_shape() {
        let state: LoadState<Vec<u32>> = LoadState::Failed("boom".to_string());
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["state"], "failed");
        assert_eq!(json["data"], "boom");
    }
}
