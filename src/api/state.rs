//! Application state for the Take-Home Pay Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{RateTables, builtin};

/// Shared application state.
///
/// Holds the reference tables every calculation runs against. Cloning is
/// cheap; all clones share one table set.
#[derive(Clone)]
pub struct AppState {
    tables: Arc<RateTables>,
}

impl AppState {
    /// Creates a new application state over the given tables.
    pub fn new(tables: RateTables) -> Self {
        Self {
            tables: Arc::new(tables),
        }
    }

    /// Creates application state over the built-in FY2025 tables.
    pub fn with_builtin_tables() -> Self {
        Self::new(builtin().clone())
    }

    /// Returns the reference tables.
    pub fn tables(&self) -> &RateTables {
        &self.tables
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_clones_share_tables() {
        let state = AppState::with_builtin_tables();
        let clone = state.clone();
        assert!(std::ptr::eq(state.tables(), clone.tables()));
        assert_eq!(state.tables().metadata().revision, "FY2025");
    }
}
