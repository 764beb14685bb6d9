//! Immutable list snapshots published to renderers.

use portal_core::Character;

use crate::state::Phase;

/// Placeholder shown while the first page of a listing loads.
pub const LOADING_MESSAGE: &str = "Loading characters...";

/// Placeholder shown when a settled listing has no characters.
pub const EMPTY_MESSAGE: &str = "No characters found";

/// A point-in-time copy of a list's state.
#[derive(Debug, Clone, PartialEq)]
pub struct ListSnapshot {
    pub phase: Phase,
    /// Characters in display order, never with a repeated id.
    pub items: Vec<Character>,
    /// Normalized query of the listing being shown.
    pub query: String,
    pub has_more: bool,
    /// Total matches reported by the API for this listing.
    pub total: Option<u32>,
    pub last_error: Option<String>,
    /// Bumped every time a new listing starts.
    pub generation: u64,
    /// Search text is waiting out the debounce interval.
    pub search_pending: bool,
}

impl ListSnapshot {
    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Ready
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::LoadingInitial
    }

    /// True while a follow-up page is in flight (footer spinner).
    pub fn is_loading_more(&self) -> bool {
        self.phase == Phase::LoadingMore
    }

    /// Ready with no search waiting to fire.
    pub fn is_settled(&self) -> bool {
        self.is_ready() && !self.search_pending
    }

    /// The message to show instead of the list, if any.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self.phase {
            Phase::LoadingInitial => Some(LOADING_MESSAGE),
            Phase::Ready if self.items.is_empty() => Some(EMPTY_MESSAGE),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(phase: Phase) -> ListSnapshot {
        ListSnapshot {
            phase,
            items: Vec::new(),
            query: String::new(),
            has_more: false,
            total: None,
            last_error: None,
            generation: 1,
            search_pending: false,
        }
    }

    #[test]
    fn placeholders() {
        assert_eq!(snapshot(Phase::Idle).placeholder(), None);
        assert_eq!(
            snapshot(Phase::LoadingInitial).placeholder(),
            Some(LOADING_MESSAGE)
        );
        assert_eq!(snapshot(Phase::Ready).placeholder(), Some(EMPTY_MESSAGE));
        assert_eq!(snapshot(Phase::LoadingMore).placeholder(), None);
    }

    #[test]
    fn pending_search_is_not_settled() {
        let mut ready = snapshot(Phase::Ready);
        assert!(ready.is_settled());

        ready.search_pending = true;
        assert!(!ready.is_settled());
        assert!(!snapshot(Phase::LoadingMore).is_settled());
    }
}
