//! Tab-scoped selection store.
//!
//! Each [`View`] owns an independent set of selected item identifiers, so a
//! batch selection staged in one tab survives browsing another. All mutation
//! goes through the store's methods; there is no ambient global state.

use std::collections::HashSet;

use crate::state::View;

/// Index of a view's slot in the per-view selection array.
const fn slot(view: View) -> usize {
    match view {
        View::All => 0,
        View::Installed => 1,
        View::NotInstalled => 2,
        View::Updates => 3,
    }
}

/// Per-view selection sets plus the active view that scopes mutations.
///
/// Sets are not deduplicated across views: the same identifier may be
/// selected in two tabs at once. A view's set may transiently hold
/// identifiers that are no longer eligible for that view; consumers filter
/// through the item directory before acting (see
/// [`crate::catalog::batch_targets`]).
#[derive(Debug)]
pub struct SelectionState {
    /// View whose set subsequent toggle/select-all/clear calls touch.
    active: View,
    /// One selection set per view, indexed by [`slot`].
    sets: [HashSet<String>; 4],
}

impl Default for SelectionState {
    /// Empty selections with the Not Installed tab active, the dashboard's
    /// starting tab.
    fn default() -> Self {
        Self {
            active: View::NotInstalled,
            sets: Default::default(),
        }
    }
}

impl SelectionState {
    /// Construct an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently active view.
    #[must_use]
    pub const fn active_view(&self) -> View {
        self.active
    }

    /// Switch the active view. No set's contents change.
    pub fn set_active_view(&mut self, view: View) {
        self.active = view;
    }

    /// Flip membership of `id` in the active view's set.
    ///
    /// The identifier is not validated against the catalog; toggling a
    /// stale or ineligible id only affects set membership.
    pub fn toggle(&mut self, id: &str) {
        let set = &mut self.sets[slot(self.active)];
        if !set.remove(id) {
            set.insert(id.to_string());
        }
    }

    /// Replace the active view's set with exactly the given identifiers.
    ///
    /// A prior selection in that view is discarded, not merged; this backs
    /// "select all eligible items in the current view".
    pub fn select_all<I>(&mut self, ids: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.sets[slot(self.active)] = ids.into_iter().map(Into::into).collect();
    }

    /// Empty the active view's set. Other views' sets are untouched.
    pub fn clear(&mut self) {
        self.sets[slot(self.active)].clear();
    }

    /// The active view's current selection set.
    #[must_use]
    pub fn active_selection(&self) -> &HashSet<String> {
        &self.sets[slot(self.active)]
    }

    /// Number of selected identifiers in the given view.
    #[must_use]
    pub fn selection_len(&self, view: View) -> usize {
        self.sets[slot(view)].len()
    }

    /// Whether `id` is selected in the active view.
    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.sets[slot(self.active)].contains(id)
    }
}
