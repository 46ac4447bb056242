use rustc_hash::FxHashMap;
use winit::window::WindowId;

use crate::view_state::ViewState;

/// Maps native window ids to the state of the windows this host owns.
///
/// Ids that were never registered, or have been unregistered, simply have no
/// state. Events for them belong to someone else and are ignored.
#[derive(Debug, Default)]
pub struct ViewRegistry {
    views: FxHashMap<WindowId, ViewState>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `state` under its window id, replacing and releasing any
    /// previous state for the same id.
    pub fn register(&mut self, state: ViewState) -> &mut ViewState {
        let id = state.id();
        if let Some(mut previous) = self.views.remove(&id) {
            tracing::debug!(window = ?id, "replacing existing view state");
            previous.release();
        }
        tracing::debug!(window = ?id, "registered view");
        self.views.entry(id).or_insert(state)
    }

    pub fn lookup(&self, id: WindowId) -> Option<&ViewState> {
        self.views.get(&id)
    }

    pub fn lookup_mut(&mut self, id: WindowId) -> Option<&mut ViewState> {
        self.views.get_mut(&id)
    }

    /// Remove the state for `id`. Graphics resources are released before the
    /// entry goes away.
    pub fn unregister(&mut self, id: WindowId) -> Option<ViewState> {
        let state = self.views.get_mut(&id)?;
        state.release();
        let state = self.views.remove(&id);
        tracing::debug!(window = ?id, "unregistered view");
        state
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.views.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = WindowId> + '_ {
        self.views.keys().copied()
    }
}
