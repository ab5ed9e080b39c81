// File: crates/dash-core/src/coordinator.rs
// Summary: SelectionCoordinator: single source of truth for the highlighted entities and
// synchronous fan-out to every registered view.

use crate::error::{DashError, Result};
use crate::row::KeySet;
use crate::selection::{ChangeCause, Origin, SelectionChange, SelectionEvent, SelectionState, ViewId};
use crate::view::ViewAdapter;

/// Owns the registered views (in registration order) and the canonical selection.
#[derive(Default)]
pub struct SelectionCoordinator {
    views: Vec<Box<dyn ViewAdapter>>,
    state: SelectionState,
}

impl SelectionCoordinator {
    pub fn new() -> Self { Self::default() }

    pub fn register_view(&mut self, view: Box<dyn ViewAdapter>) -> Result<()> {
        if self.is_registered(view.id()) {
            return Err(DashError::DuplicateView(view.id().clone()));
        }
        tracing::debug!(view = %view.id(), "view registered");
        self.views.push(view);
        Ok(())
    }

    pub fn is_registered(&self, id: &ViewId) -> bool {
        self.views.iter().any(|v| v.id() == id)
    }

    pub fn state(&self) -> &SelectionState { &self.state }

    pub fn view(&self, id: &ViewId) -> Option<&dyn ViewAdapter> {
        self.views.iter().find(|v| v.id() == id).map(|v| v.as_ref())
    }

    pub fn view_mut(&mut self, id: &ViewId) -> Option<&mut (dyn ViewAdapter + 'static)> {
        self.views.iter_mut().find(|v| v.id() == id).map(|v| v.as_mut())
    }

    pub fn views(&self) -> impl Iterator<Item = &dyn ViewAdapter> {
        self.views.iter().map(|v| v.as_ref())
    }

    pub fn views_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn ViewAdapter>> {
        self.views.iter_mut()
    }

    /// Store `event` as the canonical selection and apply its keys to every view
    /// except the source, whose display already reflects the gesture. Keys pass
    /// through untouched. Returns the resulting per-view changes.
    pub fn publish(&mut self, event: SelectionEvent) -> Result<Vec<SelectionChange>> {
        if !self.is_registered(&event.source) {
            return Err(DashError::UnknownView(event.source));
        }
        if event.origin != Origin::User {
            tracing::trace!(view = %event.source, "dropping non-user selection event");
            return Ok(Vec::new());
        }
        tracing::debug!(source = %event.source, keys = event.keys.len(), "publish");
        let SelectionEvent { source, keys, .. } = event;
        let cause = ChangeCause::External { source: source.clone() };
        self.state = SelectionState { source: Some(source.clone()), keys: keys.clone() };
        Ok(self.fan_out(&keys, Some(&source), cause))
    }

    /// Re-apply the canonical keys to every view, source included. Used after a
    /// year-range change: the key set is range-invariant and survives it.
    pub fn rebroadcast(&mut self) -> Vec<SelectionChange> {
        let keys = self.state.keys.clone();
        self.fan_out(&keys, None, ChangeCause::Rebroadcast)
    }

    /// Set the canonical keys from outside any view and apply them everywhere.
    pub fn impose(&mut self, keys: KeySet) -> Vec<SelectionChange> {
        self.state = SelectionState { source: None, keys: keys.clone() };
        self.fan_out(&keys, None, ChangeCause::Imposed)
    }

    fn fan_out(&mut self, keys: &KeySet, skip: Option<&ViewId>, cause: ChangeCause) -> Vec<SelectionChange> {
        let mut changes = Vec::with_capacity(self.views.len());
        for view in self.views.iter_mut().filter(|v| Some(v.id()) != skip) {
            view.apply_external_highlight(keys);
            changes.push(SelectionChange { view: view.id().clone(), keys: view.local_keys(), cause: cause.clone() });
        }
        changes
    }
}
