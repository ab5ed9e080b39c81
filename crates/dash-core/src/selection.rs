// File: crates/dash-core/src/selection.rs
// Summary: Per-view selection variant, provenance-tagged events and the brush overlay control.

use std::fmt;

use crate::row::{EntityKey, KeySet};

/// Identifier a view is registered under.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewId(String);

impl ViewId {
    pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for ViewId {
    fn from(s: &str) -> Self { Self(s.to_string()) }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionMode {
    None,
    Geometric,
    EntityDriven,
}

/// What a view currently shows as selected. `R` is the data-space region a
/// geometric selection was drawn with (`()` for views selected by clicking).
#[derive(Clone, Debug, PartialEq)]
pub enum Selection<R> {
    None,
    Geometric { region: R, keys: KeySet },
    EntityDriven(KeySet),
}

impl<R> Default for Selection<R> {
    fn default() -> Self { Selection::None }
}

impl<R> Selection<R> {
    pub fn mode(&self) -> SelectionMode {
        match self {
            Selection::None => SelectionMode::None,
            Selection::Geometric { .. } => SelectionMode::Geometric,
            Selection::EntityDriven(_) => SelectionMode::EntityDriven,
        }
    }

    /// Keys currently selected; empty for `None`.
    pub fn keys(&self) -> KeySet {
        match self {
            Selection::None => KeySet::new(),
            Selection::Geometric { keys, .. } | Selection::EntityDriven(keys) => keys.clone(),
        }
    }

    pub fn region(&self) -> Option<&R> {
        match self {
            Selection::Geometric { region, .. } => Some(region),
            _ => None,
        }
    }

    /// Selection imposed from outside: empty clears, anything else is entity-driven.
    pub fn external(keys: &KeySet) -> Self {
        if keys.is_empty() { Selection::None } else { Selection::EntityDriven(keys.clone()) }
    }

    /// Entity-level emphasis: everything when nothing is selected, else members only.
    pub fn emphasizes_key(&self, key: &EntityKey) -> bool {
        match self {
            Selection::None => true,
            Selection::Geometric { keys, .. } | Selection::EntityDriven(keys) => keys.contains(key),
        }
    }
}

/// Binary emphasis partition every view renders with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emphasis {
    Full,
    Muted,
}

impl Emphasis {
    pub fn from_bool(full: bool) -> Self {
        if full { Emphasis::Full } else { Emphasis::Muted }
    }
}

/// Who moved a brush overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    User,
    Programmatic,
}

/// Change notification from a brush overlay; `region == None` means cleared.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayEvent<P> {
    pub origin: Origin,
    pub region: Option<P>,
    pub finished: bool,
}

/// Pixel-space brush control owned by one view. Every move reports an event
/// tagged with its origin; views act only on user-originated ones.
#[derive(Clone, Debug, PartialEq)]
pub struct BrushOverlay<P> {
    region: Option<P>,
}

impl<P> Default for BrushOverlay<P> {
    fn default() -> Self { Self { region: None } }
}

impl<P: Clone> BrushOverlay<P> {
    pub fn region(&self) -> Option<&P> { self.region.as_ref() }
    pub fn is_active(&self) -> bool { self.region.is_some() }

    /// Reposition (or clear with `None`) and report the change.
    pub fn move_to(&mut self, region: Option<P>, origin: Origin, finished: bool) -> OverlayEvent<P> {
        self.region = region.clone();
        OverlayEvent { origin, region, finished }
    }
}

/// A view's selection, tagged with the view it originated in.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionEvent {
    pub source: ViewId,
    pub origin: Origin,
    pub keys: KeySet,
}

impl SelectionEvent {
    pub fn from_gesture(source: ViewId, keys: KeySet) -> Self {
        Self { source, origin: Origin::User, keys }
    }
}

/// Why a view's local selection changed.
#[derive(Clone, Debug, PartialEq)]
pub enum ChangeCause {
    /// The view's own gesture.
    Gesture,
    /// Fan-out of another view's selection.
    External { source: ViewId },
    /// Canonical set re-applied after a year-range change.
    Rebroadcast,
    /// Set directly by the orchestrator.
    Imposed,
}

/// Per-view notification: the view's local keys after a change.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionChange {
    pub view: ViewId,
    pub keys: KeySet,
    pub cause: ChangeCause,
}

/// Canonical cross-view highlight, owned by the coordinator.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionState {
    pub source: Option<ViewId>,
    pub keys: KeySet,
}
