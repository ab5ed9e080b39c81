// File: crates/dash-core/src/views/choropleth.rs
// Summary: Choropleth adapter: click-to-toggle region selection over the latest row per entity.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::dataset::{DatasetIndex, YearRange};
use crate::error::{DashError, Result};
use crate::frame::{Axis, Mark, RegionFill, ViewFrame, ViewKind};
use crate::row::{Dataset, EntityKey, KeySet};
use crate::scale::{extent, LinearScale, DEFAULT_DOMAIN};
use crate::selection::{Emphasis, Selection, SelectionEvent, SelectionMode, ViewId};
use crate::types::Viewport;
use crate::view::{Gesture, ViewAdapter};

/// Region set supplied by the geometry collaborator: code -> display name.
/// Shapes and projection live outside this crate; only the join key matters here.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeometrySet {
    regions: BTreeMap<String, String>,
}

impl GeometrySet {
    pub fn new() -> Self { Self::default() }

    pub fn with_region(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.insert(code, name);
        self
    }

    pub fn insert(&mut self, code: impl Into<String>, name: impl Into<String>) {
        self.regions.insert(code.into(), name.into());
    }

    pub fn contains(&self, code: &str) -> bool { self.regions.contains_key(code) }
    pub fn len(&self) -> usize { self.regions.len() }
    pub fn is_empty(&self) -> bool { self.regions.is_empty() }
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.regions.iter().map(|(c, n)| (c.as_str(), n.as_str()))
    }
}

impl<C: Into<String>, N: Into<String>> FromIterator<(C, N)> for GeometrySet {
    fn from_iter<T: IntoIterator<Item = (C, N)>>(iter: T) -> Self {
        let mut g = GeometrySet::new();
        for (c, n) in iter {
            g.insert(c, n);
        }
        g
    }
}

/// Latest value of the metric for one entity.
#[derive(Clone, Debug, PartialEq)]
pub struct MapDatum {
    pub entity: String,
    pub year: i32,
    pub value: f64,
}

pub struct ChoroplethView {
    id: ViewId,
    metric: String,
    viewport: Viewport,
    geometry: Arc<GeometrySet>,
    latest: BTreeMap<EntityKey, MapDatum>,
    color: LinearScale,
    unmatched: usize,
    /// Click selections carry no region; toggled keys persist across clicks.
    selection: Selection<()>,
}

impl ChoroplethView {
    pub fn new(id: impl Into<ViewId>, metric: impl Into<String>, geometry: Arc<GeometrySet>, viewport: Viewport) -> Self {
        Self {
            id: id.into(),
            metric: metric.into(),
            viewport,
            geometry,
            latest: BTreeMap::new(),
            color: LinearScale::fallback((0.0, 1.0)),
            unmatched: 0,
            selection: Selection::None,
        }
    }

    pub fn metric(&self) -> &str { &self.metric }
    pub fn datum(&self, code: &str) -> Option<&MapDatum> { self.latest.get(code) }
    /// Rows whose code has no region in the geometry set.
    pub fn unmatched(&self) -> usize { self.unmatched }
    pub fn color_domain(&self) -> (f64, f64) { self.color.domain() }

    fn reduce(&mut self, dataset: &Arc<Dataset>, range: Option<YearRange>, metric: &str) -> Result<()> {
        let snapshot = DatasetIndex::build(dataset, range, &[metric])?;
        let mut latest = BTreeMap::new();
        for (key, row) in snapshot.latest_by_entity() {
            if let Some(value) = row.metric(metric) {
                latest.insert(key, MapDatum { entity: row.entity.clone(), year: row.year, value });
            }
        }
        self.unmatched = latest.keys().filter(|k| !self.geometry.contains(k.as_str())).count();
        if self.unmatched > 0 {
            tracing::warn!(view = %self.id, unmatched = self.unmatched, "rows without a matching region");
        }
        // color domain is the raw extent, not niced
        self.color = match extent(latest.values().map(|d| d.value)) {
            Some(domain) => LinearScale::new(domain, (0.0, 1.0)),
            None => LinearScale::new(DEFAULT_DOMAIN, (0.0, 1.0)),
        };
        self.latest = latest;
        Ok(())
    }

    /// Toggle a region's entity in the persistent local set. Regions without
    /// data are not selectable.
    pub fn on_region_click(&mut self, code: &str) -> Option<SelectionEvent> {
        if !self.latest.contains_key(code) {
            tracing::debug!(view = %self.id, code, "click on region without data ignored");
            return None;
        }
        let key = EntityKey::new(code);
        let mut keys = self.selection.keys();
        if !keys.remove(&key) {
            keys.insert(key);
        }
        self.selection = if keys.is_empty() {
            Selection::None
        } else {
            Selection::Geometric { region: (), keys: keys.clone() }
        };
        Some(SelectionEvent::from_gesture(self.id.clone(), keys))
    }

    /// With nothing selected every region is emphasised; otherwise only regions
    /// that have data and whose key is in the set.
    fn region_emphasized(&self, code: &str, has_data: bool) -> bool {
        match &self.selection {
            Selection::None => true,
            _ => has_data && self.selection.emphasizes_key(&EntityKey::new(code)),
        }
    }

    pub fn on_gesture_clear(&mut self) -> SelectionEvent {
        self.selection = Selection::None;
        SelectionEvent::from_gesture(self.id.clone(), KeySet::new())
    }
}

impl ViewAdapter for ChoroplethView {
    fn id(&self) -> &ViewId { &self.id }
    fn kind(&self) -> ViewKind { ViewKind::Choropleth }
    fn mode(&self) -> SelectionMode { self.selection.mode() }
    fn local_keys(&self) -> KeySet { self.selection.keys() }
    fn required_metrics(&self) -> Vec<&str> { vec![self.metric.as_str()] }

    fn rebuild(&mut self, dataset: &Arc<Dataset>, range: Option<YearRange>) -> Result<()> {
        let metric = self.metric.clone();
        self.reduce(dataset, range, &metric)
    }

    fn handle_gesture(&mut self, gesture: Gesture) -> Result<Option<SelectionEvent>> {
        match gesture {
            Gesture::Click { code: Some(code) } => Ok(self.on_region_click(&code)),
            Gesture::Click { code: None } => Ok(Some(self.on_gesture_clear())),
            other => Err(DashError::Unsupported { view: self.id.clone(), what: other.name() }),
        }
    }

    fn apply_external_highlight(&mut self, keys: &KeySet) {
        self.selection = Selection::external(keys);
    }

    // projection fitting is the geometry collaborator's job
    fn resize(&mut self, width: f64, height: f64) -> bool {
        self.viewport.resize(width, height)
    }

    fn set_metric(&mut self, dataset: &Arc<Dataset>, range: Option<YearRange>, metric: &str) -> Result<()> {
        self.reduce(dataset, range, metric)?;
        self.metric = metric.to_string();
        Ok(())
    }

    fn frame(&self) -> ViewFrame {
        let marks = self
            .geometry
            .iter()
            .map(|(code, name)| {
                let datum = self.latest.get(code);
                let fill = match datum {
                    Some(d) => RegionFill::Value { value: d.value, t: self.color.map(d.value) },
                    None => RegionFill::NoData,
                };
                let emphasis = Emphasis::from_bool(self.region_emphasized(code, datum.is_some()));
                Mark::Region { code: code.to_string(), name: name.to_string(), fill, emphasis }
            })
            .collect();
        ViewFrame {
            view: self.id.clone(),
            kind: ViewKind::Choropleth,
            viewport: self.viewport,
            x_axis: Some(Axis::new(self.metric.clone(), self.color.domain())),
            y_axis: None,
            marks,
            overlay: None,
        }
    }
}
