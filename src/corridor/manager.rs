// src/corridor/manager.rs
//! Sliding window of connected segments along +Z.

use bevy::prelude::*;
use rand::Rng;
use std::collections::VecDeque;

use super::catalog::{SegmentCatalog, TemplateId};
use super::connector::ConnectorClass;
use super::error::CorridorError;
use super::payload::{PayloadFactory, Placement, SpawnedSegment};
use super::settings::CorridorSettings;

/// Snapshot for visualisation; has no effect on behaviour.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct CorridorDiagnostics {
    pub threshold_index: usize,
    pub threshold_position: Vec3,
    /// Last observer position passed to `tick`, if any.
    pub observer_position: Option<Vec3>,
}

/// What a single `tick` did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdvanceReport {
    pub advanced: bool,
    pub retired: usize,
    pub spawned: usize,
}

/// Z of the `counter`-th appended segment. Computed in f64 so only the final
/// narrowing rounds.
pub(crate) fn axis_z(origin_z: f32, spacing: f32, counter: u64) -> f32 {
    (f64::from(origin_z) + f64::from(spacing) * counter as f64) as f32
}

/// Owns the live sequence of spawned segments.
///
/// Invariants while initialized:
/// - at least one segment is live;
/// - for every adjacent pair `(a, b)`, `a.end == b.start`;
/// - Z coordinates increase by exactly `axis_spacing` from head to tail.
#[derive(Resource)]
pub struct CorridorManager<H: Send + Sync + 'static> {
    catalog: SegmentCatalog,
    settings: CorridorSettings,
    anchor: TemplateId,
    origin: Vec3,
    rotation: Quat,
    live: VecDeque<SpawnedSegment<H>>,
    /// Segments ever appended since the last `initialize`.
    axis_counter: u64,
    diagnostics: Option<CorridorDiagnostics>,
}

impl<H: Send + Sync + 'static> CorridorManager<H> {
    pub fn new(catalog: SegmentCatalog, settings: CorridorSettings) -> Result<Self, CorridorError> {
        settings.validate()?;

        let anchor = match settings.anchor.as_deref() {
            Some(name) => catalog.index_of(name).ok_or_else(|| {
                CorridorError::Configuration(format!("anchor template '{name}' is not in the catalog"))
            })?,
            None => TemplateId(0),
        };

        let dead_ends = catalog.dead_ends();
        if !dead_ends.is_empty() {
            warn!(
                "Corridor: catalog has end connectors nothing can follow: {:?}",
                dead_ends
            );
        }

        Ok(Self {
            origin: settings.origin(),
            rotation: settings.orientation(),
            catalog,
            settings,
            anchor,
            live: VecDeque::new(),
            axis_counter: 0,
            diagnostics: None,
        })
    }

    /// (Re)build the corridor: anchor at the origin, then `initial_segment_count - 1`
    /// connected segments. On failure every payload spawned here is destroyed again.
    pub fn initialize<F, R>(&mut self, factory: &mut F, rng: &mut R) -> Result<(), CorridorError>
    where
        F: PayloadFactory<Handle = H>,
        R: Rng + ?Sized,
    {
        self.clear(factory);
        self.axis_counter = 0;

        if let Err(err) = self.fill_initial(factory, rng) {
            self.clear(factory);
            self.axis_counter = 0;
            return Err(err);
        }

        self.refresh_diagnostics(None);
        info!(
            "Corridor: initialized {} segments from a catalog of {}",
            self.live.len(),
            self.catalog.len()
        );
        Ok(())
    }

    fn fill_initial<F, R>(&mut self, factory: &mut F, rng: &mut R) -> Result<(), CorridorError>
    where
        F: PayloadFactory<Handle = H>,
        R: Rng + ?Sized,
    {
        self.spawn(self.anchor, self.origin, factory)?;

        for _ in 1..self.settings.initial_segment_count {
            let end = self.tail_end()?;
            let id = self.pick(end, rng)?;
            let position = self.next_position();
            self.spawn(id, position, factory)?;
        }
        Ok(())
    }

    /// Advance the window if `observer` has reached the threshold segment.
    pub fn tick<F, R>(
        &mut self,
        observer: Vec3,
        factory: &mut F,
        rng: &mut R,
    ) -> Result<AdvanceReport, CorridorError>
    where
        F: PayloadFactory<Handle = H>,
        R: Rng + ?Sized,
    {
        let (_, threshold) = self.threshold().ok_or(CorridorError::NotInitialized)?;

        let result = if observer.z >= threshold.z {
            self.advance(factory, rng)
        } else {
            Ok(AdvanceReport::default())
        };

        self.refresh_diagnostics(Some(observer));
        result
    }

    fn advance<F, R>(&mut self, factory: &mut F, rng: &mut R) -> Result<AdvanceReport, CorridorError>
    where
        F: PayloadFactory<Handle = H>,
        R: Rng + ?Sized,
    {
        // Choose everything up front so a dead end fails before anything changes.
        let mut end = self.tail_end()?;
        let mut planned = Vec::with_capacity(self.settings.segments_to_spawn_per_advance);
        for _ in 0..self.settings.segments_to_spawn_per_advance {
            let id = self.pick(end, rng)?;
            end = self.template_end(id)?;
            planned.push(id);
        }

        let mut report = AdvanceReport {
            advanced: true,
            retired: self.retire(self.settings.segments_to_retire_per_advance, factory),
            spawned: 0,
        };

        for id in planned {
            let position = self.next_position();
            self.spawn(id, position, factory)?;
            report.spawned += 1;
        }

        debug!(
            "Corridor: advanced (retired {}, spawned {}), {} live, next ordinal {}",
            report.retired,
            report.spawned,
            self.live.len(),
            self.axis_counter
        );
        Ok(report)
    }

    /// Remove up to `requested` segments from the head, always keeping the tail.
    fn retire<F>(&mut self, requested: usize, factory: &mut F) -> usize
    where
        F: PayloadFactory<Handle = H>,
    {
        let n = requested.min(self.live.len().saturating_sub(1));
        if n < requested {
            warn!(
                "Corridor: asked to retire {} of {} live segments; clamped to {}",
                requested,
                self.live.len(),
                n
            );
        }
        for segment in self.live.drain(..n) {
            factory.destroy(segment);
        }
        n
    }

    /// Destroy every live segment. The manager must be initialized again before ticking.
    pub fn clear<F>(&mut self, factory: &mut F)
    where
        F: PayloadFactory<Handle = H>,
    {
        for segment in self.live.drain(..) {
            factory.destroy(segment);
        }
        self.diagnostics = None;
    }

    fn spawn<F>(&mut self, id: TemplateId, position: Vec3, factory: &mut F) -> Result<(), CorridorError>
    where
        F: PayloadFactory<Handle = H>,
    {
        let template = self.catalog.get(id).ok_or_else(|| {
            CorridorError::Configuration(format!("template id {} is out of range", id.0))
        })?;
        let (start, end) = (template.start, template.end);

        let placement = Placement {
            translation: position,
            rotation: self.rotation,
            ordinal: self.axis_counter,
        };
        let handle = factory.instantiate(id, template, placement)?;

        self.live.push_back(SpawnedSegment {
            position,
            start,
            end,
            template: id,
            ordinal: self.axis_counter,
            handle,
        });
        self.axis_counter += 1;
        Ok(())
    }

    /// Uniform pick among templates that can follow `required`.
    fn pick<R: Rng + ?Sized>(
        &self,
        required: ConnectorClass,
        rng: &mut R,
    ) -> Result<TemplateId, CorridorError> {
        let candidates = self.catalog.compatible_templates(required)?;
        Ok(candidates[rng.random_range(0..candidates.len())])
    }

    fn next_position(&self) -> Vec3 {
        let tail = self.live.back().map_or(self.origin, |s| s.position);
        let z = axis_z(self.origin.z, self.settings.axis_spacing, self.axis_counter);
        Vec3::new(tail.x, tail.y, z)
    }

    fn tail_end(&self) -> Result<ConnectorClass, CorridorError> {
        self.live.back().map(|s| s.end).ok_or(CorridorError::NotInitialized)
    }

    fn template_end(&self, id: TemplateId) -> Result<ConnectorClass, CorridorError> {
        self.catalog.get(id).map(|t| t.end).ok_or_else(|| {
            CorridorError::Configuration(format!("template id {} is out of range", id.0))
        })
    }

    /// Index and position of the segment the observer must reach to advance.
    pub fn threshold(&self) -> Option<(usize, Vec3)> {
        let last = self.live.len().checked_sub(1)?;
        let index = last.saturating_sub(self.settings.lookahead_distance);
        Some((index, self.live[index].position))
    }

    fn refresh_diagnostics(&mut self, observer: Option<Vec3>) {
        self.diagnostics = self.threshold().map(|(threshold_index, threshold_position)| {
            CorridorDiagnostics { threshold_index, threshold_position, observer_position: observer }
        });
    }

    pub fn diagnostics(&self) -> Option<CorridorDiagnostics> {
        self.diagnostics
    }

    pub fn is_initialized(&self) -> bool {
        !self.live.is_empty()
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpawnedSegment<H>> {
        self.live.iter()
    }

    pub fn get(&self, index: usize) -> Option<&SpawnedSegment<H>> {
        self.live.get(index)
    }

    pub fn head(&self) -> Option<&SpawnedSegment<H>> {
        self.live.front()
    }

    pub fn tail(&self) -> Option<&SpawnedSegment<H>> {
        self.live.back()
    }

    pub fn axis_counter(&self) -> u64 {
        self.axis_counter
    }

    pub fn catalog(&self) -> &SegmentCatalog {
        &self.catalog
    }

    pub fn settings(&self) -> &CorridorSettings {
        &self.settings
    }
}
