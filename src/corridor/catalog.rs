// src/corridor/catalog.rs
//! Fixed pool of segment templates and connector-compatible lookup.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::connector::ConnectorClass;
use super::error::CorridorError;

/// Index of a template in its catalog (stable for the catalog's lifetime).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateId(pub u32);

/// What the host should build for a segment. The corridor never looks inside.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum SegmentVisual {
    Scene { path: String },
    MeshMaterial { mesh: String, material: Option<String> },
    /// Flat cuboid built in code; `offset` shifts it off the segment anchor.
    Slab { size: [f32; 3], offset: [f32; 3], color: [f32; 3] },
    /// Transform-only node, no drawable.
    #[default]
    Placeholder,
}

impl SegmentVisual {
    pub fn needs_assets(&self) -> bool {
        !matches!(self, SegmentVisual::Placeholder)
    }
}

/// Immutable segment prototype.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentTemplate {
    /// Unique human-readable name (used for lookup and the anchor setting).
    pub name: String,
    #[serde(default)]
    pub start: ConnectorClass,
    #[serde(default)]
    pub end: ConnectorClass,
    #[serde(default)]
    pub visual: SegmentVisual,
}

impl SegmentTemplate {
    pub fn new(name: impl Into<String>, start: ConnectorClass, end: ConnectorClass) -> Self {
        Self { name: name.into(), start, end, visual: SegmentVisual::Placeholder }
    }

    pub fn with_visual(mut self, visual: SegmentVisual) -> Self {
        self.visual = visual;
        self
    }
}

#[derive(Asset, TypePath, Clone, Debug)]
pub struct SegmentCatalog {
    /// Ordered list; index in this vector is the `TemplateId.0`.
    templates: Vec<SegmentTemplate>,
    name_to_index: HashMap<String, u32>,
}

impl SegmentCatalog {
    /// Builds a catalog. Empty pools and duplicate names are configuration errors.
    pub fn new(templates: Vec<SegmentTemplate>) -> Result<Self, CorridorError> {
        if templates.is_empty() {
            return Err(CorridorError::Configuration(
                "segment catalog is empty".to_string(),
            ));
        }

        let mut name_to_index = HashMap::with_capacity(templates.len());
        for (i, t) in templates.iter().enumerate() {
            if let Some(prev) = name_to_index.insert(t.name.clone(), i as u32) {
                return Err(CorridorError::Configuration(format!(
                    "duplicate template name '{}' (first idx {}, second idx {})",
                    t.name, prev, i
                )));
            }
        }

        Ok(Self { templates, name_to_index })
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn get(&self, id: TemplateId) -> Option<&SegmentTemplate> {
        self.templates.get(id.0 as usize)
    }

    pub fn index_of(&self, name: &str) -> Option<TemplateId> {
        self.name_to_index.get(name).map(|&i| TemplateId(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = (TemplateId, &SegmentTemplate)> {
        self.templates
            .iter()
            .enumerate()
            .map(|(i, t)| (TemplateId(i as u32), t))
    }

    /// Every template whose start connector equals `required_start`, in catalog order.
    pub fn compatible_templates(
        &self,
        required_start: ConnectorClass,
    ) -> Result<Vec<TemplateId>, CorridorError> {
        let ids: Vec<TemplateId> = self
            .iter()
            .filter(|(_, t)| t.start == required_start)
            .map(|(id, _)| id)
            .collect();

        if ids.is_empty() {
            return Err(CorridorError::EmptyCatalogSubset { required: required_start });
        }
        Ok(ids)
    }

    /// End connectors that no template can follow. A corridor reaching one of
    /// these will fail with `EmptyCatalogSubset`.
    pub fn dead_ends(&self) -> Vec<ConnectorClass> {
        ConnectorClass::ALL
            .into_iter()
            .filter(|&c| self.templates.iter().any(|t| t.end == c))
            .filter(|&c| !self.templates.iter().any(|t| t.start == c))
            .collect()
    }
}
