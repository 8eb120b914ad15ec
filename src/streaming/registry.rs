// src/streaming/registry.rs
//! `.segments.ron` catalog asset + loader.

use bevy::asset::{io::Reader, AssetLoader, LoadContext};
use bevy::prelude::*;

use crate::corridor::{CorridorError, SegmentCatalog, SegmentTemplate};

// ---------- Public plugin to register asset+loader ----------

pub struct SegmentCatalogAssetPlugin;

impl Plugin for SegmentCatalogAssetPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<SegmentCatalog>()
            .register_asset_loader(SegmentCatalogLoader);
    }
}

/// Parse a RON list of templates into a validated catalog.
pub fn parse_catalog(bytes: &[u8]) -> Result<SegmentCatalog, CatalogLoadError> {
    let defs: Vec<SegmentTemplate> =
        ron::de::from_bytes(bytes).map_err(|e| CatalogLoadError::Ron(e.to_string()))?;
    Ok(SegmentCatalog::new(defs)?)
}

// ---------- Asset loader for `.segments.ron` ----------

#[derive(Default)]
pub struct SegmentCatalogLoader;

impl AssetLoader for SegmentCatalogLoader {
    type Asset = SegmentCatalog;
    type Settings = ();
    type Error = CatalogLoadError;

    fn extensions(&self) -> &[&str] {
        &["segments.ron"]
    }

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        parse_catalog(&bytes)
    }
}

// ---------- Loader errors ----------

#[derive(thiserror::Error, Debug)]
pub enum CatalogLoadError {
    #[error("I/O while reading segment catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(String),
    #[error("invalid segment catalog: {0}")]
    Invalid(#[from] CorridorError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corridor::{ConnectorClass, SegmentVisual};

    #[test]
    fn parses_templates_with_defaults() {
        let src = br#"[
            (name: "straight"),
            (name: "veer_left", start: Middle, end: Left, visual: Scene(path: "segments/veer_left.glb#Scene0")),
            (name: "slab", start: Left, end: Middle, visual: Slab(size: (4.0, 0.2, 10.0), offset: (-2.0, 0.0, 0.0), color: (0.3, 0.3, 0.35))),
        ]"#;

        let cat = parse_catalog(src).unwrap();

        assert_eq!(cat.len(), 3);
        let straight = cat.get(cat.index_of("straight").unwrap()).unwrap();
        assert_eq!((straight.start, straight.end), (ConnectorClass::Middle, ConnectorClass::Middle));
        assert_eq!(straight.visual, SegmentVisual::Placeholder);

        let veer = cat.get(cat.index_of("veer_left").unwrap()).unwrap();
        assert_eq!(veer.end, ConnectorClass::Left);
        assert!(veer.visual.needs_assets());
    }

    #[test]
    fn rejects_empty_and_malformed_catalogs() {
        assert!(matches!(parse_catalog(b"[]"), Err(CatalogLoadError::Invalid(_))));
        assert!(matches!(parse_catalog(b"[(start: Middle)]"), Err(CatalogLoadError::Ron(_))));
        assert!(matches!(
            parse_catalog(br#"[(name: "a"), (name: "a")]"#),
            Err(CatalogLoadError::Invalid(CorridorError::Configuration(_)))
        ));
    }
}
