use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::GameValidationError;

use super::{
    geometry::Point,
    region::{MIN_POLYGON_VERTICES, Region, RegionShape, find_region_at},
};

/// How regions are presented while playing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "kebab-case")]
pub enum GameType {
    /// Regions are outlined; the image stays visible underneath.
    #[default]
    Standard,
    /// An assigned region is covered by its label, hiding the image beneath.
    TextCover,
}

/// One playable image-labeling unit, as handed over by the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageGame {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
    #[serde(default)]
    pub game_type: GameType,
    /// Stored order decides overlap resolution in hit tests.
    pub regions: Vec<Region>,
}

impl ImageGame {
    /// Returns the first region containing `point` (native pixel space).
    #[must_use]
    pub fn region_at(&self, point: Point) -> Option<&Region> {
        find_region_at(point, &self.regions)
    }

    /// Checks the authoring-time invariants of the region set.
    ///
    /// Labels are compared after trimming surrounding whitespace, since two
    /// labels that differ only in padding are indistinguishable to a player.
    pub fn validate(&self) -> Result<(), GameValidationError> {
        validate_regions(&self.regions)
    }
}

/// Checks a region set before it is stored or played.
///
/// Rejects an empty set, blank or duplicate labels, duplicate ids, polygons
/// with fewer than three vertices and rectangles without area.
pub fn validate_regions(regions: &[Region]) -> Result<(), GameValidationError> {
    if regions.is_empty() {
        return Err(GameValidationError::NoRegions);
    }

    let mut ids = HashSet::new();
    let mut labels = HashSet::new();
    for region in regions {
        if !ids.insert(region.id()) {
            return Err(GameValidationError::DuplicateRegionId {
                id: region.id().clone(),
            });
        }

        let label = region.label().trim();
        if label.is_empty() {
            return Err(GameValidationError::EmptyLabel {
                region: region.id().clone(),
            });
        }
        if !labels.insert(label) {
            return Err(GameValidationError::DuplicateLabel {
                label: label.to_owned(),
            });
        }

        match region.shape() {
            RegionShape::Rectangle => {
                if region.bounding_box().area() == 0.0 {
                    return Err(GameValidationError::EmptyArea {
                        region: region.id().clone(),
                    });
                }
            }
            RegionShape::Polygon { points } => {
                if points.len() < MIN_POLYGON_VERTICES {
                    return Err(GameValidationError::TooFewVertices {
                        region: region.id().clone(),
                        count: points.len(),
                    });
                }
            }
        }
    }
    Ok(())
}
