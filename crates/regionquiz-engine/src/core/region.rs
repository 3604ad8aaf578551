use serde::{Deserialize, Serialize};

use crate::TooFewVerticesError;

use super::geometry::{BoundingBox, Point, point_in_polygon, point_in_rectangle};

/// Minimum number of vertices for a polygon region.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Identifier of a region, unique within one image game.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct RegionId(String);

impl From<String> for RegionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for RegionId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl RegionId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Geometric kind of a region.
///
/// Serialized with a `type` discriminant; only polygons carry `points`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RegionShape {
    /// The region is exactly its bounding box.
    Rectangle,
    /// A simple closed path; the last vertex connects back to the first.
    Polygon { points: Vec<Point> },
}

/// One labeled area on an image.
///
/// Coordinates are in the image's native pixel space. The bounding box is
/// kept for every shape: for rectangles it *is* the shape, for polygons it is
/// the minimal box enclosing all vertices and serves as a coarse hit filter.
///
/// # Example
///
/// ```
/// use regionquiz_engine::{BoundingBox, Point, Region};
///
/// let region = Region::rectangle("r1", "Elmas", BoundingBox::new(0.0, 0.0, 10.0, 10.0));
/// assert!(region.contains(Point::new(5.0, 5.0)));
/// assert!(!region.contains(Point::new(15.0, 5.0)));
/// ```
///
/// A stored `boundingBox` is not trusted on load: rectangle boxes are
/// normalized and polygon boxes are recomputed from the vertices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RegionRecord")]
pub struct Region {
    id: RegionId,
    label: String,
    #[serde(flatten)]
    shape: RegionShape,
    bounding_box: BoundingBox,
}

/// Region as stored, before its bounding box is reconciled with its shape.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegionRecord {
    id: RegionId,
    label: String,
    #[serde(flatten)]
    shape: RegionShape,
    bounding_box: BoundingBox,
}

impl From<RegionRecord> for Region {
    fn from(record: RegionRecord) -> Self {
        let RegionRecord {
            id,
            label,
            shape,
            bounding_box,
        } = record;
        // Polygons too short to enclose are kept as-is for validation to report.
        let bounding_box = match &shape {
            RegionShape::Rectangle => bounding_box.normalized(),
            RegionShape::Polygon { points } => {
                BoundingBox::enclosing(points).unwrap_or_else(|| bounding_box.normalized())
            }
        };
        Self {
            id,
            label,
            shape,
            bounding_box,
        }
    }
}

impl Region {
    /// Creates a rectangle region. The box is normalized, so a box with
    /// negative dimensions (drawn by dragging up or left) is accepted.
    pub fn rectangle(id: impl Into<RegionId>, label: impl Into<String>, rect: BoundingBox) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            shape: RegionShape::Rectangle,
            bounding_box: rect.normalized(),
        }
    }

    /// Creates a polygon region from its vertices, deriving the bounding box.
    pub fn polygon(
        id: impl Into<RegionId>,
        label: impl Into<String>,
        points: Vec<Point>,
    ) -> Result<Self, TooFewVerticesError> {
        if points.len() < MIN_POLYGON_VERTICES {
            return Err(TooFewVerticesError {
                count: points.len(),
            });
        }
        let bounding_box = BoundingBox::enclosing(&points).ok_or(TooFewVerticesError {
            count: points.len(),
        })?;
        Ok(Self {
            id: id.into(),
            label: label.into(),
            shape: RegionShape::Polygon { points },
            bounding_box,
        })
    }

    #[must_use]
    pub fn id(&self) -> &RegionId {
        &self.id
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn set_label(&mut self, label: String) {
        self.label = label;
    }

    #[must_use]
    pub fn shape(&self) -> &RegionShape {
        &self.shape
    }

    #[must_use]
    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    /// Returns the polygon vertices, or `None` for rectangles.
    #[must_use]
    pub fn points(&self) -> Option<&[Point]> {
        match &self.shape {
            RegionShape::Rectangle => None,
            RegionShape::Polygon { points } => Some(points),
        }
    }

    /// Returns `true` if `point` (in native pixel space) lies in this region.
    ///
    /// Polygons are tested against their bounding box first and only run the
    /// full ray-casting test on a box hit.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        match &self.shape {
            RegionShape::Rectangle => point_in_rectangle(point, &self.bounding_box),
            RegionShape::Polygon { points } => {
                point_in_rectangle(point, &self.bounding_box) && point_in_polygon(point, points)
            }
        }
    }
}

/// Returns the first region, in stored order, containing `point`.
///
/// Overlaps are resolved by order: the region earlier in `regions` wins.
#[must_use]
pub fn find_region_at(point: Point, regions: &[Region]) -> Option<&Region> {
    regions.iter().find(|r| r.contains(point))
}
