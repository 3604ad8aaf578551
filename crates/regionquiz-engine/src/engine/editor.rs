use serde::{Deserialize, Serialize};

use crate::{
    EditorError, GameValidationError,
    core::{BoundingBox, Point, Region, RegionId, find_region_at, validate_regions},
};

/// Freehand strokes with at most this many captured points are treated as
/// accidental and discarded.
pub const MAX_ACCIDENTAL_STROKE_POINTS: usize = 5;

const DEFAULT_LABEL_PREFIX: &str = "Region";
const REGION_ID_PREFIX: &str = "region";

/// The authoring tool that decides how pointer input builds a region.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    derive_more::IsVariant,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    /// Press, drag and release to span a box.
    #[default]
    #[display("rectangle")]
    Rectangle,
    /// Press and drag; every pointer move becomes a vertex.
    #[display("freehand")]
    Freehand,
    /// Each press adds a vertex; an explicit finish closes the shape.
    #[display("polygon")]
    Polygon,
}

/// Observable phase of the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum EditorPhase {
    Idle,
    DrawingRectangle,
    AccumulatingPolygon,
    DrawingFreehand,
}

/// Shape data of the region currently being drawn.
#[derive(Debug, Clone, PartialEq)]
enum Draft {
    None,
    Rectangle { anchor: Point, current: Point },
    Polygon { vertices: Vec<Point> },
    Freehand { stroke: Vec<Point> },
}

/// Interactive region authoring over one image.
///
/// Pointer coordinates passed to the editor must already be in native pixel
/// space (see [`Viewport::to_native`](crate::Viewport::to_native)).
///
/// # Example
///
/// ```
/// use regionquiz_engine::{DrawMode, EditorState, Point};
///
/// let mut editor = EditorState::new();
///
/// // Drag a rectangle from bottom-right to top-left.
/// editor.pointer_down(Point::new(40.0, 40.0));
/// editor.pointer_move(Point::new(20.0, 30.0));
/// let id = editor.pointer_up(Point::new(10.0, 10.0)).unwrap();
/// assert_eq!(editor.region(&id).unwrap().bounding_box().width, 30.0);
///
/// // Click out a triangle.
/// editor.set_draw_mode(DrawMode::Polygon);
/// editor.pointer_down(Point::new(100.0, 100.0));
/// editor.pointer_down(Point::new(150.0, 100.0));
/// assert!(editor.finish_polygon().is_err());
/// editor.pointer_down(Point::new(100.0, 150.0));
/// editor.finish_polygon().unwrap();
///
/// assert_eq!(editor.regions().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct EditorState {
    regions: Vec<Region>,
    draw_mode: DrawMode,
    draft: Draft,
    selected: Option<RegionId>,
    next_id: usize,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    #[must_use]
    pub fn new() -> Self {
        Self::with_regions(Vec::new())
    }

    /// Opens the editor on an existing region set, e.g. a saved game.
    #[must_use]
    pub fn with_regions(regions: Vec<Region>) -> Self {
        Self {
            regions,
            draw_mode: DrawMode::default(),
            draft: Draft::None,
            selected: None,
            next_id: 1,
        }
    }

    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    #[must_use]
    pub fn region(&self, id: &RegionId) -> Option<&Region> {
        self.regions.iter().find(|r| r.id() == id)
    }

    /// Hands the finished regions over for storage.
    #[must_use]
    pub fn into_regions(self) -> Vec<Region> {
        self.regions
    }

    /// Checks the region set as it would be checked before saving.
    pub fn validate(&self) -> Result<(), GameValidationError> {
        validate_regions(&self.regions)
    }

    #[must_use]
    pub fn draw_mode(&self) -> DrawMode {
        self.draw_mode
    }

    /// Switches tools, discarding any shape in progress.
    pub fn set_draw_mode(&mut self, mode: DrawMode) {
        self.draw_mode = mode;
        self.draft = Draft::None;
    }

    #[must_use]
    pub fn phase(&self) -> EditorPhase {
        match &self.draft {
            Draft::None => EditorPhase::Idle,
            Draft::Rectangle { .. } => EditorPhase::DrawingRectangle,
            Draft::Polygon { .. } => EditorPhase::AccumulatingPolygon,
            Draft::Freehand { .. } => EditorPhase::DrawingFreehand,
        }
    }

    /// The rectangle being dragged, relative to its anchor.
    ///
    /// Width and height are negative when the pointer is above or left of
    /// the anchor.
    #[must_use]
    pub fn draft_rectangle(&self) -> Option<BoundingBox> {
        match &self.draft {
            Draft::Rectangle { anchor, current } => Some(BoundingBox::new(
                anchor.x,
                anchor.y,
                current.x - anchor.x,
                current.y - anchor.y,
            )),
            _ => None,
        }
    }

    /// Vertices of the polygon or stroke being drawn.
    #[must_use]
    pub fn draft_points(&self) -> &[Point] {
        match &self.draft {
            Draft::Polygon { vertices } => vertices,
            Draft::Freehand { stroke } => stroke,
            Draft::None | Draft::Rectangle { .. } => &[],
        }
    }

    pub fn pointer_down(&mut self, point: Point) {
        match self.draw_mode {
            DrawMode::Rectangle => {
                self.draft = Draft::Rectangle {
                    anchor: point,
                    current: point,
                };
            }
            DrawMode::Polygon => match &mut self.draft {
                Draft::Polygon { vertices } => vertices.push(point),
                _ => {
                    self.draft = Draft::Polygon {
                        vertices: vec![point],
                    };
                }
            },
            DrawMode::Freehand => {
                self.draft = Draft::Freehand { stroke: Vec::new() };
            }
        }
    }

    pub fn pointer_move(&mut self, point: Point) {
        match &mut self.draft {
            Draft::Rectangle { current, .. } => *current = point,
            Draft::Freehand { stroke } => stroke.push(point),
            Draft::None | Draft::Polygon { .. } => {}
        }
    }

    /// Ends a drag. Returns the id of the region created, if any.
    ///
    /// Rectangles are always finalized. Freehand strokes are kept only when
    /// they captured more than [`MAX_ACCIDENTAL_STROKE_POINTS`] points; the
    /// raw stroke becomes the polygon's vertex list without simplification.
    pub fn pointer_up(&mut self, point: Point) -> Option<RegionId> {
        match std::mem::replace(&mut self.draft, Draft::None) {
            Draft::Rectangle { anchor, .. } => {
                let id = self.allocate_id();
                let label = self.default_label();
                let region = Region::rectangle(id, label, BoundingBox::from_corners(anchor, point));
                Some(self.push_region(region))
            }
            Draft::Freehand { stroke } => {
                if stroke.len() <= MAX_ACCIDENTAL_STROKE_POINTS {
                    log::debug!("discarding freehand stroke of {} points", stroke.len());
                    return None;
                }
                let id = self.allocate_id();
                let label = self.default_label();
                let region = Region::polygon(id, label, stroke).ok()?;
                Some(self.push_region(region))
            }
            draft @ (Draft::None | Draft::Polygon { .. }) => {
                self.draft = draft;
                None
            }
        }
    }

    /// Closes the polygon being accumulated.
    ///
    /// With fewer than three vertices the polygon is left untouched so the
    /// author can add more points or cancel.
    pub fn finish_polygon(&mut self) -> Result<RegionId, EditorError> {
        let vertices = match &self.draft {
            Draft::Polygon { vertices } => vertices.clone(),
            _ => Vec::new(),
        };
        let id = self.peek_id();
        let label = self.default_label();
        let region = Region::polygon(id, label, vertices)
            .map_err(|source| EditorError::TooFewVertices { source })?;
        self.next_id += 1;
        self.draft = Draft::None;
        Ok(self.push_region(region))
    }

    /// Discards the shape in progress without creating a region.
    pub fn cancel(&mut self) {
        self.draft = Draft::None;
    }

    /// Replaces a region's label, keeping its shape and id.
    ///
    /// Only allowed while no shape is being drawn. Labels are trimmed and
    /// must be non-empty and unique among the other regions.
    pub fn set_label(&mut self, id: &RegionId, label: &str) -> Result<(), EditorError> {
        if !self.phase().is_idle() {
            return Err(EditorError::ShapeInProgress);
        }
        let label = label.trim();
        if label.is_empty() {
            return Err(EditorError::EmptyLabel);
        }
        if self
            .regions
            .iter()
            .any(|r| r.id() != id && r.label().trim() == label)
        {
            return Err(EditorError::DuplicateLabel {
                label: label.to_owned(),
            });
        }
        let region = self
            .regions
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| EditorError::UnknownRegion { id: id.clone() })?;
        region.set_label(label.to_owned());
        Ok(())
    }

    /// Removes a region. Clears the selection if it pointed at it.
    pub fn delete_region(&mut self, id: &RegionId) -> Result<Region, EditorError> {
        let index = self
            .regions
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| EditorError::UnknownRegion { id: id.clone() })?;
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        log::debug!("deleted region {id}");
        Ok(self.regions.remove(index))
    }

    #[must_use]
    pub fn selected_region(&self) -> Option<&RegionId> {
        self.selected.as_ref()
    }

    pub fn select_region(&mut self, id: &RegionId) -> Result<(), EditorError> {
        if self.region(id).is_none() {
            return Err(EditorError::UnknownRegion { id: id.clone() });
        }
        self.selected = Some(id.clone());
        Ok(())
    }

    /// Selects the first region under `point`, or clears the selection.
    pub fn select_region_at(&mut self, point: Point) -> Option<&RegionId> {
        self.selected = find_region_at(point, &self.regions).map(|r| r.id().clone());
        self.selected.as_ref()
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    fn push_region(&mut self, region: Region) -> RegionId {
        let id = region.id().clone();
        log::debug!(
            "finalized {} region {id} ({})",
            if region.shape().is_rectangle() {
                "rectangle"
            } else {
                "polygon"
            },
            region.label()
        );
        self.regions.push(region);
        self.selected = Some(id.clone());
        id
    }

    /// Returns the next id not used by any region, without consuming it.
    fn peek_id(&mut self) -> RegionId {
        loop {
            let id = RegionId::from(format!("{REGION_ID_PREFIX}-{}", self.next_id));
            if self.region(&id).is_none() {
                return id;
            }
            self.next_id += 1;
        }
    }

    fn allocate_id(&mut self) -> RegionId {
        let id = self.peek_id();
        self.next_id += 1;
        id
    }

    /// An ordinal placeholder label not used by any region.
    fn default_label(&self) -> String {
        (self.regions.len() + 1..)
            .map(|n| format!("{DEFAULT_LABEL_PREFIX} {n}"))
            .find(|label| self.regions.iter().all(|r| r.label().trim() != label))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn draw_rectangle(editor: &mut EditorState, from: Point, to: Point) -> RegionId {
        editor.set_draw_mode(DrawMode::Rectangle);
        editor.pointer_down(from);
        editor.pointer_move(to);
        editor.pointer_up(to).unwrap()
    }

    #[test]
    fn test_rectangle_drag_reports_live_negative_delta() {
        let mut editor = EditorState::new();
        editor.pointer_down(p(50.0, 50.0));
        assert!(editor.phase().is_drawing_rectangle());

        editor.pointer_move(p(30.0, 20.0));
        assert_eq!(
            editor.draft_rectangle(),
            Some(BoundingBox::new(50.0, 50.0, -20.0, -30.0))
        );

        let id = editor.pointer_up(p(30.0, 20.0)).unwrap();
        assert!(editor.phase().is_idle());
        let region = editor.region(&id).unwrap();
        assert_eq!(*region.bounding_box(), BoundingBox::new(30.0, 20.0, 20.0, 30.0));
        assert_eq!(region.label(), "Region 1");
        assert_eq!(editor.selected_region(), Some(&id));
    }

    #[test]
    fn test_polygon_requires_three_vertices() {
        let mut editor = EditorState::new();
        editor.set_draw_mode(DrawMode::Polygon);
        editor.pointer_down(p(0.0, 0.0));
        editor.pointer_down(p(10.0, 0.0));

        let err = editor.finish_polygon().unwrap_err();
        assert!(matches!(
            err,
            EditorError::TooFewVertices {
                source: crate::TooFewVerticesError { count: 2 }
            }
        ));
        assert!(editor.phase().is_accumulating_polygon());
        assert_eq!(editor.draft_points().len(), 2);
        assert!(editor.regions().is_empty());

        editor.pointer_down(p(0.0, 10.0));
        let id = editor.finish_polygon().unwrap();
        let region = editor.region(&id).unwrap();
        assert_eq!(*region.bounding_box(), BoundingBox::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(region.points().map(<[Point]>::len), Some(3));
        assert!(editor.phase().is_idle());
    }

    #[test]
    fn test_finish_polygon_outside_polygon_mode_fails() {
        let mut editor = EditorState::new();
        assert!(editor.finish_polygon().is_err());
    }

    #[test]
    fn test_polygon_pointer_up_does_not_finalize() {
        let mut editor = EditorState::new();
        editor.set_draw_mode(DrawMode::Polygon);
        for (x, y) in [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)] {
            editor.pointer_down(p(x, y));
            assert_eq!(editor.pointer_up(p(x, y)), None);
        }
        assert_eq!(editor.draft_points().len(), 3);
        assert!(editor.regions().is_empty());
    }

    #[test]
    fn test_cancel_discards_polygon() {
        let mut editor = EditorState::new();
        editor.set_draw_mode(DrawMode::Polygon);
        editor.pointer_down(p(0.0, 0.0));
        editor.pointer_down(p(10.0, 0.0));
        editor.pointer_down(p(10.0, 10.0));
        editor.cancel();
        assert!(editor.phase().is_idle());
        assert!(editor.draft_points().is_empty());
        assert!(editor.regions().is_empty());
    }

    #[test]
    fn test_switching_mode_resets_draft() {
        let mut editor = EditorState::new();
        editor.set_draw_mode(DrawMode::Polygon);
        editor.pointer_down(p(0.0, 0.0));
        editor.set_draw_mode(DrawMode::Freehand);
        assert!(editor.phase().is_idle());
        assert!(editor.draft_points().is_empty());
    }

    #[test]
    fn test_freehand_keeps_every_point() {
        let mut editor = EditorState::new();
        editor.set_draw_mode(DrawMode::Freehand);
        editor.pointer_down(p(0.0, 0.0));
        let stroke: Vec<_> = (0..20)
            .map(|i| {
                let t = f64::from(i) / 20.0 * std::f64::consts::TAU;
                p(50.0 + 10.0 * t.cos(), 50.0 + 10.0 * t.sin())
            })
            .collect();
        for &point in &stroke {
            editor.pointer_move(point);
        }
        assert!(editor.phase().is_drawing_freehand());

        let id = editor.pointer_up(p(60.0, 50.0)).unwrap();
        let region = editor.region(&id).unwrap();
        assert_eq!(region.points(), Some(stroke.as_slice()));
        assert!(region.contains(p(50.0, 50.0)));
    }

    #[test]
    fn test_short_freehand_stroke_is_discarded() {
        let mut editor = EditorState::new();
        editor.set_draw_mode(DrawMode::Freehand);
        editor.pointer_down(p(0.0, 0.0));
        for i in 0..MAX_ACCIDENTAL_STROKE_POINTS {
            editor.pointer_move(p(f64::from(u32::try_from(i).unwrap()), 1.0));
        }
        assert_eq!(editor.pointer_up(p(5.0, 1.0)), None);
        assert!(editor.regions().is_empty());
        assert!(editor.phase().is_idle());
    }

    #[test]
    fn test_set_label() {
        let mut editor = EditorState::new();
        let a = draw_rectangle(&mut editor, p(0.0, 0.0), p(10.0, 10.0));
        let b = draw_rectangle(&mut editor, p(20.0, 0.0), p(30.0, 10.0));
        let before = editor.region(&a).unwrap().bounding_box().to_owned();

        editor.set_label(&a, "  Elmas ").unwrap();
        assert_eq!(editor.region(&a).unwrap().label(), "Elmas");
        assert_eq!(*editor.region(&a).unwrap().bounding_box(), before);

        assert!(matches!(
            editor.set_label(&b, "Elmas"),
            Err(EditorError::DuplicateLabel { .. })
        ));
        assert!(matches!(
            editor.set_label(&b, "   "),
            Err(EditorError::EmptyLabel)
        ));
        assert!(matches!(
            editor.set_label(&RegionId::from("missing"), "X"),
            Err(EditorError::UnknownRegion { .. })
        ));
        // Relabeling a region with its own label is fine.
        editor.set_label(&a, "Elmas").unwrap();
    }

    #[test]
    fn test_set_label_rejected_while_drawing() {
        let mut editor = EditorState::new();
        let a = draw_rectangle(&mut editor, p(0.0, 0.0), p(10.0, 10.0));
        editor.pointer_down(p(50.0, 50.0));
        assert!(matches!(
            editor.set_label(&a, "Elmas"),
            Err(EditorError::ShapeInProgress)
        ));
    }

    #[test]
    fn test_delete_clears_selection() {
        let mut editor = EditorState::new();
        let a = draw_rectangle(&mut editor, p(0.0, 0.0), p(10.0, 10.0));
        let b = draw_rectangle(&mut editor, p(20.0, 0.0), p(30.0, 10.0));
        assert_eq!(editor.selected_region(), Some(&b));

        editor.delete_region(&a).unwrap();
        assert_eq!(editor.selected_region(), Some(&b));
        editor.delete_region(&b).unwrap();
        assert_eq!(editor.selected_region(), None);
        assert!(editor.delete_region(&b).is_err());
    }

    #[test]
    fn test_select_region_at() {
        let mut editor = EditorState::new();
        let a = draw_rectangle(&mut editor, p(0.0, 0.0), p(10.0, 10.0));
        draw_rectangle(&mut editor, p(20.0, 0.0), p(30.0, 10.0));

        assert_eq!(editor.select_region_at(p(5.0, 5.0)), Some(&a));
        assert_eq!(editor.select_region_at(p(50.0, 50.0)), None);
        assert_eq!(editor.selected_region(), None);
    }

    #[test]
    fn test_select_and_clear_selection_by_id() {
        let mut editor = EditorState::new();
        let a = draw_rectangle(&mut editor, p(0.0, 0.0), p(10.0, 10.0));
        let b = draw_rectangle(&mut editor, p(20.0, 0.0), p(30.0, 10.0));

        editor.select_region(&a).unwrap();
        assert_eq!(editor.selected_region(), Some(&a));

        let missing = RegionId::from("region-9");
        assert!(matches!(
            editor.select_region(&missing),
            Err(EditorError::UnknownRegion { id }) if id == missing
        ));
        assert_eq!(editor.selected_region(), Some(&a));

        editor.select_region(&b).unwrap();
        editor.clear_selection();
        assert_eq!(editor.selected_region(), None);
    }

    #[test]
    fn test_ids_and_default_labels_stay_unique() {
        let existing = vec![
            Region::rectangle("region-1", "Region 2", BoundingBox::new(0.0, 0.0, 5.0, 5.0)),
        ];
        let mut editor = EditorState::with_regions(existing);
        let id = draw_rectangle(&mut editor, p(10.0, 10.0), p(20.0, 20.0));

        assert_eq!(id, RegionId::from("region-2"));
        assert_eq!(editor.region(&id).unwrap().label(), "Region 3");
        assert!(editor.validate().is_ok());
    }
}
