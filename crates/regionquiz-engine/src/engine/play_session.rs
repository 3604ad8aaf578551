use rand::Rng as _;
use serde::Serialize;

use crate::{
    PlacementError, SubmitError,
    core::{ImageGame, Point, Region, RegionColor, RegionId, Size, Viewport},
};

use super::{
    assignments::AssignmentMap,
    label_pool::{LabelPool, ShuffleSeed},
    score::{RegionOutcome, Score},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    /// Waiting for the image's native size; pointer input is ignored.
    Loading,
    InProgress,
    Submitted(Score),
    /// Correct/incorrect markers are shown on every region.
    Revealed(Score),
}

/// Presentation hints for one region, derived from the session state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionView<'a> {
    pub region: &'a Region,
    pub assigned_label: Option<&'a str>,
    pub color: Option<RegionColor>,
    pub hovered: bool,
    /// The region is drawn opaque with its assigned label on top.
    pub covered: bool,
    pub outcome: Option<RegionOutcome>,
}

/// One attempt at an [`ImageGame`].
///
/// The session starts in [`SessionState::Loading`] with a freshly shuffled
/// label pool. Once the image reports its native size through
/// [`Self::image_loaded`], the player picks labels from the pool and places
/// them on regions. When every label is placed the attempt can be submitted
/// and, unless perfect, revealed.
///
/// Rejected actions return an error and leave the session unchanged.
///
/// # Example
///
/// ```
/// use regionquiz_engine::{BoundingBox, GameType, ImageGame, PlaySession, Point, Region, Size};
///
/// let game = ImageGame {
///     id: "g1".into(),
///     title: "Carbon".into(),
///     description: None,
///     image_url: "carbon.png".into(),
///     topic_id: None,
///     subject_id: None,
///     game_type: GameType::Standard,
///     regions: vec![
///         Region::rectangle("r1", "Elmas", BoundingBox::new(0.0, 0.0, 10.0, 10.0)),
///         Region::rectangle("r2", "Grafit", BoundingBox::new(20.0, 0.0, 10.0, 10.0)),
///     ],
/// };
///
/// let mut session = PlaySession::new(game);
/// session.image_loaded(Size::new(100.0, 100.0));
///
/// session.select_label("Elmas").unwrap();
/// session.try_place_at(Point::new(5.0, 5.0)).unwrap();
/// session.select_label("Grafit").unwrap();
/// session.try_place_at(Point::new(25.0, 5.0)).unwrap();
///
/// let score = session.try_submit().unwrap();
/// assert!(score.is_perfect());
/// ```
#[derive(Debug, Clone)]
pub struct PlaySession {
    game: ImageGame,
    pool: LabelPool,
    assignments: AssignmentMap,
    selected_label: Option<String>,
    hovered: Option<RegionId>,
    native_size: Option<Size>,
    state: SessionState,
}

impl PlaySession {
    /// Loads `game` with a random shuffle seed.
    #[must_use]
    pub fn new(game: ImageGame) -> Self {
        Self::with_seed(game, rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic shuffling.
    #[must_use]
    pub fn with_seed(game: ImageGame, seed: ShuffleSeed) -> Self {
        let pool = LabelPool::with_seed(all_labels(&game), seed);
        log::debug!(
            "loaded game {} with {} regions",
            game.id,
            game.regions.len()
        );
        Self {
            game,
            pool,
            assignments: AssignmentMap::new(),
            selected_label: None,
            hovered: None,
            native_size: None,
            state: SessionState::Loading,
        }
    }

    #[must_use]
    pub fn game(&self) -> &ImageGame {
        &self.game
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Labels not yet placed, in pool order.
    #[must_use]
    pub fn available_labels(&self) -> &[String] {
        self.pool.labels()
    }

    #[must_use]
    pub fn assignments(&self) -> &AssignmentMap {
        &self.assignments
    }

    #[must_use]
    pub fn selected_label(&self) -> Option<&str> {
        self.selected_label.as_deref()
    }

    #[must_use]
    pub fn hovered_region(&self) -> Option<&RegionId> {
        self.hovered.as_ref()
    }

    #[must_use]
    pub fn native_size(&self) -> Option<Size> {
        self.native_size
    }

    /// Score of the submitted attempt.
    #[must_use]
    pub fn score(&self) -> Option<Score> {
        match self.state {
            SessionState::Submitted(score) | SessionState::Revealed(score) => Some(score),
            SessionState::Loading | SessionState::InProgress => None,
        }
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.state.is_revealed()
    }

    /// Opens the readiness gate once the image's native size is known.
    ///
    /// Sizes that are zero, negative or not finite are ignored.
    pub fn image_loaded(&mut self, native: Size) {
        if !native.is_drawable() {
            log::warn!(
                "ignoring unusable image size {}x{} for game {}",
                native.width,
                native.height,
                self.game.id
            );
            return;
        }
        self.native_size = Some(native);
        if self.state.is_loading() {
            self.state = SessionState::InProgress;
        }
    }

    /// Maps a surface of the given rendered size onto the image.
    ///
    /// `None` until the image has loaded.
    #[must_use]
    pub fn viewport(&self, rendered: Size) -> Option<Viewport> {
        Viewport::new(rendered, self.native_size?)
    }

    /// Holds `label` for placement. Reselecting the held label keeps it held.
    pub fn select_label(&mut self, label: &str) -> Result<(), PlacementError> {
        if !self.state.is_in_progress() {
            return Err(PlacementError::NotInProgress);
        }
        if !self.pool.contains(label) {
            return Err(PlacementError::UnknownLabel {
                label: label.to_owned(),
            });
        }
        self.selected_label = Some(label.to_owned());
        Ok(())
    }

    pub fn deselect_label(&mut self) {
        self.selected_label = None;
    }

    /// Places the held label on the region under a pointer on a rendered
    /// surface of size `rendered`.
    pub fn click(&mut self, pointer: Point, rendered: Size) -> Result<RegionId, PlacementError> {
        if self.state.is_loading() {
            log::warn!("click before image loaded in game {}", self.game.id);
            return Err(PlacementError::NotInProgress);
        }
        let viewport = self
            .viewport(rendered)
            .ok_or(PlacementError::NoRegionAtPoint)?;
        self.try_place_at(viewport.to_native(pointer))
    }

    /// Places the held label on the region containing `point` (native
    /// pixel space).
    ///
    /// Fails without changing anything if no label is held, no region is
    /// under the point, or that region already has a label.
    pub fn try_place_at(&mut self, point: Point) -> Result<RegionId, PlacementError> {
        if !self.state.is_in_progress() {
            return Err(PlacementError::NotInProgress);
        }
        let label = self
            .selected_label
            .as_deref()
            .ok_or(PlacementError::NoLabelSelected)?;
        let id = self
            .game
            .region_at(point)
            .ok_or(PlacementError::NoRegionAtPoint)?
            .id()
            .clone();
        if self.assignments.contains(&id) {
            return Err(PlacementError::RegionAlreadyAssigned { id });
        }
        let label = self
            .pool
            .take(label)
            .ok_or_else(|| PlacementError::UnknownLabel {
                label: label.to_owned(),
            })?;

        log::debug!("placed '{label}' on region {id}");
        if let Err(label) = self.assignments.insert(id.clone(), label) {
            self.pool.put_back(label);
            return Err(PlacementError::RegionAlreadyAssigned { id });
        }
        self.selected_label = None;
        Ok(id)
    }

    /// Takes the label off a region and returns it to the end of the pool.
    pub fn remove_placement(&mut self, id: &RegionId) -> Result<&str, PlacementError> {
        if !self.state.is_in_progress() {
            return Err(PlacementError::NotInProgress);
        }
        let label = self
            .assignments
            .remove(id)
            .ok_or_else(|| PlacementError::NotAssigned { id: id.clone() })?;
        log::debug!("removed '{label}' from region {id}");
        self.pool.put_back(label);
        Ok(self
            .pool
            .labels()
            .last()
            .map(String::as_str)
            .unwrap_or_default())
    }

    /// Updates the hovered region from a pointer on a rendered surface.
    pub fn hover(&mut self, pointer: Point, rendered: Size) -> Option<&RegionId> {
        match self.viewport(rendered) {
            Some(viewport) => self.hover_at(viewport.to_native(pointer)),
            None => {
                self.hovered = None;
                None
            }
        }
    }

    /// Updates the hovered region from a point in native pixel space.
    pub fn hover_at(&mut self, point: Point) -> Option<&RegionId> {
        if self.state.is_loading() {
            self.hovered = None;
            return None;
        }
        self.hovered = self.game.region_at(point).map(|r| r.id().clone());
        self.hovered.as_ref()
    }

    /// Pointer left the surface.
    pub fn clear_hover(&mut self) {
        self.hovered = None;
    }

    /// Submission needs every label placed.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.state.is_in_progress() && self.pool.is_empty()
    }

    pub fn try_submit(&mut self) -> Result<Score, SubmitError> {
        if !self.state.is_in_progress() {
            return Err(SubmitError::NotInProgress);
        }
        if !self.pool.is_empty() {
            return Err(SubmitError::Incomplete {
                remaining: self.pool.len(),
            });
        }
        let score = Score::from_counts(self.correct_count(), self.game.regions.len());
        log::debug!("submitted game {}: {score}", self.game.id);
        self.selected_label = None;
        self.state = SessionState::Submitted(score);
        Ok(score)
    }

    /// Number of regions whose assigned label equals their own label.
    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.game
            .regions
            .iter()
            .filter(|r| self.assignments.get(r.id()) == Some(r.label()))
            .count()
    }

    /// Reveal is offered only for a submitted, imperfect attempt.
    #[must_use]
    pub fn can_reveal(&self) -> bool {
        matches!(self.state, SessionState::Submitted(score) if !score.is_perfect())
    }

    /// Shows correct/incorrect markers. Returns `false` if not offered.
    pub fn reveal(&mut self) -> bool {
        let SessionState::Submitted(score) = self.state else {
            return false;
        };
        if score.is_perfect() {
            return false;
        }
        self.state = SessionState::Revealed(score);
        true
    }

    /// Whether a region's assignment is correct. Only known once revealed.
    #[must_use]
    pub fn region_outcome(&self, id: &RegionId) -> Option<RegionOutcome> {
        if !self.state.is_revealed() {
            return None;
        }
        let region = self.game.regions.iter().find(|r| r.id() == id)?;
        let assigned = self.assignments.get(id)?;
        Some(if assigned == region.label() {
            RegionOutcome::Correct
        } else {
            RegionOutcome::Incorrect
        })
    }

    /// Starts over with the same game and a fresh shuffle.
    ///
    /// The image stays loaded, so the session goes straight back to
    /// [`SessionState::InProgress`].
    pub fn reset(&mut self) {
        self.pool.refill(all_labels(&self.game));
        self.assignments.clear();
        self.selected_label = None;
        self.hovered = None;
        self.state = if self.native_size.is_some() {
            SessionState::InProgress
        } else {
            SessionState::Loading
        };
        log::debug!("reset game {}", self.game.id);
    }

    /// Per-region presentation hints in stored region order.
    #[must_use]
    pub fn region_views(&self) -> Vec<RegionView<'_>> {
        let text_cover = self.game.game_type.is_text_cover();
        self.game
            .regions
            .iter()
            .map(|region| {
                let assigned_label = self.assignments.get(region.id());
                RegionView {
                    region,
                    assigned_label,
                    color: self.assignments.color_of(region.id()),
                    hovered: self.hovered.as_ref() == Some(region.id()),
                    covered: text_cover && assigned_label.is_some(),
                    outcome: self.region_outcome(region.id()),
                }
            })
            .collect()
    }
}

fn all_labels(game: &ImageGame) -> impl Iterator<Item = String> + '_ {
    game.regions.iter().map(|r| r.label().to_owned())
}
