pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("polygon needs at least 3 vertices, got {count}")]
pub struct TooFewVerticesError {
    pub count: usize,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum GameValidationError {
    #[display("game has no regions")]
    NoRegions,
    #[display("region '{region}' has an empty label")]
    EmptyLabel { region: RegionId },
    #[display("label '{label}' is used by more than one region")]
    DuplicateLabel { label: String },
    #[display("region id '{id}' is used more than once")]
    DuplicateRegionId { id: RegionId },
    #[display("polygon region '{region}' has {count} vertices, needs at least 3")]
    TooFewVertices { region: RegionId, count: usize },
    #[display("rectangle region '{region}' has no area")]
    EmptyArea { region: RegionId },
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum EditorError {
    #[display("cannot finish polygon: {source}")]
    TooFewVertices { source: TooFewVerticesError },
    #[display("no region with id '{id}'")]
    UnknownRegion { id: RegionId },
    #[display("a shape is still being drawn")]
    ShapeInProgress,
    #[display("label must not be empty")]
    EmptyLabel,
    #[display("label '{label}' is already used by another region")]
    DuplicateLabel { label: String },
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum PlacementError {
    #[display("game is not in progress")]
    NotInProgress,
    #[display("no label selected")]
    NoLabelSelected,
    #[display("no region at this point")]
    NoRegionAtPoint,
    #[display("region '{id}' already has a label")]
    RegionAlreadyAssigned { id: RegionId },
    #[display("label '{label}' is not available")]
    UnknownLabel { label: String },
    #[display("region '{id}' has no label to remove")]
    NotAssigned { id: RegionId },
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum SubmitError {
    #[display("game is not in progress")]
    NotInProgress,
    #[display("{remaining} labels are still unplaced")]
    Incomplete { remaining: usize },
}
