//! State machines for authoring and playing image-labeling games.
//!
//! This module builds on the geometry and data types in [`crate::core`]:
//!
//! - [`EditorState`] - Region authoring with rectangle, polygon and freehand tools
//! - [`PlaySession`] - One attempt at a game: label pool, placements, scoring, reveal
//! - [`TopicSession`] - A play session that advances through the games of a topic
//! - [`LabelPool`] - Shuffled pool of unplaced labels
//! - [`AssignmentMap`] - Insertion-ordered region → label map that drives coloring
//! - [`ShuffleSeed`] - Seed for deterministic shuffling
//!
//! # Game Flow
//!
//! 1. An author draws regions with [`EditorState`] and hands them to storage
//! 2. A [`PlaySession`] loads the stored game and shuffles its labels
//! 3. Once the image has loaded, the player places labels on regions
//! 4. With every label placed, the attempt is submitted and scored
//! 5. An imperfect attempt can be revealed, reset, or left for the next game
//!
//! All transitions are synchronous reactions to discrete input events. Each
//! editor or session is owned by one view and never shared.

pub use self::{
    assignments::*, editor::*, game_sequence::*, label_pool::*, play_session::*, score::*,
};

mod assignments;
mod editor;
mod game_sequence;
mod label_pool;
mod play_session;
mod score;
