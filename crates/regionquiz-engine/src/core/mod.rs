pub use self::{game::*, geometry::*, palette::*, region::*};

pub(crate) mod game;
pub(crate) mod geometry;
pub(crate) mod palette;
pub(crate) mod region;
