// Game rules applied to a single game's state.

pub mod movement;
pub mod victory;
pub mod visibility;
