mod corner;
mod flip_most;

use triad_core::{GameEngine, PlaceCard};

/// Deterministic move pickers. Each one is a pure function of the engine's
/// read-only query surface: same state in, same placement out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Maximize the number of cards the placement would capture.
    FlipMost,
    /// Claim the best-guarded corner; fall back towards the origin.
    Corner,
}

impl Strategy {
    /// Pick a placement for whoever's turn it is. `None` when the game is
    /// not in progress or there is nothing left to play.
    pub fn choose(self, engine: &GameEngine) -> Option<PlaceCard> {
        match self {
            Strategy::FlipMost => flip_most::choose(engine),
            Strategy::Corner => corner::choose(engine),
        }
    }
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flip-most" => Ok(Strategy::FlipMost),
            "corner" => Ok(Strategy::Corner),
            _ => Err(format!(
                "unknown strategy '{s}' (expected 'flip-most' or 'corner')"
            )),
        }
    }
}
