use crate::{Player, Pos};

/// How a flip came about: a direct battle with the placed card, a combo from
/// a freshly flipped card, or one of the post-placement rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipCause {
    Battle,
    Combo,
    Same,
    Plus,
}

/// Everything observable that happens during one placement, in order of
/// occurrence. Delivered both as the return value of `place_card` and to any
/// registered observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    CardPlaced {
        player: Player,
        pos: Pos,
    },
    CardFlipped {
        pos: Pos,
        to: Player,
        cause: FlipCause,
    },
    TurnChanged {
        to: Player,
    },
    GameOver {
        winner: Option<Player>,
    },
}
