use triad_core::{GameEngine, PlaceCard};

// Greedy capture: try every (empty cell, hand index) pair through the
// engine's flip simulation and keep the first maximum. Cells are visited in
// row-major order with hand indices ascending, so ties resolve to the
// smallest position, then the smallest index.
pub(crate) fn choose(engine: &GameEngine) -> Option<PlaceCard> {
    let player = engine.current_turn()?;
    let hand = engine.hand(player);

    let mut best: Option<(usize, PlaceCard)> = None;
    for pos in engine.empty_cells() {
        for (hand_index, card) in hand.iter().enumerate() {
            let flips = engine.would_flip_count(pos, card).ok()?;
            if best.as_ref().map_or(true, |(most, _)| flips > *most) {
                best = Some((
                    flips,
                    PlaceCard {
                        player,
                        pos,
                        hand_index,
                    },
                ));
            }
        }
    }

    best.map(|(_, placement)| placement)
}
