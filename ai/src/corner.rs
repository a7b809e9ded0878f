use triad_core::{Cell, Direction, GameEngine, PlaceCard, Pos};

// Corners first: a corner exposes only two edges, so the pair of values
// facing into the board is what defends it. Score every (empty corner, card)
// pair by that pair's sum and keep the first maximum; corner order
// (top-left, top-right, bottom-left, bottom-right), then hand index, breaks
// ties. With no corner left, fall back to the empty cell nearest the origin
// and lead with the first card in hand.
pub(crate) fn choose(engine: &GameEngine) -> Option<PlaceCard> {
    let player = engine.current_turn()?;
    let hand = engine.hand(player);
    if hand.is_empty() {
        return None;
    }
    let board = engine.board();
    let (last_row, last_col) = (board.rows() - 1, board.cols() - 1);

    // each corner with the two directions pointing into the board
    let corners = [
        (Pos::new(0, 0), [Direction::East, Direction::South]),
        (Pos::new(0, last_col), [Direction::South, Direction::West]),
        (Pos::new(last_row, 0), [Direction::North, Direction::East]),
        (
            Pos::new(last_row, last_col),
            [Direction::North, Direction::West],
        ),
    ];

    let mut best: Option<(u16, PlaceCard)> = None;
    for (pos, into_board) in corners {
        if !matches!(board.cell(pos), Ok(Cell::Empty)) {
            continue;
        }
        for (hand_index, card) in hand.iter().enumerate() {
            let score = card.value(into_board[0]) as u16 + card.value(into_board[1]) as u16;
            if best.as_ref().map_or(true, |(top, _)| score > *top) {
                best = Some((
                    score,
                    PlaceCard {
                        player,
                        pos,
                        hand_index,
                    },
                ));
            }
        }
    }
    if let Some((_, placement)) = best {
        return Some(placement);
    }

    // empty_cells is row-major, so the first minimum wins distance ties
    let pos = engine
        .empty_cells()
        .into_iter()
        .min_by_key(|pos| (pos.row as u32).pow(2) + (pos.col as u32).pow(2))?;
    Some(PlaceCard {
        player,
        pos,
        hand_index: 0,
    })
}
