use arrayvec::ArrayVec;

use crate::{Board, Card, Direction, Player, Pos};

/// Post-placement flip rule, evaluated once on the just-placed card after the
/// battle cascade has settled. Pure: it only inspects the four direct
/// neighbours and reports positions, it never mutates or recurses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlipRule {
    #[default]
    None,
    /// Two or more neighbours whose facing value equals the placed card's
    /// value on that edge flip together.
    Same,
    /// Neighbours whose (placed value + facing value) sums collide flip
    /// together.
    Plus,
}

impl FlipRule {
    pub fn extra_flips(&self, board: &Board, placed: &Card, pos: Pos, placing: Player) -> Vec<Pos> {
        match self {
            FlipRule::None => Vec::new(),
            FlipRule::Same => same_flips(board, placed, pos, placing),
            FlipRule::Plus => plus_flips(board, placed, pos, placing),
        }
    }
}

// opposing-owner neighbours and the value they present to the placed card
fn facing_opponents(
    board: &Board,
    pos: Pos,
    placing: Player,
) -> ArrayVec<(Direction, Pos, u8), 4> {
    board
        .adjacent_occupied(pos)
        .into_iter()
        .filter(|(_, _, owned)| owned.owner != placing)
        .map(|(dir, npos, owned)| (dir, npos, owned.card.value(dir.opposite())))
        .collect()
}

fn same_flips(board: &Board, placed: &Card, pos: Pos, placing: Player) -> Vec<Pos> {
    let matched: Vec<Pos> = facing_opponents(board, pos, placing)
        .into_iter()
        .filter(|(dir, _, facing)| placed.value(*dir) == *facing)
        .map(|(_, npos, _)| npos)
        .collect();

    // a single equality is not a match-up
    if matched.len() >= 2 {
        matched
    } else {
        Vec::new()
    }
}

fn plus_flips(board: &Board, placed: &Card, pos: Pos, placing: Player) -> Vec<Pos> {
    let neighbours = facing_opponents(board, pos, placing);

    let mut flips = Vec::new();
    for (dir, npos, facing) in &neighbours {
        let sum = placed.value(*dir) + facing;
        let twins = neighbours
            .iter()
            .filter(|(d, _, f)| placed.value(*d) + f == sum)
            .count();
        if twins >= 2 {
            flips.push(*npos);
        }
    }

    flips.sort_unstable();
    flips.dedup();
    flips
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OwnedCard;
    use pretty_assertions::assert_eq;

    fn put(board: &mut Board, pos: Pos, owner: Player, card: Card) {
        board.place(pos, OwnedCard { owner, card }).unwrap();
    }

    //  .  | n0 | .
    // ----+----+----
    //  n3 | *  | n1
    // ----+----+----
    //  .  | n2 | .

    #[test]
    fn same_needs_two_matches() {
        let mut board = Board::new(3, 3);
        let placed = Card::new("p", 7, 5, 5, 5);
        put(&mut board, Pos::new(0, 1), Player::Blue, Card::new("n0", 1, 1, 7, 1));
        put(&mut board, Pos::new(1, 1), Player::Red, placed.clone());

        let flips = FlipRule::Same.extra_flips(&board, &placed, Pos::new(1, 1), Player::Red);

        assert_eq!(flips, Vec::<Pos>::new());
    }

    #[test]
    fn same_flips_every_matched_neighbour() {
        let mut board = Board::new(3, 3);
        let placed = Card::new("p", 7, 5, 5, 5);
        put(&mut board, Pos::new(0, 1), Player::Blue, Card::new("n0", 1, 1, 7, 1));
        put(&mut board, Pos::new(1, 2), Player::Blue, Card::new("n1", 1, 1, 1, 5));
        put(&mut board, Pos::new(1, 1), Player::Red, placed.clone());

        let flips = FlipRule::Same.extra_flips(&board, &placed, Pos::new(1, 1), Player::Red);

        assert_eq!(flips, vec![Pos::new(0, 1), Pos::new(1, 2)]);
    }

    #[test]
    fn same_ignores_own_cards() {
        let mut board = Board::new(3, 3);
        let placed = Card::new("p", 7, 5, 5, 5);
        put(&mut board, Pos::new(0, 1), Player::Blue, Card::new("n0", 1, 1, 7, 1));
        put(&mut board, Pos::new(1, 2), Player::Red, Card::new("n1", 1, 1, 1, 5));
        put(&mut board, Pos::new(1, 1), Player::Red, placed.clone());

        let flips = FlipRule::Same.extra_flips(&board, &placed, Pos::new(1, 1), Player::Red);

        assert_eq!(flips, Vec::<Pos>::new());
    }

    #[test]
    fn plus_flips_neighbours_sharing_a_sum() {
        let mut board = Board::new(3, 3);
        // north: 3 + 6 = 9, east: 4 + 5 = 9, south: 2 + 2 = 4
        let placed = Card::new("p", 3, 4, 2, 5);
        put(&mut board, Pos::new(0, 1), Player::Blue, Card::new("n0", 1, 1, 6, 1));
        put(&mut board, Pos::new(1, 2), Player::Blue, Card::new("n1", 1, 1, 1, 5));
        put(&mut board, Pos::new(2, 1), Player::Blue, Card::new("n2", 2, 1, 1, 1));
        put(&mut board, Pos::new(1, 1), Player::Red, placed.clone());

        let flips = FlipRule::Plus.extra_flips(&board, &placed, Pos::new(1, 1), Player::Red);

        assert_eq!(flips, vec![Pos::new(0, 1), Pos::new(1, 2)]);
    }

    #[test]
    fn plus_needs_a_colliding_pair() {
        let mut board = Board::new(3, 3);
        let placed = Card::new("p", 3, 4, 2, 5);
        put(&mut board, Pos::new(0, 1), Player::Blue, Card::new("n0", 1, 1, 6, 1));
        put(&mut board, Pos::new(2, 1), Player::Blue, Card::new("n2", 2, 1, 1, 1));
        put(&mut board, Pos::new(1, 1), Player::Red, placed.clone());

        let flips = FlipRule::Plus.extra_flips(&board, &placed, Pos::new(1, 1), Player::Red);

        assert_eq!(flips, Vec::<Pos>::new());
    }

    #[test]
    fn none_never_flips() {
        let mut board = Board::new(3, 3);
        let placed = Card::new("p", 7, 5, 5, 5);
        put(&mut board, Pos::new(0, 1), Player::Blue, Card::new("n0", 1, 1, 7, 1));
        put(&mut board, Pos::new(1, 2), Player::Blue, Card::new("n1", 1, 1, 1, 5));
        put(&mut board, Pos::new(1, 1), Player::Red, placed.clone());

        let flips = FlipRule::None.extra_flips(&board, &placed, Pos::new(1, 1), Player::Red);

        assert_eq!(flips, Vec::<Pos>::new());
    }
}
