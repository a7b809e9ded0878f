use arrayvec::ArrayVec;

use crate::{error::Error, Direction, OwnedCard, Player, Pos, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Hole,
    Empty,
    Occupied(OwnedCard),
}

/// A rectangular grid of cells. Dimensions are fixed at construction; a cell
/// is `Occupied` exactly when a card sits in it, so the cell enum is the
/// single source of truth for occupancy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: u8,
    cols: u8,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(rows: u8, cols: u8) -> Self {
        Self::with_holes(rows, cols, &[])
    }

    pub fn with_holes(rows: u8, cols: u8, holes: &[Pos]) -> Self {
        let mut cells = vec![Cell::Empty; rows as usize * cols as usize];
        for pos in holes {
            if pos.row < rows && pos.col < cols {
                cells[pos.row as usize * cols as usize + pos.col as usize] = Cell::Hole;
            }
        }
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        (pos.row < self.rows && pos.col < self.cols)
            .then(|| pos.row as usize * self.cols as usize + pos.col as usize)
    }

    pub fn cell(&self, pos: Pos) -> Result<&Cell> {
        let idx = self.index(pos).ok_or(Error::OutOfBounds { pos })?;
        Ok(&self.cells[idx])
    }

    /// The card at `pos`, if that cell is in bounds and occupied.
    pub fn card_at(&self, pos: Pos) -> Option<&OwnedCard> {
        match self.cell(pos) {
            Ok(Cell::Occupied(card)) => Some(card),
            _ => None,
        }
    }

    /// Put a card into an empty cell.
    pub fn place(&mut self, pos: Pos, card: OwnedCard) -> Result<()> {
        let idx = self.index(pos).ok_or(Error::InvalidPlacement { pos })?;
        match self.cells[idx] {
            Cell::Empty => {
                self.cells[idx] = Cell::Occupied(card);
                Ok(())
            }
            _ => Err(Error::InvalidPlacement { pos }),
        }
    }

    /// Rewrite the owner of the card at `pos`. The card itself is untouched.
    pub fn flip_owner(&mut self, pos: Pos, to: Player) {
        let idx = self.index(pos);
        match idx.map(|idx| &mut self.cells[idx]) {
            Some(Cell::Occupied(owned)) => owned.owner = to,
            _ => unreachable!("flip_owner called on a cell without a card"),
        }
    }

    /// The in-bounds neighbour of `pos` in the given direction, if any.
    pub fn neighbor(&self, pos: Pos, dir: Direction) -> Option<Pos> {
        let npos = match dir {
            Direction::North => Pos::new(pos.row.checked_sub(1)?, pos.col),
            Direction::East => Pos::new(pos.row, pos.col + 1),
            Direction::South => Pos::new(pos.row + 1, pos.col),
            Direction::West => Pos::new(pos.row, pos.col.checked_sub(1)?),
        };
        (npos.row < self.rows && npos.col < self.cols).then_some(npos)
    }

    /// Occupied neighbours of `pos`, with the direction that points at them.
    /// Holes and out-of-bounds positions are both simply absent.
    pub fn adjacent_occupied(&self, pos: Pos) -> ArrayVec<(Direction, Pos, OwnedCard), 4> {
        let mut found = ArrayVec::new();
        for dir in Direction::ALL {
            let Some(npos) = self.neighbor(pos, dir) else {
                continue;
            };
            if let Some(card) = self.card_at(npos) {
                found.push((dir, npos, card.clone()));
            }
        }
        found
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pos, &Cell)> + '_ {
        let cols = self.cols as usize;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (Pos::new((i / cols) as u8, (i % cols) as u8), cell))
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<Pos> {
        self.iter()
            .filter(|(_, cell)| matches!(cell, Cell::Empty))
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Cells that can ever hold a card: everything that is not a hole.
    pub fn playable_cells(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| !matches!(cell, Cell::Hole))
            .count()
    }

    pub fn is_full(&self) -> bool {
        !self.cells.iter().any(|cell| matches!(cell, Cell::Empty))
    }

    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|cell| matches!(cell, Cell::Occupied(owned) if owned.owner == player))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Card;
    use pretty_assertions::assert_eq;

    fn card(name: &str) -> OwnedCard {
        OwnedCard {
            owner: Player::Red,
            card: Card::new(name, 5, 5, 5, 5),
        }
    }

    #[test]
    fn cell_lookup_fails_outside_the_grid() {
        let board = Board::new(3, 3);

        let res = board.cell(Pos::new(3, 0));

        assert_eq!(
            res,
            Err(Error::OutOfBounds {
                pos: Pos::new(3, 0)
            })
        );
    }

    #[test]
    fn placing_on_a_hole_is_rejected() {
        let mut board = Board::with_holes(3, 3, &[Pos::new(1, 1)]);

        let res = board.place(Pos::new(1, 1), card("a"));

        assert_eq!(
            res,
            Err(Error::InvalidPlacement {
                pos: Pos::new(1, 1)
            })
        );
    }

    #[test]
    fn placing_on_an_occupied_cell_is_rejected() {
        let mut board = Board::new(3, 3);
        board.place(Pos::new(0, 0), card("a")).unwrap();

        let res = board.place(Pos::new(0, 0), card("b"));

        assert_eq!(
            res,
            Err(Error::InvalidPlacement {
                pos: Pos::new(0, 0)
            })
        );
    }

    #[test]
    fn adjacency_skips_holes_and_edges() {
        //  a | # | .
        // ---+---+---
        //  b | * | .
        // ---+---+---
        //  . | c | .
        let mut board = Board::with_holes(3, 3, &[Pos::new(0, 1)]);
        board.place(Pos::new(0, 0), card("a")).unwrap();
        board.place(Pos::new(1, 0), card("b")).unwrap();
        board.place(Pos::new(2, 1), card("c")).unwrap();

        let found = board.adjacent_occupied(Pos::new(1, 1));
        let found: Vec<_> = found
            .into_iter()
            .map(|(dir, pos, owned)| (dir, pos, owned.card.name))
            .collect();

        assert_eq!(
            found,
            vec![
                (Direction::South, Pos::new(2, 1), "c".to_string()),
                (Direction::West, Pos::new(1, 0), "b".to_string()),
            ]
        );
    }

    #[test]
    fn flipping_changes_the_owner_and_nothing_else() {
        let mut board = Board::new(3, 3);
        board.place(Pos::new(0, 0), card("a")).unwrap();

        board.flip_owner(Pos::new(0, 0), Player::Blue);

        let owned = board.card_at(Pos::new(0, 0)).unwrap();
        assert_eq!(owned.owner, Player::Blue);
        assert_eq!(owned.card, Card::new("a", 5, 5, 5, 5));
    }

    #[test]
    fn playable_cells_excludes_holes_only() {
        let mut board = Board::with_holes(3, 3, &[Pos::new(0, 0), Pos::new(2, 2)]);
        board.place(Pos::new(1, 1), card("a")).unwrap();

        assert_eq!(board.playable_cells(), 7);
        assert_eq!(board.empty_cells().len(), 6);
        assert!(!board.is_full());
    }
}
