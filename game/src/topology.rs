use crate::{GameError, GameResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifies one physical button of the grid.
///
/// On the hardware this is the note number the button sends and listens to. Whether an ID is
/// actually addressable is decided by a [`GridTopology`], never by arithmetic on the number.
#[derive(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Debug,
    derive_more::Display,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct ButtonId(u8);

impl ButtonId {
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl From<u8> for ButtonId {
    fn from(raw: u8) -> Self {
        Self(raw)
    }
}

/// Row and column of a button. Row 0 is the bottom row, column 0 the leftmost column.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct GridPosition {
    pub row: usize,
    pub column: usize,
}

/// Describes which buttons exist and how they are grouped into rows.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct GridTopology {
    rows: Vec<Vec<ButtonId>>,
    positions: BTreeMap<ButtonId, GridPosition>,
}

impl GridTopology {
    /// Number of rows and columns of the main button area of a Launchpad.
    pub const LAUNCHPAD_SIZE: u8 = 8;

    /// The 8x8 main area of a Launchpad in programmer mode.
    ///
    /// The bottom row consists of buttons 11 to 18, the one above of 21 to 28 and so on.
    pub fn launchpad() -> Self {
        let rows = (1..=Self::LAUNCHPAD_SIZE)
            .map(|row| {
                let first = row * 10 + 1;
                (first..first + Self::LAUNCHPAD_SIZE)
                    .map(ButtonId::new)
                    .collect()
            })
            .collect();
        Self::from_rows_unchecked(rows)
    }

    /// A single row of consecutive buttons from `begin` (inclusive) to `end` (exclusive).
    pub fn single_row(begin: u8, end: u8) -> Self {
        Self::from_rows_unchecked(vec![(begin..end).map(ButtonId::new).collect()])
    }

    /// Builds a topology from the given rows, bottom row first.
    pub fn from_rows(rows: Vec<Vec<ButtonId>>) -> GameResult<Self> {
        let mut positions = BTreeMap::new();
        for (row_index, row) in rows.iter().enumerate() {
            for (column, id) in row.iter().enumerate() {
                let pos = GridPosition {
                    row: row_index,
                    column,
                };
                if positions.insert(*id, pos).is_some() {
                    return Err(GameError::DuplicateButton(*id));
                }
            }
        }
        Ok(Self { rows, positions })
    }

    fn from_rows_unchecked(rows: Vec<Vec<ButtonId>>) -> Self {
        let positions = rows
            .iter()
            .enumerate()
            .flat_map(|(row, ids)| {
                ids.iter()
                    .enumerate()
                    .map(move |(column, id)| (*id, GridPosition { row, column }))
            })
            .collect();
        Self { rows, positions }
    }

    pub fn is_valid_button(&self, id: ButtonId) -> bool {
        self.positions.contains_key(&id)
    }

    /// Returns an error if the given button doesn't exist.
    pub fn validate_button(&self, id: ButtonId) -> GameResult<ButtonId> {
        if self.is_valid_button(id) {
            Ok(id)
        } else {
            Err(GameError::InvalidButton(id))
        }
    }

    /// All buttons in ascending ID order.
    pub fn all_buttons(&self) -> impl ExactSizeIterator<Item = ButtonId> + '_ {
        self.positions.keys().copied()
    }

    pub fn button_count(&self) -> usize {
        self.positions.len()
    }

    pub fn rows(&self) -> &[Vec<ButtonId>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[ButtonId]> {
        self.rows.get(index).map(|r| r.as_slice())
    }

    pub fn position_of(&self, id: ButtonId) -> Option<GridPosition> {
        self.positions.get(&id).copied()
    }

    pub fn button_at(&self, pos: GridPosition) -> Option<ButtonId> {
        self.rows.get(pos.row)?.get(pos.column).copied()
    }

    /// Returns the button in the same column, `delta` rows above (positive) or below (negative).
    pub fn shift_rows(&self, id: ButtonId, delta: isize) -> Option<ButtonId> {
        let pos = self.position_of(id)?;
        let row = pos.row.checked_add_signed(delta)?;
        self.button_at(GridPosition {
            row,
            column: pos.column,
        })
    }

    pub fn min_button(&self) -> Option<ButtonId> {
        self.positions.keys().next().copied()
    }

    pub fn max_button(&self) -> Option<ButtonId> {
        self.positions.keys().next_back().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launchpad_basics() {
        // Given
        let topology = GridTopology::launchpad();
        // Then
        assert_eq!(topology.button_count(), 64);
        assert!(topology.is_valid_button(ButtonId::new(11)));
        assert!(topology.is_valid_button(ButtonId::new(88)));
        assert!(!topology.is_valid_button(ButtonId::new(19)));
        assert!(!topology.is_valid_button(ButtonId::new(20)));
        assert!(!topology.is_valid_button(ButtonId::new(0)));
        assert!(!topology.is_valid_button(ButtonId::new(91)));
        assert_eq!(topology.min_button(), Some(ButtonId::new(11)));
        assert_eq!(topology.max_button(), Some(ButtonId::new(88)));
    }

    #[test]
    fn launchpad_positions() {
        // Given
        let topology = GridTopology::launchpad();
        // When
        let pos = topology.position_of(ButtonId::new(34)).unwrap();
        // Then
        assert_eq!(pos, GridPosition { row: 2, column: 3 });
        assert_eq!(topology.button_at(pos), Some(ButtonId::new(34)));
        assert_eq!(
            topology.button_at(GridPosition { row: 8, column: 0 }),
            None
        );
    }

    #[test]
    fn shift_rows_stays_inside_grid() {
        let topology = GridTopology::launchpad();
        assert_eq!(
            topology.shift_rows(ButtonId::new(14), 2),
            Some(ButtonId::new(34))
        );
        assert_eq!(
            topology.shift_rows(ButtonId::new(34), -2),
            Some(ButtonId::new(14))
        );
        assert_eq!(topology.shift_rows(ButtonId::new(14), -1), None);
        assert_eq!(topology.shift_rows(ButtonId::new(84), 1), None);
        assert_eq!(topology.shift_rows(ButtonId::new(99), 0), None);
    }

    #[test]
    fn single_row() {
        // Given
        let topology = GridTopology::single_row(50, 58);
        // Then
        assert_eq!(topology.button_count(), 8);
        assert_eq!(topology.rows().len(), 1);
        assert!(topology.is_valid_button(ButtonId::new(57)));
        assert!(!topology.is_valid_button(ButtonId::new(58)));
        assert_eq!(
            topology.validate_button(ButtonId::new(49)),
            Err(GameError::InvalidButton(ButtonId::new(49)))
        );
    }

    #[test]
    fn from_rows_rejects_duplicates() {
        let result = GridTopology::from_rows(vec![
            vec![ButtonId::new(1), ButtonId::new(2)],
            vec![ButtonId::new(3), ButtonId::new(1)],
        ]);
        assert_eq!(result, Err(GameError::DuplicateButton(ButtonId::new(1))));
    }
}
