use crate::{
    interpolate_colors, interpolate_grid, ButtonId, Color, GameError, GameResult, GridTopology,
};
use base::validation_util::ensure_no_duplicate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Assignment of colors to buttons. Buttons which are not contained are left untouched.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Layout {
    colors: BTreeMap<ButtonId, Color>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: ButtonId) -> Option<Color> {
        self.colors.get(&id).copied()
    }

    /// Returns the previously assigned color, if any.
    pub fn insert(&mut self, id: ButtonId, color: Color) -> Option<Color> {
        self.colors.insert(id, color)
    }

    pub fn contains(&self, id: ButtonId) -> bool {
        self.colors.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// IDs in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = ButtonId> + '_ {
        self.colors.keys().copied()
    }

    /// Entries in ascending ID order.
    pub fn iter(&self) -> impl Iterator<Item = (ButtonId, Color)> + '_ {
        self.colors.iter().map(|(id, color)| (*id, *color))
    }

    /// Exchanges the colors of both buttons.
    ///
    /// Returns `false` and leaves the layout alone if one of them has no color.
    pub fn swap(&mut self, a: ButtonId, b: ButtonId) -> bool {
        let (Some(color_a), Some(color_b)) = (self.get(a), self.get(b)) else {
            return false;
        };
        self.colors.insert(a, color_b);
        self.colors.insert(b, color_a);
        true
    }

    /// Only keeps the entries of the given buttons.
    pub fn restricted_to(&self, set: &ScrambleSet) -> Layout {
        self.iter().filter(|(id, _)| set.contains(*id)).collect()
    }

    /// Whether both layouts assign exactly the same color to each of the given buttons.
    pub fn matches_on(&self, other: &Layout, ids: impl IntoIterator<Item = ButtonId>) -> bool {
        ids.into_iter().all(|id| self.get(id) == other.get(id))
    }

    /// Moves each entry `delta` rows up (positive) or down (negative).
    ///
    /// Fails if a shifted button would fall off the grid.
    pub fn shifted(&self, topology: &GridTopology, delta: isize) -> GameResult<Layout> {
        self.iter()
            .map(|(id, color)| {
                topology
                    .shift_rows(id, delta)
                    .map(|shifted_id| (shifted_id, color))
                    .ok_or(GameError::InvalidButton(id))
            })
            .collect()
    }
}

impl FromIterator<(ButtonId, Color)> for Layout {
    fn from_iter<T: IntoIterator<Item = (ButtonId, Color)>>(iter: T) -> Self {
        Self {
            colors: iter.into_iter().collect(),
        }
    }
}

/// The buttons which take part in one round.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct ScrambleSet {
    ids: BTreeSet<ButtonId>,
}

impl ScrambleSet {
    /// Validates each ID against the topology.
    ///
    /// Unknown buttons and buttons given twice are rejected.
    pub fn new(
        topology: &GridTopology,
        ids: impl IntoIterator<Item = ButtonId>,
    ) -> GameResult<Self> {
        let ids: Vec<_> = ids.into_iter().collect();
        if let Some(invalid) = ids.iter().find(|id| !topology.is_valid_button(**id)) {
            return Err(GameError::InvalidButton(*invalid));
        }
        if let Err(e) = ensure_no_duplicate("buttons", ids.iter().copied()) {
            tracing::debug!(msg = "Invalid scramble set", %e);
            if let Some(duplicate) = e.duplicates().first() {
                return Err(GameError::DuplicateButton(*duplicate));
            }
        }
        Ok(Self {
            ids: ids.into_iter().collect(),
        })
    }

    pub fn contains(&self, id: ButtonId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// IDs in ascending order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = ButtonId> + '_ {
        self.ids.iter().copied()
    }
}

/// How the target colors of a round are chosen.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutGenerator {
    /// Every button gets the same color.
    Flat(Color),
    /// A gradient over the buttons of each grid row, from the first column to the last.
    ///
    /// Each row starts over, so rows taking part with the same buttons look the same.
    Linear { from: Color, to: Color },
    /// A 2D gradient over the rectangle spanned by the buttons.
    Bilinear {
        lower_left: Color,
        lower_right: Color,
        upper_left: Color,
        upper_right: Color,
    },
}

impl Default for LayoutGenerator {
    fn default() -> Self {
        LayoutGenerator::Bilinear {
            lower_left: Color::RED,
            lower_right: Color::YELLOW,
            upper_left: Color::BLUE,
            upper_right: Color::GREEN,
        }
    }
}

impl LayoutGenerator {
    /// Produces the target layout for the given buttons.
    pub fn generate(&self, topology: &GridTopology, set: &ScrambleSet) -> GameResult<Layout> {
        if set.is_empty() {
            return Ok(Layout::new());
        }
        match *self {
            LayoutGenerator::Flat(color) => Ok(set.iter().map(|id| (id, color)).collect()),
            LayoutGenerator::Linear { from, to } => {
                let mut layout = Layout::new();
                for row in topology.rows() {
                    let ids: Vec<_> = row.iter().copied().filter(|id| set.contains(*id)).collect();
                    if ids.is_empty() {
                        continue;
                    }
                    let colors = interpolate_colors(from, to, ids.len())?;
                    for (id, color) in ids.into_iter().zip(colors) {
                        layout.insert(id, color);
                    }
                }
                Ok(layout)
            }
            LayoutGenerator::Bilinear {
                lower_left,
                lower_right,
                upper_left,
                upper_right,
            } => {
                let positions = set
                    .iter()
                    .map(|id| {
                        topology
                            .position_of(id)
                            .map(|pos| (id, pos))
                            .ok_or(GameError::InvalidButton(id))
                    })
                    .collect::<GameResult<Vec<_>>>()?;
                let min_row = positions.iter().map(|(_, p)| p.row).min().unwrap_or(0);
                let max_row = positions.iter().map(|(_, p)| p.row).max().unwrap_or(0);
                let min_column = positions.iter().map(|(_, p)| p.column).min().unwrap_or(0);
                let max_column = positions.iter().map(|(_, p)| p.column).max().unwrap_or(0);
                let grid = interpolate_grid(
                    lower_left,
                    lower_right,
                    upper_left,
                    upper_right,
                    max_column - min_column + 1,
                    max_row - min_row + 1,
                )?;
                positions
                    .into_iter()
                    .map(|(id, pos)| {
                        grid.get(pos.row - min_row, pos.column - min_column)
                            .map(|color| (id, color))
                            .ok_or(GameError::InvalidButton(id))
                    })
                    .collect()
            }
        }
    }
}
