use crate::{GameError, GameResult};
use itertools::izip;
use serde::{Deserialize, Serialize};

/// An RGB color as understood by the controller.
///
/// Each channel is limited to `0..=63`. Out-of-range values are clamped on construction.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Serialize, Deserialize,
)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    pub const MAX_CHANNEL: u8 = 63;

    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(63, 63, 63);
    pub const RED: Color = Color::new(63, 0, 0);
    pub const GREEN: Color = Color::new(0, 63, 0);
    pub const BLUE: Color = Color::new(0, 0, 63);
    pub const YELLOW: Color = Color::new(63, 63, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
        }
    }

    pub const fn r(&self) -> u8 {
        self.r
    }

    pub const fn g(&self) -> u8 {
        self.g
    }

    pub const fn b(&self) -> u8 {
        self.b
    }

    /// Scales the channels up to the usual 8-bit range, e.g. for terminal output.
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        let scale = |c: u8| (u16::from(c) * 255 / u16::from(Self::MAX_CHANNEL)) as u8;
        (scale(self.r), scale(self.g), scale(self.b))
    }

    /// Squared euclidean distance in RGB space.
    pub fn distance_squared(&self, other: &Color) -> u32 {
        let d = |a: u8, b: u8| {
            let diff = i32::from(a) - i32::from(b);
            (diff * diff) as u32
        };
        d(self.r, other.r) + d(self.g, other.g) + d(self.b, other.b)
    }
}

const fn clamp_channel(value: u8) -> u8 {
    if value > Color::MAX_CHANNEL {
        Color::MAX_CHANNEL
    } else {
        value
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Color> for [u8; 3] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b]
    }
}

/// Linearly interpolates a single channel value in `steps` steps.
///
/// The step width is truncated, so the last value only hits `c2` exactly if `steps - 1` divides
/// the distance between both values.
pub fn interpolate_component(c1: u8, c2: u8, steps: usize) -> GameResult<Vec<u8>> {
    match steps {
        0 => Err(GameError::InvalidArgument(
            "interpolation needs at least one step",
        )),
        1 => Ok(vec![c1]),
        _ => {
            let start = i64::from(c1);
            let step = (i64::from(c2) - start) / (steps as i64 - 1);
            // Stays between c1 and c2 because the step is truncated toward zero
            let values = (0..steps as i64)
                .map(|i| (start + i * step).clamp(0, i64::from(u8::MAX)) as u8)
                .collect();
            Ok(values)
        }
    }
}

/// Interpolates each channel separately. The first color is always `color1`.
pub fn interpolate_colors(color1: Color, color2: Color, steps: usize) -> GameResult<Vec<Color>> {
    let reds = interpolate_component(color1.r, color2.r, steps)?;
    let greens = interpolate_component(color1.g, color2.g, steps)?;
    let blues = interpolate_component(color1.b, color2.b, steps)?;
    let colors = izip!(reds, greens, blues)
        .map(|(r, g, b)| Color::new(r, g, b))
        .collect();
    Ok(colors)
}

/// Colors of a rectangular area, row 0 at the bottom.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ColorGrid {
    width: usize,
    height: usize,
    colors: Vec<Color>,
}

impl ColorGrid {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, row: usize, column: usize) -> Option<Color> {
        if row >= self.height || column >= self.width {
            return None;
        }
        self.colors.get(row * self.width + column).copied()
    }

    pub fn row(&self, row: usize) -> Option<&[Color]> {
        if row >= self.height {
            return None;
        }
        let start = row * self.width;
        Some(&self.colors[start..start + self.width])
    }
}

/// Builds a bilinear gradient between the four corners.
///
/// First the bottom and the top row are interpolated between their corners, then each column
/// between its bottom and top color.
pub fn interpolate_grid(
    lower_left: Color,
    lower_right: Color,
    upper_left: Color,
    upper_right: Color,
    width: usize,
    height: usize,
) -> GameResult<ColorGrid> {
    let bottom = interpolate_colors(lower_left, lower_right, width)?;
    let top = interpolate_colors(upper_left, upper_right, width)?;
    let columns = bottom
        .into_iter()
        .zip(top)
        .map(|(b, t)| interpolate_colors(b, t, height))
        .collect::<GameResult<Vec<_>>>()?;
    let colors = (0..height)
        .flat_map(|row| columns.iter().map(move |column| column[row]))
        .collect();
    Ok(ColorGrid {
        width,
        height,
        colors,
    })
}
