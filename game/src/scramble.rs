use crate::{Color, Layout};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How hard the scrambler tries to produce something the player actually has to solve.
#[derive(
    Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ScrambleMode {
    /// A single uniform shuffle. The result may coincide with the target, partly or even fully.
    #[default]
    Uniform,
    /// Shuffles again (a bounded number of times) as long as the result equals the target.
    ///
    /// This can't succeed if all colors are the same.
    Unsolved,
}

/// Maximum number of shuffles in [`ScrambleMode::Unsolved`].
pub const MAX_UNSOLVED_ATTEMPTS: usize = 64;

/// Redistributes the colors of the given layout randomly among its buttons.
///
/// Every permutation is equally likely. The result has exactly the same buttons and the same
/// colors (including repetitions), just assigned differently. Layouts with less than two entries
/// are returned unchanged.
pub fn scramble<R: Rng + ?Sized>(target: &Layout, rng: &mut R) -> Layout {
    if target.len() <= 1 {
        return target.clone();
    }
    let mut colors: Vec<Color> = target.iter().map(|(_, color)| color).collect();
    colors.shuffle(rng);
    target.ids().zip(colors).collect()
}

pub fn scramble_with_mode<R: Rng + ?Sized>(
    target: &Layout,
    mode: ScrambleMode,
    rng: &mut R,
) -> Layout {
    match mode {
        ScrambleMode::Uniform => scramble(target, rng),
        ScrambleMode::Unsolved => {
            let mut scrambled = scramble(target, rng);
            let mut attempts = 1;
            while &scrambled == target && attempts < MAX_UNSOLVED_ATTEMPTS {
                scrambled = scramble(target, rng);
                attempts += 1;
            }
            if &scrambled == target {
                tracing::debug!(
                    msg = "Scrambled layout still equals target",
                    attempts,
                    buttons = target.len()
                );
            }
            scrambled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ButtonId;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeMap;

    fn layout(entries: &[(u8, Color)]) -> Layout {
        entries
            .iter()
            .map(|(id, color)| (ButtonId::new(*id), *color))
            .collect()
    }

    fn sorted_colors(layout: &Layout) -> Vec<[u8; 3]> {
        let mut colors: Vec<[u8; 3]> = layout.iter().map(|(_, c)| c.into()).collect();
        colors.sort();
        colors
    }

    #[test]
    fn scramble_is_permutation() {
        // Given
        let target = layout(&[
            (11, Color::RED),
            (12, Color::RED),
            (13, Color::GREEN),
            (14, Color::BLUE),
            (15, Color::YELLOW),
            (16, Color::WHITE),
        ]);
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            // When
            let scrambled = scramble(&target, &mut rng);
            // Then
            assert!(scrambled.ids().eq(target.ids()));
            assert_eq!(sorted_colors(&scrambled), sorted_colors(&target));
        }
    }

    #[test]
    fn tiny_layouts_stay_unchanged() {
        let mut rng = StdRng::seed_from_u64(5);
        let empty = Layout::new();
        let single = layout(&[(11, Color::RED)]);
        assert_eq!(scramble(&empty, &mut rng), empty);
        assert_eq!(scramble(&single, &mut rng), single);
    }

    #[test]
    fn all_permutations_roughly_equally_likely() {
        // Given
        let target = layout(&[(1, Color::RED), (2, Color::GREEN), (3, Color::BLUE)]);
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts: BTreeMap<Vec<[u8; 3]>, usize> = BTreeMap::new();
        // When
        for _ in 0..6000 {
            let scrambled = scramble(&target, &mut rng);
            let key = scrambled.iter().map(|(_, c)| c.into()).collect();
            *counts.entry(key).or_default() += 1;
        }
        // Then
        assert_eq!(counts.len(), 6);
        for count in counts.values() {
            assert!((800..1200).contains(count), "count {count} is off");
        }
    }

    #[test]
    fn unsolved_mode_never_returns_target() {
        // Given
        let target = layout(&[(1, Color::RED), (2, Color::GREEN)]);
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            // When
            let scrambled = scramble_with_mode(&target, ScrambleMode::Unsolved, &mut rng);
            // Then
            assert_ne!(scrambled, target);
        }
    }

    #[test]
    fn unsolved_mode_gives_up_on_uniform_colors() {
        let target = layout(&[(1, Color::RED), (2, Color::RED), (3, Color::RED)]);
        let mut rng = StdRng::seed_from_u64(1);
        let scrambled = scramble_with_mode(&target, ScrambleMode::Unsolved, &mut rng);
        assert_eq!(scrambled, target);
    }
}
