use crate::{
    scramble_with_mode, ButtonId, GameError, GameResult, GridTopology, Layout, LayoutGenerator,
    ScrambleMode, ScrambleSet,
};
use rand::Rng;
use std::sync::Arc;

/// State of one round.
///
/// The target layout never changes during a round and can be shared with whoever renders it.
/// The current layout is exclusively owned and only changes by swapping.
#[derive(Clone, Debug)]
pub struct GameSession {
    scramble_set: ScrambleSet,
    target: Arc<Layout>,
    current: Layout,
    guess_count: u32,
    pending_guess: Option<ButtonId>,
}

impl GameSession {
    /// Creates a session from explicit layouts.
    ///
    /// Both layouts must cover exactly the buttons of the scramble set, and the current layout
    /// must use the same colors as the target.
    pub fn new(
        scramble_set: ScrambleSet,
        target: impl Into<Arc<Layout>>,
        current: Layout,
    ) -> GameResult<Self> {
        let target = target.into();
        for layout in [target.as_ref(), &current] {
            if let Some(id) = layout.ids().find(|id| !scramble_set.contains(*id)) {
                return Err(GameError::InvalidButton(id));
            }
            if let Some(id) = scramble_set.iter().find(|id| !layout.contains(*id)) {
                return Err(GameError::InvalidButton(id));
            }
        }
        let mut target_colors: Vec<_> = target.iter().map(|(_, c)| c).collect();
        let mut current_colors: Vec<_> = current.iter().map(|(_, c)| c).collect();
        target_colors.sort();
        current_colors.sort();
        if target_colors != current_colors {
            return Err(GameError::InvalidArgument(
                "current layout is not a permutation of the target layout",
            ));
        }
        let session = Self {
            scramble_set,
            target,
            current,
            guess_count: 0,
            pending_guess: None,
        };
        Ok(session)
    }

    /// Generates the target layout and scrambles it.
    pub fn start<R: Rng + ?Sized>(
        topology: &GridTopology,
        scramble_set: ScrambleSet,
        generator: &LayoutGenerator,
        mode: ScrambleMode,
        rng: &mut R,
    ) -> GameResult<Self> {
        let target = generator.generate(topology, &scramble_set)?;
        let current = scramble_with_mode(&target, mode, rng);
        Self::new(scramble_set, target, current)
    }

    pub fn scramble_set(&self) -> &ScrambleSet {
        &self.scramble_set
    }

    pub fn target(&self) -> &Layout {
        &self.target
    }

    pub fn shared_target(&self) -> Arc<Layout> {
        self.target.clone()
    }

    pub fn current(&self) -> &Layout {
        &self.current
    }

    pub fn guess_count(&self) -> u32 {
        self.guess_count
    }

    pub fn pending_guess(&self) -> Option<ButtonId> {
        self.pending_guess
    }

    /// Whether each button of the scramble set shows its target color.
    pub fn is_solved(&self) -> bool {
        self.current.matches_on(&self.target, self.scramble_set.iter())
    }

    pub(crate) fn set_pending_guess(&mut self, id: ButtonId) {
        self.pending_guess = Some(id);
    }

    pub(crate) fn take_pending_guess(&mut self) -> Option<ButtonId> {
        self.pending_guess.take()
    }

    /// Swaps the current colors of both buttons and counts this as one guess.
    pub(crate) fn swap(&mut self, first: ButtonId, second: ButtonId) -> u32 {
        self.current.swap(first, second);
        self.guess_count += 1;
        self.guess_count
    }
}
