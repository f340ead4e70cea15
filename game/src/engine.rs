use crate::{
    ButtonId, GameSession, GridDisplay, GridInput, GridTopology, InputError, InputEvent, Layout,
};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, strum::Display)]
pub enum MatchState {
    AwaitingFirstGuess,
    AwaitingSecondGuess,
    /// Terminal. Further presses are ignored.
    Won,
}

/// What processing one input event did.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Transition {
    FirstGuessAccepted(ButtonId),
    Swapped {
        first: ButtonId,
        second: ButtonId,
        guess_count: u32,
    },
    /// The last swap solved the puzzle.
    Won { guess_count: u32 },
    /// The press was outside the scramble set. Any pending first guess is gone.
    InvalidGuess(ButtonId),
    /// The current layout was rendered again.
    Refreshed,
    /// The game is already won.
    Ignored,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct GameOutcome {
    pub guess_count: u32,
}

/// Drives one round: takes guesses in pairs, swaps, renders and detects the win.
#[derive(Debug)]
pub struct MatchEngine {
    topology: GridTopology,
    session: GameSession,
}

impl MatchEngine {
    pub fn new(topology: &GridTopology, session: GameSession) -> Self {
        Self {
            topology: topology.clone(),
            session,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn into_session(self) -> GameSession {
        self.session
    }

    pub fn current(&self) -> &Layout {
        self.session.current()
    }

    pub fn target(&self) -> &Layout {
        self.session.target()
    }

    pub fn guess_count(&self) -> u32 {
        self.session.guess_count()
    }

    pub fn state(&self) -> MatchState {
        if self.session.is_solved() {
            MatchState::Won
        } else if self.session.pending_guess().is_some() {
            MatchState::AwaitingSecondGuess
        } else {
            MatchState::AwaitingFirstGuess
        }
    }

    /// Renders each button of the current layout and highlights a pending first guess.
    pub fn render_all(&self, display: &mut impl GridDisplay) {
        for (id, color) in self.session.current().iter() {
            display.set_button(id, color);
        }
        if let Some(first) = self.session.pending_guess() {
            display.pulse(&[first]);
        }
    }

    /// Processes events until the puzzle is solved.
    ///
    /// Returns immediately if it's solved already.
    pub fn run(
        &mut self,
        input: &mut impl GridInput,
        display: &mut impl GridDisplay,
    ) -> Result<GameOutcome, InputError> {
        while self.state() != MatchState::Won {
            let event = input.next_event()?;
            self.process(event, display);
        }
        Ok(GameOutcome {
            guess_count: self.guess_count(),
        })
    }

    pub fn process(&mut self, event: InputEvent, display: &mut impl GridDisplay) -> Transition {
        match event {
            InputEvent::SecondaryAction => {
                tracing::debug!(msg = "Refreshing current layout", state = %self.state());
                self.render_all(display);
                Transition::Refreshed
            }
            InputEvent::Press(id) => self.guess(id, display),
        }
    }

    fn guess(&mut self, id: ButtonId, display: &mut impl GridDisplay) -> Transition {
        if self.state() == MatchState::Won {
            tracing::trace!(msg = "Ignoring press after win", %id);
            return Transition::Ignored;
        }
        let Some(first) = self.session.take_pending_guess() else {
            if !self.session.scramble_set().contains(id) {
                return self.reject_guess(id, display);
            }
            tracing::debug!(msg = "First guess", %id);
            self.session.set_pending_guess(id);
            display.pulse(&[id]);
            return Transition::FirstGuessAccepted(id);
        };
        if !self.session.scramble_set().contains(id) {
            // Drop the highlight of the discarded first guess
            if let Some(color) = self.session.current().get(first) {
                display.set_button(first, color);
            }
            return self.reject_guess(id, display);
        }
        let guess_count = self.session.swap(first, id);
        tracing::info!(msg = "Guessed", %first, second = %id, guess_count);
        for changed in [first, id] {
            if let Some(color) = self.session.current().get(changed) {
                display.set_button(changed, color);
            }
        }
        if self.session.is_solved() {
            tracing::info!(msg = "Solved", guess_count);
            let all: Vec<_> = self.session.scramble_set().iter().collect();
            display.pulse(&all);
            Transition::Won { guess_count }
        } else {
            Transition::Swapped {
                first,
                second: id,
                guess_count,
            }
        }
    }

    fn reject_guess(&mut self, id: ButtonId, display: &mut impl GridDisplay) -> Transition {
        tracing::warn!(msg = "Button is not part of the game", %id);
        if self.topology.is_valid_button(id) {
            display.pulse(&[id]);
        }
        Transition::InvalidGuess(id)
    }
}
