use crate::application::GameConfig;
use memory_match_game::{
    ButtonId, GameError, GameOutcome, GameResult, GameSession, GridDisplay, GridInput,
    GridTopology, InputError, MatchEngine, MatchState, ScrambleSet,
};
use rand::Rng;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SessionEnd {
    AllRoundsPlayed,
    InputDisconnected,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct SessionReport {
    /// One entry for each round that was finished.
    pub outcomes: Vec<GameOutcome>,
    pub ended_by: SessionEnd,
}

impl SessionReport {
    pub fn total_guess_count(&self) -> u32 {
        self.outcomes.iter().map(|o| o.guess_count).sum()
    }
}

/// Returns the buttons on which the hint for the given scramble set would be shown.
///
/// Fails if a hint button would be outside the grid or overlap with the scramble set.
pub fn hint_buttons(
    topology: &GridTopology,
    scramble_set: &ScrambleSet,
    row_offset: isize,
) -> GameResult<Vec<ButtonId>> {
    scramble_set
        .iter()
        .map(|id| {
            let hint_id = topology
                .shift_rows(id, row_offset)
                .ok_or(GameError::InvalidButton(id))?;
            if scramble_set.contains(hint_id) {
                return Err(GameError::InvalidButton(hint_id));
            }
            Ok(hint_id)
        })
        .collect()
}

/// Plays the configured number of rounds, each one with a freshly scrambled session.
///
/// Setup problems are returned as error. A disconnected input just ends the session early.
pub fn play_rounds<R: Rng + ?Sized>(
    config: &GameConfig,
    display: &mut impl GridDisplay,
    input: &mut impl GridInput,
    rng: &mut R,
) -> GameResult<SessionReport> {
    let topology = config.topology();
    let scramble_set = config.scramble_set(&topology)?;
    if let Some(offset) = config.hint_row_offset {
        hint_buttons(&topology, &scramble_set, offset)?;
    }
    let mut outcomes = Vec::new();
    for round in 1..=config.rounds {
        let session = GameSession::start(
            &topology,
            scramble_set.clone(),
            &config.generator,
            config.scramble_mode,
            rng,
        )?;
        if let (Some(min), Some(max)) = (topology.min_button(), topology.max_button()) {
            display.clear_range(min, max);
        }
        if let Some(offset) = config.hint_row_offset {
            let hint = session.target().shifted(&topology, offset)?;
            for (id, color) in hint.iter() {
                display.set_button(id, color);
            }
        }
        let mut engine = MatchEngine::new(&topology, session);
        engine.render_all(display);
        if engine.state() == MatchState::Won {
            tracing::info!(msg = "Scrambled layout happens to be solved already", round);
        } else {
            tracing::info!(msg = "Round started", round, buttons = scramble_set.len());
        }
        match engine.run(input, display) {
            Ok(outcome) => {
                tracing::info!(msg = "Round won", round, guess_count = outcome.guess_count);
                outcomes.push(outcome);
            }
            Err(InputError::Disconnected) => {
                tracing::info!(msg = "Input disconnected, stopping", round);
                return Ok(SessionReport {
                    outcomes,
                    ended_by: SessionEnd::InputDisconnected,
                });
            }
        }
    }
    Ok(SessionReport {
        outcomes,
        ended_by: SessionEnd::AllRoundsPlayed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::TopologyConfig;
    use memory_match_game::testing::{DisplayCall, RecordingDisplay, ScriptedInput};
    use memory_match_game::{Color, InputEvent, Layout, LayoutGenerator, ScrambleMode};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn id(raw: u8) -> ButtonId {
        ButtonId::new(raw)
    }

    fn row_config() -> GameConfig {
        GameConfig {
            topology: TopologyConfig::Row { begin: 1, end: 5 },
            scramble_set: vec![id(1), id(2)],
            generator: LayoutGenerator::Linear {
                from: Color::RED,
                to: Color::BLUE,
            },
            scramble_mode: ScrambleMode::Unsolved,
            hint_row_offset: None,
            rounds: 2,
            seed: None,
            midi: Default::default(),
        }
    }

    #[test]
    fn plays_all_rounds() {
        // Given
        // Two distinct colors on two buttons are always solved by swapping both
        let config = row_config();
        let mut display = RecordingDisplay::default();
        let mut input = ScriptedInput::new([
            InputEvent::Press(id(1)),
            InputEvent::Press(id(2)),
            InputEvent::Press(id(2)),
            InputEvent::Press(id(1)),
        ]);
        let mut rng = StdRng::seed_from_u64(3);
        // When
        let report = play_rounds(&config, &mut display, &mut input, &mut rng).unwrap();
        // Then
        assert_eq!(report.ended_by, SessionEnd::AllRoundsPlayed);
        assert_eq!(
            report.outcomes,
            vec![GameOutcome { guess_count: 1 }, GameOutcome { guess_count: 1 }]
        );
        assert_eq!(report.total_guess_count(), 2);
        assert_eq!(display.calls()[0], DisplayCall::Clear(id(1), id(4)));
        assert!(input.is_exhausted());
    }

    #[test]
    fn stops_when_input_disconnects() {
        // Given
        let config = row_config();
        let mut display = RecordingDisplay::default();
        let mut input = ScriptedInput::new([InputEvent::Press(id(1))]);
        let mut rng = StdRng::seed_from_u64(3);
        // When
        let report = play_rounds(&config, &mut display, &mut input, &mut rng).unwrap();
        // Then
        assert_eq!(report.ended_by, SessionEnd::InputDisconnected);
        assert!(report.outcomes.is_empty());
    }

    #[test]
    fn huge_round_count_plays_until_disconnect() {
        // Given
        let config = GameConfig {
            rounds: u32::MAX,
            ..row_config()
        };
        config.validate().unwrap();
        let mut display = RecordingDisplay::default();
        let mut input = ScriptedInput::new([]);
        let mut rng = StdRng::seed_from_u64(3);
        // When
        let report = play_rounds(&config, &mut display, &mut input, &mut rng).unwrap();
        // Then
        assert_eq!(report.ended_by, SessionEnd::InputDisconnected);
        assert!(report.outcomes.is_empty());
    }

    #[test]
    fn renders_hint_above_scrambled_buttons() {
        // Given
        let config = GameConfig {
            topology: TopologyConfig::Launchpad,
            scramble_set: vec![id(11), id(12)],
            hint_row_offset: Some(2),
            rounds: 1,
            ..row_config()
        };
        let mut display = RecordingDisplay::default();
        let mut input = ScriptedInput::new([]);
        let mut rng = StdRng::seed_from_u64(3);
        // When
        play_rounds(&config, &mut display, &mut input, &mut rng).unwrap();
        // Then
        assert_eq!(display.calls()[0], DisplayCall::Clear(id(11), id(88)));
        assert_eq!(display.calls()[1], DisplayCall::Set(id(31), Color::RED));
        assert_eq!(display.calls()[2], DisplayCall::Set(id(32), Color::BLUE));
    }

    #[test]
    fn hint_must_not_overlap() {
        // Given
        let topology = GridTopology::launchpad();
        let set = ScrambleSet::new(&topology, [id(11), id(21)]).unwrap();
        // When
        let result = hint_buttons(&topology, &set, 1);
        // Then
        assert_eq!(result, Err(GameError::InvalidButton(id(21))));
        assert_eq!(
            hint_buttons(&topology, &set, 3),
            Ok(vec![id(41), id(51)])
        );
        assert_eq!(
            hint_buttons(&topology, &set, -1),
            Err(GameError::InvalidButton(id(11)))
        );
    }

    #[test]
    fn setup_error_is_returned() {
        // Given
        let config = GameConfig {
            scramble_set: vec![id(1), id(9)],
            ..row_config()
        };
        let mut display = RecordingDisplay::default();
        let mut input = ScriptedInput::new([]);
        let mut rng = StdRng::seed_from_u64(3);
        // When
        let result = play_rounds(&config, &mut display, &mut input, &mut rng);
        // Then
        assert_eq!(result, Err(GameError::InvalidButton(id(9))));
        assert!(display.calls().is_empty());
    }

    #[test]
    fn target_is_generated_from_config() {
        let config = row_config();
        let topology = config.topology();
        let set = config.scramble_set(&topology).unwrap();
        let target = config.generator.generate(&topology, &set).unwrap();
        let expected: Layout = [(id(1), Color::RED), (id(2), Color::BLUE)].into_iter().collect();
        assert_eq!(target, expected);
    }
}
