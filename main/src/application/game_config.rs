use anyhow::{bail, Context};
use memory_match_game::{
    ButtonId, Color, GameResult, GridTopology, LayoutGenerator, ScrambleMode, ScrambleSet,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything that can be configured about a game.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub topology: TopologyConfig,
    /// Buttons taking part in each round.
    pub scramble_set: Vec<ButtonId>,
    pub generator: LayoutGenerator,
    pub scramble_mode: ScrambleMode,
    /// If set, the solved layout is shown this many rows above (or below) the scrambled one.
    pub hint_row_offset: Option<isize>,
    pub rounds: u32,
    pub seed: Option<u64>,
    pub midi: MidiConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            topology: TopologyConfig::default(),
            scramble_set: (11..=18).chain(21..=28).map(ButtonId::new).collect(),
            generator: LayoutGenerator::default(),
            scramble_mode: ScrambleMode::default(),
            hint_row_offset: None,
            rounds: 1,
            seed: None,
            midi: MidiConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("couldn't read config file {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("in config file {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        let config: Self = serde_yaml::from_str(text).context("invalid game configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Checks everything that can be checked before the first round starts.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.rounds == 0 {
            bail!("at least one round must be played");
        }
        if self.midi.channel > MidiConfig::MAX_CHANNEL {
            bail!(
                "MIDI channel must be at most {} (the pulse channel is 2 above)",
                MidiConfig::MAX_CHANNEL
            );
        }
        if self.midi.palette.is_empty() {
            bail!("MIDI palette must not be empty");
        }
        let topology = self.topology();
        let scramble_set = self.scramble_set(&topology)?;
        if let Some(offset) = self.hint_row_offset {
            crate::domain::hint_buttons(&topology, &scramble_set, offset)?;
        }
        Ok(())
    }

    pub fn topology(&self) -> GridTopology {
        match self.topology {
            TopologyConfig::Launchpad => GridTopology::launchpad(),
            TopologyConfig::Row { begin, end } => GridTopology::single_row(begin, end),
        }
    }

    pub fn scramble_set(&self, topology: &GridTopology) -> GameResult<ScrambleSet> {
        ScrambleSet::new(topology, self.scramble_set.iter().copied())
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopologyConfig {
    /// The 8x8 main area of a Launchpad in programmer mode.
    #[default]
    Launchpad,
    /// A single row of consecutive notes, `end` exclusive.
    Row { begin: u8, end: u8 },
}

#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MidiConfig {
    /// Zero-based channel on which colors are sent.
    pub channel: u8,
    /// Control change number which triggers the secondary action.
    pub secondary_controller: u8,
    pub palette: Vec<PaletteEntry>,
}

impl MidiConfig {
    pub const MAX_CHANNEL: u8 = 13;
}

impl Default for MidiConfig {
    fn default() -> Self {
        let entry = |velocity, r, g, b| PaletteEntry {
            velocity,
            color: Color::new(r, g, b),
        };
        Self {
            channel: 0,
            secondary_controller: 104,
            palette: vec![
                entry(0, 0, 0, 0),
                entry(3, 63, 63, 63),
                entry(5, 63, 0, 0),
                entry(9, 63, 21, 0),
                entry(13, 63, 63, 0),
                entry(21, 0, 63, 0),
                entry(37, 0, 42, 63),
                entry(45, 0, 0, 63),
                entry(53, 42, 0, 63),
                entry(57, 63, 0, 42),
            ],
        }
    }
}

/// A color the controller can show when receiving the given note velocity.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub velocity: u8,
    pub color: Color,
}
