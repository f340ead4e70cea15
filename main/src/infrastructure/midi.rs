//! Translates between the game and the note messages of a grid controller in palette mode.
//!
//! Opening the actual port is up to the caller. It just needs to feed received short messages
//! into a channel and send out what arrives on the other one:
//!
//! ```ignore
//! let (input_sender, input_receiver) = crossbeam_channel::unbounded();
//! let (feedback_sender, feedback_receiver) = BoundedNamedSender::new_channel("feedback", 500);
//! // Port callback: input_sender.send(msg)
//! // Port writer thread: for msg in feedback_receiver { port.send(msg) }
//! let mut input = MidiInput::new(input_receiver, &config.midi);
//! let mut display = MidiDisplay::new(feedback_sender, config.topology(), &config.midi);
//! play_rounds(&config, &mut display, &mut input, &mut rng)?;
//! ```

use crate::application::{MidiConfig, PaletteEntry};
use base::hash_util::NonCryptoHashMap;
use base::{BoundedNamedSender, NamedChannelSender};
use crossbeam_channel::Receiver;
use helgoboss_midi::{
    Channel, ControllerNumber, KeyNumber, RawShortMessage, ShortMessage, ShortMessageFactory,
    StructuredShortMessage, U7,
};
use memory_match_game::{
    ButtonId, Color, GridDisplay, GridInput, GridTopology, InputError, InputEvent,
};

/// Turns incoming MIDI messages into presses.
///
/// Note-on with a velocity above zero is a press of the button with the same number. Releases
/// (note-off or note-on with zero velocity) and aftertouch are swallowed. A control change on the
/// secondary controller with a value above zero is the secondary action.
pub struct MidiInput {
    receiver: Receiver<RawShortMessage>,
    secondary_controller: ControllerNumber,
}

impl MidiInput {
    pub fn new(receiver: Receiver<RawShortMessage>, config: &MidiConfig) -> Self {
        Self {
            receiver,
            secondary_controller: ControllerNumber::new(config.secondary_controller.min(127)),
        }
    }

    fn translate(&self, msg: &impl ShortMessage) -> Option<InputEvent> {
        match msg.to_structured() {
            StructuredShortMessage::NoteOn {
                key_number,
                velocity,
                ..
            } if velocity.get() > 0 => Some(InputEvent::Press(ButtonId::new(key_number.get()))),
            StructuredShortMessage::ControlChange {
                controller_number,
                control_value,
                ..
            } if controller_number == self.secondary_controller && control_value.get() > 0 => {
                Some(InputEvent::SecondaryAction)
            }
            _ => None,
        }
    }
}

impl GridInput for MidiInput {
    fn next_event(&mut self) -> Result<InputEvent, InputError> {
        loop {
            let msg = self
                .receiver
                .recv()
                .map_err(|_| InputError::Disconnected)?;
            if let Some(event) = self.translate(&msg) {
                return Ok(event);
            }
            tracing::trace!(msg = "Ignoring MIDI message", raw = ?msg);
        }
    }
}

/// Sends colors as note-on messages.
///
/// The controller can't show arbitrary RGB colors via notes, so each color is mapped to the
/// velocity of the closest palette entry.
pub struct MidiDisplay {
    sender: BoundedNamedSender<RawShortMessage>,
    topology: GridTopology,
    channel: Channel,
    pulse_channel: Channel,
    palette: Vec<PaletteEntry>,
    velocities: NonCryptoHashMap<ButtonId, U7>,
}

impl MidiDisplay {
    /// Controllers in palette mode pulse notes received 2 channels above the normal one.
    const PULSE_CHANNEL_OFFSET: u8 = 2;

    pub fn new(
        sender: BoundedNamedSender<RawShortMessage>,
        topology: GridTopology,
        config: &MidiConfig,
    ) -> Self {
        let channel = config.channel.min(MidiConfig::MAX_CHANNEL);
        Self {
            sender,
            topology,
            channel: Channel::new(channel),
            pulse_channel: Channel::new(channel + Self::PULSE_CHANNEL_OFFSET),
            palette: config.palette.clone(),
            velocities: Default::default(),
        }
    }

    fn velocity_for(&self, color: Color) -> U7 {
        let velocity = self
            .palette
            .iter()
            .min_by_key(|entry| entry.color.distance_squared(&color))
            .map(|entry| entry.velocity)
            .unwrap_or(0);
        U7::new(velocity.min(127))
    }

    fn key_number(&self, id: ButtonId) -> Option<KeyNumber> {
        if !self.topology.is_valid_button(id) || id.get() > 127 {
            return None;
        }
        Some(KeyNumber::new(id.get()))
    }
}

impl GridDisplay for MidiDisplay {
    fn set_button(&mut self, id: ButtonId, color: Color) {
        let Some(key_number) = self.key_number(id) else {
            return;
        };
        let velocity = self.velocity_for(color);
        self.velocities.insert(id, velocity);
        self.sender
            .send_complaining(RawShortMessage::note_on(self.channel, key_number, velocity));
    }

    fn clear_range(&mut self, from: ButtonId, to: ButtonId) {
        let ids: Vec<_> = self
            .topology
            .all_buttons()
            .filter(|id| *id >= from && *id <= to)
            .collect();
        for id in ids {
            let Some(key_number) = self.key_number(id) else {
                continue;
            };
            self.velocities.remove(&id);
            self.sender
                .send_complaining(RawShortMessage::note_off(self.channel, key_number, U7::MIN));
        }
    }

    fn pulse(&mut self, ids: &[ButtonId]) {
        for id in ids {
            let Some(key_number) = self.key_number(*id) else {
                continue;
            };
            // Unlit buttons pulse in red
            let velocity = match self.velocities.get(id) {
                Some(v) => *v,
                None => self.velocity_for(Color::RED),
            };
            self.sender.send_complaining(RawShortMessage::note_on(
                self.pulse_channel,
                key_number,
                velocity,
            ));
        }
    }
}
