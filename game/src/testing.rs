//! Fakes for the display and input capabilities.

use crate::{ButtonId, Color, GridDisplay, GridInput, InputError, InputEvent};
use std::collections::VecDeque;

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum DisplayCall {
    Set(ButtonId, Color),
    Clear(ButtonId, ButtonId),
    Pulse(Vec<ButtonId>),
}

/// Remembers each call in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingDisplay {
    calls: Vec<DisplayCall>,
}

impl RecordingDisplay {
    pub fn calls(&self) -> &[DisplayCall] {
        &self.calls
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl GridDisplay for RecordingDisplay {
    fn set_button(&mut self, id: ButtonId, color: Color) {
        self.calls.push(DisplayCall::Set(id, color));
    }

    fn clear_range(&mut self, from: ButtonId, to: ButtonId) {
        self.calls.push(DisplayCall::Clear(from, to));
    }

    fn pulse(&mut self, ids: &[ButtonId]) {
        self.calls.push(DisplayCall::Pulse(ids.to_vec()));
    }
}

/// Plays back a fixed list of events and reports a disconnect afterwards.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    events: VecDeque<InputEvent>,
}

impl ScriptedInput {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.events.is_empty()
    }
}

impl GridInput for ScriptedInput {
    fn next_event(&mut self) -> Result<InputEvent, InputError> {
        self.events.pop_front().ok_or(InputError::Disconnected)
    }
}
