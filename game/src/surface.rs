use crate::{ButtonId, Color};

/// Something that can light up the buttons of the grid.
///
/// All methods are fire-and-forget. Implementations deal with their own failures and with
/// throttling the physical link if necessary.
pub trait GridDisplay {
    fn set_button(&mut self, id: ButtonId, color: Color);

    /// Switches off all buttons from `from` to `to` (both inclusive).
    fn clear_range(&mut self, from: ButtonId, to: ButtonId);

    /// Highlights the given buttons temporarily without changing their color.
    ///
    /// The highlight ends as soon as the button is set again.
    fn pulse(&mut self, ids: &[ButtonId]);
}

impl<T: GridDisplay + ?Sized> GridDisplay for &mut T {
    fn set_button(&mut self, id: ButtonId, color: Color) {
        (**self).set_button(id, color)
    }

    fn clear_range(&mut self, from: ButtonId, to: ButtonId) {
        (**self).clear_range(from, to)
    }

    fn pulse(&mut self, ids: &[ButtonId]) {
        (**self).pulse(ids)
    }
}

/// A physical press as seen by the game.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum InputEvent {
    /// A grid button was pressed (releases are never reported).
    Press(ButtonId),
    /// The designated side-channel control was pressed.
    SecondaryAction,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum InputError {
    #[error("input source disconnected")]
    Disconnected,
}

/// Source of button presses.
pub trait GridInput {
    /// Blocks until the next press arrives.
    ///
    /// Only fails if no press can ever arrive anymore.
    fn next_event(&mut self) -> Result<InputEvent, InputError>;
}

impl<T: GridInput + ?Sized> GridInput for &mut T {
    fn next_event(&mut self) -> Result<InputEvent, InputError> {
        (**self).next_event()
    }
}
