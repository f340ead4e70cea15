//! Plays the game in a terminal instead of on a real controller.

use base::hash_util::{NonCryptoHashMap, NonCryptoHashSet};
use base::tracing_util::ok_or_log_as_warn;
use memory_match_game::{
    ButtonId, Color, GridDisplay, GridInput, GridTopology, InputError, InputEvent,
};
use std::io;
use std::io::{BufRead, Write};

const CLEAR_SCREEN: &str = "\x1b[H\x1b[2J";
const RESET: &str = "\x1b[0m";

/// Draws the grid with 24-bit ANSI colors, top row first.
pub struct ConsoleDisplay<W> {
    topology: GridTopology,
    out: W,
    frame: NonCryptoHashMap<ButtonId, Color>,
    pulsing: NonCryptoHashSet<ButtonId>,
}

impl<W: Write> ConsoleDisplay<W> {
    pub fn new(topology: GridTopology, out: W) -> Self {
        Self {
            topology,
            out,
            frame: Default::default(),
            pulsing: Default::default(),
        }
    }

    pub fn color_of(&self, id: ButtonId) -> Option<Color> {
        self.frame.get(&id).copied()
    }

    pub fn is_pulsing(&self, id: ButtonId) -> bool {
        self.pulsing.contains(&id)
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn redraw(&mut self) {
        let result = self.write_frame();
        ok_or_log_as_warn(result);
    }

    fn write_frame(&mut self) -> io::Result<()> {
        let mut text = String::from(CLEAR_SCREEN);
        for row in self.topology.rows().iter().rev() {
            for id in row {
                match self.frame.get(id) {
                    Some(color) => {
                        let (r, g, b) = color.to_rgb8();
                        let marker = if self.pulsing.contains(id) { "<>" } else { "  " };
                        text.push_str(&format!("\x1b[48;2;{r};{g};{b}m{marker}{RESET}"));
                    }
                    None => text.push_str(" ."),
                }
                text.push(' ');
            }
            text.push('\n');
        }
        text.push_str("Type a button number and press enter. \"r\" shows the grid again.\n");
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }
}

impl<W: Write> GridDisplay for ConsoleDisplay<W> {
    fn set_button(&mut self, id: ButtonId, color: Color) {
        if !self.topology.is_valid_button(id) {
            tracing::debug!(msg = "Not rendering button outside grid", %id);
            return;
        }
        self.frame.insert(id, color);
        self.pulsing.remove(&id);
        self.redraw();
    }

    fn clear_range(&mut self, from: ButtonId, to: ButtonId) {
        self.frame.retain(|id, _| *id < from || *id > to);
        self.pulsing.retain(|id| *id < from || *id > to);
        self.redraw();
    }

    fn pulse(&mut self, ids: &[ButtonId]) {
        let valid_ids = ids.iter().filter(|id| self.topology.is_valid_button(**id));
        self.pulsing.extend(valid_ids);
        self.redraw();
    }
}

/// Reads one press per line.
///
/// A number presses the button with that ID, `r` or `?` triggers the secondary action. Anything
/// else is skipped.
pub struct StdinInput<R> {
    reader: R,
    line: String,
}

impl<R: BufRead> StdinInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }
}

impl<R: BufRead> GridInput for StdinInput<R> {
    fn next_event(&mut self) -> Result<InputEvent, InputError> {
        loop {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => return Err(InputError::Disconnected),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(msg = "Couldn't read from input", %e);
                    return Err(InputError::Disconnected);
                }
            }
            let text = self.line.trim();
            match text {
                "" => continue,
                "r" | "?" => return Ok(InputEvent::SecondaryAction),
                _ => match text.parse::<u8>() {
                    Ok(raw) => return Ok(InputEvent::Press(ButtonId::new(raw))),
                    Err(_) => {
                        tracing::warn!(msg = "Not a button number", input = text);
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u8) -> ButtonId {
        ButtonId::new(raw)
    }

    #[test]
    fn stdin_events() {
        // Given
        let text = "11\n\n  r \nfoo\n300\n?\n88\n";
        let mut input = StdinInput::new(text.as_bytes());
        // When
        let events: Vec<_> = std::iter::from_fn(|| input.next_event().ok()).collect();
        // Then
        assert_eq!(
            events,
            vec![
                InputEvent::Press(id(11)),
                InputEvent::SecondaryAction,
                InputEvent::SecondaryAction,
                InputEvent::Press(id(88)),
            ]
        );
        assert_eq!(input.next_event(), Err(InputError::Disconnected));
    }

    #[test]
    fn console_frame() {
        // Given
        let mut display = ConsoleDisplay::new(GridTopology::launchpad(), Vec::new());
        // When
        display.set_button(id(11), Color::RED);
        display.set_button(id(12), Color::BLUE);
        display.set_button(id(99), Color::GREEN);
        display.pulse(&[id(12), id(99)]);
        // Then
        assert_eq!(display.color_of(id(11)), Some(Color::RED));
        assert_eq!(display.color_of(id(99)), None);
        assert!(display.is_pulsing(id(12)));
        assert!(!display.is_pulsing(id(99)));
        let output = String::from_utf8(display.into_inner()).unwrap();
        assert!(output.contains("\x1b[48;2;255;0;0m  "));
        assert!(output.contains("\x1b[48;2;0;0;255m<>"));
    }

    #[test]
    fn setting_ends_pulse_and_clear_removes() {
        // Given
        let mut display = ConsoleDisplay::new(GridTopology::launchpad(), io::sink());
        display.set_button(id(11), Color::RED);
        display.set_button(id(21), Color::RED);
        display.pulse(&[id(11)]);
        // When
        display.set_button(id(11), Color::GREEN);
        display.clear_range(id(20), id(30));
        // Then
        assert!(!display.is_pulsing(id(11)));
        assert_eq!(display.color_of(id(11)), Some(Color::GREEN));
        assert_eq!(display.color_of(id(21)), None);
    }
}
