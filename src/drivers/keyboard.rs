use crossterm::event::{Event, KeyCode, KeyEventKind};

/// Drops key events the demo should never act on twice.
///
/// Only presses are kept. Windows consoles also report auto-repeat and a
/// second press for a held Esc, which would otherwise fire hardware-back
/// repeatedly.
#[derive(Debug, Default)]
pub struct KeyboardNormalizer {
    esc_down: bool,
}

impl KeyboardNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn normalize(&mut self, evt: Event) -> Option<Event> {
        let Event::Key(key) = evt else {
            return Some(evt);
        };
        match key.kind {
            KeyEventKind::Release => {
                if key.code == KeyCode::Esc {
                    self.esc_down = false;
                }
                None
            }
            KeyEventKind::Repeat => None,
            KeyEventKind::Press => {
                if cfg!(windows) && key.code == KeyCode::Esc {
                    if self.esc_down {
                        return None;
                    }
                    self.esc_down = true;
                }
                Some(Event::Key(key))
            }
        }
    }
}
