use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    OpenScreen,
    OpenModal,
    Back,
    /// Go back this many screens at once.
    BackSteps(u8),
    Home,
    OpenFromHome,
    // Gestures raised on the top window
    SwipeBack,
    HardwareBack,
    HomeIcon,
    // Native-side controls
    CompleteClose,
    StaleClose,
    ToggleLog,
    ToggleHelp,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Quit => write!(f, "Quit"),
            Action::OpenScreen => write!(f, "Open a screen"),
            Action::OpenModal => write!(f, "Open a modal screen"),
            Action::Back => write!(f, "Back one screen"),
            Action::BackSteps(n) => write!(f, "Back {n} screens"),
            Action::Home => write!(f, "Back to the base screen"),
            Action::OpenFromHome => write!(f, "Open a screen above the base"),
            Action::SwipeBack => write!(f, "Swipe right on the top screen"),
            Action::HardwareBack => write!(f, "Hardware back"),
            Action::HomeIcon => write!(f, "Tap the up icon"),
            Action::CompleteClose => write!(f, "Deliver a parked close"),
            Action::StaleClose => write!(f, "Send a stale close"),
            Action::ToggleLog => write!(f, "Toggle log pane"),
            Action::ToggleHelp => write!(f, "Toggle help"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.mods
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        let code = match self.code {
            KeyCode::Char(c) if c.is_ascii_alphabetic() && !self.mods.is_empty() => {
                c.to_ascii_uppercase().to_string()
            }
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        };
        parts.push(code);
        parts.join("+")
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<Action, Vec<KeyCombo>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        use Action::*;
        let mut kb = Self::new();
        kb.add(Quit, KeyCombo::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
        kb.add(OpenScreen, KeyCombo::plain(KeyCode::Char('o')));
        kb.add(OpenScreen, KeyCombo::plain(KeyCode::Enter));
        kb.add(OpenModal, KeyCombo::plain(KeyCode::Char('m')));
        kb.add(Back, KeyCombo::plain(KeyCode::Char('b')));
        kb.add(Back, KeyCombo::plain(KeyCode::Backspace));
        for n in 1..=9u8 {
            kb.add(BackSteps(n), KeyCombo::plain(KeyCode::Char((b'0' + n) as char)));
        }
        kb.add(Home, KeyCombo::plain(KeyCode::Char('h')));
        kb.add(Home, KeyCombo::plain(KeyCode::Home));
        kb.add(OpenFromHome, KeyCombo::plain(KeyCode::Char('f')));
        kb.add(SwipeBack, KeyCombo::plain(KeyCode::Right));
        kb.add(HardwareBack, KeyCombo::plain(KeyCode::Esc));
        kb.add(HomeIcon, KeyCombo::plain(KeyCode::Char('u')));
        kb.add(CompleteClose, KeyCombo::plain(KeyCode::Char('c')));
        kb.add(StaleClose, KeyCombo::plain(KeyCode::Char('x')));
        kb.add(ToggleLog, KeyCombo::plain(KeyCode::Char('l')));
        kb.add(ToggleHelp, KeyCombo::plain(KeyCode::Char('?')));
        kb.add(ToggleHelp, KeyCombo::plain(KeyCode::F(1)));
        kb
    }
}

impl KeyBindings {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn add(&mut self, action: Action, combo: KeyCombo) {
        self.map.entry(action).or_default().push(combo);
    }

    pub fn matches(&self, action: Action, key: &KeyEvent) -> bool {
        self.map
            .get(&action)
            .is_some_and(|list| list.iter().any(|c| c.matches(key)))
    }

    pub fn action_for_key(&self, key: &KeyEvent) -> Option<Action> {
        self.map
            .iter()
            .find(|(_, list)| list.iter().any(|c| c.matches(key)))
            .map(|(action, _)| *action)
    }

    /// Display strings for all combos mapped to `action`.
    pub fn combos_for(&self, action: Action) -> Vec<String> {
        self.map
            .get(&action)
            .map(|list| list.iter().map(|c| c.display()).collect())
            .unwrap_or_default()
    }

    /// `(keys, description)` rows for the help overlay, in a stable order.
    pub fn help_entries(&self) -> Vec<(String, String)> {
        let mut entries: Vec<_> = self
            .map
            .iter()
            .filter(|(action, _)| !matches!(action, Action::BackSteps(n) if *n > 1))
            .map(|(action, list)| {
                let keys = match action {
                    Action::BackSteps(_) => "1-9".to_string(),
                    _ => list.iter().map(|c| c.display()).collect::<Vec<_>>().join(", "),
                };
                let description = match action {
                    Action::BackSteps(_) => "Back that many screens".to_string(),
                    other => other.to_string(),
                };
                (keys, description)
            })
            .collect();
        entries.sort();
        entries
    }
}
