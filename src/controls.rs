use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::config::ConfigError;
use crate::scheduler::PlaybackState;

/// Things the user can ask for besides clicking on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    TogglePlayback,
    Randomize,
    Clear,
    Quit,
}

impl Action {
    /// Actions every front end must expose a control for.
    pub const REQUIRED: [Action; 3] = [Action::TogglePlayback, Action::Randomize, Action::Clear];

    pub fn name(&self) -> &'static str {
        match self {
            Action::TogglePlayback => "play-pause",
            Action::Randomize => "randomize",
            Action::Clear => "clear",
            Action::Quit => "quit",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "play-pause" | "play" | "pause" | "toggle" => Ok(Action::TogglePlayback),
            "randomize" | "random" => Ok(Action::Randomize),
            "clear" => Ok(Action::Clear),
            "quit" | "exit" => Ok(Action::Quit),
            _ => Err(ConfigError::UnknownAction {
                got: s.to_string(),
            }),
        }
    }
}

/// Key to action bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    bindings: BTreeMap<char, Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        let mut keymap = Self::empty();

        keymap.bind(' ', Action::TogglePlayback);
        keymap.bind('r', Action::Randomize);
        keymap.bind('c', Action::Clear);
        keymap.bind('q', Action::Quit);

        keymap
    }
}

impl Keymap {
    pub fn empty() -> Self {
        Self {
            bindings: BTreeMap::new(),
        }
    }

    /// Bind `key` to `action`, replacing whatever `key` did before. An action may have several
    /// keys.
    pub fn bind(&mut self, key: char, action: Action) {
        self.bindings.insert(key, action);
    }

    pub fn action(&self, key: char) -> Option<Action> {
        self.bindings.get(&key).copied()
    }

    /// The first key bound to `action`, if any.
    pub fn key_for(&self, action: Action) -> Option<char> {
        self.bindings
            .iter()
            .find_map(|(&key, &a)| (a == action).then_some(key))
    }

    /// Fails if any of the [`Action::REQUIRED`] controls has no key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for action in Action::REQUIRED {
            if self.key_for(action).is_none() {
                return Err(ConfigError::MissingControl(action));
            }
        }

        Ok(())
    }
}

/// Parses a `--bind` override of the form `ACTION=KEY`, where `KEY` is a single character or
/// `space`.
pub fn parse_binding(s: &str) -> Result<(Action, char), ConfigError> {
    let Some((action, key)) = s.split_once('=') else {
        return Err(ConfigError::BadBinding { got: s.to_string() });
    };

    let action: Action = action.trim().parse()?;

    let key = match key.trim() {
        "space" => ' ',
        k => {
            let mut chars = k.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => return Err(ConfigError::BadBinding { got: s.to_string() }),
            }
        }
    };

    Ok((action, key))
}

/// The presentation affordances of a front end.
pub trait Controls {
    /// Show which playback transition is currently available.
    fn show_playback(&mut self, state: PlaybackState);
}

/// Label for the play/pause control: the transition it would trigger, not the current state.
pub fn playback_label(state: PlaybackState) -> &'static str {
    match state {
        PlaybackState::Playing => "pause",
        PlaybackState::Paused => "play",
    }
}
