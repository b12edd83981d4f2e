//! Raw input to logical action translation
//!
//! Bindings map one keyboard key or mouse button to each [`Action`]. The bus
//! tracks which raw inputs are held (level-triggered queries) and notifies
//! subscribers once per key-down / button-down (edge-triggered).

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

/// Logical player actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    PlayerOneUp,
    PlayerOneDown,
    PlayerTwoUp,
    PlayerTwoDown,
    Confirm,
    Cancel,
    Pause,
    Quit,
}

macro_rules! keys {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// Backend-neutral keyboard keys, named like SDL scancodes
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum Key {
            $($variant),*
        }

        impl Key {
            pub const ALL: &'static [Key] = &[$(Key::$variant),*];

            pub fn name(self) -> &'static str {
                match self {
                    $(Key::$variant => $name),*
                }
            }

            pub fn from_name(name: &str) -> Option<Key> {
                match name {
                    $($name => Some(Key::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

keys! {
    A => "A", B => "B", C => "C", D => "D", E => "E", F => "F", G => "G",
    H => "H", I => "I", J => "J", K => "K", L => "L", M => "M", N => "N",
    O => "O", P => "P", Q => "Q", R => "R", S => "S", T => "T", U => "U",
    V => "V", W => "W", X => "X", Y => "Y", Z => "Z",
    Num0 => "0", Num1 => "1", Num2 => "2", Num3 => "3", Num4 => "4",
    Num5 => "5", Num6 => "6", Num7 => "7", Num8 => "8", Num9 => "9",
    Return => "Return",
    Backspace => "Backspace",
    Escape => "Escape",
    Space => "Space",
    Tab => "Tab",
    Up => "Up",
    Down => "Down",
    Left => "Left",
    Right => "Right",
}

/// Highest mouse button index the bus accepts (SDL numbers them 1..=5)
pub const MOUSE_BUTTON_COUNT: u8 = 5;

/// A physical input that can drive an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputBinding {
    Key(Key),
    Mouse(u8),
}

/// Raw events delivered by the platform event pump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawEvent {
    /// OS-level close request, distinct from [`Action::Quit`]
    Quit,
    KeyDown(Key),
    KeyUp(Key),
    MouseDown(u8),
    MouseUp(u8),
}

/// One binding per action
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bindings {
    map: BTreeMap<Action, InputBinding>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any previous binding for `action`
    pub fn bind_key(&mut self, key: Key, action: Action) -> &mut Self {
        self.map.insert(action, InputBinding::Key(key));
        self
    }

    pub fn bind_mouse(&mut self, button: u8, action: Action) -> &mut Self {
        self.map.insert(action, InputBinding::Mouse(button));
        self
    }

    pub fn binding(&self, action: Action) -> Option<InputBinding> {
        self.map.get(&action).copied()
    }

    /// Reverse lookup. If several actions share an input the first in
    /// action order wins.
    pub fn action_for(&self, binding: InputBinding) -> Option<Action> {
        self.map
            .iter()
            .find(|(_, bound)| **bound == binding)
            .map(|(action, _)| *action)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Action, InputBinding)> + '_ {
        self.map.iter().map(|(a, b)| (*a, *b))
    }
}

/// Handle returned by [`InputBus::on_action_pressed`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type ActionCallback = Box<dyn FnMut(Action)>;

pub struct InputBus {
    bindings: Bindings,
    held: HashSet<InputBinding>,
    observers: Vec<(SubscriptionId, ActionCallback)>,
    next_subscription: u64,
}

impl InputBus {
    pub fn new(bindings: Bindings) -> Self {
        Self {
            bindings,
            held: HashSet::new(),
            observers: Vec::new(),
            next_subscription: 1,
        }
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Swap bindings; held inputs are forgotten, subscribers are kept
    pub fn reconfigure(&mut self, bindings: Bindings) {
        self.bindings = bindings;
        self.held.clear();
    }

    /// Update held state and notify subscribers.
    ///
    /// Returns the action fired by a key-down / button-down, if the input
    /// was bound.
    pub fn handle_event(&mut self, event: &RawEvent) -> Option<Action> {
        let (binding, pressed) = match *event {
            RawEvent::KeyDown(key) => (InputBinding::Key(key), true),
            RawEvent::KeyUp(key) => (InputBinding::Key(key), false),
            RawEvent::MouseDown(button) => (InputBinding::Mouse(button), true),
            RawEvent::MouseUp(button) => (InputBinding::Mouse(button), false),
            RawEvent::Quit => return None,
        };

        if let InputBinding::Mouse(button) = binding {
            if button == 0 || button > MOUSE_BUTTON_COUNT {
                log::trace!("Ignoring mouse button {button}");
                return None;
            }
        }

        if !pressed {
            self.held.remove(&binding);
            return None;
        }

        self.held.insert(binding);
        let action = self.bindings.action_for(binding)?;
        for (_, observer) in self.observers.iter_mut() {
            observer(action);
        }
        Some(action)
    }

    pub fn is_action_pressed(&self, action: Action) -> bool {
        self.bindings
            .binding(action)
            .is_some_and(|binding| self.held.contains(&binding))
    }

    /// `down - up` for a pair of held actions: -1, 0 or 1
    pub fn axis(&self, up: Action, down: Action) -> i32 {
        i32::from(self.is_action_pressed(down)) - i32::from(self.is_action_pressed(up))
    }

    pub fn on_action_pressed<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(Action) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscriber. Returns false if it was already gone.
    pub fn off(&mut self, subscription: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(id, _)| *id != subscription);
        self.observers.len() != before
    }
}
