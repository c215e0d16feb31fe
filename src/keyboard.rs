/*
    This file is part of wiimote-steer, derived from wiimote-rs (https://codeberg.org/metamuffin/wiimote-rs)
    which is licensed under the GNU Affero General Public License (version 3); see /COPYING.
    Copyright (C) 2023 metamuffin <metamuffin@disroot.org>
*/
//! Synthetic key events through a uinput virtual keyboard.

use crate::{ButtonState, Result};
pub use evdev::Key;
use evdev::{
    uinput::{VirtualDevice, VirtualDeviceBuilder},
    AttributeSet, BusType, EventType, InputEvent, InputId,
};
use log::{info, trace};

/// Something that can hold keys down.
pub trait KeySink {
    fn press(&mut self, key: Key) -> Result<()>;
    fn release(&mut self, key: Key) -> Result<()>;
}

/// The keys used for steering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPair {
    pub left: Key,
    pub right: Key,
}

impl Default for KeyPair {
    fn default() -> Self {
        Self {
            left: Key::KEY_A,
            right: Key::KEY_D,
        }
    }
}

/// Keys held while the matching wiimote button is down. `None` leaves a button unbound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonBindings {
    pub a: Option<Key>,
    pub b: Option<Key>,
    pub one: Option<Key>,
    pub two: Option<Key>,
    pub d_pad_up: Option<Key>,
    pub d_pad_down: Option<Key>,
    pub d_pad_left: Option<Key>,
    pub d_pad_right: Option<Key>,
}

impl Default for ButtonBindings {
    /// 2 and 1 sit under the thumb when the wiimote is held sideways, so they
    /// get throttle and brake.
    fn default() -> Self {
        Self {
            a: Some(Key::KEY_E),
            b: Some(Key::KEY_Q),
            one: Some(Key::KEY_S),
            two: Some(Key::KEY_W),
            d_pad_up: Some(Key::KEY_I),
            d_pad_down: Some(Key::KEY_K),
            d_pad_left: Some(Key::KEY_J),
            d_pad_right: Some(Key::KEY_L),
        }
    }
}

impl ButtonBindings {
    pub fn unbound() -> Self {
        Self {
            a: None,
            b: None,
            one: None,
            two: None,
            d_pad_up: None,
            d_pad_down: None,
            d_pad_left: None,
            d_pad_right: None,
        }
    }

    /// Every bound key paired with whether its button is down.
    pub fn keys(&self, buttons: &ButtonState) -> impl Iterator<Item = (Key, bool)> {
        [
            (self.a, buttons.a),
            (self.b, buttons.b),
            (self.one, buttons.one),
            (self.two, buttons.two),
            (self.d_pad_up, buttons.d_pad_up),
            (self.d_pad_down, buttons.d_pad_down),
            (self.d_pad_left, buttons.d_pad_left),
            (self.d_pad_right, buttons.d_pad_right),
        ]
        .into_iter()
        .filter_map(|(key, down)| Some((key?, down)))
    }

    /// Presses the keys of held buttons and releases all others.
    pub fn apply<K: KeySink>(&self, sink: &mut K, buttons: &ButtonState) -> Result<()> {
        for (key, down) in self.keys(buttons) {
            if down {
                sink.press(key)?;
            } else {
                sink.release(key)?;
            }
        }
        Ok(())
    }
}

pub struct VirtualKeyboard {
    device: VirtualDevice,
}

impl VirtualKeyboard {
    /// Creates a uinput device that can emit the given keys. Needs write access to /dev/uinput.
    pub fn create(name: &str, keys: &[Key]) -> Result<Self> {
        let mut supported = AttributeSet::<Key>::new();
        for &key in keys {
            supported.insert(key);
        }
        let device = VirtualDeviceBuilder::new()?
            .name(name)
            .input_id(InputId::new(BusType::BUS_VIRTUAL, 0x1, 0x1, 1))
            .with_keys(&supported)?
            .build()?;
        info!("virtual keyboard {name:?} created");
        Ok(Self { device })
    }

    fn emit(&mut self, key: Key, value: i32) -> Result<()> {
        trace!("key {key:?} = {value}");
        // emit appends the SYN_REPORT
        self.device
            .emit(&[InputEvent::new(EventType::KEY, key.code(), value)])?;
        Ok(())
    }
}

impl KeySink for VirtualKeyboard {
    fn press(&mut self, key: Key) -> Result<()> {
        self.emit(key, 1)
    }
    fn release(&mut self, key: Key) -> Result<()> {
        self.emit(key, 0)
    }
}

/// Letter keys a-z, indexed by `letter - b'a'`.
const LETTERS: [Key; 26] = [
    Key::KEY_A,
    Key::KEY_B,
    Key::KEY_C,
    Key::KEY_D,
    Key::KEY_E,
    Key::KEY_F,
    Key::KEY_G,
    Key::KEY_H,
    Key::KEY_I,
    Key::KEY_J,
    Key::KEY_K,
    Key::KEY_L,
    Key::KEY_M,
    Key::KEY_N,
    Key::KEY_O,
    Key::KEY_P,
    Key::KEY_Q,
    Key::KEY_R,
    Key::KEY_S,
    Key::KEY_T,
    Key::KEY_U,
    Key::KEY_V,
    Key::KEY_W,
    Key::KEY_X,
    Key::KEY_Y,
    Key::KEY_Z,
];

/// Maps a single letter (either case) to its key.
pub fn letter_key(s: &str) -> Option<Key> {
    match s.as_bytes() {
        [c] if c.is_ascii_alphabetic() => {
            Some(LETTERS[usize::from(c.to_ascii_lowercase() - b'a')])
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters() {
        assert_eq!(letter_key("a"), Some(Key::KEY_A));
        assert_eq!(letter_key("D"), Some(Key::KEY_D));
        assert_eq!(letter_key("z"), Some(Key::KEY_Z));
        assert_eq!(letter_key(""), None);
        assert_eq!(letter_key("ab"), None);
        assert_eq!(letter_key("1"), None);
    }

    #[derive(Default)]
    struct Recorder(Vec<(Key, bool)>);

    impl KeySink for Recorder {
        fn press(&mut self, key: Key) -> Result<()> {
            self.0.push((key, true));
            Ok(())
        }
        fn release(&mut self, key: Key) -> Result<()> {
            self.0.push((key, false));
            Ok(())
        }
    }

    #[test]
    fn bindings_follow_buttons() {
        let bindings = ButtonBindings {
            a: Some(Key::KEY_E),
            two: Some(Key::KEY_W),
            ..ButtonBindings::unbound()
        };
        let buttons = ButtonState {
            two: true,
            b: true,
            ..Default::default()
        };
        let mut rec = Recorder::default();
        bindings.apply(&mut rec, &buttons).unwrap();
        assert_eq!(rec.0, [(Key::KEY_E, false), (Key::KEY_W, true)]);
    }

    #[test]
    fn unbound_buttons_emit_nothing() {
        let buttons = ButtonState {
            a: true,
            d_pad_up: true,
            ..Default::default()
        };
        assert_eq!(ButtonBindings::unbound().keys(&buttons).count(), 0);
    }
}
