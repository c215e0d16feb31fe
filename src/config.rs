/*
    This file is part of wiimote-steer, derived from wiimote-rs (https://codeberg.org/metamuffin/wiimote-rs)
    which is licensed under the GNU Affero General Public License (version 3); see /COPYING.
    Copyright (C) 2023 metamuffin <metamuffin@disroot.org>
*/
use crate::{
    keyboard::{letter_key, ButtonBindings, Key, KeyPair},
    steer::Thresholds,
    Error, Result,
};
use std::{str::FromStr, time::Duration};

pub const ENV_UPPER: &str = "WIIMOTE_STEER_UPPER";
pub const ENV_LOWER: &str = "WIIMOTE_STEER_LOWER";
pub const ENV_INTERVAL_MS: &str = "WIIMOTE_STEER_INTERVAL_MS";
pub const ENV_LEFT_KEY: &str = "WIIMOTE_STEER_LEFT_KEY";
pub const ENV_RIGHT_KEY: &str = "WIIMOTE_STEER_RIGHT_KEY";
pub const ENV_A_KEY: &str = "WIIMOTE_STEER_A_KEY";
pub const ENV_B_KEY: &str = "WIIMOTE_STEER_B_KEY";
pub const ENV_ONE_KEY: &str = "WIIMOTE_STEER_ONE_KEY";
pub const ENV_TWO_KEY: &str = "WIIMOTE_STEER_TWO_KEY";
pub const ENV_DPAD_UP_KEY: &str = "WIIMOTE_STEER_DPAD_UP_KEY";
pub const ENV_DPAD_DOWN_KEY: &str = "WIIMOTE_STEER_DPAD_DOWN_KEY";
pub const ENV_DPAD_LEFT_KEY: &str = "WIIMOTE_STEER_DPAD_LEFT_KEY";
pub const ENV_DPAD_RIGHT_KEY: &str = "WIIMOTE_STEER_DPAD_RIGHT_KEY";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub thresholds: Thresholds,
    pub keys: KeyPair,
    pub buttons: ButtonBindings,
    pub poll_interval: Duration,
    /// How long a requested status report is waited for. A status report
    /// arriving later counts as unsolicited.
    pub status_timeout: Duration,
    /// Name of the uinput device.
    pub device_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            keys: KeyPair::default(),
            buttons: ButtonBindings::default(),
            poll_interval: Duration::from_millis(10),
            status_timeout: Duration::from_millis(500),
            device_name: "Wiimote Steering".to_string(),
        }
    }
}

impl Config {
    /// Defaults, overridden by the `WIIMOTE_STEER_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(v) = lookup(ENV_UPPER) {
            config.thresholds.upper = parse(ENV_UPPER, &v)?;
        }
        if let Some(v) = lookup(ENV_LOWER) {
            config.thresholds.lower = parse(ENV_LOWER, &v)?;
        }
        if let Some(v) = lookup(ENV_INTERVAL_MS) {
            config.poll_interval = Duration::from_millis(parse(ENV_INTERVAL_MS, &v)?);
        }
        if let Some(v) = lookup(ENV_LEFT_KEY) {
            config.keys.left = key(ENV_LEFT_KEY, &v)?;
        }
        if let Some(v) = lookup(ENV_RIGHT_KEY) {
            config.keys.right = key(ENV_RIGHT_KEY, &v)?;
        }
        let buttons = &mut config.buttons;
        for (name, binding) in [
            (ENV_A_KEY, &mut buttons.a),
            (ENV_B_KEY, &mut buttons.b),
            (ENV_ONE_KEY, &mut buttons.one),
            (ENV_TWO_KEY, &mut buttons.two),
            (ENV_DPAD_UP_KEY, &mut buttons.d_pad_up),
            (ENV_DPAD_DOWN_KEY, &mut buttons.d_pad_down),
            (ENV_DPAD_LEFT_KEY, &mut buttons.d_pad_left),
            (ENV_DPAD_RIGHT_KEY, &mut buttons.d_pad_right),
        ] {
            if let Some(v) = lookup(name) {
                *binding = optional_key(name, &v)?;
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Every key the virtual keyboard has to be able to emit.
    pub fn all_keys(&self) -> Vec<Key> {
        let mut keys = vec![self.keys.left, self.keys.right];
        keys.extend(self.buttons.keys(&Default::default()).map(|(key, _)| key));
        keys
    }

    pub fn validate(&self) -> Result<()> {
        let Thresholds { upper, lower } = self.thresholds;
        if !(upper.is_finite() && lower.is_finite()) {
            return Err(Error::Config("thresholds must be finite".into()));
        }
        if lower > upper {
            return Err(Error::Config(format!(
                "lower threshold {lower} is above upper threshold {upper}"
            )));
        }
        let keys = self.all_keys();
        for (i, key) in keys.iter().enumerate() {
            if keys[..i].contains(key) {
                return Err(Error::Config(format!("key {key:?} is bound twice")));
            }
        }
        Ok(())
    }
}

fn parse<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{name}: cannot parse {value:?}")))
}

fn key(name: &str, value: &str) -> Result<Key> {
    letter_key(value.trim())
        .ok_or_else(|| Error::Config(format!("{name}: expected a single letter, got {value:?}")))
}

/// Like [`key`], but `none` unbinds.
fn optional_key(name: &str, value: &str) -> Result<Option<Key>> {
    if value.trim().eq_ignore_ascii_case("none") {
        Ok(None)
    } else {
        key(name, value).map(Some)
    }
}
