/*
    This file is part of wiimote-steer, derived from wiimote-rs (https://codeberg.org/metamuffin/wiimote-rs)
    which is licensed under the GNU Affero General Public License (version 3); see /COPYING.
    Copyright (C) 2023 metamuffin <metamuffin@disroot.org>
*/
use crate::{consts::*, Action, Result, Wiimote};
use log::trace;
use std::sync::atomic::Ordering;

impl Wiimote {
    /// Send an action to the wiimote.
    pub fn write(&self, a: Action) -> Result<()> {
        if let Action::RumbleEnable(enable) = a {
            self.rumble.store(enable, Ordering::Relaxed);
        }
        let bytes = encode(a, self.rumble.load(Ordering::Relaxed));
        trace!("send {bytes:02x?}");
        self.device.write(&bytes)?;
        Ok(())
    }
}

/// Encodes an output report. Every output report carries the rumble bit,
/// so it is set from `rumble` to make sure we dont influence rumble :)
pub fn encode(a: Action, rumble: bool) -> Vec<u8> {
    let mut bytes = match a {
        Action::RumbleEnable(enable) => vec![TY_RUMBLE, enable as u8],
        Action::PlayerLeds(mask) => vec![TY_PLAYER_LEDS, (mask & 0x0f) << 4],
        Action::SetReporting(mode, continuous) => vec![
            TY_DATA_REPORTING_MODE,
            if continuous { VA_CONTINUOUS_REPORTING } else { 0x00 },
            mode as u8,
        ],
        Action::RequestStatus => vec![TY_STATUS_INFORMATION_REQUEST, 0x00],
    };
    if rumble {
        bytes[1] |= 1;
    } else {
        bytes[1] &= !1;
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReportingMode;

    #[test]
    fn reporting_mode() {
        assert_eq!(
            encode(Action::SetReporting(ReportingMode::ButtonsAccel, true), false),
            [0x12, 0x04, 0x31]
        );
        assert_eq!(
            encode(Action::SetReporting(ReportingMode::ButtonsAccel, false), false),
            [0x12, 0x00, 0x31]
        );
    }

    #[test]
    fn leds_use_upper_nibble() {
        assert_eq!(encode(Action::PlayerLeds(0b1001), false), [0x11, 0x90]);
        assert_eq!(encode(Action::PlayerLeds(0xff), false), [0x11, 0xf0]);
    }

    #[test]
    fn rumble_bit_follows_rumble_state() {
        assert_eq!(encode(Action::PlayerLeds(0), true), [0x11, 0x01]);
        assert_eq!(encode(Action::RequestStatus, true), [0x15, 0x01]);
        assert_eq!(encode(Action::RumbleEnable(true), true), [0x10, 0x01]);
        assert_eq!(encode(Action::RumbleEnable(false), false), [0x10, 0x00]);
        assert_eq!(
            encode(Action::SetReporting(ReportingMode::ButtonsAccel, true), true),
            [0x12, 0x05, 0x31]
        );
    }
}
