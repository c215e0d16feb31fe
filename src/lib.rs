/*
    This file is part of wiimote-steer, derived from wiimote-rs (https://codeberg.org/metamuffin/wiimote-rs)
    which is licensed under the GNU Affero General Public License (version 3); see /COPYING.
    Copyright (C) 2023 metamuffin <metamuffin@disroot.org>
*/
pub mod config;
mod consts;
pub mod error;
pub mod keyboard;
mod read;
pub mod steer;
mod write;

pub use config::Config;
pub use error::{Error, Result};
pub use read::decode;
pub use write::encode;

use consts::*;
use hidapi::HidDevice;
use log::{debug, info};
use std::sync::atomic::AtomicBool;

pub struct Wiimote {
    device: HidDevice,
    rumble: AtomicBool,
}

impl Wiimote {
    /// Finds and opens a wiimote HID device via hidapi.
    pub fn find_hid() -> Result<HidDevice> {
        let api = hidapi::HidApi::new()?;
        for device in api.device_list() {
            debug!("dev: {:?}", device);
            if device.vendor_id() == HID_VENDOR
                && matches!(device.product_id(), HID_PRODUCT | HID_PRODUCT_TR)
            {
                info!("wiimote found: {}", device.path().to_string_lossy());
                return Ok(device.open_device(&api)?);
            }
        }
        Err(Error::NotFound)
    }
    /// Creates wiimote abstraction over a HidDevice (which should be a wiimote)
    pub fn from_device(device: HidDevice) -> Self {
        Self {
            device,
            rumble: false.into(),
        }
    }
    /// Finds and opens a wiimote.
    pub fn open() -> Result<Self> {
        Ok(Self::from_device(Self::find_hid()?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Report {
    Buttons(ButtonState),
    Acceleration(Acceleration),
    Status(Status),
    /// Result of an output report, `error` is zero on success.
    Acknowledge { report: u8, error: u8 },
}

/// Actions control outputs like rumble, player leds, etc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Sets the reporting mode, required to receive the data you need.
    /// With `continuous` set the wiimote reports even when nothing changed.
    SetReporting(ReportingMode, bool),
    /// Set player LEDs to the lower 4 bit of the provided mask.
    PlayerLeds(u8),
    /// Enables/Disables rumble
    RumbleEnable(bool),
    /// Asks for a status report. Also answered with one when the extension port changes.
    RequestStatus,
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportingMode {
    ButtonsAccel = TY_CORE_BUTTONS_ACCELEROMETER,
}

/// Raw accelerometer bytes, centred around 0x80.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acceleration {
    pub x: u8,
    pub y: u8,
    pub z: u8,
}

impl Acceleration {
    /// The second axis, which changes when the wiimote is held sideways and tilted.
    pub fn tilt(&self) -> f64 {
        f64::from(self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    /// Player LEDs in the lower 4 bit.
    pub leds: u8,
    pub battery_low: bool,
    pub extension: bool,
    pub battery: u8,
}

impl Status {
    pub fn battery_percent(&self) -> f32 {
        (f32::from(self.battery) / f32::from(BATTERY_FULL) * 100.0).min(100.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub d_pad_left: bool,
    pub d_pad_right: bool,
    pub d_pad_down: bool,
    pub d_pad_up: bool,
    pub plus: bool,
    pub two: bool,
    pub one: bool,
    pub b: bool,
    pub a: bool,
    pub minus: bool,
    pub home: bool,
}

/// Latest known values, folded from the report stream.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct State {
    pub buttons: ButtonState,
    /// None until the first accelerometer report arrives.
    pub acceleration: Option<Acceleration>,
    pub status: Option<Status>,
}

impl State {
    pub fn update(&mut self, report: &Report) {
        match *report {
            Report::Buttons(buttons) => self.buttons = buttons,
            Report::Acceleration(acceleration) => self.acceleration = Some(acceleration),
            Report::Status(status) => self.status = Some(status),
            Report::Acknowledge { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_keeps_latest_values() {
        let mut state = State::default();
        assert_eq!(state.acceleration, None);

        let first = Acceleration {
            x: 0x80,
            y: 0x70,
            z: 0x99,
        };
        let second = Acceleration {
            x: 0x81,
            y: 0x95,
            z: 0x99,
        };
        state.update(&Report::Acceleration(first));
        state.update(&Report::Buttons(ButtonState {
            home: true,
            ..Default::default()
        }));
        state.update(&Report::Acceleration(second));
        state.update(&Report::Acknowledge {
            report: 0x12,
            error: 0,
        });

        assert_eq!(state.acceleration, Some(second));
        assert!(state.buttons.home);
        assert_eq!(state.status, None);
    }

    #[test]
    fn battery_percent_is_clamped() {
        let mut status = Status {
            leds: 0,
            battery_low: false,
            extension: false,
            battery: 0x64,
        };
        assert_eq!(status.battery_percent(), 50.0);
        status.battery = 0xff;
        assert_eq!(status.battery_percent(), 100.0);
    }
}
