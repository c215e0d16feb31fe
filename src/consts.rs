/*
    This file is part of wiimote-steer, derived from wiimote-rs (https://codeberg.org/metamuffin/wiimote-rs)
    which is licensed under the GNU Affero General Public License (version 3); see /COPYING.
    Copyright (C) 2023 metamuffin <metamuffin@disroot.org>
*/
pub const HID_VENDOR: u16 = 0x057e;
pub const HID_PRODUCT: u16 = 0x0306;
pub const HID_PRODUCT_TR: u16 = 0x0330;

pub const TY_RUMBLE: u8 = 0x10;
pub const TY_PLAYER_LEDS: u8 = 0x11;
pub const TY_DATA_REPORTING_MODE: u8 = 0x12;
pub const TY_STATUS_INFORMATION_REQUEST: u8 = 0x15;
pub const TY_STATUS_INFORMATION: u8 = 0x20;
pub const TY_READ_MEMORY_AND_REGISTERS_DATA: u8 = 0x21;
pub const TY_RESULT: u8 = 0x22;
pub const TY_CORE_BUTTONS: u8 = 0x30;
pub const TY_CORE_BUTTONS_ACCELEROMETER: u8 = 0x31;
pub const TY_CORE_BUTTONS_EXTENSION8: u8 = 0x32;
pub const TY_CORE_BUTTONS_ACCELEROMETER_IR12: u8 = 0x33;
pub const TY_CORE_BUTTONS_EXTENSION19: u8 = 0x34;
pub const TY_CORE_BUTTONS_ACCELEROMETER_EXTENSION16: u8 = 0x35;
pub const TY_CORE_BUTTONS_IR10_EXTENSION9: u8 = 0x36;
pub const TY_CORE_BUTTONS_ACCELEROMETER_IR10_EXTENSION6: u8 = 0x37;

pub const VA_CONTINUOUS_REPORTING: u8 = 0x04;

pub const FL_STATUS_BATTERY_LOW: u8 = 0b0000_0001;
pub const FL_STATUS_EXTENSION: u8 = 0b0000_0010;

/// Battery byte of a status report when the batteries are full.
pub const BATTERY_FULL: u8 = 0xc8;
