/*
    This file is part of wiimote-steer, derived from wiimote-rs (https://codeberg.org/metamuffin/wiimote-rs)
    which is licensed under the GNU Affero General Public License (version 3); see /COPYING.
    Copyright (C) 2023 metamuffin <metamuffin@disroot.org>
*/
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("hidapi error: {0}")]
    Hid(#[from] hidapi::HidError),

    #[error("no wiimote found")]
    NotFound,

    /// The device stopped answering reads, usually because it was switched off
    /// or went out of range.
    #[error("wiimote disconnected: {0}")]
    Disconnected(hidapi::HidError),

    #[error("report {report:#04x} too short: got {len} bytes, need {need}")]
    ShortReport { report: u8, len: usize, need: usize },

    #[error("uinput error: {0}")]
    Uinput(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
