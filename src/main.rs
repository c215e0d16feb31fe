/*
    This file is part of wiimote-steer, derived from wiimote-rs (https://codeberg.org/metamuffin/wiimote-rs)
    which is licensed under the GNU Affero General Public License (version 3); see /COPYING.
    Copyright (C) 2023 metamuffin <metamuffin@disroot.org>
*/
use anyhow::{Context, Result};
use log::{info, warn};
use std::{thread::sleep, time::Duration};
use wiimote_steer::{
    keyboard::VirtualKeyboard,
    steer::{self, Steering},
    Action, ButtonState, Config, Error, ReportingMode, Wiimote,
};

fn main() -> Result<()> {
    env_logger::init_from_env("LOG");
    let config = Config::from_env().context("loading configuration")?;
    let mut keyboard = VirtualKeyboard::create(&config.device_name, &config.all_keys())
        .context("creating virtual keyboard (is /dev/uinput writable?)")?;
    let mut w = Wiimote::open().context("opening wiimote (is it paired and connected?)")?;

    w.write(Action::PlayerLeds(0))?;
    w.write(Action::SetReporting(ReportingMode::ButtonsAccel, true))?;
    w.write(Action::RumbleEnable(true))?;
    sleep(Duration::from_millis(200));
    w.write(Action::RumbleEnable(false))?;

    println!("Tilt the wiimote to steer, press HOME for its status. Ctrl-C to quit.");
    let err = match steer::run(&mut w, &mut keyboard, &config) {
        Ok(never) => match never {},
        Err(err) => err,
    };
    let released = Steering::Neutral
        .apply(&mut keyboard, &config.keys)
        .and_then(|()| config.buttons.apply(&mut keyboard, &ButtonState::default()));
    if let Err(e) = released {
        warn!("could not release keys: {e}");
    }
    match err {
        Error::Disconnected(e) => {
            info!("wiimote disconnected ({e}), exiting");
            Ok(())
        }
        err => Err(err).context("steering stopped"),
    }
}
