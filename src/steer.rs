/*
    This file is part of wiimote-steer, derived from wiimote-rs (https://codeberg.org/metamuffin/wiimote-rs)
    which is licensed under the GNU Affero General Public License (version 3); see /COPYING.
    Copyright (C) 2023 metamuffin <metamuffin@disroot.org>
*/
//! Turning tilt into key presses.

use crate::{
    keyboard::{KeyPair, KeySink},
    Action, Config, Report, ReportingMode, Result, State, Wiimote,
};
use log::{debug, info};
use std::{
    convert::Infallible,
    thread::sleep,
    time::{Duration, Instant},
};

/// Tilt values above `upper` steer left, below `lower` steer right.
/// Both bounds belong to the dead-zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub upper: f64,
    pub lower: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            upper: 143.5,
            lower: 123.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steering {
    Left,
    Right,
    Neutral,
}

pub fn classify(tilt: f64, thresholds: &Thresholds) -> Steering {
    if tilt > thresholds.upper {
        Steering::Left
    } else if tilt < thresholds.lower {
        Steering::Right
    } else {
        Steering::Neutral
    }
}

impl Steering {
    /// Issues the key commands for this steering: release the opposite key
    /// first, then press. Neutral releases both.
    pub fn apply<K: KeySink>(self, sink: &mut K, keys: &KeyPair) -> Result<()> {
        match self {
            Steering::Left => {
                sink.release(keys.right)?;
                sink.press(keys.left)
            }
            Steering::Right => {
                sink.release(keys.left)?;
                sink.press(keys.right)
            }
            Steering::Neutral => {
                sink.release(keys.left)?;
                sink.release(keys.right)
            }
        }
    }
}

/// Source of reports and sink of actions, implemented by [`Wiimote`].
pub trait Controller {
    /// Returns every report received since the last call without blocking.
    fn poll(&mut self) -> Result<Vec<Report>>;
    fn write(&mut self, action: Action) -> Result<()>;
}

impl Controller for Wiimote {
    fn poll(&mut self) -> Result<Vec<Report>> {
        Wiimote::poll(self)
    }
    fn write(&mut self, action: Action) -> Result<()> {
        Wiimote::write(self, action)
    }
}

/// Polls the controller forever, translating its tilt and buttons into key
/// commands once per `config.poll_interval`. Only returns when something
/// fails, e.g. [`crate::Error::Disconnected`].
pub fn run<C, K>(controller: &mut C, sink: &mut K, config: &Config) -> Result<Infallible>
where
    C: Controller,
    K: KeySink,
{
    let mut state = State::default();
    let mut last = None;
    let mut status_requested: Option<Instant> = None;
    loop {
        for report in controller.poll()? {
            match report {
                Report::Buttons(buttons) if buttons.home && !state.buttons.home => {
                    controller.write(Action::RequestStatus)?;
                    status_requested = Some(Instant::now());
                }
                Report::Status(status) => {
                    info!(
                        "status: leds {:04b}, battery {:.0}%{}, extension {}",
                        status.leds,
                        status.battery_percent(),
                        if status.battery_low { " (low)" } else { "" },
                        if status.extension { "connected" } else { "none" },
                    );
                    // an unrequested status report resets the reporting mode
                    let requested = status_requested
                        .take()
                        .is_some_and(|at| at.elapsed() < config.status_timeout);
                    if !requested {
                        debug!("unsolicited status report, restoring reporting mode");
                        controller.write(Action::SetReporting(ReportingMode::ButtonsAccel, true))?;
                    }
                }
                _ => {}
            }
            state.update(&report);
        }

        let steering = match state.acceleration {
            Some(acceleration) => classify(acceleration.tilt(), &config.thresholds),
            None => Steering::Neutral,
        };
        if last != Some(steering) {
            debug!("steering {steering:?}");
            last = Some(steering);
        }
        steering.apply(sink, &config.keys)?;
        config.buttons.apply(sink, &state.buttons)?;

        if config.poll_interval > Duration::ZERO {
            sleep(config.poll_interval);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::Key;

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
    fn classification() {
        let t = Thresholds::default();
        assert_eq!(classify(144.0, &t), Steering::Left);
        assert_eq!(classify(200.0, &t), Steering::Left);
        assert_eq!(classify(123.0, &t), Steering::Right);
        assert_eq!(classify(0.0, &t), Steering::Right);
        assert_eq!(classify(133.0, &t), Steering::Neutral);
    }

    #[test]
    fn thresholds_are_dead_zone() {
        let t = Thresholds::default();
        assert_eq!(classify(143.5, &t), Steering::Neutral);
        assert_eq!(classify(123.5, &t), Steering::Neutral);
    }

    #[test]
    fn release_comes_before_press() {
        let keys = KeyPair::default();
        let mut rec = Recorder::default();
        Steering::Left.apply(&mut rec, &keys).unwrap();
        assert_eq!(rec.0, [(Key::KEY_D, false), (Key::KEY_A, true)]);

        let mut rec = Recorder::default();
        Steering::Right.apply(&mut rec, &keys).unwrap();
        assert_eq!(rec.0, [(Key::KEY_A, false), (Key::KEY_D, true)]);

        let mut rec = Recorder::default();
        Steering::Neutral.apply(&mut rec, &keys).unwrap();
        assert_eq!(rec.0, [(Key::KEY_A, false), (Key::KEY_D, false)]);
    }
}
