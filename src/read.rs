/*
    This file is part of wiimote-steer, derived from wiimote-rs (https://codeberg.org/metamuffin/wiimote-rs)
    which is licensed under the GNU Affero General Public License (version 3); see /COPYING.
    Copyright (C) 2023 metamuffin <metamuffin@disroot.org>
*/
use crate::consts::*;
use crate::{Acceleration, ButtonState, Error, Report, Result, Status, Wiimote};
use log::{trace, warn};

impl Wiimote {
    /// Returns every report received so far without blocking, oldest first.
    pub fn poll(&self) -> Result<Vec<Report>> {
        let mut buf = [0u8; 64];
        let mut reports = Vec::new();
        loop {
            let size = self
                .device
                .read_timeout(&mut buf, 0)
                .map_err(Error::Disconnected)?;
            if size == 0 {
                return Ok(reports);
            }
            trace!("recv {:02x?}", &buf[..size]);
            reports.extend(decode(&buf[..size])?);
        }
    }
}

/// Decodes a single input report. Unknown report types decode to nothing.
pub fn decode(buf: &[u8]) -> Result<Vec<Report>> {
    let Some(&ty) = buf.first() else {
        return Ok(Vec::new());
    };
    let need = |len: usize| {
        if buf.len() < len {
            Err(Error::ShortReport {
                report: ty,
                len: buf.len(),
                need: len,
            })
        } else {
            Ok(())
        }
    };
    let mut out = Vec::with_capacity(2);
    match ty {
        TY_CORE_BUTTONS_ACCELEROMETER
        | TY_CORE_BUTTONS_ACCELEROMETER_IR12
        | TY_CORE_BUTTONS_ACCELEROMETER_EXTENSION16
        | TY_CORE_BUTTONS_ACCELEROMETER_IR10_EXTENSION6 => {
            need(6)?;
            out.push(Report::Buttons(ButtonState::from_flags([buf[1], buf[2]])));
            out.push(Report::Acceleration(Acceleration::from_report(buf)));
        }
        TY_CORE_BUTTONS
        | TY_CORE_BUTTONS_EXTENSION8
        | TY_CORE_BUTTONS_EXTENSION19
        | TY_CORE_BUTTONS_IR10_EXTENSION9
        | TY_READ_MEMORY_AND_REGISTERS_DATA => {
            need(3)?;
            out.push(Report::Buttons(ButtonState::from_flags([buf[1], buf[2]])));
        }
        TY_STATUS_INFORMATION => {
            need(7)?;
            out.push(Report::Buttons(ButtonState::from_flags([buf[1], buf[2]])));
            out.push(Report::Status(Status::from_report(buf)));
        }
        TY_RESULT => {
            need(5)?;
            out.push(Report::Buttons(ButtonState::from_flags([buf[1], buf[2]])));
            out.push(Report::Acknowledge {
                report: buf[3],
                error: buf[4],
            });
        }
        x => {
            warn!("unknown report type: {x:02x}");
        }
    }
    Ok(out)
}

impl ButtonState {
    // Parse ButtonState from the first two bytes of the report
    #[rustfmt::skip]
    pub fn from_flags([x, y]: [u8; 2]) -> Self {
        Self {
            d_pad_left:  x & 0b00000001 != 0,
            d_pad_right: x & 0b00000010 != 0,
            d_pad_down:  x & 0b00000100 != 0,
            d_pad_up:    x & 0b00001000 != 0,
            plus:        x & 0b00010000 != 0,
            two:         y & 0b00000001 != 0,
            one:         y & 0b00000010 != 0,
            b:           y & 0b00000100 != 0,
            a:           y & 0b00001000 != 0,
            minus:       y & 0b00010000 != 0,
            home:        y & 0b10000000 != 0,
        }
    }
}

impl Acceleration {
    /// Parse acceleration from report format. Only the upper 8 bit are kept.
    pub fn from_report(r: &[u8]) -> Self {
        Acceleration {
            x: r[3],
            y: r[4],
            z: r[5],
        }
    }
}

impl Status {
    pub fn from_report(r: &[u8]) -> Self {
        Status {
            leds: r[3] >> 4,
            battery_low: r[3] & FL_STATUS_BATTERY_LOW != 0,
            extension: r[3] & FL_STATUS_EXTENSION != 0,
            battery: r[6],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accelerometer_report() {
        let reports = decode(&[0x31, 0x00, 0x80, 0x81, 0x92, 0x9a]).unwrap();
        assert_eq!(
            reports,
            vec![
                Report::Buttons(ButtonState {
                    home: true,
                    ..Default::default()
                }),
                Report::Acceleration(Acceleration {
                    x: 0x81,
                    y: 0x92,
                    z: 0x9a,
                }),
            ]
        );
    }

    #[test]
    fn status_report() {
        let reports = decode(&[0x20, 0x00, 0x00, 0x13, 0x00, 0x00, 0x64]).unwrap();
        assert_eq!(
            reports[1],
            Report::Status(Status {
                leds: 0b0001,
                battery_low: true,
                extension: true,
                battery: 0x64,
            })
        );
    }

    #[test]
    fn result_report() {
        let reports = decode(&[0x22, 0x00, 0x00, 0x12, 0x03]).unwrap();
        assert_eq!(
            reports[1],
            Report::Acknowledge {
                report: 0x12,
                error: 0x03,
            }
        );
    }

    #[test]
    fn buttons() {
        let b = ButtonState::from_flags([0b00010001, 0b00001010]);
        assert!(b.d_pad_left && b.plus && b.one && b.a);
        assert!(!b.d_pad_right && !b.two && !b.b && !b.home);
    }

    #[test]
    fn short_report_is_an_error() {
        match decode(&[0x31, 0x00, 0x00, 0x80]) {
            Err(Error::ShortReport { report, len, need }) => {
                assert_eq!((report, len, need), (0x31, 4, 6))
            }
            other => panic!("expected short report, got {other:?}"),
        }
    }

    #[test]
    fn unknown_and_empty_reports_are_skipped() {
        assert!(decode(&[]).unwrap().is_empty());
        assert!(decode(&[0x3d, 0x01, 0x02]).unwrap().is_empty());
    }
}
