use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::error::SpeedrunError;

/// Fixed frame rate every recording is normalized to.
pub const FRAME_RATE: u64 = 30;

/// Separator accepted by drawtext; a bare colon would end the option value.
pub const ESCAPED_SEPARATOR: &str = "\\:";

static RE_TRIPLET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:([0-9]+):)?([0-9]+):([0-9]{1,2}):([0-9]{1,2})\s*$").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timecode {
    hours: u64,
    minutes: u64,
    seconds: u64,
    frames: u64,
}

impl Timecode {
    pub fn from_frames(total: u64) -> Self {
        let (seconds, frames) = (total / FRAME_RATE, total % FRAME_RATE);
        let (minutes, seconds) = (seconds / 60, seconds % 60);
        let (hours, minutes) = (minutes / 60, minutes % 60);
        Self {
            hours,
            minutes,
            seconds,
            frames,
        }
    }

    /// `None` when the frame count does not fit in a `u64`.
    pub fn checked_total_frames(&self) -> Option<u64> {
        self.hours
            .checked_mul(60)?
            .checked_add(self.minutes)?
            .checked_mul(60)?
            .checked_add(self.seconds)?
            .checked_mul(FRAME_RATE)?
            .checked_add(self.frames)
    }

    /// Renders `HH\:MM\:SS\:FF` for embedding as literal drawtext text.
    pub fn escaped(&self) -> String {
        self.join(ESCAPED_SEPARATOR)
    }

    fn join(&self, separator: &str) -> String {
        [self.hours, self.minutes, self.seconds, self.frames]
            .iter()
            .map(|n| format!("{n:02}"))
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join(":"))
    }
}

/// Parses `MM:SS:FF` or `HH:MM:SS:FF` at 30 fps into a frame count.
pub fn parse_triplet(value: &str) -> Result<u64, SpeedrunError> {
    let invalid = || {
        SpeedrunError::configuration(format!(
            "invalid timecode '{value}', expected MM:SS:FF or HH:MM:SS:FF"
        ))
    };

    let caps = RE_TRIPLET.captures(value).ok_or_else(invalid)?;
    let field = |idx: usize| -> Result<u64, SpeedrunError> {
        match caps.get(idx) {
            Some(m) => m.as_str().parse::<u64>().map_err(|_| invalid()),
            None => Ok(0),
        }
    };

    let hours = field(1)?;
    let minutes = field(2)?;
    let seconds = field(3)?;
    let frames = field(4)?;

    if frames >= FRAME_RATE {
        return Err(SpeedrunError::configuration(format!(
            "frame field {frames} in '{value}' must be below {FRAME_RATE}"
        )));
    }
    if seconds >= 60 {
        return Err(SpeedrunError::configuration(format!(
            "seconds field {seconds} in '{value}' must be below 60"
        )));
    }
    if caps.get(1).is_some() && minutes >= 60 {
        return Err(SpeedrunError::configuration(format!(
            "minutes field {minutes} in '{value}' must be below 60"
        )));
    }

    Timecode {
        hours,
        minutes,
        seconds,
        frames,
    }
    .checked_total_frames()
    .ok_or_else(|| SpeedrunError::configuration(format!("timecode '{value}' is out of range")))
}
