use std::fmt;
use std::str::FromStr;

use crate::core::error::SpeedrunError;
use crate::core::timecode::{Timecode, FRAME_RATE};

/// Width and height every encode is scaled back to.
pub const BASE_WIDTH: u64 = 640;
pub const BASE_HEIGHT: u64 = 480;

/// 48 kHz audio divided by 30 fps video.
pub const SAMPLES_PER_FRAME: u64 = 48_000 / FRAME_RATE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Encode,
    Frames,
}

/// Extra edge crop applied before the final scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overscan {
    #[default]
    None,
    FivePercent,
    SixAndAQuarterPercent,
}

impl Overscan {
    pub const ALLOWED: [&'static str; 3] = ["0", "5", "6.25"];

    /// Fraction of each dimension removed, as `(numerator, denominator)`.
    fn fraction(self) -> (u64, u64) {
        match self {
            Overscan::None => (0, 1),
            Overscan::FivePercent => (1, 20),
            Overscan::SixAndAQuarterPercent => (1, 16),
        }
    }

    pub fn is_active(self) -> bool {
        self != Overscan::None
    }

    pub fn width(self) -> u64 {
        self.keep(BASE_WIDTH)
    }

    pub fn height(self) -> u64 {
        self.keep(BASE_HEIGHT)
    }

    fn keep(self, dimension: u64) -> u64 {
        let (num, den) = self.fraction();
        dimension * (den - num) / den
    }
}

impl FromStr for Overscan {
    type Err = SpeedrunError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(Overscan::None),
            "5" => Ok(Overscan::FivePercent),
            "6.25" => Ok(Overscan::SixAndAQuarterPercent),
            other => Err(SpeedrunError::configuration(format!(
                "unsupported overscan '{other}', possible values: {}",
                Overscan::ALLOWED.join(", ")
            ))),
        }
    }
}

impl fmt::Display for Overscan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let percent = match self {
            Overscan::None => "0",
            Overscan::FivePercent => "5",
            Overscan::SixAndAQuarterPercent => "6.25",
        };
        write!(f, "{percent}%")
    }
}

/// A validated, immutable description of one encode or frames render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeRequest {
    input: String,
    output: String,
    start_frame: u64,
    end_frame: u64,
    overscan: Overscan,
    sample_duration: Option<u32>,
    mode: Mode,
}

/// Raw, possibly incomplete parameters as collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct RequestParams {
    pub input: Option<String>,
    pub output: Option<String>,
    pub start_frame: Option<u64>,
    pub end_frame: Option<u64>,
    pub overscan: Overscan,
    pub sample_duration: Option<u32>,
    pub mode: Mode,
}

impl EncodeRequest {
    pub fn new(params: RequestParams) -> Result<Self, SpeedrunError> {
        let input = params
            .input
            .ok_or(SpeedrunError::MissingParameter { name: "input" })?;
        let output = params
            .output
            .ok_or(SpeedrunError::MissingParameter { name: "output" })?;
        let end_frame = params
            .end_frame
            .ok_or(SpeedrunError::MissingParameter { name: "end" })?;
        let start_frame = params.start_frame.unwrap_or(0);

        if end_frame < start_frame {
            return Err(SpeedrunError::configuration(format!(
                "end frame {end_frame} is before start frame {start_frame}"
            )));
        }
        if start_frame.checked_mul(SAMPLES_PER_FRAME).is_none() {
            return Err(SpeedrunError::configuration(format!(
                "start frame {start_frame} is too large to align the audio trim"
            )));
        }
        if params.sample_duration == Some(0) {
            return Err(SpeedrunError::configuration(
                "sample duration must be a positive number of seconds",
            ));
        }

        Ok(Self {
            input,
            output,
            start_frame,
            end_frame,
            overscan: params.overscan,
            sample_duration: params.sample_duration,
            mode: params.mode,
        })
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn start_frame(&self) -> u64 {
        self.start_frame
    }

    pub fn end_frame(&self) -> u64 {
        self.end_frame
    }

    pub fn overscan(&self) -> Overscan {
        self.overscan
    }

    pub fn sample_duration(&self) -> Option<u32> {
        self.sample_duration
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn total_frames(&self) -> u64 {
        self.end_frame - self.start_frame
    }

    pub fn audio_start_sample(&self) -> u64 {
        self.start_frame * SAMPLES_PER_FRAME
    }

    pub fn final_timecode(&self) -> Timecode {
        Timecode::from_frames(self.total_frames())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(start: u64, end: u64) -> RequestParams {
        RequestParams {
            input: Some("run.ts".to_string()),
            output: Some("run.mp4".to_string()),
            start_frame: Some(start),
            end_frame: Some(end),
            ..RequestParams::default()
        }
    }

    #[test]
    fn overscan_dimensions_truncate() {
        assert_eq!((Overscan::None.width(), Overscan::None.height()), (640, 480));
        assert_eq!(
            (Overscan::FivePercent.width(), Overscan::FivePercent.height()),
            (608, 456)
        );
        assert_eq!(
            (
                Overscan::SixAndAQuarterPercent.width(),
                Overscan::SixAndAQuarterPercent.height()
            ),
            (600, 450)
        );
    }

    #[test]
    fn overscan_parses_only_enumerated_values() {
        assert_eq!("0".parse::<Overscan>().unwrap(), Overscan::None);
        assert_eq!("5".parse::<Overscan>().unwrap(), Overscan::FivePercent);
        assert_eq!(
            "6.25".parse::<Overscan>().unwrap(),
            Overscan::SixAndAQuarterPercent
        );

        for value in ["10", "6", "5.0", "0.05", "-5", "", "abc"] {
            assert!(
                matches!(
                    value.parse::<Overscan>(),
                    Err(SpeedrunError::Configuration { .. })
                ),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn derived_quantities() {
        let request = EncodeRequest::new(params(300, 3000)).unwrap();
        assert_eq!(request.total_frames(), 2700);
        assert_eq!(request.audio_start_sample(), 480_000);
        assert_eq!(request.final_timecode().escaped(), "00\\:01\\:30\\:00");
    }

    #[test]
    fn audio_offset_is_exact_multiple() {
        for start in [0, 1, 29, 30, 12_345, 1_000_000] {
            let request = EncodeRequest::new(params(start, start + 10)).unwrap();
            assert_eq!(request.audio_start_sample(), 1600 * start);
        }
    }

    #[test]
    fn start_defaults_to_zero() {
        let request = EncodeRequest::new(RequestParams {
            start_frame: None,
            ..params(0, 1)
        })
        .unwrap();
        assert_eq!(request.start_frame(), 0);
        assert_eq!(request.final_timecode().escaped(), "00\\:00\\:00\\:01");
    }

    #[test]
    fn missing_end_frame() {
        let err = EncodeRequest::new(RequestParams {
            end_frame: None,
            ..params(0, 1)
        })
        .unwrap_err();
        assert!(matches!(err, SpeedrunError::MissingParameter { name: "end" }));
    }

    #[test]
    fn missing_input_and_output() {
        let err = EncodeRequest::new(RequestParams {
            input: None,
            ..params(0, 1)
        })
        .unwrap_err();
        assert!(matches!(err, SpeedrunError::MissingParameter { name: "input" }));

        let err = EncodeRequest::new(RequestParams {
            output: None,
            ..params(0, 1)
        })
        .unwrap_err();
        assert!(matches!(err, SpeedrunError::MissingParameter { name: "output" }));
    }

    #[test]
    fn reversed_range_is_rejected() {
        let err = EncodeRequest::new(params(100, 99)).unwrap_err();
        assert!(matches!(err, SpeedrunError::Configuration { .. }));
    }

    #[test]
    fn start_frame_beyond_audio_sample_range_is_rejected() {
        let huge = u64::MAX / 2;
        let err = EncodeRequest::new(params(huge, huge)).unwrap_err();
        assert!(matches!(err, SpeedrunError::Configuration { .. }));

        let largest = u64::MAX / SAMPLES_PER_FRAME;
        let request = EncodeRequest::new(params(largest, largest)).unwrap();
        assert_eq!(request.audio_start_sample(), largest * 1600);
        assert!(EncodeRequest::new(params(largest + 1, largest + 1)).is_err());
    }

    #[test]
    fn zero_length_range_is_allowed() {
        let request = EncodeRequest::new(params(500, 500)).unwrap();
        assert_eq!(request.total_frames(), 0);
    }

    #[test]
    fn zero_sample_duration_is_rejected() {
        let err = EncodeRequest::new(RequestParams {
            sample_duration: Some(0),
            ..params(0, 30)
        })
        .unwrap_err();
        assert!(matches!(err, SpeedrunError::Configuration { .. }));
    }
}
