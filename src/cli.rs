use clap::Parser;
use log::info;

use crate::core::command::FfmpegCommand;
use crate::core::error::SpeedrunError;
use crate::core::request::{EncodeRequest, Mode, Overscan, RequestParams};
use crate::core::{self, timecode, DEFAULT_PROGRAM};

pub const USAGE_HINT: &str = "Please use \"encode-speedrun -h\" to see options.";

#[derive(Debug, Parser)]
#[command(
    name = "encode-speedrun",
    version,
    about = "Speedrun encoder with a burned-in timer, built on ffmpeg",
    override_usage = "encode-speedrun -i input.ts -o output.mp4 -s 300 -e 3000 [OPTIONS]"
)]
pub struct Cli {
    /// Input recording
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: Option<String>,
    /// Output MP4 file (ex. speedrun.mp4)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<String>,
    /// Starting frame of the run (default 0), output will start here
    #[arg(short = 's', long = "start", value_name = "FRAME", conflicts_with = "start_time")]
    pub start_frame: Option<u64>,
    /// Starting point as MM:SS:FF or HH:MM:SS:FF at 30 fps
    #[arg(long = "start-time", value_name = "TIMECODE")]
    pub start_time: Option<String>,
    /// Final frame of the run, the timer stops here
    #[arg(short = 'e', long = "end", value_name = "FRAME", conflicts_with = "end_time")]
    pub end_frame: Option<u64>,
    /// Final point as MM:SS:FF or HH:MM:SS:FF at 30 fps
    #[arg(long = "end-time", value_name = "TIMECODE")]
    pub end_time: Option<String>,
    /// Percentage to overscan. Possible values: 0, 5, 6.25
    #[arg(long, value_name = "PERCENT", default_value = "0")]
    pub overscan: String,
    /// Limit output to DURATION seconds, useful for testing
    #[arg(long = "sample", value_name = "DURATION")]
    pub sample_duration: Option<u32>,
    /// Output a 1 minute video with frame counts to pick the start and finish
    #[arg(long)]
    pub frames: bool,
    /// Print the ffmpeg command without running it
    #[arg(short = 'n', long = "dry-run")]
    pub dry_run: bool,
    /// ffmpeg binary to invoke
    #[arg(long = "ffmpeg", value_name = "PATH", env = "SPEEDRUN_FFMPEG", default_value = DEFAULT_PROGRAM)]
    pub program: String,
    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn to_params(&self) -> Result<RequestParams, SpeedrunError> {
        let start_frame = match &self.start_time {
            Some(tc) => Some(timecode::parse_triplet(tc)?),
            None => self.start_frame,
        };
        let end_frame = match &self.end_time {
            Some(tc) => Some(timecode::parse_triplet(tc)?),
            None => self.end_frame,
        };

        Ok(RequestParams {
            input: self.input.clone(),
            output: self.output.clone(),
            start_frame,
            end_frame,
            overscan: self.overscan.parse::<Overscan>()?,
            sample_duration: self.sample_duration,
            mode: if self.frames { Mode::Frames } else { Mode::Encode },
        })
    }

    pub fn to_request(&self) -> Result<EncodeRequest, SpeedrunError> {
        EncodeRequest::new(self.to_params()?)
    }
}

/// Builds the command, prints it, and runs it unless this is a dry run.
pub fn execute(cli: &Cli) -> Result<(), SpeedrunError> {
    let request = cli.to_request()?;
    let command = FfmpegCommand::build(&request);

    println!("{}", command.to_shell_string(&cli.program));

    if cli.dry_run {
        info!("dry run, not invoking {}", cli.program);
        return Ok(());
    }

    core::run(&cli.program, &command)
}
