use std::process::Command;
use std::time::Instant;

use log::{debug, info};

pub mod command;
pub mod error;
pub mod filter;
pub mod request;
pub mod timecode;

use command::FfmpegCommand;
use error::SpeedrunError;

pub const DEFAULT_PROGRAM: &str = "ffmpeg";

/// Runs ffmpeg in the foreground with the terminal inherited, blocking until
/// it exits.
pub fn run(program: &str, command: &FfmpegCommand) -> Result<(), SpeedrunError> {
    let args = command.to_args();
    debug!("spawning {program} with {} arguments", args.len());

    let started_at = Instant::now();
    let status = Command::new(program).args(&args).status().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SpeedrunError::BinaryNotFound {
                program: program.to_string(),
            }
        } else {
            SpeedrunError::Io(e)
        }
    })?;

    info!(
        "{program} finished in {:.1}s with {status}",
        started_at.elapsed().as_secs_f32()
    );

    if status.success() {
        Ok(())
    } else {
        Err(SpeedrunError::ExternalTool {
            exit_code: status.code(),
        })
    }
}
