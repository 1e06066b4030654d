use log::debug;

use crate::core::filter;
use crate::core::request::{EncodeRequest, Mode};

/// Video settings tuned for upload-site re-encoding.
const ENCODE_VIDEO_ARGS: [&str; 20] = [
    "-c:v",
    "libx264",
    "-crf",
    "18",
    "-preset",
    "veryslow",
    "-tune",
    "film",
    "-profile:v",
    "high",
    "-pix_fmt",
    "+yuv420p",
    "-bf",
    "2",
    "-flags",
    "+cgop",
    "-g",
    "15",
    "-coder",
    "ac",
];

const ENCODE_AUDIO_ARGS: [&str; 4] = ["-c:a", "libfdk_aac", "-b:a", "128k"];

const FRAMES_VIDEO_ARGS: [&str; 4] = ["-c:v", "libx264", "-preset", "ultrafast"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfmpegCommand {
    pub input: String,
    pub output: String,
    pub filter_args: Vec<String>,
    pub codec_args: Vec<String>,
    pub container_args: Vec<String>,
}

impl FfmpegCommand {
    pub fn build(request: &EncodeRequest) -> Self {
        match request.mode() {
            Mode::Encode => Self::encode(request),
            Mode::Frames => Self::frames(request),
        }
    }

    pub fn encode(request: &EncodeRequest) -> Self {
        debug!(
            "encode: frames {}..{} total={} final={} audio_start_sample={} overscan={}",
            request.start_frame(),
            request.end_frame(),
            request.total_frames(),
            request.final_timecode(),
            request.audio_start_sample(),
            request.overscan(),
        );

        let filter_args = vec![
            "-vf".to_string(),
            filter::encode_video_filters(request),
            "-af".to_string(),
            filter::encode_audio_filters(request),
            "-aspect".to_string(),
            "4:3".to_string(),
        ];

        let mut codec_args = strings(&ENCODE_VIDEO_ARGS);
        codec_args.extend(strings(&["-movflags", "+faststart"]));
        codec_args.extend(strings(&ENCODE_AUDIO_ARGS));

        let mut container_args = Vec::new();
        if let Some(duration) = request.sample_duration() {
            container_args.push("-t".to_string());
            container_args.push(duration.to_string());
        }
        container_args.extend(strings(&["-f", "mp4"]));

        Self {
            input: request.input().to_string(),
            output: request.output().to_string(),
            filter_args,
            codec_args,
            container_args,
        }
    }

    pub fn frames(request: &EncodeRequest) -> Self {
        debug!(
            "frames: start window at {}s, end window at {}s",
            filter::start_window_seconds(request.start_frame()),
            filter::end_window_seconds(request.end_frame()),
        );

        Self {
            input: request.input().to_string(),
            output: request.output().to_string(),
            filter_args: vec![
                "-filter_complex".to_string(),
                filter::frames_filter_complex(request),
                "-map".to_string(),
                "[out]".to_string(),
            ],
            codec_args: strings(&FRAMES_VIDEO_ARGS),
            container_args: strings(&["-f", "mp4"]),
        }
    }

    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        args.push("-i".to_string());
        args.push(self.input.clone());

        args.extend(self.filter_args.iter().cloned());
        args.extend(self.codec_args.iter().cloned());
        args.extend(self.container_args.iter().cloned());
        args.push(self.output.clone());

        args
    }

    /// Shell-quoted rendering that can be pasted back into a terminal.
    pub fn to_shell_string(&self, program: &str) -> String {
        let mut words = vec![program.to_string()];
        words.extend(self.to_args());
        shell_words::join(words)
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
