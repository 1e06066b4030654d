//! Filter-graph expressions handed to ffmpeg's `-vf`, `-af` and
//! `-filter_complex` options.

use crate::core::request::{EncodeRequest, BASE_HEIGHT, BASE_WIDTH};
use crate::core::timecode::{Timecode, FRAME_RATE};

/// Overlay placement and font, shared by every drawtext instance.
pub const DRAWTEXT_STYLE: &str = "x=(w-tw)/2:y=h-(2*lh):fontfile=/System/Library/Fonts/Menlo.ttc:fontsize=24:fontcolor=white:borderw=1";

/// Source capture region before it is scaled down to 4:3.
pub const SOURCE_CROP: (u64, u64) = (704, 480);

/// Length of each diagnostic window in frames mode.
pub const WINDOW_SECONDS: u64 = 30;

const WINDOW_LEAD_IN: u64 = WINDOW_SECONDS / 2;

pub fn encode_video_filters(request: &EncodeRequest) -> String {
    let total = request.total_frames();
    let final_timecode = request.final_timecode().escaped();
    let zero = Timecode::from_frames(0).escaped();

    let mut filters = vec![
        format!("fps={FRAME_RATE}"),
        format!("trim=start_frame={}", request.start_frame()),
        "setpts=PTS-STARTPTS".to_string(),
        format!(
            "crop={}:{},scale={BASE_WIDTH}:{BASE_HEIGHT}",
            SOURCE_CROP.0, SOURCE_CROP.1
        ),
    ];

    let overscan = request.overscan();
    if overscan.is_active() {
        filters.push(format!(
            "crop={}:{},scale={BASE_WIDTH}:{BASE_HEIGHT}",
            overscan.width(),
            overscan.height()
        ));
    }

    filters.push(format!(
        "drawtext=timecode='{zero}':r={FRAME_RATE}:{DRAWTEXT_STYLE}:enable='lt(n,{total})'"
    ));
    filters.push(format!(
        "drawtext=text='{final_timecode}':{DRAWTEXT_STYLE}:enable='gte(n,{total})'"
    ));

    filters.join(",")
}

pub fn encode_audio_filters(request: &EncodeRequest) -> String {
    format!(
        "atrim=start_sample={},asetpts=PTS-STARTPTS",
        request.audio_start_sample()
    )
}

/// Start of the window around the candidate start point, clamped to zero.
pub fn start_window_seconds(start_frame: u64) -> u64 {
    let seconds = start_frame / FRAME_RATE;
    if seconds > WINDOW_LEAD_IN {
        seconds - WINDOW_LEAD_IN
    } else {
        0
    }
}

/// Start of the window around the finish point. Near the beginning of the
/// source this starts at the finish itself rather than at zero.
pub fn end_window_seconds(end_frame: u64) -> u64 {
    let seconds = end_frame / FRAME_RATE;
    if seconds > WINDOW_LEAD_IN {
        seconds - WINDOW_LEAD_IN
    } else {
        seconds
    }
}

pub fn frames_filter_complex(request: &EncodeRequest) -> String {
    let window = |label: &str, start: u64| {
        format!(
            "[0:v]fps={FRAME_RATE},drawtext=text='%{{n}}':{DRAWTEXT_STYLE},trim=start={start}:duration={WINDOW_SECONDS},setpts=PTS-STARTPTS[{label}]"
        )
    };

    format!(
        "{};{};[a][b]concat[out]",
        window("a", start_window_seconds(request.start_frame())),
        window("b", end_window_seconds(request.end_frame())),
    )
}
