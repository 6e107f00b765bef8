//! Application-wide constants

pub mod config {
    /// Directory under the platform config dir
    pub const APP_DIR: &str = "video-launcher";
    pub const FILENAME: &str = "settings.json";

    pub const ENV_MPV_PATH: &str = "VIDEO_LAUNCHER_MPV";
    pub const ENV_FULLSCREEN: &str = "VIDEO_LAUNCHER_FULLSCREEN";
}

pub mod defaults {
    pub const BACKGROUND_COLOR: &str = "#000000";
    pub const BUTTON_BORDER_COLOR: &str = "#FFFFFF";
    pub const BUTTON_TEXT_COLOR: &str = "#FFFFFF";
    pub const FONT_FAMILY: &str = "Arial";
    pub const FONT_SIZE: u8 = 12;
    pub const WINDOW_GEOMETRY: &str = "600x600+100+100";
    pub const STOP_BUTTON_TITLE: &str = "VR Experience";
}

pub mod grid {
    pub const COLUMNS: usize = 3;
    pub const ROWS: usize = 3;
    pub const BUTTON_COUNT: usize = COLUMNS * ROWS;
    /// The last slot stops playback instead of launching a video
    pub const STOP_SLOT: usize = BUTTON_COUNT - 1;
}

pub mod validation {
    pub const MIN_FONT_SIZE: u8 = 8;
    pub const MAX_FONT_SIZE: u8 = 72;
    pub const MIN_WINDOW_DIMENSION: u32 = 100;
}

pub mod player {
    use std::time::Duration;

    pub const PROGRAM_NAME: &str = "mpv";
    pub const ARGS: &[&str] = &["--fullscreen", "--loop-file=inf"];
    /// How long a player gets to exit after SIGTERM before it is killed
    pub const TERMINATE_GRACE: Duration = Duration::from_millis(1500);
    pub const TERMINATE_POLL: Duration = Duration::from_millis(50);
    pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mkv", "mov", "wmv"];
}
