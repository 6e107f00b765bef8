//! Launcher window - egui front end over settings, placement and the player

use anyhow::Result;
use eframe::egui::{self, FontFamily, FontId, Pos2, Rect, ViewportCommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{debug, error, info, warn};

use crate::color::color32_or;
use crate::constants::defaults;
use crate::constants::player::TERMINATE_POLL;
use crate::gui::components::button_editor::{self, ButtonEditorState};
use crate::gui::components::font_picker::{self, FontPickerState};
use crate::gui::components::grid::{self, GridStyle};
use crate::gui::components::notice::{self, Notice};
use crate::gui::components::{Action, help, settings_window};
use crate::gui::constants::*;
use crate::gui::fonts::{self, FontCatalog};
use crate::gui::geometry::{GeometryTracker, SaveDebounce, screen_to_window};
use crate::monitor;
use crate::placement::{Placement, PlacementState};
use crate::player::{Launch, LaunchError, Player};
use crate::settings::Settings;
use crate::types::{MonitorRect, WindowGeometry};

/// Process-level options that are not persisted
pub struct LaunchOptions {
    /// Start windowed this run regardless of the saved mode
    pub force_windowed: bool,
    /// Set by the signal handler; closes the window on the next frame
    pub shutdown: Arc<AtomicBool>,
}

#[derive(Default)]
struct OpenWindows {
    settings: bool,
    help: bool,
    confirm_reset: bool,
    font_picker: Option<FontPickerState>,
    button_editor: Option<ButtonEditorState>,
}

pub struct LauncherApp {
    settings: Settings,
    settings_path: PathBuf,
    player: Player,
    placement: PlacementState,
    startup_placement: Option<Placement>,
    started: bool,
    monitors: Vec<MonitorRect>,
    fonts: FontCatalog,
    button_font: FontFamily,
    button_rects: Vec<Rect>,
    geometry: GeometryTracker,
    style_save: SaveDebounce,
    windows: OpenWindows,
    notice: Option<Notice>,
    shutdown: Arc<AtomicBool>,
}

impl LauncherApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        settings_path: PathBuf,
        options: LaunchOptions,
    ) -> Self {
        let monitors = monitor::list_monitors();
        info!(count = monitors.len(), "Monitors available for fullscreen");

        let (placement, startup_placement) = if options.force_windowed {
            let windowed = Settings {
                fullscreen: false,
                ..settings.clone()
            };
            PlacementState::startup(&windowed, &monitors)
        } else {
            PlacementState::startup(&settings, &monitors)
        };

        let fonts = FontCatalog::scan();
        let button_font = fonts::install(&cc.egui_ctx, &fonts, &settings.font_family);
        let geometry = GeometryTracker::new(settings.window_geometry, GEOMETRY_SAVE_DELAY);

        Self {
            settings,
            settings_path,
            player: Player::new(),
            placement,
            startup_placement,
            started: false,
            monitors,
            fonts,
            button_font,
            button_rects: Vec::new(),
            geometry,
            style_save: SaveDebounce::new(GEOMETRY_SAVE_DELAY),
            windows: OpenWindows::default(),
            notice: None,
            shutdown: options.shutdown,
        }
    }

    fn save(&mut self) {
        if let Err(e) = self.settings.save(&self.settings_path) {
            error!(path = %self.settings_path.display(), error = %e, "Failed to save settings");
            self.notice = Some(Notice::error("Error", format!("Failed to save settings: {e:#}")));
        }
    }

    fn grid_style(&self) -> GridStyle {
        let background = color32_or(&self.settings.background_color, defaults::BACKGROUND_COLOR);
        GridStyle {
            background,
            border: color32_or(&self.settings.button_border_color, defaults::BUTTON_BORDER_COLOR),
            text: color32_or(&self.settings.button_text_color, defaults::BUTTON_TEXT_COLOR),
            font: FontId::new(self.settings.font_size as f32, self.button_font.clone()),
        }
    }

    /// First frame: the window exists, so placement commands take effect
    fn apply_startup(&mut self, ctx: &egui::Context) {
        self.started = true;
        if let Some(placement) = self.startup_placement.take() {
            apply_placement(ctx, placement);
            return;
        }
        // Initial geometry was given in points; correct it on scaled displays
        let scale = pixels_per_point(ctx);
        if (scale - 1.0).abs() > f32::EPSILON {
            debug!(scale, "Re-applying window geometry for display scale");
            apply_placement(ctx, Placement::Windowed(Some(self.settings.window_geometry)));
        }
    }

    fn track_geometry(&mut self, ctx: &egui::Context) {
        if !self.placement.mode().records_geometry() {
            return;
        }
        let now = Instant::now();
        if let Some(current) = current_geometry(ctx) {
            self.geometry.observe(current, now);
        }
        if let Some(settled) = self.geometry.settled(now)
            && settled != self.settings.window_geometry
        {
            debug!(geometry = %settled, "Saving window geometry");
            self.settings.window_geometry = settled;
            self.placement.record_windowed(settled);
            self.save();
        }
    }

    fn collect_drops(&mut self, ctx: &egui::Context, actions: &mut Vec<Action>) {
        let (dropped, latest) = ctx.input(|i| (i.raw.dropped_files.clone(), i.pointer.latest_pos()));
        let Some(file) = dropped.into_iter().next() else {
            return;
        };
        // X11 drags never move egui's pointer, so ask the server where it is
        let pos = latest.or_else(|| server_pointer_position(ctx));
        match pos.and_then(|p| grid::drop_target(&self.button_rects, p)) {
            Some(index) => actions.push(Action::AssignDropped { index, path: file.path }),
            None => {
                info!(name = %file.name, ?pos, "Drop outside launch buttons ignored");
                self.notice = Some(Notice::warning(
                    "Drop Ignored",
                    "Drop the video onto one of the buttons 1 to 8.",
                ));
            }
        }
    }

    fn toggle_fullscreen(&mut self, ctx: &egui::Context) {
        let current = if self.placement.mode().records_geometry() {
            current_geometry(ctx)
        } else {
            None
        };
        // Monitors may have been plugged in or out since startup
        self.monitors = monitor::list_monitors();

        let placement = self.placement.toggle(current, &self.monitors, &mut self.settings);
        apply_placement(ctx, placement);
        if let Placement::Windowed(Some(restored)) = placement {
            self.geometry.reset(restored);
        }
        self.save();
    }

    fn play(&mut self, index: usize) {
        let video = self.settings.buttons[index].video.clone();
        match self.player.play(&self.settings.mpv_path, &video) {
            Ok(Launch::Started { pid }) => info!(button = index + 1, pid, "Playback started"),
            Ok(Launch::AlreadyPlaying) => debug!(button = index + 1, "Already playing"),
            Err(LaunchError::PlayerNotFound(path)) => {
                warn!(path = %path, "Player executable not found");
                self.notice = Some(Notice::error(
                    "mpv Not Found",
                    "mpv executable not found. Please set the mpv path in Settings.",
                ));
            }
            Err(LaunchError::VideoNotFound(video)) => {
                warn!(button = index + 1, video = %video, "Video not found");
                self.notice = Some(Notice::warning(
                    "Video Not Found",
                    "No video file assigned or file does not exist.",
                ));
            }
            Err(LaunchError::Spawn(e)) => {
                self.notice = Some(Notice::error("Error", format!("Failed to launch mpv: {e}")));
            }
        }
    }

    fn assign_dropped(&mut self, index: usize, path: Option<PathBuf>) {
        match path.filter(|p| p.is_file()) {
            Some(path) => {
                self.settings.assign_video(index, &path);
                self.save();
                self.notice = Some(Notice::info("Success", format!("Video assigned to Button {}", index + 1)));
            }
            None => {
                warn!(index, "Dropped item is not a file");
                self.notice = Some(Notice::error(
                    "Error",
                    "Invalid file or path. Please drop a valid video file.",
                ));
            }
        }
    }

    fn pick_player_path(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .set_title("Select mpv Executable")
            .set_directory("/usr/bin")
            .pick_file()
        else {
            return;
        };
        if path.is_file() {
            self.settings.set_mpv_path(&path);
            self.save();
            info!(mpv_path = %self.settings.mpv_path, "Player path set");
            self.notice = Some(Notice::info(
                "mpv Path Set",
                format!("mpv path set to: {}", self.settings.mpv_path),
            ));
        } else {
            self.notice = Some(Notice::error("Error", "Invalid mpv path selected."));
        }
    }

    fn apply_button(&mut self, index: usize, title: &str, video: Option<&str>) {
        self.settings.set_title(index, title);
        if let Some(video) = video {
            if Path::new(video).is_file() {
                self.settings.assign_video(index, Path::new(video));
            } else {
                self.notice = Some(Notice::warning(
                    "Video Not Found",
                    format!("File does not exist: {video}"),
                ));
            }
        }
        self.save();
    }

    fn apply_font(&mut self, ctx: &egui::Context, family: Option<String>, size: u8) {
        let Some(family) = family else {
            self.notice = Some(Notice::warning("No Font Selected", "Please select a font family."));
            return;
        };
        self.button_font = fonts::install(ctx, &self.fonts, &family);
        self.settings.font_family = family;
        self.settings.font_size = size;
        self.settings.validate_and_clamp();
        self.save();
    }

    fn reset(&mut self, ctx: &egui::Context) {
        match Settings::reset(&self.settings_path) {
            Ok(defaults) => {
                self.settings = defaults;
                self.windows = OpenWindows::default();
                self.button_font = fonts::install(ctx, &self.fonts, &self.settings.font_family);
                let (placement, _) = PlacementState::startup(&self.settings, &self.monitors);
                self.placement = placement;
                apply_placement(ctx, Placement::Windowed(Some(self.settings.window_geometry)));
                self.geometry.reset(self.settings.window_geometry);
                self.style_save.cancel();
                info!("Settings reset to defaults");
            }
            Err(e) => {
                error!(error = %e, "Failed to reset settings");
                self.notice = Some(Notice::error("Error", format!("Failed to reset settings: {e:#}")));
            }
        }
    }

    fn handle(&mut self, ctx: &egui::Context, action: Action) {
        debug!(?action, "Handling action");
        match action {
            Action::Play(index) => self.play(index),
            Action::StopPlayback => {
                if !self.player.stop() {
                    debug!("No player to stop");
                }
            }
            Action::AssignDropped { index, path } => self.assign_dropped(index, path),
            Action::OpenSettings => self.windows.settings = true,
            Action::OpenFontPicker => {
                self.windows.font_picker = Some(FontPickerState::new(
                    &self.fonts,
                    &self.settings.font_family,
                    self.settings.font_size,
                ));
            }
            Action::ToggleFullscreen => self.toggle_fullscreen(ctx),
            Action::OpenHelp => self.windows.help = true,
            Action::Quit => {
                info!("Quit requested");
                ctx.send_viewport_cmd(ViewportCommand::Close);
            }
            Action::PickPlayerPath => self.pick_player_path(),
            Action::StyleChanged => self.style_save.touch(Instant::now()),
            Action::RequestReset => self.windows.confirm_reset = true,
            Action::ConfirmReset => self.reset(ctx),
            Action::ConfigureButton(index) => {
                self.windows.button_editor = Some(ButtonEditorState::new(index, &self.settings.buttons[index]));
            }
            Action::ApplyButton { index, title, video } => self.apply_button(index, &title, video.as_deref()),
            Action::ApplyFont { family, size } => self.apply_font(ctx, family, size),
        }
    }
}

impl eframe::App for LauncherApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.shutdown.load(Ordering::Relaxed) {
            info!("Shutdown signal received, closing");
            ctx.send_viewport_cmd(ViewportCommand::Close);
        }
        if !self.started {
            self.apply_startup(ctx);
        }

        // Reap a player that exited on its own
        self.player.poll();
        self.track_geometry(ctx);

        let mut actions = Vec::new();
        let style = self.grid_style();
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(style.background))
            .show(ctx, |ui| {
                self.button_rects = grid::ui(ui, &self.settings.buttons, &style, &mut actions);
            });
        self.collect_drops(ctx, &mut actions);

        settings_window::show(ctx, &mut self.windows.settings, &mut self.settings, &mut actions);
        font_picker::show(ctx, &mut self.windows.font_picker, &self.fonts, &mut actions);
        button_editor::show(ctx, &mut self.windows.button_editor, &mut actions);
        help::show(ctx, &mut self.windows.help);
        notice::confirm_reset(ctx, &mut self.windows.confirm_reset, &mut actions);
        notice::show(ctx, &mut self.notice);

        for action in actions {
            self.handle(ctx, action);
        }
        if self.style_save.due(Instant::now()) {
            debug!("Saving style changes");
            self.save();
        }

        // Keep polling the player and the signal flag while idle
        if self.player.is_stopping() {
            ctx.request_repaint_after(TERMINATE_POLL);
        } else {
            ctx.request_repaint_after(POLL_INTERVAL);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if self.style_save.is_pending() {
            self.save();
        }
        if let Some(pid) = self.player.pid() {
            info!(pid, "Stopping player on exit");
        }
        self.player.shutdown();
    }
}

fn pixels_per_point(ctx: &egui::Context) -> f32 {
    ctx.input(|i| i.viewport().native_pixels_per_point)
        .unwrap_or(1.0)
}

/// Window geometry in physical pixels: inner size, outer position
fn current_geometry(ctx: &egui::Context) -> Option<WindowGeometry> {
    ctx.input(|i| {
        let viewport = i.viewport();
        let outer = viewport.outer_rect?;
        let inner = viewport.inner_rect?;
        let scale = viewport.native_pixels_per_point.unwrap_or(1.0);
        Some(WindowGeometry::new(
            (inner.width() * scale).round() as u32,
            (inner.height() * scale).round() as u32,
            (outer.min.x * scale).round() as i32,
            (outer.min.y * scale).round() as i32,
        ))
    })
}

/// Pointer position over the window content, in egui points
fn server_pointer_position(ctx: &egui::Context) -> Option<Pos2> {
    let origin = ctx.input(|i| i.viewport().inner_rect)?.min;
    let pointer = monitor::pointer_position()?;
    Some(screen_to_window(pointer, origin, ctx.pixels_per_point()))
}

fn apply_placement(ctx: &egui::Context, placement: Placement) {
    let scale = pixels_per_point(ctx);
    let to_points = |v: f32| v / scale;
    match placement {
        Placement::Borderless(monitor) => {
            ctx.send_viewport_cmd(ViewportCommand::Fullscreen(false));
            ctx.send_viewport_cmd(ViewportCommand::Decorations(false));
            ctx.send_viewport_cmd(ViewportCommand::OuterPosition(egui::pos2(
                to_points(monitor.x as f32),
                to_points(monitor.y as f32),
            )));
            ctx.send_viewport_cmd(ViewportCommand::InnerSize(egui::vec2(
                to_points(monitor.width as f32),
                to_points(monitor.height as f32),
            )));
        }
        Placement::Native => ctx.send_viewport_cmd(ViewportCommand::Fullscreen(true)),
        Placement::Windowed(geometry) => {
            ctx.send_viewport_cmd(ViewportCommand::Fullscreen(false));
            ctx.send_viewport_cmd(ViewportCommand::Decorations(true));
            if let Some(g) = geometry {
                ctx.send_viewport_cmd(ViewportCommand::OuterPosition(egui::pos2(
                    to_points(g.x as f32),
                    to_points(g.y as f32),
                )));
                ctx.send_viewport_cmd(ViewportCommand::InnerSize(egui::vec2(
                    to_points(g.width as f32),
                    to_points(g.height as f32),
                )));
            }
        }
    }
}

pub fn run_gui(settings: Settings, settings_path: PathBuf, options: LaunchOptions) -> Result<()> {
    let geometry = settings.window_geometry;
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([geometry.width as f32, geometry.height as f32])
            .with_position([geometry.x as f32, geometry.y as f32])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        native_options,
        Box::new(move |cc| Ok(Box::new(LauncherApp::new(cc, settings, settings_path, options)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run egui application: {}", e))?;

    Ok(())
}
