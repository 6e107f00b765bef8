//! Fullscreen placement state machine
//!
//! Pure decisions only: which mode the launcher window is in and which
//! window operations the GUI has to perform to get there. The GUI owns the
//! viewport and translates a [`Placement`] into toolkit commands.

use tracing::info;

use crate::monitor::{find_containing, find_exact};
use crate::settings::Settings;
use crate::types::{MonitorRect, WindowGeometry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Windowed,
    /// Undecorated window stretched over one monitor
    Borderless { monitor: MonitorRect },
    /// Toolkit-managed fullscreen on whatever monitor the window is on
    Native,
}

/// Window operations needed to reach a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Borderless(MonitorRect),
    Native,
    /// Back to a decorated window, optionally at a remembered geometry
    Windowed(Option<WindowGeometry>),
}

impl DisplayMode {
    pub fn is_fullscreen(&self) -> bool {
        !matches!(self, DisplayMode::Windowed)
    }

    /// Only a decorated window reports geometry worth persisting
    pub fn records_geometry(&self) -> bool {
        matches!(self, DisplayMode::Windowed)
    }
}

/// Tracks the current mode and the geometry to return to
#[derive(Debug, Clone)]
pub struct PlacementState {
    mode: DisplayMode,
    windowed_geometry: Option<WindowGeometry>,
}

impl PlacementState {
    /// Mode at launch. The returned placement must be applied once the
    /// window exists; `None` means the initial windowed geometry is enough.
    pub fn startup(settings: &Settings, monitors: &[MonitorRect]) -> (Self, Option<Placement>) {
        let (mode, placement) = if !settings.fullscreen {
            (DisplayMode::Windowed, None)
        } else if let Some(monitor) = settings
            .fullscreen_monitor
            .as_ref()
            .and_then(|saved| find_exact(monitors, saved))
        {
            info!(?monitor, "Restoring borderless fullscreen on saved monitor");
            (DisplayMode::Borderless { monitor }, Some(Placement::Borderless(monitor)))
        } else {
            info!(saved = ?settings.fullscreen_monitor, "Saved monitor unavailable, using native fullscreen");
            (DisplayMode::Native, Some(Placement::Native))
        };

        let state = Self {
            mode,
            // Startup in fullscreen has no session geometry; fall back to the saved one
            windowed_geometry: Some(settings.window_geometry),
        };
        (state, placement)
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Flip between windowed and fullscreen, updating the persisted
    /// `fullscreen`/`fullscreen_monitor` fields. `current` is the window's
    /// geometry in physical pixels when the toggle was requested.
    pub fn toggle(
        &mut self,
        current: Option<WindowGeometry>,
        monitors: &[MonitorRect],
        settings: &mut Settings,
    ) -> Placement {
        let placement = match self.mode {
            DisplayMode::Windowed => {
                if current.is_some() {
                    self.windowed_geometry = current;
                }
                let origin = current.unwrap_or(settings.window_geometry);
                match find_containing(monitors, origin.x, origin.y) {
                    Some(monitor) => {
                        self.mode = DisplayMode::Borderless { monitor };
                        settings.fullscreen_monitor = Some(monitor);
                        Placement::Borderless(monitor)
                    }
                    None => {
                        self.mode = DisplayMode::Native;
                        settings.fullscreen_monitor = None;
                        Placement::Native
                    }
                }
            }
            DisplayMode::Borderless { .. } => {
                self.mode = DisplayMode::Windowed;
                settings.fullscreen_monitor = None;
                Placement::Windowed(self.windowed_geometry.or(Some(settings.window_geometry)))
            }
            DisplayMode::Native => {
                self.mode = DisplayMode::Windowed;
                settings.fullscreen_monitor = None;
                Placement::Windowed(None)
            }
        };

        settings.fullscreen = self.mode.is_fullscreen();
        info!(mode = ?self.mode, ?placement, "Toggled fullscreen");
        placement
    }

    /// Remember geometry reported by the window while it is decorated
    pub fn record_windowed(&mut self, geometry: WindowGeometry) {
        if self.mode.records_geometry() {
            self.windowed_geometry = Some(geometry);
        }
    }
}
