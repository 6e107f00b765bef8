//! Monitor geometry and pointer lookups via X11

use anyhow::{Context, Result};
use tracing::{debug, warn};
use x11rb::connection::Connection;
use x11rb::protocol::randr::ConnectionExt as RandrExt;
use x11rb::protocol::xproto::ConnectionExt as XprotoExt;

use crate::types::MonitorRect;

/// Active monitors in the X11 root coordinate space
/// Returns an empty list when the display cannot be queried
pub fn list_monitors() -> Vec<MonitorRect> {
    query_monitors()
        .inspect_err(|e| warn!(error = %e, "Failed to query monitors, fullscreen falls back to native mode"))
        .unwrap_or_default()
}

fn query_monitors() -> Result<Vec<MonitorRect>> {
    let (conn, screen_num) = x11rb::connect(None).context("Failed to connect to X11")?;
    let root = conn.setup().roots[screen_num].root;

    let reply = conn
        .randr_get_monitors(root, true)
        .context("RRGetMonitors request failed")?
        .reply()
        .context("RRGetMonitors reply failed")?;

    let monitors: Vec<MonitorRect> = reply
        .monitors
        .iter()
        .map(|m| MonitorRect::new(m.x as i32, m.y as i32, m.width as u32, m.height as u32))
        .collect();
    debug!(count = monitors.len(), ?monitors, "Queried monitors");
    Ok(monitors)
}

/// Pointer position in root coordinates, read from the server.
/// XDND drops carry no cursor position to the target window
pub fn pointer_position() -> Option<(i32, i32)> {
    query_pointer()
        .inspect_err(|e| warn!(error = %e, "Failed to query pointer position"))
        .ok()
}

fn query_pointer() -> Result<(i32, i32)> {
    let (conn, screen_num) = x11rb::connect(None).context("Failed to connect to X11")?;
    let root = conn.setup().roots[screen_num].root;

    let reply = conn
        .query_pointer(root)
        .context("QueryPointer request failed")?
        .reply()
        .context("QueryPointer reply failed")?;
    debug!(x = reply.root_x, y = reply.root_y, "Queried pointer");
    Ok((i32::from(reply.root_x), i32::from(reply.root_y)))
}

/// Monitor whose geometry is identical to a saved record
pub fn find_exact(monitors: &[MonitorRect], saved: &MonitorRect) -> Option<MonitorRect> {
    monitors.iter().copied().find(|m| m == saved)
}

/// First monitor containing the point
pub fn find_containing(monitors: &[MonitorRect], x: i32, y: i32) -> Option<MonitorRect> {
    monitors.iter().copied().find(|m| m.contains(x, y))
}
