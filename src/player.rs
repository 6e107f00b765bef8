//! Media player process supervision
//!
//! At most one player is current. Switching videos signals the previous
//! player and parks it in a stopping list; `poll` escalates to SIGKILL once
//! its grace period runs out and reaps it, so callers never block on exit.

use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use crate::constants::player::{ARGS, PROGRAM_NAME, TERMINATE_GRACE, TERMINATE_POLL};

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("mpv executable not found: '{0}'")]
    PlayerNotFound(String),
    #[error("no video file assigned or file does not exist: '{0}'")]
    VideoNotFound(String),
    #[error("failed to launch mpv: {0}")]
    Spawn(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Launch {
    Started { pid: u32 },
    AlreadyPlaying,
}

struct Running {
    child: Child,
    video: PathBuf,
}

/// A signalled player waiting to be reaped
struct Stopping {
    child: Child,
    deadline: Instant,
    killed: bool,
}

impl Stopping {
    fn begin(child: Child, grace: Duration) -> Self {
        let mut stopping = Self {
            child,
            deadline: Instant::now() + grace,
            killed: false,
        };
        stopping.request_exit();
        stopping
    }

    /// SIGTERM where signals exist, otherwise straight to kill
    fn request_exit(&mut self) {
        #[cfg(unix)]
        send_sigterm(&self.child);
        #[cfg(not(unix))]
        self.force_kill();
    }

    fn force_kill(&mut self) {
        match self.child.kill() {
            Ok(()) => self.killed = true,
            Err(e) => warn!(pid = self.child.id(), error = %e, "Failed to kill player"),
        }
    }

    /// Reap the child if it exited, killing it once the deadline has passed
    fn advance(&mut self, now: Instant) -> Option<ExitStatus> {
        let pid = self.child.id();
        match self.child.try_wait() {
            Ok(Some(status)) => {
                info!(pid, %status, "Player stopped");
                return Some(status);
            }
            Ok(None) => {}
            Err(e) => warn!(pid, error = %e, "Error checking player status"),
        }
        if !self.killed && now >= self.deadline {
            warn!(pid, "Player ignored SIGTERM, killing");
            self.force_kill();
        }
        None
    }

    /// Blocking variant of `advance` for process exit
    fn wait(mut self) -> Option<ExitStatus> {
        loop {
            if let Some(status) = self.advance(Instant::now()) {
                return Some(status);
            }
            if self.killed || Instant::now() >= self.deadline {
                let pid = self.child.id();
                return self
                    .child
                    .wait()
                    .inspect(|status| info!(pid, %status, "Player reaped"))
                    .inspect_err(|e| error!(pid, error = %e, "Failed to reap player"))
                    .ok();
            }
            std::thread::sleep(TERMINATE_POLL);
        }
    }
}

#[cfg(unix)]
fn send_sigterm(child: &Child) {
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;

    match i32::try_from(child.id()) {
        Ok(raw) => {
            if let Err(e) = kill(Pid::from_raw(raw), Signal::SIGTERM) {
                warn!(pid = raw, error = %e, "SIGTERM failed");
            }
        }
        Err(e) => warn!(pid = child.id(), error = %e, "pid out of range for signal"),
    }
}

pub struct Player {
    args: Vec<String>,
    grace: Duration,
    running: Option<Running>,
    stopping: Vec<Stopping>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    /// Player invoking mpv fullscreen with an infinite file loop
    pub fn new() -> Self {
        Self::with_args(ARGS.iter().map(|s| s.to_string()).collect())
    }

    /// Player with custom arguments placed before the video path
    pub fn with_args(args: Vec<String>) -> Self {
        Self {
            args,
            grace: TERMINATE_GRACE,
            running: None,
            stopping: Vec::new(),
        }
    }

    /// Time a stopped player gets between SIGTERM and SIGKILL
    #[cfg(test)]
    pub fn with_grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// True while a stopped player has not been reaped yet
    pub fn is_stopping(&self) -> bool {
        !self.stopping.is_empty()
    }

    pub fn current_video(&self) -> Option<&Path> {
        self.running.as_ref().map(|r| r.video.as_path())
    }

    pub fn pid(&self) -> Option<u32> {
        self.running.as_ref().map(|r| r.child.id())
    }

    /// Play `video` looping in the configured player
    pub fn play(&mut self, player_path: &str, video: &str) -> Result<Launch, LaunchError> {
        let program = resolve_program(player_path)?;

        let video_path = Path::new(video.trim());
        if video.trim().is_empty() || !video_path.is_file() {
            return Err(LaunchError::VideoNotFound(video.to_string()));
        }

        // Reap first so a player that died on its own doesn't count as playing
        self.poll();
        if self.current_video() == Some(video_path) {
            debug!(video = %video_path.display(), "Video already playing");
            return Ok(Launch::AlreadyPlaying);
        }
        self.stop();

        info!(
            program = %program.display(),
            args = ?self.args,
            video = %video_path.display(),
            "Launching player"
        );
        let child = Command::new(&program)
            .args(&self.args)
            .arg(video_path)
            .stdin(Stdio::null())
            .spawn()
            .inspect_err(|e| error!(program = %program.display(), error = %e, "Failed to spawn player"))?;

        let pid = child.id();
        self.running = Some(Running {
            child,
            video: video_path.to_path_buf(),
        });
        Ok(Launch::Started { pid })
    }

    /// Signal the current player to exit without waiting for it.
    /// Returns false when nothing was playing
    pub fn stop(&mut self) -> bool {
        let Some(running) = self.running.take() else {
            return false;
        };
        info!(pid = running.child.id(), video = %running.video.display(), "Stopping player");
        self.stopping.push(Stopping::begin(running.child, self.grace));
        self.reap(Instant::now());
        true
    }

    /// Stop everything and wait until all players are reaped
    pub fn shutdown(&mut self) -> Vec<ExitStatus> {
        self.stop();
        self.stopping.drain(..).filter_map(Stopping::wait).collect()
    }

    /// Advance stopping players, then reap a current player that exited by
    /// itself. Returns the current player's status once
    pub fn poll(&mut self) -> Option<ExitStatus> {
        self.reap(Instant::now());

        let running = self.running.as_mut()?;
        match running.child.try_wait() {
            Ok(Some(status)) => {
                info!(pid = running.child.id(), %status, "Player exited");
                self.running = None;
                Some(status)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Error checking player status");
                None
            }
        }
    }

    fn reap(&mut self, now: Instant) {
        self.stopping.retain_mut(|stopping| stopping.advance(now).is_none());
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Configured player path, or `mpv` from `PATH` when none is configured
pub fn resolve_program(configured: &str) -> Result<PathBuf, LaunchError> {
    let configured = configured.trim();
    if !configured.is_empty() {
        let path = PathBuf::from(configured);
        return if path.is_file() {
            Ok(path)
        } else {
            Err(LaunchError::PlayerNotFound(configured.to_string()))
        };
    }
    find_in_path(PROGRAM_NAME).ok_or_else(|| LaunchError::PlayerNotFound(PROGRAM_NAME.to_string()))
}

pub(crate) fn find_in_path(program: &str) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use nix::errno::Errno;
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;
    use std::fs;
    use std::os::unix::process::ExitStatusExt;
    use tempfile::TempDir;

    fn video(dir: &TempDir, name: &str) -> String {
        let path = dir.path().join(name);
        fs::write(&path, b"not really a video").unwrap();
        path.to_string_lossy().into_owned()
    }

    fn program(name: &str) -> String {
        find_in_path(name)
            .unwrap_or_else(|| panic!("{name} not on PATH"))
            .to_string_lossy()
            .into_owned()
    }

    /// `tail -f <file>` stays alive until signalled, like a looping player
    fn blocking_player() -> (Player, String) {
        (Player::with_args(vec!["-f".to_string()]), program("tail"))
    }

    /// A shell that ignores SIGTERM; the video path lands in `$0`
    fn stubborn_player(grace: Duration) -> (Player, String) {
        let script = "trap '' TERM; while :; do sleep 0.05; done";
        let player = Player::with_args(vec!["-c".to_string(), script.to_string()]).with_grace(grace);
        (player, program("sh"))
    }

    fn wait_until_reaped(player: &mut Player) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while player.is_stopping() && Instant::now() < deadline {
            player.poll();
            std::thread::sleep(Duration::from_millis(20));
        }
        assert!(!player.is_stopping(), "stopped player was never reaped");
    }

    #[test]
    fn test_missing_player_is_reported() {
        let dir = TempDir::new().unwrap();
        let mut player = Player::new();
        let err = player.play("/nonexistent/mpv", &video(&dir, "a.mp4")).unwrap_err();
        assert!(matches!(err, LaunchError::PlayerNotFound(_)));
        assert!(!player.is_running());
    }

    #[test]
    fn test_missing_or_empty_video_is_reported() {
        let (mut player, tail) = blocking_player();
        assert!(matches!(player.play(&tail, ""), Err(LaunchError::VideoNotFound(_))));
        assert!(matches!(
            player.play(&tail, "/nonexistent/video.mp4"),
            Err(LaunchError::VideoNotFound(_))
        ));
        assert!(!player.is_running());
    }

    #[test]
    fn test_switching_video_replaces_player() {
        let dir = TempDir::new().unwrap();
        let (first, second) = (video(&dir, "first.mp4"), video(&dir, "second.mp4"));
        let (mut player, tail) = blocking_player();

        let Launch::Started { pid: first_pid } = player.play(&tail, &first).unwrap() else {
            panic!("expected a new player");
        };
        assert_eq!(player.play(&tail, &first).unwrap(), Launch::AlreadyPlaying);
        assert_eq!(player.pid(), Some(first_pid));

        let Launch::Started { pid: second_pid } = player.play(&tail, &second).unwrap() else {
            panic!("expected a new player");
        };
        assert_ne!(first_pid, second_pid);
        assert_eq!(player.current_video(), Some(Path::new(&second)));

        assert!(player.stop());
        assert!(!player.is_running());
        assert!(!player.stop());
        wait_until_reaped(&mut player);
    }

    #[test]
    fn test_poll_reaps_player_that_exits() {
        let dir = TempDir::new().unwrap();
        let mut player = Player::with_args(Vec::new());
        player.play(&program("true"), &video(&dir, "clip.mp4")).unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut status = None;
        while status.is_none() && Instant::now() < deadline {
            status = player.poll();
            std::thread::sleep(Duration::from_millis(20));
        }
        assert!(status.unwrap().success());
        assert!(!player.is_running());
    }

    #[test]
    fn test_stop_returns_before_stubborn_player_is_killed() {
        let dir = TempDir::new().unwrap();
        let grace = Duration::from_millis(400);
        let (mut player, sh) = stubborn_player(grace);
        player.play(&sh, &video(&dir, "clip.mp4")).unwrap();
        // Let the shell install its trap
        std::thread::sleep(Duration::from_millis(200));

        let started = Instant::now();
        assert!(player.stop());
        assert!(started.elapsed() < grace);
        assert!(player.is_stopping());

        wait_until_reaped(&mut player);
        assert!(started.elapsed() >= grace);
    }

    #[test]
    fn test_shutdown_escalates_to_sigkill() {
        let dir = TempDir::new().unwrap();
        let (mut player, sh) = stubborn_player(Duration::from_millis(200));
        player.play(&sh, &video(&dir, "clip.mp4")).unwrap();
        std::thread::sleep(Duration::from_millis(200));

        let statuses = player.shutdown();
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].signal(), Some(Signal::SIGKILL as i32));
        assert!(!player.is_running());
        assert!(!player.is_stopping());
    }

    #[test]
    fn test_drop_terminates_player() {
        let dir = TempDir::new().unwrap();
        let (mut player, tail) = blocking_player();
        let Launch::Started { pid } = player.play(&tail, &video(&dir, "clip.mp4")).unwrap() else {
            panic!("expected a new player");
        };

        drop(player);
        let pid = Pid::from_raw(i32::try_from(pid).unwrap());
        assert_eq!(kill(pid, None), Err(Errno::ESRCH));
    }
}
