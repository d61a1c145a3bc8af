//! The four canonical desktop stages and the session the loop drives.

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use super::{GraphicsBinding, Transport, WindowHandle, WindowSystem};
use crate::cleanup::ScopeGuard;
use crate::config::WindowConfig;
use crate::errors::{AcquireError, FailureKind};
use crate::stages::{Stage, StageSequence};

/// Handle the main loop uses to drive the window created during staging.
///
/// Empty until the window stage succeeds, and emptied again when that
/// stage's guard destroys the window.
#[derive(Clone)]
pub struct DesktopSession {
    windows: Arc<dyn WindowSystem>,
    window: Arc<Mutex<Option<WindowHandle>>>,
}

impl DesktopSession {
    /// The main window, if one is live.
    #[must_use]
    pub fn window(&self) -> Option<WindowHandle> {
        *self.window.lock()
    }

    /// Shows the main window.
    pub fn show(&self) {
        if let Some(handle) = self.window() {
            self.windows.show(handle);
        }
    }

    /// Hides the main window.
    pub fn hide(&self) {
        if let Some(handle) = self.window() {
            self.windows.hide(handle);
        }
    }

    /// Processes pending events.
    pub fn poll_events(&self) {
        self.windows.poll_events();
    }

    /// Returns true once the main window asked to close, or if there is none.
    #[must_use]
    pub fn should_close(&self) -> bool {
        self.window()
            .map_or(true, |handle| self.windows.should_close(handle))
    }

    /// Presents the main window's back buffer.
    pub fn swap_buffers(&self) {
        if let Some(handle) = self.window() {
            self.windows.swap_buffers(handle);
        }
    }
}

impl fmt::Debug for DesktopSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DesktopSession")
            .field("window", &self.window())
            .finish_non_exhaustive()
    }
}

/// Builds the canonical stages in dependency order.
///
/// 1. transport init, released by transport shutdown
/// 2. window system init, released by window system shutdown
/// 3. main window creation, released by destroying the window
/// 4. context binding and graphics init, nothing to release
pub fn desktop_stages(
    transport: Arc<dyn Transport>,
    windows: Arc<dyn WindowSystem>,
    graphics: Arc<dyn GraphicsBinding>,
    window: &WindowConfig,
) -> (StageSequence, DesktopSession) {
    let session = DesktopSession {
        windows: windows.clone(),
        window: Arc::new(Mutex::new(None)),
    };

    let transport_release = transport.clone();
    let transport_stage = Stage::new("transport", FailureKind::TransportInitFailed, move || {
        if transport.init() {
            Ok(())
        } else {
            Err(AcquireError::new("transport init returned failure"))
        }
    })
    .with_infallible_release(move || transport_release.shutdown());

    let init_windows = windows.clone();
    let shutdown_windows = windows.clone();
    let window_system_stage =
        Stage::new("window system", FailureKind::WindowSystemInitFailed, move || {
            if init_windows.init() {
                Ok(())
            } else {
                Err(AcquireError::new("window system init returned failure"))
            }
        })
        .with_infallible_release(move || shutdown_windows.shutdown());

    let create_windows = windows.clone();
    let destroy_windows = windows.clone();
    let create_slot = session.window.clone();
    let destroy_slot = session.window.clone();
    let config = window.clone();
    let window_stage = Stage::new("window", FailureKind::WindowCreateFailed, move || {
        let handle = create_windows
            .create_window(config.width, config.height, &config.title, config.visible)
            .ok_or_else(|| {
                AcquireError::new(format!(
                    "could not create {}x{} window '{}'",
                    config.width, config.height, config.title
                ))
            })?;
        debug!(window = %handle, "window created");
        *create_slot.lock() = Some(handle);
        Ok(())
    })
    .with_infallible_release(move || {
        if let Some(handle) = destroy_slot.lock().take() {
            destroy_windows.destroy_window(handle);
        }
    });

    let bind_windows = windows;
    let bind_slot = session.window.clone();
    let graphics_stage = Stage::new("graphics", FailureKind::GraphicsContextInitFailed, move || {
        let handle = (*bind_slot.lock())
            .ok_or_else(|| AcquireError::new("no window to bind a context to"))?;
        bind_windows.make_current(handle);
        if graphics.init() {
            Ok(())
        } else {
            Err(AcquireError::new("graphics loader init returned failure"))
        }
    });

    let stages = StageSequence::new()
        .stage(transport_stage)
        .stage(window_system_stage)
        .stage(window_stage)
        .stage(graphics_stage);

    (stages, session)
}

/// The canonical frame loop.
///
/// Shows the window (hiding it again on every exit path), then polls,
/// checks for close, runs `on_frame`, and presents, until the window asks to
/// close or `max_frames` frames were presented. A budget of `Some(0)`
/// presents nothing. An `on_frame` error ends the loop with that message as
/// the runtime failure.
pub fn run_frames<F>(session: &DesktopSession, max_frames: Option<u64>, mut on_frame: F) -> Option<String>
where
    F: FnMut(u64) -> Result<(), String>,
{
    if session.window().is_none() {
        return Some("no window is available to the main loop".to_string());
    }

    session.show();
    let hide_session = session.clone();
    let _hide = ScopeGuard::infallible("Hide window", move || hide_session.hide());

    let mut frames: u64 = 0;
    loop {
        if max_frames.is_some_and(|limit| frames >= limit) {
            break;
        }
        session.poll_events();
        if session.should_close() {
            break;
        }
        if let Err(message) = on_frame(frames) {
            info!(frames, "frame loop failed");
            return Some(message);
        }
        session.swap_buffers();
        frames += 1;
    }

    info!(frames, "frame loop finished");
    None
}
