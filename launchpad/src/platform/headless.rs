//! In-memory subsystems that record calls and fail on request.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::{GraphicsBinding, Transport, WindowHandle, WindowSystem};

/// Shared, ordered record of subsystem calls.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls in order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Returns true if `call` was recorded.
    #[must_use]
    pub fn contains(&self, call: &str) -> bool {
        self.calls.lock().iter().any(|c| c == call)
    }

    /// Number of times `call` was recorded.
    #[must_use]
    pub fn count(&self, call: &str) -> usize {
        self.calls.lock().iter().filter(|c| *c == call).count()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().push(call.into());
    }
}

/// Which headless step should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeadlessFault {
    /// `Transport::init` returns false.
    Transport,
    /// `WindowSystem::init` returns false.
    WindowSystem,
    /// `WindowSystem::create_window` returns `None`.
    Window,
    /// `GraphicsBinding::init` returns false.
    Graphics,
}

impl FromStr for HeadlessFault {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "transport" => Ok(Self::Transport),
            "window-system" => Ok(Self::WindowSystem),
            "window" => Ok(Self::Window),
            "graphics" => Ok(Self::Graphics),
            other => Err(format!(
                "unknown stage '{other}' (expected transport, window-system, window or graphics)"
            )),
        }
    }
}

impl fmt::Display for HeadlessFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport => write!(f, "transport"),
            Self::WindowSystem => write!(f, "window-system"),
            Self::Window => write!(f, "window"),
            Self::Graphics => write!(f, "graphics"),
        }
    }
}

/// Headless network transport.
#[derive(Debug)]
pub struct HeadlessTransport {
    log: CallLog,
    fail_init: bool,
}

impl HeadlessTransport {
    /// Creates a transport recording into `log`.
    #[must_use]
    pub fn new(log: CallLog, fail_init: bool) -> Self {
        Self { log, fail_init }
    }
}

impl Transport for HeadlessTransport {
    fn init(&self) -> bool {
        self.log.record("transport.init");
        !self.fail_init
    }

    fn shutdown(&self) {
        self.log.record("transport.shutdown");
    }
}

#[derive(Debug, Default)]
struct WindowState {
    visible: bool,
    frames: u64,
}

#[derive(Debug, Default)]
struct WindowSystemState {
    initialized: bool,
    next_id: u64,
    windows: HashMap<WindowHandle, WindowState>,
    current: Option<WindowHandle>,
}

/// Headless windowing library.
///
/// A window asks to close once it has presented `close_after` frames;
/// without a limit it never does.
#[derive(Debug)]
pub struct HeadlessWindowSystem {
    log: CallLog,
    fail_init: bool,
    fail_create: bool,
    close_after: Option<u64>,
    state: Mutex<WindowSystemState>,
}

impl HeadlessWindowSystem {
    /// Creates a window system recording into `log`.
    #[must_use]
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            fail_init: false,
            fail_create: false,
            close_after: None,
            state: Mutex::new(WindowSystemState::default()),
        }
    }

    /// Makes `init` fail.
    #[must_use]
    pub fn failing_init(mut self) -> Self {
        self.fail_init = true;
        self
    }

    /// Makes `create_window` fail.
    #[must_use]
    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    /// Requests close after `frames` presented frames.
    #[must_use]
    pub fn close_after(mut self, frames: u64) -> Self {
        self.close_after = Some(frames);
        self
    }

    /// Returns true while the library is initialized.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.state.lock().initialized
    }

    /// Number of live windows.
    #[must_use]
    pub fn window_count(&self) -> usize {
        self.state.lock().windows.len()
    }

    /// Returns true if the window exists and is visible.
    #[must_use]
    pub fn is_visible(&self, handle: WindowHandle) -> bool {
        self.state
            .lock()
            .windows
            .get(&handle)
            .is_some_and(|w| w.visible)
    }

    /// Frames presented by the window so far.
    #[must_use]
    pub fn frames(&self, handle: WindowHandle) -> u64 {
        self.state.lock().windows.get(&handle).map_or(0, |w| w.frames)
    }

    /// The window whose context is current.
    #[must_use]
    pub fn current(&self) -> Option<WindowHandle> {
        self.state.lock().current
    }
}

impl WindowSystem for HeadlessWindowSystem {
    fn init(&self) -> bool {
        self.log.record("windows.init");
        if self.fail_init {
            return false;
        }
        self.state.lock().initialized = true;
        true
    }

    fn shutdown(&self) {
        self.log.record("windows.shutdown");
        let mut state = self.state.lock();
        state.windows.clear();
        state.current = None;
        state.initialized = false;
    }

    fn create_window(&self, width: u32, height: u32, title: &str, visible: bool) -> Option<WindowHandle> {
        self.log
            .record(format!("windows.create {width}x{height} '{title}' visible={visible}"));
        let mut state = self.state.lock();
        if self.fail_create || !state.initialized {
            return None;
        }
        state.next_id += 1;
        let handle = WindowHandle(state.next_id);
        state.windows.insert(
            handle,
            WindowState {
                visible,
                frames: 0,
            },
        );
        Some(handle)
    }

    fn destroy_window(&self, handle: WindowHandle) {
        self.log.record("windows.destroy");
        let mut state = self.state.lock();
        state.windows.remove(&handle);
        if state.current == Some(handle) {
            state.current = None;
        }
    }

    fn show(&self, handle: WindowHandle) {
        self.log.record("windows.show");
        if let Some(window) = self.state.lock().windows.get_mut(&handle) {
            window.visible = true;
        }
    }

    fn hide(&self, handle: WindowHandle) {
        self.log.record("windows.hide");
        if let Some(window) = self.state.lock().windows.get_mut(&handle) {
            window.visible = false;
        }
    }

    fn poll_events(&self) {}

    fn should_close(&self, handle: WindowHandle) -> bool {
        let state = self.state.lock();
        match (state.windows.get(&handle), self.close_after) {
            (None, _) => true,
            (Some(window), Some(limit)) => window.frames >= limit,
            (Some(_), None) => false,
        }
    }

    fn swap_buffers(&self, handle: WindowHandle) {
        if let Some(window) = self.state.lock().windows.get_mut(&handle) {
            window.frames += 1;
        }
    }

    fn make_current(&self, handle: WindowHandle) {
        self.log.record("windows.make_current");
        self.state.lock().current = Some(handle);
    }
}

/// Headless graphics loader.
#[derive(Debug)]
pub struct HeadlessGraphics {
    log: CallLog,
    fail_init: bool,
}

impl HeadlessGraphics {
    /// Creates a loader recording into `log`.
    #[must_use]
    pub fn new(log: CallLog, fail_init: bool) -> Self {
        Self { log, fail_init }
    }
}

impl GraphicsBinding for HeadlessGraphics {
    fn init(&self) -> bool {
        self.log.record("graphics.init");
        !self.fail_init
    }
}

/// The three headless subsystems sharing one call log.
#[derive(Debug, Clone)]
pub struct HeadlessPlatform {
    /// Shared call log.
    pub log: CallLog,
    /// Transport subsystem.
    pub transport: Arc<HeadlessTransport>,
    /// Window subsystem.
    pub windows: Arc<HeadlessWindowSystem>,
    /// Graphics loader.
    pub graphics: Arc<HeadlessGraphics>,
}

impl HeadlessPlatform {
    /// Builds a platform with an optional injected fault and frame limit.
    #[must_use]
    pub fn new(fault: Option<HeadlessFault>, close_after: Option<u64>) -> Self {
        let log = CallLog::new();

        let mut windows = HeadlessWindowSystem::new(log.clone());
        if fault == Some(HeadlessFault::WindowSystem) {
            windows = windows.failing_init();
        }
        if fault == Some(HeadlessFault::Window) {
            windows = windows.failing_create();
        }
        if let Some(frames) = close_after {
            windows = windows.close_after(frames);
        }

        Self {
            transport: Arc::new(HeadlessTransport::new(
                log.clone(),
                fault == Some(HeadlessFault::Transport),
            )),
            windows: Arc::new(windows),
            graphics: Arc::new(HeadlessGraphics::new(
                log.clone(),
                fault == Some(HeadlessFault::Graphics),
            )),
            log,
        }
    }
}
