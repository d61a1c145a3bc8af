//! Native subsystem collaborators and the canonical desktop wiring.
//!
//! The traits here are the seams between the orchestrator and the native
//! libraries it brings up. Real bindings live outside this crate; the
//! headless implementations are in-memory stand-ins that record every call.

mod desktop;
mod headless;

pub use desktop::{desktop_stages, run_frames, DesktopSession};
pub use headless::{CallLog, HeadlessFault, HeadlessGraphics, HeadlessPlatform, HeadlessTransport, HeadlessWindowSystem};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to a native window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowHandle(pub u64);

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// Network transport library.
pub trait Transport {
    /// Initializes the library. Returns false on failure.
    fn init(&self) -> bool;

    /// Releases the library.
    fn shutdown(&self);
}

/// Windowing and input library.
pub trait WindowSystem {
    /// Initializes the library. Returns false on failure.
    fn init(&self) -> bool;

    /// Releases the library and every window it still owns.
    fn shutdown(&self);

    /// Creates a window.
    fn create_window(&self, width: u32, height: u32, title: &str, visible: bool) -> Option<WindowHandle>;

    /// Destroys a window before shutdown.
    ///
    /// Shutting the library down destroys remaining windows, so the default
    /// does nothing.
    fn destroy_window(&self, _handle: WindowHandle) {}

    /// Makes the window visible.
    fn show(&self, handle: WindowHandle);

    /// Hides the window.
    fn hide(&self, handle: WindowHandle);

    /// Processes pending input and window events.
    fn poll_events(&self);

    /// Returns true once the user asked to close the window.
    fn should_close(&self, handle: WindowHandle) -> bool;

    /// Presents the back buffer.
    fn swap_buffers(&self, handle: WindowHandle);

    /// Binds the window's rendering context to the calling thread.
    fn make_current(&self, handle: WindowHandle);
}

/// GPU function loader, initialized after a context is current.
pub trait GraphicsBinding {
    /// Loads the graphics entry points. Returns false on failure.
    fn init(&self) -> bool;
}
