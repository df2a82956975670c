//! Native window seam.
//!
//! The bridge never touches a toolkit directly. The window host implements
//! [`NativeWindow`] (marshalling onto its UI thread as needed) and hands it
//! to the bridge, which becomes the only writer.

use std::path::PathBuf;

use async_trait::async_trait;
use winrelay_common::BridgeError;

use crate::filters::FileFilter;

/// Window dimensions in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl WindowSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    OpenFile,
    OpenFiles,
    OpenDir,
    SaveFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogRequest {
    pub kind: DialogKind,
    pub directory: Option<PathBuf>,
    pub filters: Vec<FileFilter>,
}

#[async_trait]
pub trait NativeWindow: Send {
    /// Show a native file or folder picker. An empty result means the user
    /// cancelled.
    async fn show_dialog(&mut self, request: DialogRequest) -> Result<Vec<PathBuf>, BridgeError>;

    /// Size of the window including decorations.
    async fn outer_size(&mut self) -> Result<WindowSize, BridgeError>;

    /// Size of the page viewport as reported by the embedded page.
    async fn viewport_size(&mut self) -> Result<WindowSize, BridgeError>;

    /// Resize the window so its outer size becomes `size`.
    async fn set_outer_size(&mut self, size: WindowSize) -> Result<(), BridgeError>;

    async fn set_title(&mut self, title: &str) -> Result<(), BridgeError>;

    /// Tear down the native window.
    async fn destroy(&mut self);
}

/// The single window owned by the bridge. Destruction happens at most once.
pub struct WindowHandle<W> {
    window: W,
    destroyed: bool,
}

impl<W: NativeWindow> WindowHandle<W> {
    pub fn new(window: W) -> Self {
        Self {
            window,
            destroyed: false,
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// The live window, or `None` once it has been destroyed.
    pub fn get_mut(&mut self) -> Option<&mut W> {
        if self.destroyed {
            None
        } else {
            Some(&mut self.window)
        }
    }

    /// Destroy the window unless that already happened. Returns whether
    /// this call performed the destruction.
    pub async fn destroy(&mut self) -> bool {
        if self.destroyed {
            return false;
        }
        self.destroyed = true;
        self.window.destroy().await;
        true
    }
}

#[cfg(test)]
pub(crate) mod mock {
    //! Recording window used by the dispatch and bridge tests.

    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Debug, Default)]
    pub(crate) struct Recorded {
        pub title: Option<String>,
        pub destroyed: u32,
        pub dialogs: Vec<DialogRequest>,
        pub resized: Vec<WindowSize>,
    }

    pub(crate) struct MockWindow {
        pub recorded: Arc<Mutex<Recorded>>,
        pub picks: Vec<PathBuf>,
        pub outer: WindowSize,
        pub viewport: WindowSize,
        pub stall_dialogs: bool,
    }

    impl MockWindow {
        pub(crate) fn new() -> (Self, Arc<Mutex<Recorded>>) {
            let recorded = Arc::new(Mutex::new(Recorded::default()));
            let window = Self {
                recorded: Arc::clone(&recorded),
                picks: Vec::new(),
                outer: WindowSize::new(1040, 800),
                viewport: WindowSize::new(1024, 768),
                stall_dialogs: false,
            };
            (window, recorded)
        }

        pub(crate) fn with_picks(mut self, picks: &[&str]) -> Self {
            self.picks = picks.iter().map(PathBuf::from).collect();
            self
        }

        /// Dialogs are recorded but never answered.
        pub(crate) fn stalled(mut self) -> Self {
            self.stall_dialogs = true;
            self
        }
    }

    #[async_trait]
    impl NativeWindow for MockWindow {
        async fn show_dialog(&mut self, request: DialogRequest) -> Result<Vec<PathBuf>, BridgeError> {
            self.recorded.lock().unwrap().dialogs.push(request);
            if self.stall_dialogs {
                std::future::pending::<()>().await;
            }
            Ok(self.picks.clone())
        }

        async fn outer_size(&mut self) -> Result<WindowSize, BridgeError> {
            Ok(self.outer)
        }

        async fn viewport_size(&mut self) -> Result<WindowSize, BridgeError> {
            Ok(self.viewport)
        }

        async fn set_outer_size(&mut self, size: WindowSize) -> Result<(), BridgeError> {
            self.recorded.lock().unwrap().resized.push(size);
            Ok(())
        }

        async fn set_title(&mut self, title: &str) -> Result<(), BridgeError> {
            self.recorded.lock().unwrap().title = Some(title.to_string());
            Ok(())
        }

        async fn destroy(&mut self) {
            self.recorded.lock().unwrap().destroyed += 1;
        }
    }
}
