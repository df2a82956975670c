//! Execute decoded extension calls against the window.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::filters::make_filters;
use crate::protocol::{Call, FileDialogParams, ResponseValue};
use crate::window::{DialogKind, DialogRequest, NativeWindow, WindowHandle, WindowSize};

/// Run `call` and return the result to report, if the call has one.
///
/// Calls arriving after the window was destroyed are dropped. Native
/// failures are logged; dialog calls still answer (with an empty result)
/// so the page is not left waiting.
pub async fn dispatch<W: NativeWindow>(handle: &mut WindowHandle<W>, call: Call) -> Option<ResponseValue> {
    let Some(window) = handle.get_mut() else {
        debug!(?call, "Window already destroyed, dropping call");
        return None;
    };

    match call {
        Call::OpenFile(params) => {
            let paths = pick(window, DialogKind::OpenFile, params).await;
            Some(first_path(paths))
        }
        Call::OpenFiles(params) => {
            let paths = pick(window, DialogKind::OpenFiles, params).await;
            Some(ResponseValue::Paths(paths.iter().map(|p| path_string(p)).collect()))
        }
        Call::OpenDir(params) => {
            let params = FileDialogParams {
                filter: None,
                ..params
            };
            let paths = pick(window, DialogKind::OpenDir, params).await;
            Some(first_path(paths))
        }
        Call::SaveFile(params) => {
            let paths = pick(window, DialogKind::SaveFile, params).await;
            Some(first_path(paths))
        }
        Call::Resize(params) => {
            let content = WindowSize::new(params.width, params.height);
            if let Err(e) = resize_content(window, content).await {
                warn!(error = %e, "resize failed");
            }
            None
        }
        Call::SetTitle(params) => {
            if let Err(e) = window.set_title(&params.title).await {
                warn!(error = %e, "setTitle failed");
            }
            None
        }
        Call::SetAppIcon | Call::UiInfo => {
            debug!(?call, "Accepted call with no native behavior");
            None
        }
        Call::Unknown(name) => {
            debug!(call = %name, "Ignoring unknown extension call");
            None
        }
    }
}

async fn pick<W: NativeWindow>(window: &mut W, kind: DialogKind, params: FileDialogParams) -> Vec<PathBuf> {
    let request = DialogRequest {
        kind,
        directory: params.dir.filter(|d| !d.is_empty()).map(PathBuf::from),
        filters: params.filter.as_ref().map(make_filters).unwrap_or_default(),
    };
    match window.show_dialog(request).await {
        Ok(paths) => paths,
        Err(e) => {
            warn!(?kind, error = %e, "File dialog failed");
            Vec::new()
        }
    }
}

fn first_path(paths: Vec<PathBuf>) -> ResponseValue {
    ResponseValue::Path(paths.first().map(|p| path_string(p)).unwrap_or_default())
}

fn path_string(path: &std::path::Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Resize so the page viewport becomes `content`.
///
/// The toolkit resizes the outer window, so the decoration size is measured
/// as outer size minus the viewport the page reports, then added back.
/// Known issue: frameless windows report a viewport that does not line up
/// with the outer size, so the result is off for them.
async fn resize_content<W: NativeWindow>(
    window: &mut W,
    content: WindowSize,
) -> Result<(), winrelay_common::BridgeError> {
    let outer = window.outer_size().await?;
    let viewport = window.viewport_size().await?;
    let border = WindowSize::new(
        outer.width.saturating_sub(viewport.width),
        outer.height.saturating_sub(viewport.height),
    );
    let target = WindowSize::new(
        content.width.saturating_add(border.width),
        content.height.saturating_add(border.height),
    );
    debug!(?outer, ?viewport, ?target, "Resizing window");
    window.set_outer_size(target).await
}
