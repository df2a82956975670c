//! Native dialogs. These block the calling (UI) thread until dismissed.

use std::path::PathBuf;

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use winit::window::Window;
use winrelay_bridge::{DialogKind, DialogRequest};

/// Show the picker described by `request`. An empty result means the user
/// cancelled.
pub fn run_file_dialog(parent: &Window, request: &DialogRequest) -> Vec<PathBuf> {
    let mut dialog = FileDialog::new().set_parent(parent);
    if let Some(dir) = &request.directory {
        dialog = dialog.set_directory(dir);
    }
    for filter in &request.filters {
        dialog = dialog.add_filter(filter.display(), filter.extensions().as_slice());
    }

    match request.kind {
        DialogKind::OpenFile => dialog.pick_file().into_iter().collect(),
        DialogKind::OpenFiles => dialog.pick_files().unwrap_or_default(),
        DialogKind::OpenDir => dialog.pick_folder().into_iter().collect(),
        DialogKind::SaveFile => dialog.save_file().into_iter().collect(),
    }
}

/// Yes/no prompt shown before the window closes.
pub fn confirm_close(parent: &Window, title: &str) -> bool {
    let answer = MessageDialog::new()
        .set_parent(parent)
        .set_level(MessageLevel::Warning)
        .set_title(title)
        .set_description("Close this window?")
        .set_buttons(MessageButtons::YesNo)
        .show();
    matches!(answer, MessageDialogResult::Yes)
}
