//! JavaScript injected into the page.

use winrelay_bridge::WindowSize;
use winrelay_common::LaunchFlags;

/// IPC body posted by the page to start a native window drag.
pub const DRAG_MESSAGE: &str = "drag";

/// Turns off text selection outside editable fields.
pub const NO_SELECT_SCRIPT: &str = r#"
(function () {
    var css = '* { -webkit-user-select: none; user-select: none; }'
        + ' input, textarea, [contenteditable] { -webkit-user-select: text; user-select: text; }';
    function install() {
        var style = document.createElement('style');
        style.textContent = css;
        document.head.appendChild(style);
    }
    if (document.head) {
        install();
    } else {
        document.addEventListener('DOMContentLoaded', install);
    }
})();
"#;

/// Left-button presses on non-interactive elements ask the host to drag the
/// window.
pub const EASY_DRAG_SCRIPT: &str = r#"
(function () {
    var interactive = 'a, button, input, select, textarea, label, option, [contenteditable], [data-no-drag]';
    document.addEventListener('mousedown', function (event) {
        if (event.button !== 0) return;
        if (event.target.closest && event.target.closest(interactive)) return;
        window.ipc.postMessage('drag');
    });
})();
"#;

/// Page viewport in CSS pixels, as a `[width, height]` array.
pub const VIEWPORT_SCRIPT: &str = "[Math.min(window.innerWidth, document.documentElement.clientWidth), \
     Math.min(window.innerHeight, document.documentElement.clientHeight)]";

/// Initialization scripts for the given flags.
pub fn init_scripts(flags: LaunchFlags) -> Vec<&'static str> {
    let mut scripts = Vec::new();
    if !flags.contains(LaunchFlags::TEXT_SELECT) {
        scripts.push(NO_SELECT_SCRIPT);
    }
    if flags.contains(LaunchFlags::EASY_DRAG) {
        scripts.push(EASY_DRAG_SCRIPT);
    }
    scripts
}

/// Parse the result of [`VIEWPORT_SCRIPT`]. Some engines hand the JSON back
/// wrapped in a string, so one level of string encoding is unwrapped.
pub fn parse_viewport(result: &str) -> Option<WindowSize> {
    let value: serde_json::Value = serde_json::from_str(result).ok()?;
    let value = match value {
        serde_json::Value::String(inner) => serde_json::from_str(&inner).ok()?,
        other => other,
    };
    let pair = value.as_array()?;
    if pair.len() != 2 {
        return None;
    }
    let width = pair[0].as_f64()?;
    let height = pair[1].as_f64()?;
    if width < 0.0 || height < 0.0 {
        return None;
    }
    Some(WindowSize::new(width.round() as u32, height.round() as u32))
}
