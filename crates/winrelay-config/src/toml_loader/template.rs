//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# winrelay configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[relay]
# Daemon side: where to listen and what to run for each launch request.
# bind_address = "0.0.0.0"
# port = 43101
# spawn_prefix = ["winrelay-window"]

[launch]
# Client side: which relay daemon to ask for a window.
# host = "127.0.0.1"
# port = 43101
# display_address = ""        # replaces "localhost" in the window URL
# connect_timeout_secs = 5    # 1-120

[window]
# width = 1024                # 100-16384
# height = 768                # 100-16384
# title = ""
# flags = 0                   # no_resize=1 fullscreen=2 hidden=4 frameless=8
#                             # minimized=16 on_top=32 confirm_close=64
#                             # text_select=128 easy_drag=256 transparent=512

[bridge]
# path = "bridge"
# close_timeout_secs = 2      # 0-30

[logging]
# level = "info"              # trace, debug, info, warn, error
"##
    .to_string()
}
