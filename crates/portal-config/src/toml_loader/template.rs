/// Generate the default TOML config content with comments.
pub(super) fn default_config_toml() -> String {
    r##"# Portal Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[site]
url = "https://example.com"
# bundled = "site/index.html"   # serve a local document instead of `url`
# user_agent = "Portal/0.1"
# allowed_origins = []          # extra http(s) origins the page may navigate to
# probe = true                  # check reachability before loading
# probe_timeout_secs = 15       # 1-120

[capture]
# image_quality = 0.8           # 0.0-1.0

[notifications]
# show_banner = true
# play_sound = true
# set_badge = false

[permissions]
# ask, allow, deny
# notifications = "allow"
# camera = "allow"
# media_library = "allow"
# location = "ask"

# [location.fixed]              # position reported when no location service exists
# latitude = 52.52
# longitude = 13.405
# accuracy = 50.0

[window]
# title = "Portal"
# width = 1024                  # 200-7680
# height = 768                  # 200-4320

[dev]
# devtools = false
# forward_console = false

[logging]
# level = "INFO"                # DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
