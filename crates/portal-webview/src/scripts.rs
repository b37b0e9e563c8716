//! Scripts injected into the page.
//!
//! Page script talks to the host through `window.ipc.postMessage(string)`.
//! Every message is a JSON `{type, data}` envelope.

/// Runs before any page script on every document.
///
/// Installs a `Notification` stub that forwards to the bridge, and hooks
/// the History API so the host learns when in-page back navigation is
/// possible.
pub const PRELOAD_SCRIPT: &str = r#"
(function() {
    if (window.__portalPreload) { return; }
    window.__portalPreload = true;

    function post(type, data) {
        try {
            var msg = data === undefined ? { type: type } : { type: type, data: data };
            window.ipc.postMessage(JSON.stringify(msg));
        } catch (e) {}
    }

    function PortalNotification(title, options) {
        post('notification', {
            title: title == null ? undefined : String(title),
            body: options && options.body != null ? String(options.body) : ''
        });
    }
    PortalNotification.permission = 'granted';
    PortalNotification.requestPermission = function(callback) {
        if (typeof callback === 'function') { callback('granted'); }
        return Promise.resolve('granted');
    };
    PortalNotification.prototype.close = function() {};
    window.Notification = PortalNotification;

    function index() {
        var state = history.state;
        return state && typeof state.__portalIndex === 'number' ? state.__portalIndex : 0;
    }

    function report() {
        post('navigation-state', { url: location.href, canGoBack: index() > 0 });
    }

    function withIndex(state, i) {
        var copy = {};
        if (state && typeof state === 'object') {
            for (var key in state) { copy[key] = state[key]; }
        } else if (state !== undefined && state !== null) {
            copy.__portalValue = state;
        }
        copy.__portalIndex = i;
        return copy;
    }

    var pushState = history.pushState;
    var replaceState = history.replaceState;
    history.pushState = function(state, title, url) {
        var result = pushState.call(history, withIndex(state, index() + 1), title, url);
        report();
        return result;
    };
    history.replaceState = function(state, title, url) {
        var result = replaceState.call(history, withIndex(state, index()), title, url);
        report();
        return result;
    };
    window.addEventListener('popstate', report);
    window.addEventListener('hashchange', report);
    window.__portalReportNavigation = report;
})();
"#;

/// Evaluated after every finished page load. Defines `window.NativeBridge`.
pub const NATIVE_BRIDGE_SCRIPT: &str = r#"
(function() {
    if (!window.NativeBridge) {
        function send(type, data) {
            var msg = data === undefined ? { type: type } : { type: type, data: data };
            window.ipc.postMessage(JSON.stringify(msg));
        }
        window.NativeBridge = {
            getLocation: function() { send('location'); },
            takePhoto: function() { send('camera'); },
            pickImage: function() { send('gallery'); },
            pickFile: function() { send('file-picker'); },
            showNotification: function(title, body) {
                send('notification', { title: title, body: body });
            }
        };
    }
    if (window.__portalReportNavigation) { window.__portalReportNavigation(); }
})();
"#;

/// Evaluated after page load in development mode. Mirrors console calls to
/// the host as `console-log` messages.
pub const CONSOLE_FORWARD_SCRIPT: &str = r#"
(function() {
    if (window.__portalConsoleForward) { return; }
    window.__portalConsoleForward = true;

    function format(args) {
        return Array.prototype.map.call(args, function(arg) {
            if (typeof arg === 'string') { return arg; }
            if (arg instanceof Error) { return arg.stack || String(arg); }
            try { return JSON.stringify(arg); } catch (e) { return String(arg); }
        }).join(' ');
    }

    ['log', 'debug', 'info', 'warn', 'error'].forEach(function(level) {
        var original = console[level];
        console[level] = function() {
            try {
                window.ipc.postMessage(JSON.stringify({
                    type: 'console-log',
                    data: { level: level, message: format(arguments) }
                }));
            } catch (e) {}
            if (original) { return original.apply(console, arguments); }
        };
    });
})();
"#;

/// JavaScript that delivers `json` to page listeners as a `MessageEvent`
/// whose `data` is the JSON string, on both `window` and `document`.
pub fn js_post_message(json: &str) -> String {
    // Re-encode so the payload is a JS string literal, not an object literal.
    let literal = serde_json::to_string(json).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        "(function(){{var d={literal};\
         window.dispatchEvent(new MessageEvent('message',{{data:d}}));\
         document.dispatchEvent(new MessageEvent('message',{{data:d}}));}})();"
    )
}

/// JavaScript for one step back in the page's session history.
pub const HISTORY_BACK_SCRIPT: &str = "history.back();";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bridge_exposes_all_methods() {
        for method in [
            "getLocation",
            "takePhoto",
            "pickImage",
            "pickFile",
            "showNotification",
        ] {
            assert!(NATIVE_BRIDGE_SCRIPT.contains(method), "missing {method}");
        }
    }

    #[test]
    fn bridge_methods_send_known_tags() {
        for tag in ["'location'", "'camera'", "'gallery'", "'file-picker'", "'notification'"] {
            assert!(NATIVE_BRIDGE_SCRIPT.contains(tag), "missing {tag}");
        }
    }

    #[test]
    fn scripts_are_guarded() {
        assert!(PRELOAD_SCRIPT.contains("__portalPreload"));
        assert!(NATIVE_BRIDGE_SCRIPT.contains("if (!window.NativeBridge)"));
        assert!(CONSOLE_FORWARD_SCRIPT.contains("__portalConsoleForward"));
    }

    #[test]
    fn preload_reports_navigation_state() {
        assert!(PRELOAD_SCRIPT.contains("'navigation-state'"));
        assert!(PRELOAD_SCRIPT.contains("canGoBack"));
        assert!(PRELOAD_SCRIPT.contains("window.Notification = PortalNotification"));
    }

    #[test]
    fn post_message_passes_a_string() {
        let js = js_post_message(r#"{"type":"location-error","data":{"message":"denied"}}"#);
        assert!(js.contains(r#"var d="{\"type\":\"location-error\""#));
        assert!(js.contains("window.dispatchEvent"));
        assert!(js.contains("document.dispatchEvent"));
    }

    #[test]
    fn post_message_escapes_script_breakers() {
        let js = js_post_message("\"</script>\n'");
        assert!(!js.contains('\n'));
        assert!(js.contains(r#"\"</script>\n'"#));
    }
}
