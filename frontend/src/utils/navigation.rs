/// Full-page navigation, as after sign-in or sign-out.
#[cfg(target_arch = "wasm32")]
pub fn redirect(path: &str) {
    if let Some(window) = web_sys::window() {
        let location = window.location();
        if location.pathname().ok().as_deref() == Some(path) {
            return;
        }
        let _ = location.set_href(path);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn redirect(_path: &str) {}
