/// localStorage key holding the raw bearer token.
pub const TOKEN_STORAGE_KEY: &str = "auth_token";

pub const API_BASE: &str = "/api";
/// API served by the local development backend.
pub const DEV_API_BASE: &str = "http://localhost:5000/api";

pub const LOGIN_POPUP_NAME: &str = "Discord Login";
pub const LOGIN_POPUP_FEATURES: &str = "width=500,height=700";
pub const LOGIN_POLL_INTERVAL_MS: u32 = 500;

/// Pick the API base for the page origin: local development talks to the
/// backend on its own port, everything else goes same-origin.
pub fn api_base_for_origin(origin: &str) -> &'static str {
    if origin.contains("localhost") {
        DEV_API_BASE
    } else {
        API_BASE
    }
}

pub fn api_base_url() -> &'static str {
    web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .map_or(API_BASE, |origin| api_base_for_origin(&origin))
}

pub fn log_level() -> log::Level {
    if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localhost_origins_use_dev_backend() {
        assert_eq!(api_base_for_origin("http://localhost:8080"), DEV_API_BASE);
        assert_eq!(api_base_for_origin("http://localhost"), DEV_API_BASE);
    }

    #[test]
    fn other_origins_stay_same_origin() {
        assert_eq!(api_base_for_origin("https://fleets.example.com"), API_BASE);
        assert_eq!(api_base_for_origin("http://127.0.0.1:8080"), API_BASE);
    }
}
