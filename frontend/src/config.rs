use lazy_static::lazy_static;
use wasm_bindgen::JsValue;
use web_sys::window;

const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";
const DEFAULT_APP_NAME: &str = "LearnTube AI";

lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env_config();
}

/// Runtime settings injected by the hosting page as `window.ENV_CONFIG`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub backend_url: String,
    pub app_name: String,
    pub debug_mode: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppConfig {
    /// Builds the config from any key lookup, filling in defaults for keys
    /// that are missing or blank.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            backend_url: value("BACKEND_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
            app_name: value("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            debug_mode: value("DEBUG_MODE").is_some_and(|v| parse_flag(&v)),
        }
    }

    pub fn from_env_config() -> Self {
        match env_config() {
            Some(env) => Self::from_lookup(|key| read_key(&env, key)),
            None => {
                log::warn!("ENV_CONFIG is undefined, using built-in defaults");
                Self::default()
            }
        }
    }
}

fn env_config() -> Option<JsValue> {
    let window = window()?;
    let env = js_sys::Reflect::get(&window, &"ENV_CONFIG".into()).ok()?;
    (!env.is_undefined() && !env.is_null()).then_some(env)
}

// The page may write flags as real booleans or as strings.
fn read_key(env: &JsValue, key: &str) -> Option<String> {
    let value = js_sys::Reflect::get(env, &key.into()).ok()?;
    if let Some(flag) = value.as_bool() {
        return Some(flag.to_string());
    }
    value.as_string()
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}
