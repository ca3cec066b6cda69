pub const APP_NAME: &str = "City Cost Compare";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version_label() -> String {
    format!("v{APP_VERSION}")
}

pub fn user_agent() -> String {
    format!("city-cost-compare/{APP_VERSION}")
}
