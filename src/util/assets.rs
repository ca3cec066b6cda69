use std::sync::OnceLock;

use rust_embed::RustEmbed;
use tracing::warn;

/// Embed the entire `assets/` directory into the binary.
#[derive(RustEmbed)]
#[folder = "assets"]
struct EmbeddedAssets;

static MAIN_CSS: OnceLock<String> = OnceLock::new();

/// Returns the contents of `assets/main.css`, or an empty stylesheet if the
/// asset is missing or not UTF-8.
pub fn main_css() -> &'static str {
    MAIN_CSS.get_or_init(|| load_text("main.css")).as_str()
}

fn load_text(path: &str) -> String {
    let Some(file) = EmbeddedAssets::get(path) else {
        warn!(path, "embedded asset not found");
        return String::new();
    };

    String::from_utf8(file.data.into_owned()).unwrap_or_else(|_| {
        warn!(path, "embedded asset is not valid UTF-8");
        String::new()
    })
}
