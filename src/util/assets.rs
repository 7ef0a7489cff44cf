use std::{borrow::Cow, sync::OnceLock};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rust_embed::RustEmbed;

/// Embed the entire `assets/` directory into the binary.
#[derive(RustEmbed)]
#[folder = "assets"]
struct EmbeddedAssets;

static MAIN_CSS: OnceLock<String> = OnceLock::new();
static FAVICON_DATA_URI: OnceLock<String> = OnceLock::new();

/// Contents of `assets/main.css`.
pub fn main_css() -> &'static str {
    MAIN_CSS.get_or_init(|| load_text("main.css")).as_str()
}

/// Data URI for `assets/favicon.svg`.
pub fn favicon_data_uri() -> &'static str {
    FAVICON_DATA_URI
        .get_or_init(|| load_data_uri("favicon.svg"))
        .as_str()
}

// A missing asset renders as an empty stylesheet or icon rather than aborting
// the window.
fn load_text(path: &str) -> String {
    load_asset(path)
        .map(|data| String::from_utf8_lossy(&data).into_owned())
        .unwrap_or_default()
}

fn load_data_uri(path: &str) -> String {
    let data = load_asset(path).unwrap_or_default();
    format!("data:{};base64,{}", guess_mime(path), STANDARD.encode(&data))
}

fn load_asset(path: &str) -> Option<Cow<'static, [u8]>> {
    let asset = EmbeddedAssets::get(path).map(|file| file.data);
    if asset.is_none() {
        tracing::error!(path, "embedded asset missing");
    }
    asset
}

fn guess_mime(path: &str) -> &'static str {
    match path.rsplit_once('.').map(|(_, ext)| ext) {
        Some("css") => "text/css",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_assets_are_present() {
        assert!(main_css().contains(".panel"));
        assert!(favicon_data_uri().starts_with("data:image/svg+xml;base64,PHN2Zy"));
    }
}
