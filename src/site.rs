//! Static site preparation: browsers cannot list a folder, so the playlist is collected on
//! the host and baked into the page.

use std::fs;
use std::path::Path;

use crate::config::SlideshowConfig;
use crate::error::{SlideshowError, SlideshowResult};

pub const CONFIG_PLACEHOLDER: &str = "{{SLIDESHOW_CONFIG}}";

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "avif", "bmp"];

/// Image files directly inside `dir`, sorted by file name, as `url_prefix/<name>` locators.
pub fn collect_images(dir: &Path, url_prefix: &str) -> SlideshowResult<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let is_image = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
            .unwrap_or(false);
        if !is_image {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            names.push(name.to_owned());
        }
    }
    if names.is_empty() {
        return Err(SlideshowError::Config(format!(
            "no image files found in {}",
            dir.display()
        )));
    }
    names.sort();

    let prefix = url_prefix.trim_end_matches('/');
    Ok(names
        .into_iter()
        .map(|name| {
            if prefix.is_empty() {
                name
            } else {
                format!("{prefix}/{name}")
            }
        })
        .collect())
}

/// Substitute the serialized config into the page template.
pub fn render_index(template: &str, config: &SlideshowConfig) -> SlideshowResult<String> {
    if !template.contains(CONFIG_PLACEHOLDER) {
        return Err(SlideshowError::Template(format!(
            "template has no {CONFIG_PLACEHOLDER} placeholder"
        )));
    }
    config.validate()?;
    // keep a stray "</script>" in a locator from closing the JSON block early
    let json = config.to_json()?.replace("</", "<\\/");
    Ok(template.replace(CONFIG_PLACEHOLDER, &json))
}
