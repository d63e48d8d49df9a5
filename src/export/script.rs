// src/export/script.rs
use crate::error::ExportError;
use crate::story::{Page, MISSING_IMAGE_TEXT};
use crate::viewer::config::ViewerConfig;
use crate::viewer::styles::VIEWER_STYLES;
use serde::Serialize;

// Globals the exported document assigns before the viewer script runs.
pub const PAGES_BINDING: &str = "__STORY_PAGES__";
pub const DEFAULT_ASPECT_RATIO_BINDING: &str = "__STORY_DEFAULT_ASPECT_RATIO__";

pub const VIEWER_BINDING: &str = "storyViewer";
pub const PAGE_INDEX_ATTRIBUTE: &str = "data-page-index";

const TEMPLATE: &str = include_str!("viewer_template.js");

/// Serializes `value` as JSON that is also safe inside a `<script>` element.
pub fn script_safe_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(value)?;
    Ok(json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029"))
}

fn js_number(value: f64) -> String {
    // Display never emits exponents, so this is always a valid JS literal.
    format!("{}", value)
}

/// Generates the standalone viewer script for the given configuration.
pub fn viewer_script(config: &ViewerConfig) -> Result<String, ExportError> {
    config.validate()?;

    let replacements = [
        ("{{IDLE_HIDE_DELAY_MS}}", config.idle_hide_delay_ms.to_string()),
        ("{{SWIPE_THRESHOLD_PX}}", js_number(config.swipe_threshold_px)),
        ("{{IMAGE_CACHE_CAPACITY}}", config.image_cache_capacity.to_string()),
        ("{{CLOSE_SETTLE_DELAY_MS}}", config.close_settle_delay_ms.to_string()),
        ("{{FALLBACK_ASPECT_RATIO}}", js_number(config.default_aspect_ratio)),
        ("{{PAGES_BINDING}}", script_safe_json(PAGES_BINDING)?),
        ("{{DEFAULT_ASPECT_RATIO_BINDING}}", script_safe_json(DEFAULT_ASPECT_RATIO_BINDING)?),
        ("{{VIEWER_BINDING}}", script_safe_json(VIEWER_BINDING)?),
        ("{{PAGE_INDEX_ATTRIBUTE}}", script_safe_json(PAGE_INDEX_ATTRIBUTE)?),
        ("{{MISSING_IMAGE_TEXT}}", script_safe_json(MISSING_IMAGE_TEXT)?),
        ("{{VIEWER_STYLES}}", script_safe_json(VIEWER_STYLES)?),
    ];

    let mut script = TEMPLATE.to_string();
    for (token, value) in replacements {
        script = script.replace(token, &value);
    }
    Ok(script)
}

pub fn bindings_script(pages: &[Page], default_aspect_ratio: f64) -> Result<String, ExportError> {
    Ok(format!(
        "window[{}] = {};\nwindow[{}] = {};\n",
        script_safe_json(PAGES_BINDING)?,
        script_safe_json(pages)?,
        script_safe_json(DEFAULT_ASPECT_RATIO_BINDING)?,
        js_number(default_aspect_ratio)
    ))
}
