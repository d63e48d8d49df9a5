// src/utils.rs
use gloo_utils::{document, window};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Get the base URL for the application
/// This handles both local development and GitHub Pages deployment
pub fn get_base_url() -> String {
    match window().location().pathname() {
        Ok(pathname) => base_from_pathname(&pathname),
        Err(_) => String::new(),
    }
}

fn base_from_pathname(pathname: &str) -> String {
    // Check if we're on GitHub Pages (path starts with /story-illustrator/)
    if pathname.starts_with("/story-illustrator/") {
        "/story-illustrator".to_string()
    } else {
        String::new()
    }
}

fn join_base(base: &str, path: &str) -> String {
    let clean_path = path.trim_start_matches('/');
    if base.is_empty() {
        format!("/{}", clean_path)
    } else {
        format!("{}/{}", base, clean_path)
    }
}

fn is_self_contained(src: &str) -> bool {
    ["data:", "blob:", "http://", "https://", "//"]
        .iter()
        .any(|prefix| src.starts_with(prefix))
}

/// Build a resource URL with the correct base path
pub fn resource_url(path: &str) -> String {
    join_base(&get_base_url(), path)
}

/// Origin plus base path, e.g. `https://example.org/story-illustrator`.
pub fn asset_root() -> String {
    let origin = window().location().origin().unwrap_or_default();
    format!("{}{}", origin, get_base_url())
}

/// Image references may be data URIs, absolute URLs, or paths relative to
/// the deployment root.
pub fn absolute_src(root: &str, src: &str) -> String {
    if is_self_contained(src) {
        src.to_string()
    } else {
        join_base(root, src)
    }
}

pub fn resolve_image_src(src: &str) -> String {
    absolute_src(&get_base_url(), src)
}

/// Offers `contents` to the user as a file download.
pub fn download_text(file_name: &str, contents: &str, mime: &str) -> Result<(), String> {
    let parts = js_sys::Array::of1(&JsValue::from_str(contents));
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(|e| format!("Failed to create blob: {:?}", e))?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document()
        .create_element("a")
        .map_err(|e| format!("Failed to create link: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| "Created element is not an anchor".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke object URL: {:?}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_from_pathname() {
        assert_eq!(base_from_pathname("/story-illustrator/index.html"), "/story-illustrator");
        assert_eq!(base_from_pathname("/index.html"), "");
    }

    #[test]
    fn test_join_base() {
        assert_eq!(join_base("", "/public/a.png"), "/public/a.png");
        assert_eq!(join_base("", "public/a.png"), "/public/a.png");
        assert_eq!(join_base("/story-illustrator", "public/a.png"), "/story-illustrator/public/a.png");
    }

    #[test]
    fn test_self_contained_sources() {
        assert!(is_self_contained("data:image/png;base64,AAAA"));
        assert!(is_self_contained("https://example.com/a.png"));
        assert!(!is_self_contained("public/images/a.png"));
    }

    #[test]
    fn test_absolute_src() {
        let root = "https://example.org/story-illustrator";
        assert_eq!(
            absolute_src(root, "public/a.png"),
            "https://example.org/story-illustrator/public/a.png"
        );
        assert_eq!(absolute_src(root, "/a.png"), "https://example.org/story-illustrator/a.png");
        assert_eq!(absolute_src(root, "data:image/png;base64,AA"), "data:image/png;base64,AA");
        assert_eq!(absolute_src("", "a.png"), "/a.png");
    }
}
