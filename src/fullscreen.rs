// src/fullscreen.rs
//
// "Attempt full-screen, report success or failure." Vendor-prefixed entry
// points are tried in order; callers only see the Result.

use crate::error::FullscreenError;
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Document, Element};

const REQUEST_METHODS: [&str; 4] = [
    "requestFullscreen",
    "webkitRequestFullscreen",
    "mozRequestFullScreen",
    "msRequestFullscreen",
];

const EXIT_METHODS: [&str; 4] = [
    "exitFullscreen",
    "webkitExitFullscreen",
    "mozCancelFullScreen",
    "msExitFullscreen",
];

const ELEMENT_PROPERTIES: [&str; 4] = [
    "fullscreenElement",
    "webkitFullscreenElement",
    "mozFullScreenElement",
    "msFullscreenElement",
];

fn find_method(target: &JsValue, names: &[&str]) -> Option<Function> {
    names.iter().find_map(|name| {
        Reflect::get(target, &JsValue::from_str(name))
            .ok()?
            .dyn_into::<Function>()
            .ok()
    })
}

fn describe(error: &JsValue) -> String {
    if let Some(error) = error.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    error.as_string().unwrap_or_else(|| format!("{:?}", error))
}

/// Waits for the returned promise, if the browser returned one.
async fn settle(result: JsValue) -> Result<(), FullscreenError> {
    match result.dyn_into::<Promise>() {
        Ok(promise) => JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(|e| FullscreenError::Denied(describe(&e))),
        Err(_) => Ok(()),
    }
}

pub fn is_active(document: &Document) -> bool {
    ELEMENT_PROPERTIES.iter().any(|name| {
        Reflect::get(document, &JsValue::from_str(name))
            .map(|value| !value.is_null() && !value.is_undefined())
            .unwrap_or(false)
    })
}

pub async fn enter(element: &Element) -> Result<(), FullscreenError> {
    let method = find_method(element, &REQUEST_METHODS).ok_or(FullscreenError::Unsupported)?;
    let result = method
        .call0(element)
        .map_err(|e| FullscreenError::Denied(describe(&e)))?;
    settle(result).await
}

/// Leaves full-screen. Succeeds trivially when nothing is full-screen.
pub async fn exit(document: &Document) -> Result<(), FullscreenError> {
    if !is_active(document) {
        return Ok(());
    }
    let method = find_method(document, &EXIT_METHODS).ok_or(FullscreenError::Unsupported)?;
    let result = method
        .call0(document)
        .map_err(|e| FullscreenError::Denied(describe(&e)))?;
    settle(result).await
}

pub fn enter_best_effort(element: Element) {
    spawn_local(async move {
        if let Err(e) = enter(&element).await {
            log::warn!("Continuing without full-screen: {}", e);
        }
    });
}
