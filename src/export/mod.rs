// src/export/mod.rs
//
// Standalone HTML export. The viewer ships as a dependency-free script that
// reads its pages from ambient bindings set by the exported document.

pub mod document;
pub mod script;

pub use document::render_story_document;

#[cfg(test)]
mod sandbox;
