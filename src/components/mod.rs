// src/components/mod.rs
pub mod book;
pub mod image_viewer;
