// src/viewer/styles.rs
//
// Stylesheets shared by the live app and exported documents. The exported
// script injects VIEWER_STYLES itself; the live component renders it inline.

pub const VIEWER_STYLES: &str = r#"
.story-viewer {
    position: fixed;
    inset: 0;
    z-index: 1000;
    display: flex;
    align-items: center;
    justify-content: center;
    background: rgba(12, 12, 16, 0.96);
    color: #f4f1ea;
    touch-action: pan-y;
}
.story-viewer[hidden] { display: none; }
.story-viewer-close,
.story-viewer-nav {
    position: absolute;
    border: none;
    border-radius: 50%;
    background: rgba(255, 255, 255, 0.12);
    color: inherit;
    cursor: pointer;
    transition: opacity 0.3s ease;
}
.story-viewer-close { top: 16px; right: 16px; width: 48px; height: 48px; font-size: 28px; }
.story-viewer-nav { top: 50%; width: 56px; height: 56px; font-size: 32px; transform: translateY(-50%); }
.story-viewer-nav.prev { left: 16px; }
.story-viewer-nav.next { right: 16px; }
.story-viewer-nav[hidden] { display: none; }
.story-viewer-close:hover,
.story-viewer-nav:hover { background: rgba(255, 255, 255, 0.25); }
.story-viewer-close.hidden,
.story-viewer.ui-hidden .story-viewer-close,
.story-viewer.ui-hidden .story-viewer-nav { opacity: 0; pointer-events: none; }
.story-viewer.ui-hidden { cursor: none; }
.story-viewer-content { width: min(1100px, 92vw); max-height: 92vh; overflow-y: auto; }
.story-viewer-header { display: flex; align-items: baseline; justify-content: space-between; gap: 16px; }
.story-viewer-counter { opacity: 0.7; font-size: 0.9em; }
.story-viewer-body { display: flex; gap: 32px; align-items: center; }
.story-viewer-page.horizontal .story-viewer-body { flex-direction: column; }
.story-viewer-page.vertical .story-viewer-body { flex-direction: row; }
.story-viewer-image img { display: block; max-width: 100%; max-height: 70vh; margin: 0 auto; }
.story-viewer-image img.loading { opacity: 0.5; }
.story-viewer-image.missing {
    display: flex;
    align-items: center;
    justify-content: center;
    min-height: 240px;
    padding: 24px;
    border: 1px dashed rgba(255, 255, 255, 0.3);
    font-style: italic;
    opacity: 0.7;
}
.story-viewer-text { flex: 1; font-size: 1.15em; line-height: 1.6; }
@media (max-width: 768px) {
    .story-viewer-close { width: 36px; height: 36px; font-size: 20px; }
    .story-viewer-nav { width: 40px; height: 40px; font-size: 22px; }
    .story-viewer-page.vertical .story-viewer-body { flex-direction: column; }
    .story-viewer-body { gap: 16px; }
}
"#;

/// Book and thumbnail rules required wherever pages link into the viewer.
pub const BOOK_STYLES: &str = r#"
.story-book { max-width: 1100px; margin: 0 auto; }
.story-spread { display: grid; grid-template-columns: 1fr 1fr; gap: 32px; }
.story-page { display: flex; flex-direction: column; gap: 12px; }
.story-thumb { cursor: pointer; transition: transform 0.2s ease, box-shadow 0.2s ease; }
.story-thumb:hover { transform: translateY(-2px); box-shadow: 0 6px 18px rgba(0, 0, 0, 0.25); }
.story-thumb img { display: block; width: 100%; height: auto; }
.story-thumb.missing { padding: 24px; border: 1px dashed #999; font-style: italic; }
.story-book-nav { display: flex; justify-content: space-between; margin-top: 16px; }
@media (max-width: 768px) {
    .story-spread { grid-template-columns: 1fr; gap: 16px; }
    .story-book-nav button { padding: 4px 8px; font-size: 0.9em; }
}
"#;
