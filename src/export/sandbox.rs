// src/export/sandbox.rs
//
// Runs the generated viewer script in an embedded JS engine against a small
// DOM with a virtual clock, so the exported viewer's behaviour is checked on
// its own output.

use super::script::{bindings_script, viewer_script};
use crate::story::Page;
use crate::viewer::config::ViewerConfig;
use boa_engine::{Context, Source};
use serde::de::DeserializeOwned;

const DOM_STUB: &str = include_str!("dom_stub.js");

struct ExportedPage {
    context: Context,
}

impl ExportedPage {
    /// Loads the viewer the way an exported document does: thumbnails and
    /// bindings first, then the viewer script.
    fn open(pages: &[Page], config: &ViewerConfig) -> Self {
        let bindings = bindings_script(pages, config.default_aspect_ratio).unwrap();
        Self::boot(&format!("__addThumbnails({});\n{}", pages.len(), bindings), config)
    }

    fn boot(prelude: &str, config: &ViewerConfig) -> Self {
        let mut page = Self {
            context: Context::default(),
        };
        page.run(DOM_STUB);
        page.run(prelude);
        page.run(&viewer_script(config).unwrap());
        page
    }

    fn run(&mut self, code: &str) {
        if let Err(e) = self.context.eval(Source::from_bytes(code)) {
            panic!("script failed: {}", e);
        }
        self.context.run_jobs();
    }

    fn get<T: DeserializeOwned>(&mut self, expr: &str) -> T {
        let code = format!("JSON.stringify({})", expr);
        let value = match self.context.eval(Source::from_bytes(&code)) {
            Ok(value) => value,
            Err(e) => panic!("`{}` failed: {}", expr, e),
        };
        self.context.run_jobs();
        let json = value
            .as_string()
            .map(|s| s.to_std_string_escaped())
            .unwrap_or_else(|| panic!("`{}` has no JSON form", expr));
        serde_json::from_str(&json).unwrap()
    }

    fn advance(&mut self, ms: u32) {
        self.run(&format!("__clock.advance({});", ms));
    }

    fn index(&mut self) -> usize {
        self.get("storyViewer.currentIndex")
    }

    fn content(&mut self) -> String {
        self.get("__content()")
    }
}

fn story() -> Vec<Page> {
    vec![
        Page::new("Dusk falls.")
            .with_title("Dusk")
            .with_image("https://example.org/0.png")
            .with_aspect_ratio(1.5),
        Page::new("Night.")
            .with_title("Night")
            .with_image("https://example.org/1.png")
            .with_aspect_ratio(0.67),
        Page::new("Dawn.").with_title("Dawn").with_prompt("a fox at sunrise"),
    ]
}

fn open_story() -> ExportedPage {
    ExportedPage::open(&story(), &ViewerConfig::default())
}

#[test]
fn test_show_clamps_index() {
    let mut page = open_story();
    page.run("storyViewer.show(-1);");
    assert_eq!(page.index(), 0);
    assert!(page.content().contains("1 / 3"));

    page.run("storyViewer.show(999);");
    assert_eq!(page.index(), 2);
    assert!(page.content().contains("3 / 3"));
    assert!(page.get::<bool>("storyViewer.isOpen"));
}

#[test]
fn test_navigation_stops_at_either_end() {
    let mut page = open_story();
    page.run("storyViewer.show(0); storyViewer.navigate(-1);");
    assert_eq!(page.index(), 0);

    page.run("storyViewer.navigate(1); storyViewer.navigate(1); storyViewer.navigate(1);");
    assert_eq!(page.index(), 2);

    assert!(page.get::<bool>("__press('ArrowLeft')"));
    assert_eq!(page.index(), 1);
    assert!(page.get::<bool>("__press('ArrowRight')"));
    assert_eq!(page.index(), 2);
    assert!(!page.get::<bool>("__press('a')"));
}

#[test]
fn test_swipe_threshold() {
    let mut page = open_story();
    page.run("storyViewer.show(0);");

    page.run("__swipe(200, 151, 100);");
    assert_eq!(page.index(), 0);

    page.run("__swipe(200, 149, 100);");
    assert_eq!(page.index(), 1);
    assert!(page.content().contains("story-viewer-page vertical"));

    page.run("__swipe(100, 200, 100);");
    assert_eq!(page.index(), 0);
}

#[test]
fn test_interaction_restarts_idle_timer() {
    let mut page = open_story();
    page.run("storyViewer.show(0);");

    page.advance(1000);
    page.run("__overlay().dispatch('mousemove');");
    page.advance(1000);
    assert!(page.get::<bool>("storyViewer.uiVisible"));

    page.advance(1000);
    assert!(!page.get::<bool>("storyViewer.uiVisible"));
    assert!(page.get::<bool>("__overlay().classList.contains('ui-hidden')"));

    page.run("__overlay().dispatch('mousemove');");
    assert!(page.get::<bool>("storyViewer.uiVisible"));
    assert!(!page.get::<bool>("__overlay().classList.contains('ui-hidden')"));
}

#[test]
fn test_idle_delay_follows_config() {
    let config = ViewerConfig {
        idle_hide_delay_ms: 3500,
        ..ViewerConfig::default()
    };
    let mut page = ExportedPage::open(&story(), &config);
    page.run("storyViewer.show(0);");
    page.advance(3499);
    assert!(page.get::<bool>("storyViewer.uiVisible"));
    page.advance(1);
    assert!(!page.get::<bool>("storyViewer.uiVisible"));
}

#[test]
fn test_twenty_first_image_evicts_the_first() {
    let mut page = open_story();
    page.run("for (var i = 0; i < 21; i++) { storyViewer.preloadImage('img-' + i + '.png'); }");
    assert_eq!(page.get::<usize>("__settleImages(true)"), 21);

    assert_eq!(page.get::<usize>("storyViewer.imageCache.size"), 20);
    assert!(!page.get::<bool>("storyViewer.imageCache.has('img-0.png')"));
    assert!(page.get::<bool>("storyViewer.imageCache.has('img-1.png')"));
    assert!(page.get::<bool>("storyViewer.imageCache.has('img-20.png')"));
}

#[test]
fn test_open_prefetches_neighbours_once() {
    let mut page = open_story();
    page.run("storyViewer.show(0);");
    assert_eq!(page.get::<usize>("__images.length"), 2);
    assert!(page.content().contains(r#"class="loading""#));

    page.run("storyViewer.render();");
    assert_eq!(page.get::<usize>("__images.length"), 2);

    assert_eq!(page.get::<usize>("__settleImages(true)"), 2);
    assert!(!page.content().contains("loading"));
}

#[test]
fn test_failed_prefetch_is_retried() {
    let mut page = open_story();
    page.run("storyViewer.show(0);");
    assert_eq!(page.get::<usize>("__settleImages(false)"), 2);
    assert_eq!(page.get::<Vec<String>>("__warnings").len(), 2);

    page.run("storyViewer.render();");
    assert_eq!(page.get::<usize>("__images.length"), 2);
}

#[test]
fn test_page_text_is_rendered_inert() {
    let pages = vec![
        Page::new("</script><script>alert(1)</script>\n\nmore")
            .with_title("<script>steal()</script>")
            .with_image("x.png\"><script>"),
        Page::new("").with_prompt("a <b>bold</b> fox"),
    ];
    let mut page = ExportedPage::open(&pages, &ViewerConfig::default());

    page.run("storyViewer.show(0);");
    let html = page.content();
    assert!(!html.contains("<script"));
    assert!(html.contains("1. &lt;script&gt;steal()&lt;/script&gt;"));
    assert!(html.contains("<p>more</p>"));

    page.run("storyViewer.show(1);");
    let html = page.content();
    assert!(html.contains("story-viewer-image missing"));
    assert!(html.contains("a &lt;b&gt;bold&lt;/b&gt; fox"));
}

#[test]
fn test_layout_follows_each_page() {
    let config = ViewerConfig::default().with_default_aspect_ratio(1.6);
    let mut page = ExportedPage::open(&story(), &config);

    page.run("storyViewer.show(0);");
    let wide = page.content();
    assert!(wide.contains("story-viewer-page horizontal"));
    assert!(wide.find("story-viewer-image") < wide.find("story-viewer-text"));

    page.run("storyViewer.show(1);");
    let tall = page.content();
    assert!(tall.contains("story-viewer-page vertical"));
    assert!(tall.find("story-viewer-text") < tall.find("story-viewer-image"));

    // No ratio of its own: the document's default applies.
    page.run("storyViewer.show(2);");
    assert!(page.content().contains("story-viewer-page horizontal"));
}

#[test]
fn test_escape_leaves_fullscreen_before_tearing_down() {
    let mut page = open_story();
    page.run("storyViewer.show(1);");
    assert!(page.get::<bool>("document.fullscreenElement === __overlay()"));

    assert!(page.get::<bool>("__press('Escape')"));
    assert!(!page.get::<bool>("storyViewer.isOpen"));
    assert!(page.get::<bool>("document.fullscreenElement === null"));

    // The overlay and its listeners outlive the exit until it settles.
    assert!(!page.get::<bool>("__overlay().hidden"));
    assert_eq!(page.get::<usize>("document.listenerCount('keydown')"), 1);
    page.advance(99);
    assert!(!page.get::<bool>("__overlay().hidden"));

    page.advance(1);
    assert!(page.get::<bool>("__overlay().hidden"));
    assert_eq!(page.get::<usize>("document.listenerCount('keydown')"), 0);
    assert_eq!(page.get::<usize>("__overlay().listenerCount('touchstart')"), 0);
}

#[test]
fn test_reopen_during_close_finishes_close_first() {
    let mut page = open_story();
    page.run("storyViewer.show(0);");
    page.get::<bool>("__press('Escape')");
    page.run("storyViewer.show(2);");

    page.advance(200);
    assert!(page.get::<bool>("storyViewer.isOpen"));
    assert!(!page.get::<bool>("__overlay().hidden"));
    assert_eq!(page.get::<usize>("document.listenerCount('keydown')"), 1);
    assert_eq!(page.index(), 2);
}

#[test]
fn test_empty_story_never_opens() {
    let mut page = ExportedPage::open(&[], &ViewerConfig::default());
    page.run("storyViewer.show(0); storyViewer.navigate(1);");
    assert!(!page.get::<bool>("storyViewer.isOpen"));
    assert!(page.get::<bool>("storyViewer.elements === null"));
    assert!(page.get::<Vec<String>>("__warnings").is_empty());
}

#[test]
fn test_thumbnails_open_their_page() {
    let mut page = open_story();
    page.run("__thumbnail(2).click();");
    assert!(page.get::<bool>("storyViewer.isOpen"));
    assert_eq!(page.index(), 2);
}

#[test]
fn test_missing_page_binding_is_reported() {
    let mut page = ExportedPage::boot("", &ViewerConfig::default());
    assert_eq!(page.get::<usize>("storyViewer.pages.length"), 0);
    let warnings: Vec<String> = page.get("__warnings");
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("__STORY_PAGES__ is missing"));

    let mut page = ExportedPage::boot("window.__STORY_PAGES__ = 'oops';", &ViewerConfig::default());
    let warnings: Vec<String> = page.get("__warnings");
    assert!(warnings[0].contains("not an array"));
}

#[test]
fn test_waits_for_dom_content_loaded() {
    let bindings = bindings_script(&story(), 1.0).unwrap();
    let prelude = format!("document.readyState = 'loading';\n{}", bindings);
    let mut page = ExportedPage::boot(&prelude, &ViewerConfig::default());
    assert!(page.get::<bool>("window.storyViewer === undefined"));

    page.run("document.readyState = 'interactive'; document.dispatch('DOMContentLoaded');");
    assert_eq!(page.get::<usize>("storyViewer.pages.length"), 3);
}
