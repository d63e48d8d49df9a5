// src/components/image_viewer.rs
use crate::fullscreen;
use crate::story::Page;
use crate::utils::resolve_image_src;
use crate::viewer::config::ViewerConfig;
use crate::viewer::styles::VIEWER_STYLES;
use crate::viewer::timer::IdleTicket;
use crate::viewer::view::{ImageSlot, PageView};
use crate::viewer::{Direction, Effect, KeyCommand, ViewerEngine};
use gloo::timers::callback::Timeout;
use gloo::utils::document;
use gloo_events::{EventListener, EventListenerOptions};
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlImageElement, KeyboardEvent, TouchList};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ImageViewerProps {
    pub pages: Rc<Vec<Page>>,
    #[prop_or_default]
    pub config: ViewerConfig,
    #[prop_or_default]
    pub open_at: Option<usize>,
    // Fires after full-screen has been left.
    pub on_close: Callback<()>,
}

pub enum ImageViewerMsg {
    Navigate(Direction),
    Key(String),
    TouchStart(f64, f64),
    TouchEnd(f64, f64),
    PointerMoved,
    IdleElapsed(IdleTicket),
    ImageLoaded(String),
    ImageFailed(String),
    Close,
    Closed(u64),
}

// Dropping it detaches its listeners.
struct PendingImage {
    element: HtmlImageElement,
    _on_load: EventListener,
    _on_error: EventListener,
}

// Keeps the last page on screen while full-screen is being left.
#[derive(Default)]
struct PendingClose {
    last_session: u64,
    session: Option<u64>,
    overlay: Option<PageView>,
}

impl PendingClose {
    fn begin(&mut self, overlay: Option<PageView>) -> u64 {
        self.last_session += 1;
        self.session = Some(self.last_session);
        self.overlay = overlay;
        self.last_session
    }

    fn abandon(&mut self) {
        self.session = None;
        self.overlay = None;
    }

    fn settle(&mut self, session: u64) -> bool {
        if self.session != Some(session) {
            return false;
        }
        self.abandon();
        true
    }

    fn overlay(&self) -> Option<&PageView> {
        self.overlay.as_ref()
    }
}

pub struct ImageViewer {
    engine: ViewerEngine<HtmlImageElement>,
    container: NodeRef,
    enter_fullscreen: bool,
    idle_timeout: Option<Timeout>,
    key_listener: Option<EventListener>,
    pending_images: HashMap<String, PendingImage>,
    closing: PendingClose,
}

impl Component for ImageViewer {
    type Message = ImageViewerMsg;
    type Properties = ImageViewerProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let mut viewer = Self {
            engine: build_engine(props),
            container: NodeRef::default(),
            enter_fullscreen: false,
            idle_timeout: None,
            key_listener: None,
            pending_images: HashMap::new(),
            closing: PendingClose::default(),
        };
        if let Some(index) = props.open_at {
            let effects = viewer.engine.show(index as i64);
            viewer.apply_effects(ctx, effects);
        }
        viewer
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        let props = ctx.props();
        let mut effects = Vec::new();

        if props.config != old_props.config {
            effects.extend(self.engine.hide());
            self.engine = build_engine(props);
            if let Some(index) = props.open_at {
                effects.extend(self.engine.show(index as i64));
            }
        } else {
            if props.pages != old_props.pages {
                effects.extend(self.engine.replace_pages(props.pages.to_vec()));
            }
            if props.open_at != old_props.open_at {
                match props.open_at {
                    Some(index) => effects.extend(self.engine.show(index as i64)),
                    None => effects.extend(self.engine.hide()),
                }
            }
        }

        self.apply_effects(ctx, effects);
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let effects = match msg {
            ImageViewerMsg::Navigate(direction) => self.engine.navigate(direction),
            ImageViewerMsg::Key(key) => self.engine.handle_key(&key).unwrap_or_default(),
            ImageViewerMsg::TouchStart(x, y) => {
                self.engine.touch_start(x, y);
                Vec::new()
            }
            ImageViewerMsg::TouchEnd(x, y) => self.engine.touch_end(x, y),
            ImageViewerMsg::PointerMoved => self.engine.pointer_moved(),
            ImageViewerMsg::IdleElapsed(ticket) => {
                self.idle_timeout = None;
                self.engine.idle_elapsed(ticket)
            }
            ImageViewerMsg::ImageLoaded(src) => match self.pending_images.remove(&src) {
                Some(pending) => self.engine.image_loaded(src, pending.element),
                None => Vec::new(),
            },
            ImageViewerMsg::ImageFailed(src) => {
                self.pending_images.remove(&src);
                self.engine.image_failed(&src, "image failed to load");
                Vec::new()
            }
            ImageViewerMsg::Close => self.engine.hide(),
            ImageViewerMsg::Closed(session) => return self.finish_close(ctx, session),
        };
        self.apply_effects(ctx, effects)
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        if !std::mem::take(&mut self.enter_fullscreen) {
            return;
        }
        if let Some(container) = self.container.cast::<Element>() {
            fullscreen::enter_best_effort(container);
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.key_listener = None;
        self.idle_timeout = None;
        self.pending_images.clear();
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let open = self.engine.view();
        let Some(view) = open.as_ref().or(self.closing.overlay()) else {
            return html! {};
        };
        let link = ctx.link();

        let on_close = link.callback(|_: MouseEvent| ImageViewerMsg::Close);
        let on_prev = link.callback(|_: MouseEvent| ImageViewerMsg::Navigate(Direction::Previous));
        let on_next = link.callback(|_: MouseEvent| ImageViewerMsg::Navigate(Direction::Next));
        let onmousemove = link.callback(|_: MouseEvent| ImageViewerMsg::PointerMoved);
        let ontouchstart = link.batch_callback(|e: TouchEvent| {
            first_touch(&e.touches()).map(|(x, y)| ImageViewerMsg::TouchStart(x, y))
        });
        let ontouchend = link.batch_callback(|e: TouchEvent| {
            first_touch(&e.changed_touches()).map(|(x, y)| ImageViewerMsg::TouchEnd(x, y))
        });

        // Only the close control follows the idle timer here.
        let close_class = classes!("story-viewer-close", (!view.ui_visible).then_some("hidden"));

        html! {
            <div
                ref={self.container.clone()}
                class="story-viewer"
                role="dialog"
                aria-modal="true"
                {onmousemove}
                {ontouchstart}
                {ontouchend}
            >
                <style>{ VIEWER_STYLES }</style>
                <button class={close_class} onclick={on_close} title="Close (Esc)">{"×"}</button>
                if view.has_previous {
                    <button class="story-viewer-nav prev" onclick={on_prev} title="Previous (←)">{"‹"}</button>
                }
                if view.has_next {
                    <button class="story-viewer-nav next" onclick={on_next} title="Next (→)">{"›"}</button>
                }
                <div class="story-viewer-content">
                    { self.render_page(view) }
                </div>
            </div>
        }
    }
}

impl ImageViewer {
    // Returns whether the component re-renders.
    fn apply_effects(&mut self, ctx: &Context<Self>, effects: Vec<Effect>) -> bool {
        let mut render = false;
        for effect in effects {
            match effect {
                Effect::AttachListeners => {
                    // Reopened before the previous close settled.
                    self.closing.abandon();
                    self.attach_key_listener(ctx);
                }
                Effect::EnterFullscreen => {
                    // Needs the overlay in the DOM; handled in `rendered`.
                    self.enter_fullscreen = true;
                    render = true;
                }
                Effect::ArmIdleTimer { ticket, delay_ms } => {
                    let link = ctx.link().clone();
                    // Replacing the previous Timeout cancels it.
                    self.idle_timeout = Some(Timeout::new(delay_ms, move || {
                        link.send_message(ImageViewerMsg::IdleElapsed(ticket));
                    }));
                }
                Effect::CancelIdleTimer => self.idle_timeout = None,
                Effect::FetchImage(src) => self.fetch_image(ctx, src),
                Effect::Render => render = true,
                Effect::Close => self.begin_close(ctx),
            }
        }
        render
    }

    fn attach_key_listener(&mut self, ctx: &Context<Self>) {
        let link = ctx.link().clone();
        let options = EventListenerOptions::enable_prevent_default();
        let listener =
            EventListener::new_with_options(&document(), "keydown", options, move |event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let key = event.key();
                if KeyCommand::from_key(&key).is_some() {
                    event.prevent_default();
                    link.send_message(ImageViewerMsg::Key(key));
                }
            });
        self.key_listener = Some(listener);
    }

    // The overlay and key listener stay until full-screen has been left,
    // whether or not leaving succeeded.
    fn begin_close(&mut self, ctx: &Context<Self>) {
        let session = self.closing.begin(self.engine.describe_current());
        ctx.link().send_future(async move {
            if let Err(e) = fullscreen::exit(&document()).await {
                log::warn!("Leaving full-screen failed: {}", e);
            }
            ImageViewerMsg::Closed(session)
        });
    }

    fn finish_close(&mut self, ctx: &Context<Self>, session: u64) -> bool {
        if !self.closing.settle(session) {
            return false;
        }
        self.key_listener = None;
        ctx.props().on_close.emit(());
        true
    }

    fn fetch_image(&mut self, ctx: &Context<Self>, src: String) {
        let element = match HtmlImageElement::new() {
            Ok(element) => element,
            Err(e) => {
                self.engine.image_failed(&src, &format!("{:?}", e));
                return;
            }
        };

        let link = ctx.link().clone();
        let loaded = src.clone();
        let on_load = EventListener::once(&element, "load", move |_| {
            link.send_message(ImageViewerMsg::ImageLoaded(loaded));
        });
        let link = ctx.link().clone();
        let failed = src.clone();
        let on_error = EventListener::once(&element, "error", move |_| {
            link.send_message(ImageViewerMsg::ImageFailed(failed));
        });

        element.set_src(&resolve_image_src(&src));
        self.pending_images.insert(
            src,
            PendingImage {
                element,
                _on_load: on_load,
                _on_error: on_error,
            },
        );
    }

    fn render_page(&self, view: &PageView) -> Html {
        let image = match &view.image {
            ImageSlot::Ready { src, cached } => html! {
                <div class="story-viewer-image">
                    <img
                        src={resolve_image_src(src)}
                        alt={view.heading.clone()}
                        class={classes!((!*cached).then_some("loading"))}
                    />
                </div>
            },
            ImageSlot::Missing { reason } => html! {
                <div class="story-viewer-image missing">
                    <p class="story-viewer-placeholder">{ reason.clone() }</p>
                </div>
            },
        };
        let text = html! {
            <div class="story-viewer-text">
                { for view.paragraphs().into_iter().map(|p| html! { <p>{ p.to_string() }</p> }) }
            </div>
        };
        let body = if view.layout.image_first() {
            html! { <>{ image }{ text }</> }
        } else {
            html! { <>{ text }{ image }</> }
        };

        html! {
            <article class={classes!("story-viewer-page", view.layout.class())}>
                <header class="story-viewer-header">
                    <h2 class="story-viewer-title">{ view.heading.clone() }</h2>
                    <span class="story-viewer-counter">{ view.counter() }</span>
                </header>
                <div class="story-viewer-body">{ body }</div>
            </article>
        }
    }
}

fn build_engine(props: &ImageViewerProps) -> ViewerEngine<HtmlImageElement> {
    ViewerEngine::new(props.pages.to_vec(), props.config.clone()).unwrap_or_else(|e| {
        log::error!("Invalid viewer configuration, using defaults: {}", e);
        ViewerEngine::with_default_config(props.pages.to_vec())
    })
}

fn first_touch(touches: &TouchList) -> Option<(f64, f64)> {
    touches
        .item(0)
        .map(|touch| (touch.client_x() as f64, touch.client_y() as f64))
}
