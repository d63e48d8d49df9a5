// src/main.rs
mod components;
mod error;
mod export;
mod fullscreen;
mod story;
mod utils;
mod viewer;

use components::book::Book;
use components::image_viewer::ImageViewer;
use gloo_net::http::Request;
use std::rc::Rc;
use story::{Page, Story};
use utils::resource_url;
use viewer::styles::BOOK_STYLES;
use yew::prelude::*;

pub enum AppMsg {
    ChangeStory(String),
    StoriesLoaded(Vec<Story>),
    StoryLoadFailed(String),
    OpenViewer(usize),
    ViewerClosed,
    ExportStory,
}

pub struct App {
    stories: Vec<Story>,
    current_story: String,
    current_pages: Rc<Vec<Page>>,
    viewer_open_at: Option<usize>,
    loading: bool,
    error: Option<String>,
}

impl Component for App {
    type Message = AppMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        // Start loading stories
        ctx.link().send_future(async {
            match load_all_stories().await {
                Ok(stories) => AppMsg::StoriesLoaded(stories),
                Err(e) => AppMsg::StoryLoadFailed(e),
            }
        });

        Self {
            stories: Vec::new(),
            current_story: String::new(),
            current_pages: Rc::new(Vec::new()),
            viewer_open_at: None,
            loading: true,
            error: None,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            AppMsg::ChangeStory(id) => {
                self.select_story(id);
                true
            }
            AppMsg::StoriesLoaded(stories) => {
                self.stories = stories;
                self.loading = false;

                // Set the first story as current if available
                if let Some(first) = self.stories.first() {
                    let id = first.id.clone();
                    self.select_story(id);
                }
                true
            }
            AppMsg::StoryLoadFailed(error) => {
                log::error!("Failed to load stories: {}", error);
                self.error = Some(error);
                self.loading = false;
                true
            }
            AppMsg::OpenViewer(index) => {
                self.viewer_open_at = Some(index);
                true
            }
            AppMsg::ViewerClosed => {
                let changed = self.viewer_open_at.is_some();
                self.viewer_open_at = None;
                changed
            }
            AppMsg::ExportStory => {
                let Some(story) = self.current() else {
                    return false;
                };
                let result = export::render_story_document(story, &utils::asset_root())
                    .map_err(|e| e.to_string())
                    .and_then(|html| {
                        utils::download_text(&story.export_file_name(), &html, "text/html")
                    });
                match result {
                    Ok(()) => {
                        log::info!("Exported story: {}", story.id);
                        false
                    }
                    Err(e) => {
                        log::error!("Failed to export {}: {}", story.id, e);
                        self.error = Some(format!("Export failed: {}", e));
                        true
                    }
                }
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        if self.loading {
            return html! {
                <div class="app-container">
                    <header class="app-header">
                        <h1>{"Story Illustrator"}</h1>
                    </header>
                    <main class="app-main">
                        <div class="loading">{"Loading stories..."}</div>
                    </main>
                </div>
            };
        }

        if self.stories.is_empty() {
            return html! {
                <div class="app-container">
                    <header class="app-header">
                        <h1>{"Story Illustrator"}</h1>
                    </header>
                    <main class="app-main">
                        <div class="error">{"No stories found. Make sure public/stories/index.json lists at least one story."}</div>
                    </main>
                </div>
            };
        }

        let on_story_change = ctx.link().callback(AppMsg::ChangeStory);
        let on_open = ctx.link().callback(AppMsg::OpenViewer);
        let on_close = ctx.link().callback(|_: ()| AppMsg::ViewerClosed);
        let on_export = ctx.link().callback(|_: MouseEvent| AppMsg::ExportStory);

        let current = self.current();
        let title = current.map(|s| s.title.clone()).unwrap_or_default();
        let byline = current.and_then(|s| s.author.clone());
        let viewer_config = current.map(|s| s.viewer.clone()).unwrap_or_default();

        html! {
            <div class="app-container">
                <style>{ BOOK_STYLES }</style>
                <header class="app-header">
                    <h1>{"Story Illustrator"}</h1>
                    <p class="subtitle">{ title }</p>
                    if let Some(author) = byline {
                        <p class="story-author">{ format!("by {}", author) }</p>
                    }
                </header>

                <main class="app-main">
                    <div class="selectors-container">
                        <div class="story-selector">
                            <label for="story-select">{"Story: "}</label>
                            <select
                                id="story-select"
                                onchange={
                                    let on_change = on_story_change.clone();
                                    Callback::from(move |e: Event| {
                                        let target = e.target_dyn_into::<web_sys::HtmlSelectElement>();
                                        if let Some(select) = target {
                                            on_change.emit(select.value());
                                        }
                                    })
                                }
                            >
                                {for self.stories.iter().map(|story| {
                                    html! {
                                        <option
                                            value={story.id.clone()}
                                            selected={self.current_story == story.id}
                                        >
                                            {story.title.clone()}
                                        </option>
                                    }
                                })}
                            </select>
                        </div>
                        <button class="export-button" onclick={on_export}>{"Export HTML"}</button>
                    </div>

                    if let Some(error) = &self.error {
                        <div class="error">{ error.clone() }</div>
                    }

                    <Book pages={self.current_pages.clone()} {on_open} />

                    <ImageViewer
                        pages={self.current_pages.clone()}
                        config={viewer_config}
                        open_at={self.viewer_open_at}
                        {on_close}
                    />
                </main>

                <footer class="app-footer">
                    <p>{"Story Illustrator © 2024"}</p>
                </footer>
            </div>
        }
    }
}

impl App {
    fn current(&self) -> Option<&Story> {
        self.stories.iter().find(|s| s.id == self.current_story)
    }

    fn select_story(&mut self, id: String) {
        self.viewer_open_at = None;
        self.current_story = id;
        // Pages are snapshotted per story; the viewer never sees them mutate mid-session.
        self.current_pages = Rc::new(
            self.current()
                .map(|story| story.pages.clone())
                .unwrap_or_default(),
        );
    }
}

async fn load_story_ids() -> Result<Vec<String>, String> {
    let index_url = resource_url("public/stories/index.json");
    let resp = Request::get(&index_url)
        .send()
        .await
        .map_err(|e| format!("Failed to fetch story index: {:?}", e))?;
    if !resp.ok() {
        return Err(format!("Story index not found ({})", resp.status()));
    }
    resp.json::<Vec<String>>()
        .await
        .map_err(|e| format!("Failed to parse story index: {:?}", e))
}

async fn load_all_stories() -> Result<Vec<Story>, String> {
    let story_ids = load_story_ids().await?;

    let mut stories = Vec::new();

    for story_id in story_ids {
        let manifest_url = resource_url(&Story::manifest_path(&story_id));

        match Request::get(&manifest_url).send().await {
            Ok(resp) => {
                if resp.ok() {
                    match resp.json::<Story>().await {
                        Ok(story) => {
                            log::info!("Loaded story: {} ({} pages)", story_id, story.get_page_count());
                            stories.push(story);
                        }
                        Err(e) => {
                            log::warn!("Failed to parse story {}: {:?}", story_id, e);
                        }
                    }
                } else {
                    log::warn!("Story not found: {}", story_id);
                }
            }
            Err(e) => {
                log::warn!("Failed to fetch story {}: {:?}", story_id, e);
            }
        }
    }

    if stories.is_empty() {
        Err("No stories could be loaded".to_string())
    } else {
        Ok(stories)
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
