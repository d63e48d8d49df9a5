// src/components/book.rs
use crate::story::Page;
use crate::utils::resolve_image_src;
use crate::viewer::view::paragraphs;
use std::ops::Range;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct BookProps {
    pub pages: Rc<Vec<Page>>,
    #[prop_or(2)]
    pub pages_per_spread: usize,
    pub on_open: Callback<usize>,
}

pub fn spread_count(total: usize, per_spread: usize) -> usize {
    total.div_ceil(per_spread.max(1))
}

/// Page indices shown on `spread`, empty past the last spread.
pub fn spread_range(total: usize, per_spread: usize, spread: usize) -> Range<usize> {
    let per_spread = per_spread.max(1);
    let start = spread.saturating_mul(per_spread).min(total);
    start..(start + per_spread).min(total)
}

#[function_component(Book)]
pub fn book(props: &BookProps) -> Html {
    let spread = use_state(|| 0usize);

    // Back to the first spread whenever another story is shown
    {
        let spread = spread.clone();
        use_effect_with(props.pages.clone(), move |_| {
            spread.set(0);
            || ()
        });
    }

    let total = props.pages.len();
    let count = spread_count(total, props.pages_per_spread);
    let current = (*spread).min(count.saturating_sub(1));
    let range = spread_range(total, props.pages_per_spread, current);

    let prev_spread = {
        let spread = spread.clone();
        Callback::from(move |_: MouseEvent| spread.set(current.saturating_sub(1)))
    };
    let next_spread = {
        let spread = spread.clone();
        Callback::from(move |_: MouseEvent| spread.set(current + 1))
    };

    if total == 0 {
        return html! {
            <div class="story-book empty">{"This story has no pages yet."}</div>
        };
    }

    html! {
        <div class="story-book">
            <section class="story-spread">
                { for range.map(|index| render_page(&props.pages[index], index, &props.on_open)) }
            </section>
            <nav class="story-book-nav">
                if current > 0 {
                    <button onclick={prev_spread}>{"← Previous"}</button>
                } else {
                    <span />
                }
                <span class="story-book-position">{ format!("{} / {}", current + 1, count) }</span>
                if current + 1 < count {
                    <button onclick={next_spread}>{"Next →"}</button>
                } else {
                    <span />
                }
            </nav>
        </div>
    }
}

fn render_page(page: &Page, index: usize, on_open: &Callback<usize>) -> Html {
    let onclick = on_open.reform(move |_: MouseEvent| index);
    let heading = page.heading(index);

    let thumbnail = match page.image_src() {
        Some(src) => html! {
            <figure class="story-thumb" data-page-index={index.to_string()} {onclick}>
                <img src={resolve_image_src(src)} alt={heading.clone()} loading="lazy" />
            </figure>
        },
        None => html! {
            <figure class="story-thumb missing" data-page-index={index.to_string()} {onclick}>
                <figcaption>{ page.missing_image_reason().to_string() }</figcaption>
            </figure>
        },
    };

    html! {
        <div class="story-page">
            { thumbnail }
            <h3>{ heading }</h3>
            { for paragraphs(&page.text).into_iter().map(|p| html! { <p>{ p.to_string() }</p> }) }
        </div>
    }
}
