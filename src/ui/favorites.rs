/// Favorites panel

use crate::ui::components::{RawList, action_target};
use patternfly_yew::prelude::{Button, ButtonVariant};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FavoritesPanelProps {
    pub markup: AttrValue,
    pub count: usize,
    pub on_remove: Callback<String>,
    pub on_copy: Callback<()>,
    pub on_clear: Callback<()>,
}

#[function_component(FavoritesPanel)]
pub fn favorites_panel(props: &FavoritesPanelProps) -> Html {
    // Hidden entirely until something is pinned
    if props.count == 0 {
        return html! {};
    }

    let on_list_click = {
        let on_remove = props.on_remove.clone();
        Callback::from(move |e: MouseEvent| {
            if let Some(domain) = action_target(&e, ".action-btn.remove")
                .and_then(|button| button.get_attribute("data-domain"))
            {
                on_remove.emit(domain);
            }
        })
    };

    html! {
        <section id="favorites-section" class="favorites-section card">
            <div class="card-header">
                <h2 class="card-title">
                    {"Favorites "}
                    <span id="favorites-count" class="count-badge">{props.count}</span>
                </h2>
                <div class="card-actions">
                    <Button onclick={props.on_copy.reform(|_| ())} variant={ButtonVariant::Secondary}>
                        {"Copy"}
                    </Button>
                    <Button onclick={props.on_clear.reform(|_| ())} variant={ButtonVariant::Danger}>
                        {"Clear"}
                    </Button>
                </div>
            </div>
            <RawList id="favorites-list" markup={props.markup.clone()} onclick={on_list_click} />
        </section>
    }
}
