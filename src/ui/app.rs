/// Main page of the domain index checker

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::dashboard::{Dashboard, Delivery, Toast};
use crate::domain::domain_count_label;
use crate::error::{CheckError, ListKind};
use crate::render::star_state;
use crate::storage::FavoritesStore;
use crate::ui::components::{ProgressBar, RawList, Stat, ToastBanner, action_target};
use crate::ui::favorites::FavoritesPanel;
use crate::ui::settings::ApiKeysPanel;
use gloo_timers::callback::{Interval, Timeout};
use patternfly_yew::prelude::{Button, ButtonVariant};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

// Import JS bridge functions
#[wasm_bindgen(module = "/dashboard.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn writeClipboard(text: &str) -> Result<(), JsValue>;
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    #[prop_or_default]
    pub config: AppConfig,
}

/// Timer half of the poller; dropping the interval cancels it
#[derive(Default)]
pub struct PollLoop {
    interval: Option<Interval>,
}

impl PollLoop {
    pub fn start<F: FnMut() + 'static>(&mut self, interval_ms: u32, on_tick: F) {
        if self.interval.is_none() {
            self.interval = Some(Interval::new(interval_ms, on_tick));
        }
    }

    pub fn stop(&mut self) {
        self.interval = None;
    }
}

/// Everything a timer tick or async response needs to reach the page
#[derive(Clone)]
struct Session {
    dashboard: Rc<RefCell<Dashboard>>,
    poll_loop: Rc<RefCell<PollLoop>>,
    api: ApiClient,
    refresh: UseForceUpdateHandle,
    show_toast: Callback<Toast>,
}

impl Session {
    fn start_polling(&self, interval_ms: u32) {
        if !self.dashboard.borrow_mut().submit_accepted(interval_ms) {
            return;
        }
        log::info!("Check accepted, polling progress");
        let session = self.clone();
        self.poll_loop
            .borrow_mut()
            .start(interval_ms, move || session.tick());
    }

    fn tick(&self) {
        // Once idle the loop is stopped from the response handler, never
        // from inside the interval callback itself
        let Some(ticket) = self.dashboard.borrow_mut().begin_tick() else {
            return;
        };

        let session = self.clone();
        spawn_local(async move {
            let result = session
                .api
                .fetch_progress()
                .await
                .map_err(|e| CheckError::PollTransport(e.to_string()));
            let delivery = session.dashboard.borrow_mut().deliver(ticket, result);

            match delivery {
                Delivery::Ignored | Delivery::Skipped => {}
                Delivery::Updated => session.refresh.force_update(),
                Delivery::Completed(toast) => {
                    session.poll_loop.borrow_mut().stop();
                    session.refresh.force_update();
                    session.show_toast.emit(toast);
                }
            }
        });
    }

    fn teardown(&self) {
        self.poll_loop.borrow_mut().stop();
        self.dashboard.borrow_mut().shutdown();
    }
}

/// Re-style one favorite toggle in place
fn apply_star_state(button: &Element, is_favorite: bool) {
    let star = star_state(is_favorite);
    let _ = button.set_attribute("class", star.class);
    let _ = button.set_attribute("title", star.title);
    if let Ok(Some(svg)) = button.query_selector("svg") {
        let _ = svg.set_attribute("fill", star.fill);
    }
}

/// Bring every toggle in a rendered list in line with the favorites store
fn sync_star_buttons(container: &Element, dashboard: &Dashboard) {
    let Ok(buttons) = container.query_selector_all(".action-btn.favorite") else {
        return;
    };
    for i in 0..buttons.length() {
        let Some(button) = buttons.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        if let Some(domain) = button.get_attribute("data-domain") {
            apply_star_state(&button, dashboard.is_favorite(&domain));
        }
    }
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let config = props.config.clone();
    let dashboard = use_mut_ref(|| Dashboard::new(FavoritesStore::browser()));
    let poll_loop = use_mut_ref(PollLoop::default);
    let refresh = use_force_update();
    let domains_text = use_state(String::new);
    let workers = use_state(|| config.default_workers);
    let toast = use_state(|| None::<Toast>);
    let toast_timer = use_mut_ref(|| None::<Timeout>);
    let indexed_ref = use_node_ref();

    let show_toast = {
        let toast = toast.clone();
        let toast_timer = toast_timer.clone();
        let toast_ms = config.toast_ms;
        Callback::from(move |t: Toast| {
            toast.set(Some(t));
            let toast = toast.clone();
            // Replacing the timer cancels the previous toast's timeout
            *toast_timer.borrow_mut() = Some(Timeout::new(toast_ms, move || toast.set(None)));
        })
    };

    let session = Session {
        dashboard: dashboard.clone(),
        poll_loop: poll_loop.clone(),
        api: ApiClient::new(config.clone()),
        refresh: refresh.clone(),
        show_toast: show_toast.clone(),
    };

    // Stop polling when the page goes away
    {
        let session = session.clone();
        use_effect_with((), move |_| move || session.teardown());
    }

    let on_input = {
        let domains_text = domains_text.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlTextAreaElement>() {
                domains_text.set(input.value());
            }
        })
    };

    let on_clear_input = {
        let domains_text = domains_text.clone();
        Callback::from(move |_| domains_text.set(String::new()))
    };

    let on_workers_change = {
        let workers = workers.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
                if let Ok(n) = select.value().parse::<u32>() {
                    workers.set(n);
                }
            }
        })
    };

    let on_submit = {
        let session = session.clone();
        let domains_text = domains_text.clone();
        let workers = workers.clone();
        let interval_ms = config.poll_interval_ms;
        Callback::from(move |_| {
            let submitted = session.dashboard.borrow_mut().submit(&domains_text, *workers);
            let request = match submitted {
                Ok(request) => request,
                Err(e) => {
                    session.show_toast.emit(e.into());
                    return;
                }
            };
            session.refresh.force_update();

            let session = session.clone();
            spawn_local(async move {
                match session.api.start_check(&request).await {
                    Ok(accepted) => {
                        if let Some(message) = accepted.message {
                            log::debug!("{}", message);
                        }
                        session.start_polling(interval_ms);
                    }
                    Err(e) => {
                        let toast = session.dashboard.borrow_mut().submit_rejected(e.server_message());
                        session.refresh.force_update();
                        session.show_toast.emit(toast);
                    }
                }
            });
        })
    };

    let on_copy = {
        let dashboard = dashboard.clone();
        let show_toast = show_toast.clone();
        Callback::from(move |kind: ListKind| {
            let copied = dashboard.borrow().copy_list(kind);
            let copied = match copied {
                Ok(copied) => copied,
                Err(e) => {
                    show_toast.emit(e.into());
                    return;
                }
            };
            let show_toast = show_toast.clone();
            spawn_local(async move {
                match writeClipboard(&copied.text).await {
                    Ok(()) => show_toast.emit(copied.toast()),
                    Err(e) => show_toast.emit(Toast::error(format!("Failed to copy: {:?}", e))),
                }
            });
        })
    };

    let on_indexed_click = {
        let dashboard = dashboard.clone();
        let refresh = refresh.clone();
        let show_toast = show_toast.clone();
        Callback::from(move |e: MouseEvent| {
            let Some(button) = action_target(&e, ".action-btn.favorite") else {
                return;
            };
            let Some(domain) = button.get_attribute("data-domain") else {
                return;
            };
            let count = button
                .get_attribute("data-count")
                .and_then(|c| c.parse().ok())
                .unwrap_or(0);

            let toggle = dashboard.borrow_mut().toggle_favorite(&domain, count);
            apply_star_state(&button, toggle.is_favorite);
            refresh.force_update();
            show_toast.emit(toggle.toast);
        })
    };

    // Favorites panel changes re-sync the stars already on screen
    let after_favorites_change = {
        let dashboard = dashboard.clone();
        let indexed_ref = indexed_ref.clone();
        let refresh = refresh.clone();
        let show_toast = show_toast.clone();
        Callback::from(move |t: Toast| {
            if let Some(list) = indexed_ref.cast::<Element>() {
                sync_star_buttons(&list, &dashboard.borrow());
            }
            refresh.force_update();
            show_toast.emit(t);
        })
    };

    let on_remove_favorite = {
        let dashboard = dashboard.clone();
        let after = after_favorites_change.clone();
        Callback::from(move |domain: String| {
            let t = dashboard.borrow_mut().remove_favorite(&domain);
            after.emit(t);
        })
    };

    let on_clear_favorites = {
        let dashboard = dashboard.clone();
        let after = after_favorites_change.clone();
        Callback::from(move |_: ()| {
            let confirmed = web_sys::window()
                .and_then(|w| w.confirm_with_message("Are you sure you want to clear all favorites?").ok())
                .unwrap_or(false);
            if confirmed {
                let t = dashboard.borrow_mut().clear_favorites();
                after.emit(t);
            }
        })
    };

    let dash = dashboard.borrow();
    let snapshot = dash.snapshot();
    let lists = dash.lists();
    let favorites = dash.favorites();
    let is_submitting = dash.is_submitting();

    html! {
        <div class="container">
            <header class="header">
                <h1 class="main-title">{"Domain Index Checker"}</h1>
            </header>

            <section class="input-section card">
                <textarea
                    id="domains-input"
                    placeholder="Enter domains, one per line"
                    value={(*domains_text).clone()}
                    oninput={on_input}
                    rows="10"
                />
                <div class="input-footer">
                    <span id="domain-count" class="domain-count-label">
                        {domain_count_label(&domains_text)}
                    </span>
                    <label class="workers-label">
                        {"Workers "}
                        <select id="workers" onchange={on_workers_change}>
                            {for config.worker_choices.iter().map(|n| html! {
                                <option value={n.to_string()} selected={*n == *workers}>{*n}</option>
                            })}
                        </select>
                    </label>
                    <Button onclick={on_clear_input} variant={ButtonVariant::Secondary}>
                        {"Clear"}
                    </Button>
                    <Button onclick={on_submit} disabled={is_submitting} variant={ButtonVariant::Primary}>
                        {if is_submitting { "Processing..." } else { "Check Indexation" }}
                    </Button>
                </div>
            </section>

            <FavoritesPanel
                markup={AttrValue::from(dash.favorites_markup())}
                count={favorites.len()}
                on_remove={on_remove_favorite}
                on_copy={on_copy.reform(|_| ListKind::Favorites)}
                on_clear={on_clear_favorites}
            />

            if dash.has_started() {
                <section id="progress-section" class="progress-section card">
                    <ProgressBar badge={dash.badge()} percent={dash.percent()} />
                    <div class="stats">
                        <Stat id="stat-completed" label="Completed" value={snapshot.completed} />
                        <Stat id="stat-total" label="Total" value={snapshot.total} />
                        <Stat id="stat-indexed" label="Indexed" value={snapshot.indexed.len() as u32} />
                        <Stat id="stat-not-indexed" label="Not indexed" value={snapshot.not_indexed.len() as u32} />
                    </div>
                </section>

                <section id="results-section" class="results-section">
                    <div class="card">
                        <div class="card-header">
                            <h2 class="card-title">
                                {"Indexed "}
                                <span id="indexed-count" class="count-badge">{snapshot.indexed.len()}</span>
                            </h2>
                            <Button onclick={on_copy.reform(|_| ListKind::Indexed)} variant={ButtonVariant::Secondary}>
                                {"Copy"}
                            </Button>
                        </div>
                        <RawList
                            id="indexed-list"
                            markup={AttrValue::from(lists.indexed.clone())}
                            node_ref={indexed_ref.clone()}
                            onclick={on_indexed_click}
                        />
                    </div>

                    <div class="card">
                        <div class="card-header">
                            <h2 class="card-title">
                                {"Not indexed "}
                                <span id="not-indexed-count" class="count-badge">{snapshot.not_indexed.len()}</span>
                            </h2>
                            <Button onclick={on_copy.reform(|_| ListKind::NotIndexed)} variant={ButtonVariant::Secondary}>
                                {"Copy"}
                            </Button>
                        </div>
                        <RawList id="not-indexed-list" markup={AttrValue::from(lists.not_indexed.clone())} />
                    </div>

                    if dash.show_errors() {
                        <div id="errors-card" class="card errors-card">
                            <div class="card-header">
                                <h2 class="card-title">
                                    {"Errors "}
                                    <span id="errors-count" class="count-badge">{snapshot.errors.len()}</span>
                                </h2>
                            </div>
                            <RawList id="errors-list" markup={AttrValue::from(lists.errors.clone())} />
                        </div>
                    }
                </section>
            }

            <ApiKeysPanel api={session.api.clone()} on_toast={show_toast.clone()} />

            <ToastBanner toast={(*toast).clone()} />

            <p class="footer">
                {"Domain Index Checker v0.1.0"}
            </p>
        </div>
    }
}
