/// Reusable UI components

use crate::dashboard::{Badge, Toast, ToastKind};
use patternfly_yew::prelude::{Alert, AlertType, Spinner};
use web_sys::Element;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ProgressBarProps {
    pub badge: Badge,
    pub percent: u8, // 0-100
}

#[function_component(ProgressBar)]
pub fn progress_bar(props: &ProgressBarProps) -> Html {
    let (width, label, running) = match props.badge {
        Badge::Percent(p) => (p.min(100), format!("{}%", p.min(100)), true),
        Badge::Complete => (props.percent.min(100), "Complete".to_string(), false),
    };

    html! {
        <div class="progress-header">
            <span id="progress-badge" class={classes!("progress-badge", running.then_some("processing"))}>
                {label}
            </span>
            if running && width < 100 {
                <Spinner />
            }
            <div class="progress-container">
                <div id="progress-bar" class="progress-fill" style={format!("width: {}%;", width)}></div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct StatProps {
    pub label: AttrValue,
    pub value: u32,
    #[prop_or_default]
    pub id: AttrValue,
}

#[function_component(Stat)]
pub fn stat(props: &StatProps) -> Html {
    html! {
        <div class="stat">
            <span id={props.id.clone()} class="stat-value">{props.value}</span>
            <span class="stat-label">{props.label.clone()}</span>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastBannerProps {
    pub toast: Option<Toast>,
}

#[function_component(ToastBanner)]
pub fn toast_banner(props: &ToastBannerProps) -> Html {
    let Some(toast) = &props.toast else {
        return html! {};
    };

    let alert_type = match toast.kind {
        ToastKind::Success => AlertType::Success,
        ToastKind::Error => AlertType::Danger,
    };

    html! {
        <div id="toast" class="toast show">
            <Alert r#type={alert_type} title={toast.message.clone()} inline={true}>
            </Alert>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct RawListProps {
    pub markup: AttrValue,
    #[prop_or_default]
    pub id: AttrValue,
    #[prop_or_default]
    pub node_ref: NodeRef,
    #[prop_or_default]
    pub onclick: Callback<MouseEvent>,
}

/// Container for markup produced by `crate::render`
#[function_component(RawList)]
pub fn raw_list(props: &RawListProps) -> Html {
    html! {
        <div id={props.id.clone()} class="domain-list" ref={props.node_ref.clone()} onclick={props.onclick.clone()}>
            {Html::from_html_unchecked(props.markup.clone())}
        </div>
    }
}

/// The action button under the click, if it matches `selector`
pub fn action_target(e: &MouseEvent, selector: &str) -> Option<Element> {
    let target: Element = e.target_dyn_into()?;
    target.closest(selector).ok().flatten()
}
