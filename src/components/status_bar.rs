use yew::prelude::*;

use crate::model::{GameState, ViewMode};
use crate::util::format_time;

#[derive(Properties, PartialEq, Clone)]
pub struct StatusBarProps {
    pub game_state: UseReducerHandle<GameState>,
    pub on_back: Callback<()>,
    pub on_show_help: Callback<()>,
}

#[function_component(StatusBar)]
pub fn status_bar(props: &StatusBarProps) -> Html {
    let gs = (*props.game_state).clone();
    let back = {
        let cb = props.on_back.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let help = {
        let cb = props.on_show_help.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let (view_label, show_back) = match gs.view {
        ViewMode::Overview => ("Overview".to_string(), false),
        ViewMode::Detail { region } => (format!("Region {},{}", region.x, region.y), true),
    };
    html! {<div style="position:absolute; top:12px; left:50%; transform:translateX(-50%); background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:6px 12px; display:flex; gap:14px; align-items:center; font-size:13px; color:#c9d1d9; white-space:nowrap;">
        { if show_back { html!{<button onclick={back}>{"\u{2190} Back"}</button>} } else { html!{} } }
        <span style="font-weight:600;">{ view_label }</span>
        <span>{ format!("\u{23f1} {}", format_time(gs.time_secs)) }</span>
        <span title="Turns left">{ format!("Turns: {}", gs.turns) }</span>
        <span style="color:#22c55e;">{ format!("{} placed", gs.selection.submitted_len()) }</span>
        <span style="color:#f59e0b;">{ format!("{} in cart", gs.selection.cart_len()) }</span>
        <button onclick={help} title="How to play">{"?"}</button>
    </div>}
}
