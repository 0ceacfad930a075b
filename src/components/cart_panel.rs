use yew::prelude::*;

use crate::model::{CellKey, GameState};
use crate::util::format_eth;

#[derive(Properties, PartialEq, Clone)]
pub struct CartPanelProps {
    pub game_state: UseReducerHandle<GameState>,
    pub on_submit: Callback<()>,
    pub on_clear: Callback<()>,
    pub on_remove: Callback<CellKey>,
}

#[function_component(CartPanel)]
pub fn cart_panel(props: &CartPanelProps) -> Html {
    let gs = (*props.game_state).clone();
    let cart: Vec<CellKey> = gs.selection.cart().cloned().collect();
    let cap = gs.selection.cap();
    let used = gs.selection.total() as u32;
    let pct = if cap > 0 { used * 100 / cap } else { 0 };
    let submit = {
        let cb = props.on_submit.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let clear = {
        let cb = props.on_clear.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div style="position:absolute; left:12px; top:12px; width:200px; background:rgba(22,27,34,0.92); border:1px solid #30363d; border-radius:8px; padding:10px; font-size:12px; color:#c9d1d9;">
        <div style="font-weight:600; margin-bottom:6px;">{"Flag Cart"}</div>
        <div style="margin-bottom:4px; color:#8b949e;">{ format!("{}/{} points used ({} left)", used, cap, gs.available_points()) }</div>
        <div style="height:6px; background:#0d1117; border-radius:3px; overflow:hidden; margin-bottom:8px;">
            <div style={format!("height:100%; width:{}%; background:{};", pct.min(100), if pct >= 100 { "#ef4444" } else { "#f59e0b" })}></div>
        </div>
        { if cart.is_empty() {
            html!{<div style="color:#8b949e; margin-bottom:8px;">{"Cart is empty"}</div>}
        } else {
            html!{<div style="max-height:180px; overflow-y:auto; margin-bottom:8px;">
                { for cart.iter().map(|key| {
                    let remove = {
                        let cb = props.on_remove.clone();
                        let key = *key;
                        Callback::from(move |_| cb.emit(key))
                    };
                    html!{<div style="display:flex; justify-content:space-between; align-items:center; margin:2px 0;">
                        <span style="font-family:monospace;">{ key.to_string() }</span>
                        <button onclick={remove} style="font-size:10px;">{"\u{2715}"}</button>
                    </div>}
                }) }
            </div>}
        } }
        <div style="margin-bottom:8px;">{ format!("Total: {}", format_eth(gs.cart_cost_eth())) }</div>
        <div style="display:flex; gap:6px;">
            <button onclick={submit} disabled={cart.is_empty()} style="flex:1;">{"Submit"}</button>
            <button onclick={clear} disabled={cart.is_empty()}>{"Clear"}</button>
        </div>
    </div>}
}
