use yew::prelude::*;

use crate::model::{GameAction, GameState, Phase};
use crate::util::{format_eth, format_time};

#[derive(Properties, PartialEq, Clone)]
pub struct LobbyViewProps {
    pub game_state: UseReducerHandle<GameState>,
}

#[function_component(LobbyView)]
pub fn lobby_view(props: &LobbyViewProps) -> Html {
    let gs = (*props.game_state).clone();
    let starts_in = match gs.phase {
        Phase::Lobby { starts_in_secs } => starts_in_secs,
        Phase::Playing => 0,
    };
    let join = {
        let handle = props.game_state.clone();
        Callback::from(move |_| handle.dispatch(GameAction::JoinGame))
    };
    html! {
        <div style="display:flex; align-items:center; justify-content:center; min-height:calc(100vh - 60px); padding:16px;">
            <div style="background:rgba(22,27,34,0.95); border:1px solid #30363d; border-radius:14px; padding:28px 36px; max-width:440px; width:100%; text-align:center; color:#c9d1d9;">
                <h2 style="margin:0 0 8px 0; font-size:24px; color:#58a6ff;">{"Treasure Hunt"}</h2>
                <p style="margin:0 0 16px 0; opacity:0.85;">{"Waiting for hunters to gather..."}</p>
                <div style="display:flex; justify-content:space-around; margin-bottom:16px;">
                    <div>
                        <div style="font-size:22px; font-weight:700;">{ format!("{}/{}", gs.config.current_players, gs.config.players_needed) }</div>
                        <div style="font-size:12px; color:#8b949e;">{"Players"}</div>
                    </div>
                    <div>
                        <div style="font-size:22px; font-weight:700; color:#f59e0b;">{ format_eth(gs.config.prize_pool_eth) }</div>
                        <div style="font-size:12px; color:#8b949e;">{"Prize pool"}</div>
                    </div>
                    <div>
                        <div style="font-size:22px; font-weight:700; color:#22c55e;">{ format_time(starts_in) }</div>
                        <div style="font-size:12px; color:#8b949e;">{"Starts in"}</div>
                    </div>
                </div>
                <button onclick={join} style="width:100%; padding:10px; font-size:15px;">{"Join the Hunt"}</button>
                <ul style="margin:16px 0 0 18px; padding:0; list-style:disc; text-align:left; font-size:13px; display:flex; flex-direction:column; gap:4px; color:#8b949e;">
                    <li>{ format!("Plant up to {} flags across the map.", gs.config.max_points) }</li>
                    <li>{ format!("Each flag costs {}.", format_eth(gs.config.point_cost_eth)) }</li>
                    <li>{"Closest flag to the treasure takes the pot."}</li>
                </ul>
            </div>
        </div>
    }
}
