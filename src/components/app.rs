use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use yew::prelude::*;

use crate::model::{ChainInfo, GameAction, GameConfig, GameState, Phase};

use super::connect_overlay::{ConnectOverlay, Wallet};
use super::{lobby_view::LobbyView, map_view::MapView};

#[function_component(App)]
pub fn app() -> Html {
    let game_state = use_reducer(|| GameState::new(GameConfig::default()));
    let wallet = use_state(Wallet::default);
    let chain = use_state(ChainInfo::load);

    // One tick per second for the whole session: lobby countdown, play
    // clock, and intel expiry all hang off this.
    {
        let handle = game_state.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().unwrap();
            let tick = Closure::wrap(Box::new(move || {
                handle.dispatch(GameAction::TickSecond);
            }) as Box<dyn FnMut()>);
            let id = window
                .set_interval_with_callback_and_timeout_and_arguments_0(
                    tick.as_ref().unchecked_ref(),
                    1000,
                )
                .unwrap();
            let window_clone = window.clone();
            move || {
                window_clone.clear_interval_with_handle(id);
                drop(tick);
            }
        });
    }

    let disconnect = {
        let wallet = wallet.clone();
        Callback::from(move |_| wallet.set(Wallet::Disconnected))
    };

    let Some(address) = wallet.address().map(str::to_string) else {
        return html! { <ConnectOverlay wallet={wallet.clone()} /> };
    };

    html! {
        <div style="min-height:100vh; background:#0d1117; color:#c9d1d9; font-family:system-ui, sans-serif;">
            <header style="height:60px; display:flex; align-items:center; justify-content:space-between; padding:0 20px; border-bottom:1px solid #30363d; background:#161b22;">
                <span style="font-size:18px; font-weight:700; color:#58a6ff;">{"Treasure Hunt"}</span>
                <span style="display:flex; gap:10px; align-items:center; font-size:12px;">
                    <span style="border:1px solid #30363d; border-radius:12px; padding:2px 10px; color:#8b949e;">
                        { format!("{} ({})", chain.name, chain.currency) }
                    </span>
                    <button onclick={disconnect} title="Disconnect" style="border:1px solid #238636; border-radius:12px; padding:2px 10px; color:#3fb950; background:transparent; font-family:monospace; cursor:pointer;">
                        { address }
                    </button>
                </span>
            </header>
            {
                match game_state.phase {
                    Phase::Lobby { .. } => html! { <LobbyView game_state={game_state.clone()} /> },
                    Phase::Playing => html! { <MapView game_state={game_state.clone()} /> },
                }
            }
        </div>
    }
}
