use std::collections::BTreeSet;
use yew::prelude::*;

use crate::model::{CellKey, GameState, IntelScope, ViewMode};
use crate::util::format_eth;

/// Mock intel feed: a handful of random distinct positions scoped to the
/// current view. A real build would fetch these from the hunt contract.
pub fn mock_positions(gs: &GameState) -> BTreeSet<CellKey> {
    pick_positions(gs, |n| (js_sys::Math::random() * n as f64) as u32)
}

/// The target is capped at the grid capacity so the distinct-picks loop
/// terminates for any configuration. Randomness is injected to keep this
/// exercisable off-browser.
fn pick_positions(gs: &GameState, mut rand_below: impl FnMut(u32) -> u32) -> BTreeSet<CellKey> {
    let mut picked = BTreeSet::new();
    match gs.view {
        ViewMode::Overview => {
            let grid = gs.config.region_grid;
            let target = (grid * grid).min(3) as usize;
            while picked.len() < target {
                picked.insert(CellKey::Region(crate::model::RegionPos {
                    x: rand_below(grid),
                    y: rand_below(grid),
                }));
            }
        }
        ViewMode::Detail { region } => {
            let grid = gs.config.cell_grid;
            let target = (grid * grid).min(2) as usize;
            while picked.len() < target {
                picked.insert(CellKey::Flag {
                    region,
                    x: rand_below(grid),
                    y: rand_below(grid),
                });
            }
        }
    }
    picked
}

#[derive(Properties, PartialEq, Clone)]
pub struct IntelPanelProps {
    pub game_state: UseReducerHandle<GameState>,
    pub on_purchase: Callback<()>,
    pub on_hide: Callback<()>,
    pub on_buy_turns: Callback<()>,
}

#[function_component(IntelPanel)]
pub fn intel_panel(props: &IntelPanelProps) -> Html {
    let gs = (*props.game_state).clone();
    let purchase = {
        let cb = props.on_purchase.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let hide = {
        let cb = props.on_hide.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let buy_turns = {
        let cb = props.on_buy_turns.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let scope_label = match gs.view {
        ViewMode::Overview => "this overview",
        ViewMode::Detail { .. } => "this region",
    };
    html! {<div style="position:absolute; right:12px; top:12px; width:190px; background:rgba(22,27,34,0.92); border:1px solid #30363d; border-radius:8px; padding:10px; font-size:12px; color:#c9d1d9;">
        <div style="font-weight:600; margin-bottom:6px;">{"Player Intel"}</div>
        { match gs.active_snapshot() {
            Some(snap) => {
                let left = snap.expires_at_secs.saturating_sub(gs.time_secs);
                let scope = match snap.scope {
                    IntelScope::Overview => "overview".to_string(),
                    IntelScope::Detail { region } => format!("region {},{}", region.x, region.y),
                };
                html!{<>
                    <div style="color:#06b6d4; margin-bottom:4px;">{ format!("{} positions ({})", snap.positions.len(), scope) }</div>
                    <div style="color:#8b949e; margin-bottom:8px;">{ format!("Expires in {}s", left) }</div>
                    <button onclick={hide} style="width:100%;">{"Hide Intel"}</button>
                </>}
            }
            None => html!{<>
                <div style="color:#8b949e; margin-bottom:8px;">{ format!("Reveal other players' flags in {}.", scope_label) }</div>
                <button onclick={purchase} disabled={gs.turns == 0} style="width:100%;">
                    { format!("Buy Intel ({}, 1 turn)", format_eth(gs.config.intel_cost_eth)) }
                </button>
            </>}
        } }
        <div style="border-top:1px solid #30363d; margin-top:10px; padding-top:8px;">
            <div style="margin-bottom:4px;">{ format!("Turns left: {}", gs.turns) }</div>
            <button onclick={buy_turns} style="width:100%;">
                { format!("+{} turns ({})", gs.config.turns_per_purchase, format_eth(gs.config.point_cost_eth * gs.config.turns_per_purchase as f64)) }
            </button>
        </div>
    </div>}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GameConfig, GameState, RegionPos};

    // Deterministic coordinate feed; cycles enough distinct pairs for any
    // target the picker can ask for.
    fn scripted_rand() -> impl FnMut(u32) -> u32 {
        let mut feed = [0, 0, 1, 1, 2, 2, 3, 3, 0, 1, 1, 2].into_iter().cycle();
        move |n: u32| feed.next().unwrap_or(0) % n.max(1)
    }

    #[test]
    fn overview_picks_three_distinct_regions() {
        let gs = GameState::new(GameConfig::default());
        let picked = pick_positions(&gs, scripted_rand());
        assert_eq!(picked.len(), 3);
        assert!(picked.iter().all(|k| matches!(k, CellKey::Region(_))));
    }

    #[test]
    fn target_is_capped_by_the_grid_capacity() {
        let mut config = GameConfig::default();
        config.region_grid = 1;
        config.cell_grid = 1;
        let mut gs = GameState::new(config);

        let picked = pick_positions(&gs, scripted_rand());
        assert_eq!(picked.len(), 1);

        gs.view = ViewMode::Detail {
            region: RegionPos { x: 0, y: 0 },
        };
        let picked = pick_positions(&gs, scripted_rand());
        assert_eq!(picked.len(), 1);
    }

    #[test]
    fn detail_picks_stay_in_the_open_region() {
        let mut gs = GameState::new(GameConfig::default());
        let region = RegionPos { x: 2, y: 1 };
        gs.view = ViewMode::Detail { region };
        let picked = pick_positions(&gs, scripted_rand());
        assert_eq!(picked.len(), 2);
        for key in &picked {
            match key {
                CellKey::Flag { region: r, .. } => assert_eq!(*r, region),
                other => panic!("unexpected key {other:?}"),
            }
        }
    }
}
