//! Core data model for the treasure hunt prototype.
//! Everything the reducer owns is plain data; canvas/camera state lives in
//! `crate::state` and mock randomness stays at the component boundary so the
//! reducer is deterministic.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use yew::Reducible;

use crate::selection::{Selection, Toggle};
use crate::util::clog;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionPos {
    pub x: u32,
    pub y: u32,
}

/// Identifier for a selectable map location. `Region` keys scope to the
/// coarse overview grid; `Flag` keys name one cell inside a region. The
/// string forms (`main-x-y`, `flag-rx-ry-x-y`) mirror what the mock
/// contract expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CellKey {
    Region(RegionPos),
    Flag { region: RegionPos, x: u32, y: u32 },
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            CellKey::Region(r) => write!(f, "main-{}-{}", r.x, r.y),
            CellKey::Flag { region, x, y } => {
                write!(f, "flag-{}-{}-{}-{}", region.x, region.y, x, y)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseCellKeyError;

impl fmt::Display for ParseCellKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unrecognized cell key")
    }
}

impl FromStr for CellKey {
    type Err = ParseCellKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('-');
        let tag = parts.next().ok_or(ParseCellKeyError)?;
        let nums: Vec<u32> = parts
            .map(|p| p.parse().map_err(|_| ParseCellKeyError))
            .collect::<Result<_, _>>()?;
        match (tag, nums.as_slice()) {
            ("main", [x, y]) => Ok(CellKey::Region(RegionPos { x: *x, y: *y })),
            ("flag", [rx, ry, x, y]) => Ok(CellKey::Flag {
                region: RegionPos { x: *rx, y: *ry },
                x: *x,
                y: *y,
            }),
            _ => Err(ParseCellKeyError),
        }
    }
}

/// Two-level map navigation: the
/// overview shows regions, the detail view shows cells of one region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewMode {
    Overview,
    Detail { region: RegionPos },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Lobby { starts_in_secs: u64 },
    Playing,
}

/// Every tunable the map widget and mock economy read; one config struct so
/// nothing is hardcoded per view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Overview grid is region_grid x region_grid.
    pub region_grid: u32,
    /// Each region holds cell_grid x cell_grid selectable cells.
    pub cell_grid: u32,
    /// Contract limit: submitted + cart may never exceed this.
    pub max_points: u32,
    pub point_cost_eth: f64,
    pub intel_cost_eth: f64,
    pub intel_duration_secs: u64,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub lobby_countdown_secs: u64,
    pub starting_turns: u32,
    pub turns_per_purchase: u32,
    pub players_needed: u32,
    pub current_players: u32,
    pub prize_pool_eth: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            region_grid: 4,
            cell_grid: 4,
            max_points: 50,
            point_cost_eth: 0.001,
            intel_cost_eth: 0.005,
            intel_duration_secs: 30,
            canvas_width: 600,
            canvas_height: 600,
            lobby_countdown_secs: 120,
            starting_turns: 5,
            turns_per_purchase: 5,
            players_needed: 6,
            current_players: 3,
            prize_pool_eth: 0.5,
        }
    }
}

/// Chain metadata supplied by the wallet host. Configuration only; no
/// behavior depends on it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChainInfo {
    pub chain_id: u64,
    pub name: String,
    pub currency: String,
}

impl Default for ChainInfo {
    fn default() -> Self {
        Self {
            chain_id: 8453,
            name: "Base".into(),
            currency: "ETH".into(),
        }
    }
}

impl ChainInfo {
    /// Host override via localStorage, falling back to the embedded default.
    pub fn load() -> Self {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                if let Ok(Some(raw)) = store.get_item("th_chain") {
                    if let Ok(chain) = serde_json::from_str(&raw) {
                        return chain;
                    }
                }
            }
        }
        Self::default()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntelScope {
    Overview,
    Detail { region: RegionPos },
}

/// A purchased reveal of mock player positions. Expiry is an explicit
/// game-time deadline checked on tick, not a free-running timeout.
#[derive(Clone, Debug, PartialEq)]
pub struct IntelSnapshot {
    pub id: u64,
    pub taken_at_secs: u64,
    pub expires_at_secs: u64,
    pub scope: IntelScope,
    pub positions: BTreeSet<CellKey>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub config: GameConfig,
    pub phase: Phase,
    pub view: ViewMode,
    pub selection: Selection,
    pub turns: u32,
    pub snapshots: Vec<IntelSnapshot>,
    pub active_snapshot: Option<u64>,
    pub next_snapshot_id: u64,
    /// Seconds of play time; drives intel expiry and the HUD clock.
    pub time_secs: u64,
    /// How many submit transactions this session has made.
    pub submissions: u32,
    /// Blocking feedback banner (capacity errors, submit confirmations).
    pub notice: Option<String>,
    pub version: u64,
}

impl GameState {
    pub fn new(config: GameConfig) -> Self {
        let selection = Selection::new(config.max_points);
        let turns = config.starting_turns;
        let lobby = config.lobby_countdown_secs;
        Self {
            config,
            phase: Phase::Lobby {
                starts_in_secs: lobby,
            },
            view: ViewMode::Overview,
            selection,
            turns,
            snapshots: Vec::new(),
            active_snapshot: None,
            next_snapshot_id: 0,
            time_secs: 0,
            submissions: 0,
            notice: None,
            version: 0,
        }
    }

    pub fn active_snapshot(&self) -> Option<&IntelSnapshot> {
        let id = self.active_snapshot?;
        self.snapshots.iter().find(|s| s.id == id)
    }

    pub fn cart_cost_eth(&self) -> f64 {
        self.selection.cart_len() as f64 * self.config.point_cost_eth
    }

    pub fn available_points(&self) -> u32 {
        self.config
            .max_points
            .saturating_sub(self.selection.total() as u32)
    }
}

/// Count flag keys per region; used for the overview badges.
pub fn tally_by_region<'a, I>(keys: I) -> BTreeMap<RegionPos, u32>
where
    I: IntoIterator<Item = &'a CellKey>,
{
    let mut tally = BTreeMap::new();
    for key in keys {
        if let CellKey::Flag { region, .. } = key {
            *tally.entry(*region).or_insert(0) += 1;
        }
    }
    tally
}

#[derive(Clone, Debug)]
pub enum GameAction {
    /// Once per elapsed real second; drives the lobby countdown, the play
    /// clock, and intel expiry.
    TickSecond,
    JoinGame,
    OpenRegion { region: RegionPos },
    BackToOverview,
    ToggleCell { key: CellKey },
    SubmitCart,
    ClearCart,
    /// Positions are generated at the component boundary (randomness lives
    /// there); the reducer only records and scopes them.
    PurchaseIntel { positions: BTreeSet<CellKey> },
    HideIntel,
    BuyTurns,
    DismissNotice,
}

impl Reducible for GameState {
    type Action = GameAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use GameAction::*;
        let mut new = (*self).clone();
        match action {
            TickSecond => match new.phase {
                Phase::Lobby { starts_in_secs } => {
                    if starts_in_secs > 1 {
                        new.phase = Phase::Lobby {
                            starts_in_secs: starts_in_secs - 1,
                        };
                    } else {
                        new.phase = Phase::Playing;
                    }
                }
                Phase::Playing => {
                    new.time_secs = new.time_secs.saturating_add(1);
                    let expired = new
                        .active_snapshot()
                        .is_some_and(|snap| new.time_secs >= snap.expires_at_secs);
                    if expired {
                        new.active_snapshot = None;
                    }
                }
            },
            JoinGame => {
                if let Phase::Lobby { .. } = new.phase {
                    new.phase = Phase::Playing;
                }
            }
            OpenRegion { region } => {
                if new.view == ViewMode::Overview
                    && region.x < new.config.region_grid
                    && region.y < new.config.region_grid
                {
                    new.view = ViewMode::Detail { region };
                } else {
                    return self;
                }
            }
            BackToOverview => {
                if let ViewMode::Detail { .. } = new.view {
                    new.view = ViewMode::Overview;
                } else {
                    return self;
                }
            }
            ToggleCell { key } => match new.selection.toggle(key) {
                Ok(Toggle::Added) | Ok(Toggle::Removed) => {
                    new.notice = None;
                }
                Ok(Toggle::AlreadySubmitted) => return self,
                Err(err) => {
                    new.notice = Some(err.to_string());
                }
            },
            SubmitCart => {
                let moved = new.selection.submit();
                if moved == 0 {
                    return self;
                }
                new.submissions += 1;
                clog(&format!("submitted {} points", moved));
                new.notice = Some(format!(
                    "Successfully submitted {} points to the contract!",
                    moved
                ));
            }
            ClearCart => {
                new.selection.clear_cart();
            }
            PurchaseIntel { positions } => {
                if new.turns == 0 {
                    return self;
                }
                new.turns -= 1;
                let scope = match new.view {
                    ViewMode::Overview => IntelScope::Overview,
                    ViewMode::Detail { region } => IntelScope::Detail { region },
                };
                let id = new.next_snapshot_id;
                new.next_snapshot_id += 1;
                new.snapshots.push(IntelSnapshot {
                    id,
                    taken_at_secs: new.time_secs,
                    expires_at_secs: new.time_secs + new.config.intel_duration_secs,
                    scope,
                    positions,
                });
                new.active_snapshot = Some(id);
            }
            HideIntel => {
                new.active_snapshot = None;
            }
            BuyTurns => {
                new.turns += new.config.turns_per_purchase;
            }
            DismissNotice => {
                new.notice = None;
            }
        }
        new.version = new.version.wrapping_add(1);
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn flag(rx: u32, ry: u32, x: u32, y: u32) -> CellKey {
        CellKey::Flag {
            region: RegionPos { x: rx, y: ry },
            x,
            y,
        }
    }

    fn playing_state() -> Rc<GameState> {
        let mut gs = GameState::new(GameConfig::default());
        gs.phase = Phase::Playing;
        Rc::new(gs)
    }

    #[test]
    fn cell_key_string_forms() {
        let region = CellKey::Region(RegionPos { x: 2, y: 3 });
        assert_eq!(region.to_string(), "main-2-3");
        assert_eq!("main-2-3".parse::<CellKey>(), Ok(region));

        let f = flag(1, 2, 0, 3);
        assert_eq!(f.to_string(), "flag-1-2-0-3");
        assert_eq!("flag-1-2-0-3".parse::<CellKey>(), Ok(f));

        assert!("flag-1-2".parse::<CellKey>().is_err());
        assert!("tower-1-2".parse::<CellKey>().is_err());
    }

    #[test]
    fn open_region_rejects_out_of_bounds() {
        let gs = playing_state();
        let gs = gs.reduce(GameAction::OpenRegion {
            region: RegionPos { x: 4, y: 0 },
        });
        assert_eq!(gs.view, ViewMode::Overview);

        let gs = gs.reduce(GameAction::OpenRegion {
            region: RegionPos { x: 3, y: 3 },
        });
        assert_eq!(
            gs.view,
            ViewMode::Detail {
                region: RegionPos { x: 3, y: 3 }
            }
        );
    }

    #[test]
    fn back_returns_to_overview_and_keeps_selection() {
        let gs = playing_state();
        let gs = gs.reduce(GameAction::OpenRegion {
            region: RegionPos { x: 0, y: 0 },
        });
        let gs = gs.reduce(GameAction::ToggleCell { key: flag(0, 0, 1, 1) });
        let gs = gs.reduce(GameAction::BackToOverview);
        assert_eq!(gs.view, ViewMode::Overview);
        assert_eq!(gs.selection.cart_len(), 1);
    }

    #[test]
    fn capacity_error_sets_notice() {
        let mut config = GameConfig::default();
        config.max_points = 1;
        let mut gs = GameState::new(config);
        gs.phase = Phase::Playing;
        let gs = Rc::new(gs);
        let gs = gs.reduce(GameAction::ToggleCell { key: flag(0, 0, 0, 0) });
        assert_eq!(gs.notice, None);
        let gs = gs.reduce(GameAction::ToggleCell { key: flag(0, 0, 0, 1) });
        assert!(gs.notice.as_deref().unwrap_or("").contains("Maximum 1"));
        assert_eq!(gs.selection.cart_len(), 1);
    }

    #[test]
    fn submit_moves_cart_and_counts_transaction() {
        let gs = playing_state();
        let gs = gs.reduce(GameAction::ToggleCell { key: flag(0, 0, 0, 0) });
        let gs = gs.reduce(GameAction::ToggleCell { key: flag(1, 0, 2, 2) });
        let gs = gs.reduce(GameAction::SubmitCart);
        assert_eq!(gs.selection.cart_len(), 0);
        assert_eq!(gs.selection.submitted_len(), 2);
        assert_eq!(gs.submissions, 1);

        // Submitting again with an empty cart is a no-op.
        let again = gs.clone().reduce(GameAction::SubmitCart);
        assert_eq!(again.submissions, 1);
        assert_eq!(again.version, gs.version);
    }

    #[test]
    fn intel_expires_on_tick_not_before() {
        let gs = playing_state();
        let gs = gs.reduce(GameAction::PurchaseIntel {
            positions: BTreeSet::from([CellKey::Region(RegionPos { x: 1, y: 1 })]),
        });
        assert!(gs.active_snapshot().is_some());
        assert_eq!(gs.turns, GameConfig::default().starting_turns - 1);

        let mut gs = gs;
        for _ in 0..29 {
            gs = gs.reduce(GameAction::TickSecond);
            assert!(gs.active_snapshot().is_some());
        }
        gs = gs.reduce(GameAction::TickSecond);
        assert!(gs.active_snapshot().is_none());
        // The snapshot record itself is kept for the panel history.
        assert_eq!(gs.snapshots.len(), 1);
    }

    #[test]
    fn intel_requires_a_turn() {
        let mut config = GameConfig::default();
        config.starting_turns = 0;
        let mut gs = GameState::new(config);
        gs.phase = Phase::Playing;
        let gs = Rc::new(gs).reduce(GameAction::PurchaseIntel {
            positions: BTreeSet::new(),
        });
        assert!(gs.snapshots.is_empty());
    }

    #[test]
    fn lobby_counts_down_to_playing() {
        let mut config = GameConfig::default();
        config.lobby_countdown_secs = 2;
        let gs = Rc::new(GameState::new(config));
        let gs = gs.reduce(GameAction::TickSecond);
        assert_eq!(gs.phase, Phase::Lobby { starts_in_secs: 1 });
        let gs = gs.reduce(GameAction::TickSecond);
        assert_eq!(gs.phase, Phase::Playing);
    }

    #[test]
    fn tally_groups_flags_by_region() {
        let keys = [
            flag(0, 0, 0, 0),
            flag(0, 0, 1, 1),
            flag(2, 1, 0, 0),
            CellKey::Region(RegionPos { x: 3, y: 3 }),
        ];
        let tally = tally_by_region(keys.iter());
        assert_eq!(tally.get(&RegionPos { x: 0, y: 0 }), Some(&2));
        assert_eq!(tally.get(&RegionPos { x: 2, y: 1 }), Some(&1));
        assert_eq!(tally.get(&RegionPos { x: 3, y: 3 }), None);
    }
}
