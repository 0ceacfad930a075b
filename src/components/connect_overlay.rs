use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use yew::prelude::*;

use crate::util::clog;

/// Address reported by the stand-in wallet.
pub const MOCK_ADDRESS: &str = "0x1234...5678";

const CONNECT_DELAY_MS: i32 = 1500;

/// Connection state for the stand-in wallet. No provider is ever
/// contacted; `Connected` is reached after a fixed delay. Owned by the
/// root component so the whole app gates on it.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Wallet {
    #[default]
    Disconnected,
    Connecting,
    Connected { address: String },
}

impl Wallet {
    /// The gate predicate: only a connected wallet yields an address.
    pub fn address(&self) -> Option<&str> {
        match self {
            Wallet::Connected { address } => Some(address),
            Wallet::Disconnected | Wallet::Connecting => None,
        }
    }
}

/// Id of the in-flight connect timeout, if any. `disarm` hands it out at
/// most once so teardown and the fired callback never clear twice.
#[derive(Default)]
pub struct PendingConnect {
    id: Option<i32>,
}

impl PendingConnect {
    pub fn arm(&mut self, id: i32) {
        self.id = Some(id);
    }

    pub fn is_armed(&self) -> bool {
        self.id.is_some()
    }

    pub fn disarm(&mut self) -> Option<i32> {
        self.id.take()
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct ConnectOverlayProps {
    pub wallet: UseStateHandle<Wallet>,
}

/// Full-page gate shown until a wallet is connected.
#[function_component(ConnectOverlay)]
pub fn connect_overlay(props: &ConnectOverlayProps) -> Html {
    let pending = use_mut_ref(PendingConnect::default);
    let timer_cb = use_mut_ref(|| None::<Closure<dyn FnMut()>>);

    // Unmounting mid-connect cancels the timeout.
    {
        let pending = pending.clone();
        let timer_cb = timer_cb.clone();
        use_effect_with((), move |_| {
            move || {
                if let Some(id) = pending.borrow_mut().disarm() {
                    if let Some(win) = web_sys::window() {
                        win.clear_timeout_with_handle(id);
                    }
                }
                timer_cb.borrow_mut().take();
            }
        });
    }

    let connect = {
        let wallet = props.wallet.clone();
        let pending = pending.clone();
        let timer_cb = timer_cb.clone();
        Callback::from(move |_| {
            if pending.borrow().is_armed() {
                return;
            }
            wallet.set(Wallet::Connecting);
            let done = {
                let wallet = wallet.clone();
                let pending = pending.clone();
                Closure::wrap(Box::new(move || {
                    pending.borrow_mut().disarm();
                    clog(&format!("wallet connected: {}", MOCK_ADDRESS));
                    wallet.set(Wallet::Connected {
                        address: MOCK_ADDRESS.to_string(),
                    });
                }) as Box<dyn FnMut()>)
            };
            if let Some(win) = web_sys::window() {
                if let Ok(id) = win.set_timeout_with_callback_and_timeout_and_arguments_0(
                    done.as_ref().unchecked_ref(),
                    CONNECT_DELAY_MS,
                ) {
                    pending.borrow_mut().arm(id);
                }
            }
            *timer_cb.borrow_mut() = Some(done);
        })
    };

    html! {
        <div style="display:flex; align-items:center; justify-content:center; min-height:100vh;">
            <div style="background:rgba(22,27,34,0.95); border:1px solid #30363d; border-radius:14px; padding:28px 36px; max-width:380px; width:100%; text-align:center; color:#c9d1d9;">
                <h2 style="margin:0 0 8px 0; font-size:24px; color:#58a6ff;">{"Treasure Hunt"}</h2>
                <p style="margin:0 0 16px 0; opacity:0.85;">{"Connect a wallet to enter the lobby."}</p>
                { if *props.wallet == Wallet::Connecting {
                    html!{<div style="color:#8b949e; padding:10px;">{"Connecting..."}</div>}
                } else {
                    html!{<button onclick={connect} style="width:100%; padding:10px; font-size:15px;">{"Connect Wallet"}</button>}
                } }
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_a_connected_wallet_passes_the_gate() {
        assert_eq!(Wallet::default(), Wallet::Disconnected);
        assert_eq!(Wallet::Disconnected.address(), None);
        assert_eq!(Wallet::Connecting.address(), None);
        let w = Wallet::Connected {
            address: MOCK_ADDRESS.to_string(),
        };
        assert_eq!(w.address(), Some(MOCK_ADDRESS));
    }

    #[test]
    fn disconnect_resets_to_the_gate() {
        let mut w = Wallet::Connected {
            address: MOCK_ADDRESS.to_string(),
        };
        w = Wallet::Disconnected;
        assert_eq!(w, Wallet::default());
        assert_eq!(w.address(), None);
    }

    #[test]
    fn pending_timeout_is_cleared_at_most_once() {
        let mut p = PendingConnect::default();
        assert!(!p.is_armed());
        p.arm(7);
        assert!(p.is_armed());
        assert_eq!(p.disarm(), Some(7));
        assert!(!p.is_armed());
        assert_eq!(p.disarm(), None);
    }
}
