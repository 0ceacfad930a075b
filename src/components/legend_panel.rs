use super::legend::LegendRow;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct LegendPanelProps {
    pub has_submitted: bool,
    pub has_cart: bool,
    pub has_intel: bool,
}

#[function_component]
pub fn LegendPanel(props: &LegendPanelProps) -> Html {
    html! {<div style="position:absolute; right:12px; bottom:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; min-width:150px; font-size:12px; color:#c9d1d9;">
        <div style="font-weight:600; margin-bottom:4px;">{"Legend"}</div>
        { if props.has_submitted { html!{ <LegendRow color="#22c55e" label="Submitted flag"/> } } else { html!{} } }
        { if props.has_cart { html!{ <LegendRow color="#f59e0b" label="In cart"/> } } else { html!{} } }
        { if props.has_intel { html!{ <LegendRow color="#06b6d4" label="Intel position"/> } } else { html!{} } }
        { if !props.has_submitted && !props.has_cart && !props.has_intel {
            html!{<div style="color:#8b949e;">{"Tap a cell to place a flag"}</div>}
        } else { html!{} } }
    </div>}
}
