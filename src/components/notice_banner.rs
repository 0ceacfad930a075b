use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct NoticeBannerProps {
    pub notice: Option<String>,
    pub on_dismiss: Callback<()>,
}

/// Transient in-page message in place of a blocking browser alert.
#[function_component(NoticeBanner)]
pub fn notice_banner(props: &NoticeBannerProps) -> Html {
    let Some(text) = &props.notice else {
        return html! {};
    };
    let dismiss = {
        let cb = props.on_dismiss.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div style="position:absolute; top:56px; left:50%; transform:translateX(-50%); background:rgba(69,26,26,0.95); border:1px solid #ef4444; border-radius:8px; padding:8px 12px; display:flex; gap:10px; align-items:center; font-size:13px; color:#fecaca; max-width:80%;">
        <span>{ text }</span>
        <button onclick={dismiss}>{"\u{2715}"}</button>
    </div>}
}
