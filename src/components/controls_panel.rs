use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub label: String,
    pub on_control: Callback<()>,
}

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let control_cb = {
        let cb = props.on_control.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div style="background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; min-width:200px; display:flex; flex-direction:column; gap:6px;">
        <button id="game-control-btn" onclick={control_cb}>{ props.label.clone() }</button>
        <div style="font-size:11px; opacity:0.7;">{"Arrow keys steer the snake"}</div>
    </div>}
}
