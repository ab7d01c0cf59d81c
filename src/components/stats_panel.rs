use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatsPanelProps {
    pub status: String,
    pub score: u32,
}

#[function_component]
pub fn StatsPanel(props: &StatsPanelProps) -> Html {
    let row_style = "display:flex; align-items:center; gap:8px;"; // label | value
    let label_style = "flex:1; font-weight:500;";
    let value_style = "text-align:right; font-variant-numeric:tabular-nums; font-weight:600;";
    html! {
        <div style="background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; min-width:230px; display:flex; flex-direction:column; gap:10px; font-size:14px;">
            <div style={row_style}>
                <span style={label_style}>{"Status"}</span>
                <span id="game-status" style={value_style}>{ props.status.clone() }</span>
            </div>
            <div style={row_style}>
                <span style={format!("{} color:#d4af37;", label_style)}>{"Points"}</span>
                <span id="points" style={format!("{} color:#d4af37;", value_style)}>{ props.score }</span>
            </div>
        </div>
    }
}
