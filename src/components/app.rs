use super::run_view::RunView;
use crate::web::load_config;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    // Read once; the board geometry is fixed for the session.
    let config = use_memo((), |_| load_config());
    html! { <RunView config={(*config).clone()} /> }
}
