use yew_snake::components::App;

fn main() {
    yew_snake::util::init_logging(log::LevelFilter::Info);
    yew::Renderer::<App>::new().render();
}
