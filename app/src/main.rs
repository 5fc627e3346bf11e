#![allow(non_snake_case)]

mod app;
mod content;
mod nav;
mod relay;
mod sections;
mod theme;
mod typewriter;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("starting portfolio");
    unfold_platform::run_desktop_app("Vignesh Masani - Portfolio", app::app)
}
