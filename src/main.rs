mod app;
mod config;
mod library;
mod mood;
mod player;
mod runtime;
mod store;
mod ui;

fn main() -> anyhow::Result<()> {
    runtime::run()
}
