mod app;
mod commands;
mod convert;
mod dismiss;
mod effects;
mod logging;
mod persistence;
mod render;

fn main() -> anyhow::Result<()> {
    logging::initialize(logging::LogDestination::File);
    app::run()
}
