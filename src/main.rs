use clap::Parser;
use lessonbox::{
    config::AppConfig,
    ui::app::App,
    util::{hook::set_panic_hook, log::initialize_logging},
};

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> color_eyre::Result<()> {
    let config = setup()?;

    let mut app = App::new(config)?;
    app.run().await
}

fn setup() -> color_eyre::Result<AppConfig> {
    color_eyre::install()?;
    dotenv::dotenv().ok();
    let config = AppConfig::parse();
    set_panic_hook();
    initialize_logging(&config)?;
    Ok(config)
}
