use env_logger::Env;
use log::LevelFilter;

pub mod font;
pub mod measure;
pub mod opt;
pub mod render;
pub mod report;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "GLYPH_BOUNDS_LOG";

/// Set up CLI
pub fn init<T: clap::Parser>() -> color_eyre::Result<T> {
    color_eyre::install()?;
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .format_timestamp(None)
        .parse_env(Env::new().filter(LOG_ENV))
        .init();
    let args = T::parse();
    Ok(args)
}
