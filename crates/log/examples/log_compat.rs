use vega_log::compat::LogBridge;
use vega_log::Config;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::default();
    config.set_project_name("compat-demo");
    vega_log::init_with(config)?;
    LogBridge::init()?;

    // Records emitted through the `log` facade land in the same pipeline
    log::info!("hello from the log crate");
    log::warn!("rotation and formatting still apply");
    log::debug!("filtered by the facade's threshold");

    vega_log::flush();
    Ok(())
}
