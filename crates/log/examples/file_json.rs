use vega_log::{Config, Level};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::default();
    config.enable_json_format();
    config.set_file_out("./logs/", "json_demo", 24, 7);
    vega_log::init_with(config)?;

    vega_log::info("logging to ./logs/ with daily rotation");

    // Simulate application work
    for batch in 0..10 {
        vega_log::infof!("processing batch {}", batch);
        std::thread::sleep(std::time::Duration::from_millis(100));
    }

    vega_log::set_log_level(Level::Warn);
    vega_log::infof!("suppressed by the new threshold");
    vega_log::warnf!("still visible");

    vega_log::flush();
    Ok(())
}
