use vega_log::prelude::*;

fn main() -> Result<()> {
    vega_log::init_with(Config::default())?;

    infof!("server starting on port {}", 8080);
    warnf!("operation failed, retrying ({} attempts left)", 3);
    errorf!("database connection failed: {}", "DB_001");

    // Below the default threshold until the level moves
    debugf!("invisible at info");
    set_log_level(Level::Debug);
    debugf!("request count {}", 42);

    flush();
    Ok(())
}
