use vega_log::infof;

const CONFIG: &str = "\
LogLevel: debug
StacktraceLevel: error
ProjectName: config-demo
JsonFormat: false
ConsoleOut: true
FileOut:
  Enable: true
  Path: ./logs/
  Name: demo
  RotationTime: 24
  RotationCount: 7
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::temp_dir().join("vega-log-demo.yaml");
    std::fs::write(&path, CONFIG)?;

    vega_log::init_from_file(&path)?;

    vega_log::info("configured from YAML");
    infof!("file output lands under ./logs/ as {}.<timestamp>.log", "demo");
    vega_log::flush();
    Ok(())
}
