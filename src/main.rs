use std::path::PathBuf;

#[derive(Debug, Default)]
struct CliArgs {
    base: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let mut clog = colog::default_builder();
    clog.filter(None, log::LevelFilter::Info);
    clog.init();

    let args = parse_args(std::env::args().skip(1).collect())?;
    let dirs = storecast::config::resolve(args.base.as_deref())?;
    storecast::app::run(dirs)
}

fn parse_args(args: Vec<String>) -> anyhow::Result<CliArgs> {
    let mut out = CliArgs::default();
    let mut index = 0;
    while index < args.len() {
        match args[index].as_str() {
            "--base" => {
                index += 1;
                let Some(value) = args.get(index) else {
                    anyhow::bail!("--base requires a directory path");
                };
                if value.trim().is_empty() {
                    anyhow::bail!("--base cannot be empty");
                }
                out.base = Some(PathBuf::from(value.trim()));
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => anyhow::bail!("unknown argument {other}"),
        }
        index += 1;
    }
    Ok(out)
}

fn print_help() {
    println!("storecast");
    println!("  --base <dir>    Directory holding resources/music and resources/announcements");
    println!("                  (defaults to $STORECAST_BASE_DIR, then the working directory)");
}
