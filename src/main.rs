use clap::Parser;

#[derive(Parser)]
#[command(name = "tick", about = concat!("[>] tick v", env!("CARGO_PKG_VERSION"), " - your to-do list, plain and local"), version)]
struct Cli {
    /// Run against a different state directory
    #[arg(short = 'C', long = "dir")]
    dir: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = tick::tui::run(cli.dir.as_deref()) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
