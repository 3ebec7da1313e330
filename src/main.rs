use clap::Parser;
use cloze::prompt::TermPrompt;
use std::path::PathBuf;
use std::process::exit;

/// Quiz yourself on the code blocks in your Markdown notes.
#[derive(Parser)]
#[command(name = "cloze", version, about)]
struct Cli {
    /// Working directory holding .clozerc and the files to scan
    #[arg(short = 'C', long = "dir", default_value = ".")]
    dir: PathBuf,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let mut rng = rand::thread_rng();
    let mut prompt = TermPrompt;

    if let Err(e) = cloze::session::run(&cli.dir, &mut rng, &mut prompt) {
        eprintln!("Error: {e:#}");
        exit(1);
    }
}
