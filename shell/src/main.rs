use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;

mod session;

use session::{Flow, Session};

#[derive(Debug, Parser)]
#[command(name = "aigstat")]
#[command(about = "Load AIGER files and report their structure")]
struct Args {
    /// AIGER file to load before the first command.
    file: Option<PathBuf>,

    /// Command to run before the prompt; may be repeated.
    #[arg(short, long = "command")]
    commands: Vec<String>,

    /// Exit after running the commands instead of prompting.
    #[arg(long)]
    batch: bool,
}

fn main() -> io::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut session = Session::default();
    let preload = args.file.iter().map(|file| format!("read_aiger {}", file.display()));

    for line in preload.chain(args.commands) {
        let (flow, text) = session.execute(&line);
        if !text.is_empty() {
            println!("{}", text);
        }
        if flow == Flow::Quit {
            return Ok(());
        }
    }

    if args.batch {
        return Ok(());
    }

    println!("aigstat v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'help' for available commands");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    loop {
        write!(stdout, ">> ")?;
        stdout.flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };

        let (flow, text) = session.execute(line.trim());
        if !text.is_empty() {
            println!("{}", text);
        }
        if flow == Flow::Quit {
            break;
        }
    }

    Ok(())
}
