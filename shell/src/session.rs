use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::iter;
use std::path::{Path, PathBuf};

use aigstat::Aig;
use itertools::Itertools;

/// What the shell should do after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The graph currently loaded, and where it came from.
#[derive(Default)]
pub struct Session {
    loaded: Option<(PathBuf, Aig)>,
}

const HELP: &[(&str, &str)] = &[
    ("read_aiger <file>", "Load AIGER file"),
    ("print_stats [-l]", "Show statistics (-l adds the level distribution)"),
    ("write_dot <file>", "Write the network as a Graphviz file"),
    ("clear", "Clear current network"),
    ("quit", "Quit the program"),
    ("help", "Show this help"),
];

impl Session {
    /// Runs one command line, returning the text to print.
    pub fn execute(&mut self, line: &str) -> (Flow, String) {
        let mut words = line.split_whitespace();
        let command = match words.next() {
            Some(command) => command,
            None => return (Flow::Continue, String::new()),
        };
        let args = words.collect::<Vec<_>>();

        log::trace!("command {:?} {:?}", command, args);

        let text = match (command, args.as_slice()) {
            ("read_aiger", [path]) => self.read_aiger(Path::new(path)),
            ("read_aiger", _) => "Usage: read_aiger <file>".to_string(),
            ("print_stats", []) => self.print_stats(false),
            ("print_stats", ["-l"]) => self.print_stats(true),
            ("print_stats", _) => "Usage: print_stats [-l]".to_string(),
            ("write_dot", [path]) => self.write_dot(Path::new(path)),
            ("write_dot", _) => "Usage: write_dot <file>".to_string(),
            ("clear", _) => {
                self.loaded = None;
                "Cleared".to_string()
            }
            ("help", _) => help(),
            ("quit", _) | ("exit", _) => return (Flow::Quit, "Bye!".to_string()),
            (unknown, _) => format!("Unknown command: {}", unknown),
        };

        (Flow::Continue, text)
    }

    fn read_aiger(&mut self, path: &Path) -> String {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => return format!("Error loading file: {}", e),
        };

        match aigstat::load(BufReader::new(file)) {
            Ok(aig) => {
                log::info!("loaded {} ({} AND gates)", path.display(), aig.and_gates().len());
                self.loaded = Some((path.to_path_buf(), aig));
                "Successfully loaded".to_string()
            }
            Err(e) => format!("Error parsing file: {}", e),
        }
    }

    fn print_stats(&self, distribution: bool) -> String {
        let (path, aig) = match &self.loaded {
            Some(loaded) => loaded,
            None => return "Error: No network loaded. Use 'read_aiger <file>' first.".to_string(),
        };

        let name = path.file_stem().map_or_else(String::new, |stem| stem.to_string_lossy().into_owned());
        let stats = aigstat::compute_stats(aig);
        let table = if distribution { format!("{:#}", stats) } else { stats.to_string() };

        iter::once(format!("{} :", name))
            .chain(table.lines().map(|row| format!("\t\t{}", row)))
            .join("\n")
    }

    fn write_dot(&self, path: &Path) -> String {
        let aig = match &self.loaded {
            Some((_, aig)) => aig,
            None => return "Error: No network loaded. Use 'read_aiger <file>' first.".to_string(),
        };

        let result = File::create(path).and_then(|file| {
            let mut writer = BufWriter::new(file);
            aigstat::to_graphviz(aig, &mut writer)?;
            writer.flush()
        });
        match result {
            Ok(()) => format!("Wrote {}", path.display()),
            Err(e) => format!("Error writing file: {}", e),
        }
    }
}

fn help() -> String {
    iter::once("Available commands:".to_string())
        .chain(HELP.iter().map(|(usage, description)| format!("\t{:<25} {}", usage, description)))
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::{Flow, Session};
    use std::io::Write;

    fn fixture(name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("aigstat-shell-{}-{}", std::process::id(), name));
        std::fs::File::create(&path).unwrap().write_all(bytes).unwrap();
        path
    }

    #[test]
    fn stats_need_a_network() {
        let mut session = Session::default();
        let (flow, text) = session.execute("print_stats");

        assert_eq!(flow, Flow::Continue);
        assert!(text.starts_with("Error: No network loaded"));
    }

    #[test]
    fn load_and_print() {
        let path = fixture("and.aig", b"aig 3 2 0 1 1\n6\n\x02\x02");
        let mut session = Session::default();

        assert_eq!(session.execute(&format!("read_aiger {}", path.display())).1, "Successfully loaded");

        let (_, text) = session.execute("print_stats");
        let stem = path.file_stem().unwrap().to_string_lossy().into_owned();
        assert_eq!(
            text,
            format!(
                "{} :\n\t\tI / O      = 2 / 1\n\t\tLatches    = 0\n\t\tAND        = 1\n\t\tLevel      = 1",
                stem
            )
        );

        let (_, text) = session.execute("print_stats -l");
        assert!(text.ends_with("\t\tLevels:\n\t\t  0 : 2\n\t\t  1 : 1"));

        assert_eq!(session.execute("clear").1, "Cleared");
        assert!(session.execute("print_stats").1.starts_with("Error"));

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn parse_errors_are_reported() {
        let path = fixture("bad.aig", b"aig 3 2 0 1\n");
        let mut session = Session::default();

        let (flow, text) = session.execute(&format!("read_aiger {}", path.display()));
        assert_eq!(flow, Flow::Continue);
        assert_eq!(text, "Error parsing file: format error: header has 5 fields, expected 6");

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn help_lists_one_command_per_line() {
        let (_, text) = Session::default().execute("help");
        let lines = text.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 1 + super::HELP.len());
        assert_eq!(lines[0], "Available commands:");
        assert_eq!(lines[1], format!("\t{:<25} {}", "read_aiger <file>", "Load AIGER file"));
        assert!(lines.last().unwrap().starts_with("\thelp "));
    }

    #[test]
    fn usage_and_unknown_commands() {
        let mut session = Session::default();

        assert_eq!(session.execute("read_aiger").1, "Usage: read_aiger <file>");
        assert_eq!(session.execute("frobnicate now").1, "Unknown command: frobnicate");
        assert_eq!(session.execute("   ").0, Flow::Continue);
        assert!(session.execute("help").1.contains("read_aiger <file>"));
        assert_eq!(session.execute("exit").0, Flow::Quit);
    }
}
