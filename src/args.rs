use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    StartGame,
    Formation(String),
    Lineup(String),
    Keys(String),
    Routine(String),
    SelectMiis,
    ListRoutines,
}

#[derive(Debug)]
pub struct Args {
    pub mode: Mode,
    pub debug_mode: bool,
    pub dry_run: bool,
    pub options_path: Option<PathBuf>,
    /// Mii picks, run alone or ahead of `--formation`.
    pub miis: Option<String>,
}

impl Args {
    pub fn parse() -> Option<Self> {
        Self::parse_from(env::args().skip(1))
    }

    pub fn parse_from(args: impl IntoIterator<Item = String>) -> Option<Self> {
        let mut mode: Option<Mode> = None;
        let mut debug_mode: bool = false;
        let mut dry_run: bool = false;
        let mut options_path: Option<PathBuf> = None;
        let mut miis: Option<String> = None;

        for arg in args {
            if arg == "--help" || arg == "-h" {
                print_help();
                return None;
            } else if arg == "--version" || arg == "-v" {
                println!("AutoTeam Input v{}", env!("CARGO_PKG_VERSION"));
                return None;
            } else if arg == "--debug" {
                debug_mode = true;
            } else if arg == "--dry-run" || arg == "-n" {
                dry_run = true;
            } else if arg == "--start-game" {
                mode = Some(Mode::StartGame);
            } else if arg == "--list-routines" {
                mode = Some(Mode::ListRoutines);
            } else if let Some(val) = arg.strip_prefix("--formation=") {
                mode = Some(Mode::Formation(val.to_string()));
            } else if let Some(val) = arg.strip_prefix("--lineup=") {
                mode = Some(Mode::Lineup(val.to_string()));
            } else if let Some(val) = arg.strip_prefix("--keys=") {
                mode = Some(Mode::Keys(val.to_string()));
            } else if let Some(val) = arg.strip_prefix("--routine=") {
                if val.is_empty() {
                    eprintln!("❌ --routine needs a name");
                    return None;
                }
                mode = Some(Mode::Routine(val.to_string()));
            } else if let Some(val) = arg.strip_prefix("--miis=") {
                miis = Some(val.to_string());
            } else if let Some(val) = arg.strip_prefix("--options=") {
                options_path = Some(PathBuf::from(val));
            } else {
                eprintln!("❌ Unknown argument: {}", arg);
                print_help();
                return None;
            }
        }

        if mode.is_none() && miis.is_some() {
            mode = Some(Mode::SelectMiis);
        }
        let Some(mode) = mode else {
            eprintln!("❌ Nothing to do: pick an action");
            print_help();
            return None;
        };

        Some(Args {
            mode,
            debug_mode,
            dry_run,
            options_path,
            miis,
        })
    }
}

fn print_help() {
    println!("🎮 AutoTeam keyboard automation");
    println!();
    println!("USAGE:");
    println!("    autoteam-input <ACTION> [FLAGS]");
    println!();
    println!("ACTIONS:");
    println!("    --start-game             Hold Minus and press A to start the match");
    println!("    --formation=AWAY/HOME    Arrange both lineups, e.g. --formation=3,1,2/2,1");
    println!("    --lineup=TARGETS         Arrange the lineup on screen, e.g. --lineup=2,1");
    println!("    --miis=TOTAL:AWAY/HOME   Pick Miis by list index, e.g. --miis=25:3,14/21");
    println!("                             (with --formation, picked before the lineups)");
    println!("    --keys=INSTRUCTIONS      Send an instruction string (u d l r a b w)");
    println!("    --routine=NAME           Run a named routine from the options file");
    println!("    --list-routines          Show the available routines");
    println!();
    println!("FLAGS:");
    println!("    --dry-run, -n            Log key events instead of sending them");
    println!("    --options=PATH           Options file (default: ~/.autoteam/options.json)");
    println!("    --debug                  Enable debug output");
    println!("    --help, -h               Show this help message");
    println!("    --version, -v            Show version information");
    println!();
    println!("Press Ctrl-C to stop; every held key is released before exit.");
}
