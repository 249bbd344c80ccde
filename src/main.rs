// labsim: simulated "Run Code" for C lab snippets

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use labsim::ui::theme::{Theme, DEFAULT_THEME, LIGHT_THEME};
use labsim::ui::App;
use labsim::{simulate, SimConfig};

/// Command-line options
struct Options {
    path: PathBuf,
    print: bool,
    strict: bool,
    theme: &'static Theme,
}

fn usage(program_name: &str) {
    eprintln!("Usage: {} [--print] [--strict] [--light] <file.c>", program_name);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --print    Print the run result to stdout instead of opening the TUI");
    eprintln!("  --strict   Reject unsupported constructs instead of skipping them");
    eprintln!("  --light    Use the light color theme (or set LABSIM_THEME=light)");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} demos/leaky_bucket.c", program_name);
    eprintln!("  {} --print --strict myprogram.c", program_name);
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut path = None;
    let mut print = false;
    let mut strict = false;
    let mut theme = match std::env::var("LABSIM_THEME") {
        Ok(name) => match Theme::by_name(&name) {
            Some(theme) => theme,
            None => {
                eprintln!("Warning: unknown LABSIM_THEME '{}', using dark", name);
                &DEFAULT_THEME
            }
        },
        Err(_) => &DEFAULT_THEME,
    };

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--print" => print = true,
            "--strict" => strict = true,
            "--light" => theme = &LIGHT_THEME,
            flag if flag.starts_with("--") => return Err(format!("Unknown option '{}'", flag)),
            file if path.is_none() => path = Some(PathBuf::from(file)),
            extra => return Err(format!("Unexpected argument '{}'", extra)),
        }
    }

    let path = path.ok_or_else(|| String::from("No input file provided"))?;
    Ok(Options {
        path,
        print,
        strict,
        theme,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("labsim");

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!();
            usage(program_name);
            std::process::exit(1);
        }
    };

    if !Path::new(&options.path).exists() {
        eprintln!("Error: File '{}' not found", options.path.display());
        usage(program_name);
        std::process::exit(1);
    }

    // Read source code
    let source = fs::read_to_string(&options.path)?;
    let config = if options.strict {
        SimConfig::strict()
    } else {
        SimConfig::default()
    };

    if options.print {
        eprintln!("Simulating {}...", options.path.display());
        let report = simulate(&source, &config);
        if report.capped_loops > 0 {
            eprintln!(
                "Warning: {} loop(s) stopped after {} iterations",
                report.capped_loops, config.iteration_cap
            );
        }
        let mut stdout = io::stdout();
        writeln!(stdout, "{}", report.text)?;
        if !report.is_success() {
            std::process::exit(1);
        }
        return Ok(());
    }

    eprintln!(
        "Loaded {} ({} lines). Starting TUI...",
        options.path.display(),
        source.lines().count()
    );

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(options.path, source, config, options.theme);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
