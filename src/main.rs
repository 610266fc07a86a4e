//! Interactive menu driving the minefinder core

#[cfg(windows)]
fn main() -> anyhow::Result<()> {
    app::run()
}

#[cfg(not(windows))]
fn main() {
    eprintln!("minefinder only supports Windows targets");
    std::process::exit(1);
}

#[cfg(windows)]
mod app {
    use std::io::{self, BufRead, Write};
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;
    use tracing::{error, info};
    use tracing_subscriber::EnvFilter;

    use minefinder::config::{load_config, Config};
    use minefinder::field::render_minefield;
    use minefinder::flagging::FlagOutcome;
    use minefinder::session::Session;
    use minefinder::MemoryResult;

    #[derive(Parser, Debug)]
    #[command(
        name = "minefinder",
        version,
        about = "Minesweeper process inspector and auto-flagger"
    )]
    struct Args {
        /// TOML file overriding the built-in winmine memory layout
        #[arg(short, long, env = "MINEFINDER_CONFIG")]
        config: Option<PathBuf>,

        /// Start with verbose diagnostics enabled
        #[arg(short, long)]
        verbose: bool,
    }

    const MENU: &str = "Menu\n \
                        1) Print info (minefield sizes, PID, and number of mines)\n \
                        2) Print minefield\n \
                        3) Flag all mines\n \
                        4) Toggle debug messages\n \
                        5) Exit\n\
                        Select an option: ";

    pub fn run() -> Result<()> {
        let args = Args::parse();

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(if args.verbose { "debug" } else { "info" }));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();

        let config = load_config(args.config.as_deref()).context("loading configuration")?;
        let mut app = App {
            config,
            debug: args.verbose,
        };
        app.run()
    }

    struct App {
        config: Config,
        /// Operator-facing verbose toggle, threaded into the handlers
        debug: bool,
    }

    impl App {
        fn run(&mut self) -> Result<()> {
            let stdin = io::stdin();
            let mut line = String::new();

            loop {
                print!("{MENU}");
                io::stdout().flush()?;

                line.clear();
                if stdin.lock().read_line(&mut line)? == 0 {
                    break;
                }

                match line.trim() {
                    "1" => self.print_info(),
                    "2" => self.print_minefield(),
                    "3" => self.flag_all_mines(),
                    "4" => self.toggle_debug(),
                    "5" => break,
                    "" => continue,
                    _ => println!("Invalid option entered.\n"),
                }
            }
            Ok(())
        }

        // Each action attaches fresh and reports failures without ending
        // the session; the operator can simply retry.

        fn print_info(&self) {
            if let Err(err) = self.try_print_info() {
                error!("{err}");
            }
        }

        fn try_print_info(&self) -> MemoryResult<()> {
            let session = Session::attach(&self.config)?;
            let snapshot = session.snapshot(&self.config)?;
            let remaining = session.mines_remaining(&self.config)?;
            if self.debug {
                info!("module base is {}", session.module_base());
            }
            println!(
                "PID: {}\t\tHeight: {}\t\tWidth: {}\t\tMines: {} ({} left to find)\n",
                session.pid(),
                snapshot.height(),
                snapshot.width(),
                snapshot.mine_count(),
                remaining,
            );
            Ok(())
        }

        fn print_minefield(&self) {
            if let Err(err) = self.try_print_minefield() {
                error!("{err}");
            }
        }

        fn try_print_minefield(&self) -> MemoryResult<()> {
            let session = Session::attach(&self.config)?;
            let snapshot = session.snapshot(&self.config)?;
            println!("{}", render_minefield(&snapshot));
            Ok(())
        }

        fn flag_all_mines(&self) {
            if let Err(err) = self.try_flag_all_mines() {
                error!("{err}");
            }
        }

        fn try_flag_all_mines(&self) -> MemoryResult<()> {
            let session = Session::attach(&self.config)?;
            let snapshot = session.snapshot(&self.config)?;
            match session.flag_all_mines(&self.config, &snapshot)? {
                FlagOutcome::GameOver => {
                    println!("Found an exploded mine. The game is already over. Start a new game first\n");
                }
                FlagOutcome::Flagged(count) => {
                    if self.debug {
                        info!("issued {count} flag calls into pid {}", session.pid());
                    }
                    println!("Flagged {count} mines\n");
                }
            }
            Ok(())
        }

        fn toggle_debug(&mut self) {
            self.debug = !self.debug;
            println!(
                "Debugging {}\n",
                if self.debug { "enabled" } else { "disabled" }
            );
        }
    }
}
