use std::io::{self, BufRead, Write};
use std::time::Duration;

use blackjack_core::{
    run_session, GameConfig, GameError, GameMessage, InputSource, OutputSink, Pacing,
};
use clap::Parser;
use crossterm::style::Stylize;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Play Blackjack against the dealer in the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Dealer pause before each decision, in milliseconds
    #[arg(long, default_value_t = 500)]
    delay_ms: u64,

    /// Let the dealer play without pausing
    #[arg(long)]
    no_delay: bool,

    /// Seed for reproducible decks
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print cards and results without colors
    #[arg(long)]
    no_color: bool,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        let mut config = if self.no_delay {
            GameConfig::new().with_pacing(Pacing::Off)
        } else {
            GameConfig::new().with_dealer_delay(Duration::from_millis(self.delay_ms))
        };
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

/// Prompts on `out` and reads answers line by line from `reader`.
struct LineInput<R, W> {
    reader: R,
    out: W,
}

impl<R: BufRead, W: Write> InputSource for LineInput<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<String, GameError> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            // Keep the transcript tidy when stdin ends mid-prompt.
            writeln!(self.out)?;
            return Err(GameError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Prints each message on its own line, optionally colored.
struct TerminalSink {
    color: bool,
}

impl TerminalSink {
    fn render(&self, message: &GameMessage) -> String {
        if !self.color {
            return message.to_string();
        }
        match message {
            GameMessage::CardDrawn(card) if card.suit.is_red() => {
                format!("<<< {} {} >>>", card.rank, card.suit.glyph().red())
            }
            GameMessage::PlayerWins | GameMessage::DealerBust => {
                message.to_string().green().bold().to_string()
            }
            GameMessage::PlayerBust | GameMessage::DealerWins => {
                message.to_string().red().bold().to_string()
            }
            _ => message.to_string(),
        }
    }
}

impl OutputSink for TerminalSink {
    fn emit(&mut self, message: &GameMessage) {
        println!("{}", self.render(message));
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = args.game_config();
    info!(?config, "starting session");

    let mut input = LineInput { reader: io::stdin().lock(), out: io::stdout() };
    let mut sink = TerminalSink { color: !args.no_color };

    let board = run_session(&config, &mut input, &mut sink)?;
    info!(?board, "session finished");
    Ok(())
}
