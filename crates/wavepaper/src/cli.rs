use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::theme::Mode;

#[derive(Parser, Debug)]
#[command(name = "wavepaper", author, version, about = "Animated wave backdrop daemon")]
pub struct Cli {
    #[command(flatten)]
    pub run: RunArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Override the window resolution (e.g. `1280x720`).
    #[arg(long, value_name = "WIDTHxHEIGHT", value_parser = parse_surface_size)]
    pub size: Option<(u32, u32)>,

    /// Start in the given mode instead of the stored preference (`light` or `dark`).
    #[arg(long, value_name = "MODE", value_parser = parse_mode)]
    pub mode: Option<Mode>,

    /// Freeze the backdrop at the given timestamp in seconds instead of animating.
    #[arg(long, value_name = "SECONDS", value_parser = parse_still_time)]
    pub still: Option<f32>,

    /// Preference file to use; can also be supplied via the `WAVEPAPER_STATE_FILE` env var.
    #[arg(long, env = "WAVEPAPER_STATE_FILE", value_name = "FILE")]
    pub state_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print resolved directories for config and preference storage.
    Where,
}

pub fn parse() -> Cli {
    Cli::parse()
}

pub fn parse_surface_size(value: &str) -> Result<(u32, u32), String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("size must not be empty".to_string());
    }

    let (w, h) = match trimmed.split_once(['x', 'X']) {
        Some(parts) => parts,
        None => return Err(format!("invalid size '{trimmed}'; expected WIDTHxHEIGHT")),
    };
    let width = w.trim().parse::<u32>().map_err(|_| "invalid width in size".to_string())?;
    let height = h.trim().parse::<u32>().map_err(|_| "invalid height in size".to_string())?;
    if width == 0 || height == 0 {
        return Err("size dimensions must be greater than zero".to_string());
    }
    Ok((width, height))
}

pub fn parse_mode(value: &str) -> Result<Mode, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("mode must not be empty".to_string());
    }

    let normalized = trimmed.to_ascii_lowercase();
    match normalized.as_str() {
        "light" | "light-mode" => Ok(Mode::Light),
        "dark" | "dark-mode" => Ok(Mode::Dark),
        other => Err(format!("unknown mode '{other}'; expected light or dark")),
    }
}

pub fn parse_still_time(value: &str) -> Result<f32, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("still time must not be empty".to_string());
    }

    let seconds = trimmed
        .parse::<f32>()
        .map_err(|_| format!("invalid still time '{trimmed}'; expected seconds"))?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err("still time must be a non-negative number of seconds".to_string());
    }
    Ok(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parses_size_variants() {
        assert_eq!(parse_surface_size("1280x720").unwrap(), (1280, 720));
        assert_eq!(parse_surface_size("1280X720").unwrap(), (1280, 720));
        assert_eq!(parse_surface_size(" 1920 x 1080 ").unwrap(), (1920, 1080));
    }

    #[test]
    fn rejects_malformed_sizes() {
        assert!(parse_surface_size("").is_err());
        assert!(parse_surface_size("1280").is_err());
        assert!(parse_surface_size("0x720").is_err());
        assert!(parse_surface_size("widexhigh").is_err());
    }

    #[test]
    fn parses_mode_aliases() {
        assert_eq!(parse_mode("light").unwrap(), Mode::Light);
        assert_eq!(parse_mode("light-mode").unwrap(), Mode::Light);
        assert_eq!(parse_mode(" Dark ").unwrap(), Mode::Dark);
        assert_eq!(parse_mode("DARK-MODE").unwrap(), Mode::Dark);
        assert!(parse_mode("sepia").is_err());
    }

    #[test]
    fn parses_still_times() {
        assert_eq!(parse_still_time("0").unwrap(), 0.0);
        assert_eq!(parse_still_time(" 12.5 ").unwrap(), 12.5);
        assert!(parse_still_time("").is_err());
        assert!(parse_still_time("-1").is_err());
        assert!(parse_still_time("nan").is_err());
        assert!(parse_still_time("soon").is_err());
    }

    #[test]
    fn parses_run_arguments_and_subcommand() {
        let cli = Cli::try_parse_from([
            "wavepaper", "--size", "800x600", "--mode", "dark", "--still", "3.5",
        ])
        .expect("arguments parse");
        assert_eq!(cli.run.size, Some((800, 600)));
        assert_eq!(cli.run.mode, Some(Mode::Dark));
        assert_eq!(cli.run.still, Some(3.5));
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["wavepaper", "where"]).expect("subcommand parses");
        assert!(matches!(cli.command, Some(Command::Where)));
    }
}
