//! Command line surface
//!
//! `vortex [screen_width screen_height] [options]`. Both screen dimensions must
//! be given together and be positive integers. Any usage problem, including
//! `-h`/`--help`, prints to stderr and exits with status 1.

use std::ffi::OsString;
use std::num::NonZeroUsize;

use clap::{value_parser, CommandFactory, Parser};
use vortex_simulation::{SimulationConfig, DEFAULT_SEED, DEFAULT_TARGET_FPS};

#[derive(Parser, Debug)]
#[command(name = "vortex", about = "Interactive vortex particle field", disable_help_flag = true)]
struct Args {
    /// Window width in pixels
    #[arg(value_parser = value_parser!(u32).range(1..), requires = "screen_height")]
    screen_width: Option<u32>,

    /// Window height in pixels
    #[arg(value_parser = value_parser!(u32).range(1..))]
    screen_height: Option<u32>,

    /// Target frames per second
    #[arg(long, default_value_t = DEFAULT_TARGET_FPS, value_parser = value_parser!(u32).range(1..))]
    fps: u32,

    /// Draw particles modulo the window size instead of clipping them
    #[arg(long)]
    wrap: bool,

    /// Worker threads (default: hardware parallelism)
    #[arg(long)]
    workers: Option<NonZeroUsize>,

    /// Total particle target, split evenly across workers
    #[arg(long)]
    particles: Option<NonZeroUsize>,

    /// Seed for the initial particle scatter
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Print usage
    #[arg(short = 'h', long = "help")]
    help: bool,
}

#[derive(Debug)]
pub enum Invocation {
    Run(SimulationConfig),
    /// Print the message to stderr and exit with status 1
    Usage(String),
}

pub fn parse<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = match Args::try_parse_from(args) {
        Ok(args) => args,
        Err(error) => return Invocation::Usage(error.render().to_string()),
    };

    if args.help {
        return Invocation::Usage(Args::command().render_help().to_string());
    }

    let defaults = SimulationConfig::default();
    Invocation::Run(SimulationConfig {
        screen_width: args.screen_width.unwrap_or(defaults.screen_width),
        screen_height: args.screen_height.unwrap_or(defaults.screen_height),
        target_fps: args.fps,
        wrap: args.wrap,
        worker_count: args.workers.map(NonZeroUsize::get),
        total_particles: args
            .particles
            .map_or(defaults.total_particles, NonZeroUsize::get),
        seed: args.seed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str]) -> SimulationConfig {
        match parse(std::iter::once("vortex").chain(args.iter().copied())) {
            Invocation::Run(config) => config,
            Invocation::Usage(message) => panic!("unexpected usage error: {message}"),
        }
    }

    fn is_usage(args: &[&str]) -> bool {
        matches!(
            parse(std::iter::once("vortex").chain(args.iter().copied())),
            Invocation::Usage(_)
        )
    }

    #[test]
    fn no_arguments_uses_defaults() {
        assert_eq!(run(&[]), SimulationConfig::default());
    }

    #[test]
    fn two_positionals_set_the_screen() {
        let config = run(&["800", "600"]);
        assert_eq!(config.screen_width, 800);
        assert_eq!(config.screen_height, 600);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn bogus_sizes_are_usage_errors() {
        assert!(is_usage(&["0", "600"]));
        assert!(is_usage(&["800", "0"]));
        assert!(is_usage(&["-800", "600"]));
        assert!(is_usage(&["wide", "600"]));
        assert!(is_usage(&["800"]));
        assert!(is_usage(&["800", "600", "400"]));
    }

    #[test]
    fn help_is_a_usage_exit() {
        assert!(is_usage(&["--help", "600"]));
        assert!(is_usage(&["-h", "600"]));
        assert!(is_usage(&["-h"]));
    }

    #[test]
    fn options_fill_the_config() {
        let config = run(&[
            "1024", "768", "--fps", "60", "--wrap", "--workers", "4", "--particles", "5000",
            "--seed", "9",
        ]);
        assert_eq!(config.target_fps, 60);
        assert!(config.wrap);
        assert_eq!(config.worker_count, Some(4));
        assert_eq!(config.total_particles, 5000);
        assert_eq!(config.seed, 9);
    }

    #[test]
    fn zero_workers_are_rejected() {
        assert!(is_usage(&["--workers", "0"]));
        assert!(is_usage(&["--fps", "0"]));
    }
}
