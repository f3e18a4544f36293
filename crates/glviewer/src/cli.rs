use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// A simple fragment shader viewer.
#[derive(Parser, Debug)]
#[command(
    name = "glviewer",
    version,
    about = "A simple fragment shader viewer",
    after_help = "The single-dash spellings -fs, -frag and -fragmentShader are also accepted."
)]
pub struct Cli {
    /// Open the window fullscreen on the current monitor.
    #[arg(short = 'f', long, visible_alias = "fs")]
    pub fullscreen: bool,

    /// Fragment shader file (WGSL). The vertex interface is prepended.
    #[arg(
        short = 's',
        long = "fragment-shader",
        visible_aliases = ["frag", "fragmentShader"],
        value_name = "PATH"
    )]
    pub fragment_shader: Option<PathBuf>,

    /// Rate at which `time` advances, in Hz.
    #[arg(long, default_value_t = 60.0, value_parser = parse_tick_rate, value_name = "HZ")]
    pub tick_rate: f64,

    /// Log filter, `env_logger` syntax (overrides RUST_LOG).
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,
}

/// Long options that are also accepted after a single dash.
const SINGLE_DASH_LONGS: [&str; 3] = ["fs", "frag", "fragmentShader"];

impl Cli {
    /// Parses the process arguments, accepting single-dash long options.
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate)
    }
}

/// Rewrites `-fs`, `-frag` and `-fragmentShader` (optionally `=VALUE`) to
/// their double-dash form so clap does not read them as clustered short flags.
/// Arguments after `--` are left untouched.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut options_done = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if options_done {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                options_done = true;
                return arg;
            }
            let Some(rest) = text.strip_prefix('-').filter(|r| !r.starts_with('-')) else {
                return arg;
            };
            let name = rest.split_once('=').map_or(rest, |(name, _)| name);
            if SINGLE_DASH_LONGS.contains(&name) {
                OsString::from(format!("-{text}"))
            } else {
                arg
            }
        })
        .collect()
}

fn parse_tick_rate(s: &str) -> Result<f64, String> {
    let hz: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if hz.is_finite() && hz > 0.0 {
        Ok(hz)
    } else {
        Err("tick rate must be a positive number of Hz".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("glviewer").chain(args.iter().copied()))
    }

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = parse(&[]).unwrap();
        assert!(!cli.fullscreen);
        assert_eq!(cli.fragment_shader, None);
        assert_eq!(cli.tick_rate, 60.0);
        assert_eq!(cli.tick_interval(), Duration::from_secs_f64(1.0 / 60.0));
        assert_eq!(cli.log, None);
    }

    #[test]
    fn short_flags() {
        let cli = parse(&["-f", "-s", "plasma.wgsl"]).unwrap();
        assert!(cli.fullscreen);
        assert_eq!(cli.fragment_shader, Some(PathBuf::from("plasma.wgsl")));
    }

    #[test]
    fn long_aliases() {
        let cli = parse(&["--fs", "--frag", "a.wgsl"]).unwrap();
        assert!(cli.fullscreen);
        assert_eq!(cli.fragment_shader, Some(PathBuf::from("a.wgsl")));

        let cli = parse(&["--fragmentShader", "b.wgsl"]).unwrap();
        assert_eq!(cli.fragment_shader, Some(PathBuf::from("b.wgsl")));
    }

    fn parse_normalized(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(normalize_args(std::iter::once("glviewer").chain(args.iter().copied())))
    }

    #[test]
    fn single_dash_long_spellings() {
        let cli = parse_normalized(&["-fs", "-frag", "a.wgsl"]).unwrap();
        assert!(cli.fullscreen);
        assert_eq!(cli.fragment_shader, Some(PathBuf::from("a.wgsl")));

        let cli = parse_normalized(&["-fragmentShader=b.wgsl"]).unwrap();
        assert_eq!(cli.fragment_shader, Some(PathBuf::from("b.wgsl")));
    }

    #[test]
    fn normalizing_keeps_short_clusters_and_positionals() {
        let cli = parse_normalized(&["-f", "-s", "fs.wgsl"]).unwrap();
        assert!(cli.fullscreen);
        assert_eq!(cli.fragment_shader, Some(PathBuf::from("fs.wgsl")));

        let args = normalize_args(["glviewer", "--", "-fs"]);
        assert_eq!(args, ["glviewer", "--", "-fs"].map(OsString::from));
    }

    #[test]
    fn tick_rate_must_be_positive() {
        assert!(parse(&["--tick-rate", "0"]).is_err());
        assert!(parse(&["--tick-rate", "-30"]).is_err());
        assert!(parse(&["--tick-rate", "fast"]).is_err());

        let cli = parse(&["--tick-rate", "120"]).unwrap();
        assert_eq!(cli.tick_interval(), Duration::from_secs_f64(1.0 / 120.0));
    }
}
