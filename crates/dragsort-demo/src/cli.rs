#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo.
//!
//! Parses args manually to keep the binary lean. Supports environment
//! variable overrides via the `DRAGSORT_DEMO_*` prefix.

use std::env;
use std::process;

use dragsort_core::color::Rgba;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
dragsort demo: scripted drag-to-reorder over a simulated list

USAGE:
    dragsort-demo [OPTIONS]

OPTIONS:
    --items=N         Number of items in the list (default: 30)
    --rows=N          Rows visible at once (default: 10)
    --from=N          Visible row to pick up, 0-indexed (default: 2)
    --hold-ms=N       How long to rest on the bottom edge (default: 500)
    --color=HEX       Preview overlay colour, #rrggbb[aa] (default: #99cc00)
    --opacity=F       Preview overlay opacity in [0, 1] (default: 0.75)
    --no-drag-mode    Leave drag mode off; the press is forwarded
    --help, -h        Show this help message
    --version, -V     Show version

ENVIRONMENT VARIABLES:
    DRAGSORT_DEMO_ITEMS       Override --items
    DRAGSORT_DEMO_ROWS        Override --rows
    DRAGSORT_DEMO_HOLD_MS     Override --hold-ms
    DRAGSORT_DEMO_COLOR       Override --color
    DRAGSORT_DEMO_LOG         Log filter (falls back to RUST_LOG)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq)]
pub struct Opts {
    /// Number of items.
    pub items: usize,
    /// Visible rows.
    pub rows: usize,
    /// Visible row the drag starts on.
    pub from: usize,
    /// Time spent resting on the bottom edge, in milliseconds.
    pub hold_ms: u64,
    /// Preview overlay colour.
    pub color: Rgba,
    /// Preview overlay opacity.
    pub opacity: f32,
    /// Whether drag mode is switched on before the script runs.
    pub drag_mode: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            items: 30,
            rows: 10,
            from: 2,
            hold_ms: 500,
            color: Rgba::rgb(0x99, 0xcc, 0x00),
            opacity: 0.75,
            drag_mode: true,
        }
    }
}

/// Outcome of parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    Run(Opts),
    Help,
    Version,
}

impl Opts {
    /// Parse command-line arguments and environment variables, exiting on
    /// `--help`, `--version`, or a bad value.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags.
    pub fn parse() -> Self {
        let args: Vec<String> = env::args().skip(1).collect();
        match Self::parse_from(&args, |key| env::var(key).ok()) {
            Ok(Parsed::Run(opts)) => opts,
            Ok(Parsed::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Parsed::Version) => {
                println!("dragsort-demo {VERSION}");
                process::exit(0);
            }
            Err(msg) => {
                eprintln!("{msg}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse `args` with `var` as the environment lookup.
    pub fn parse_from<F>(args: &[String], var: F) -> Result<Parsed, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        // Apply environment variable defaults first
        if let Some(val) = var("DRAGSORT_DEMO_ITEMS")
            && let Ok(n) = val.parse()
        {
            opts.items = n;
        }
        if let Some(val) = var("DRAGSORT_DEMO_ROWS")
            && let Ok(n) = val.parse()
        {
            opts.rows = n;
        }
        if let Some(val) = var("DRAGSORT_DEMO_HOLD_MS")
            && let Ok(n) = val.parse()
        {
            opts.hold_ms = n;
        }
        if let Some(val) = var("DRAGSORT_DEMO_COLOR")
            && let Ok(color) = Rgba::from_hex(&val)
        {
            opts.color = color;
        }

        // Parse command-line args (override env vars)
        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Parsed::Help),
                "--version" | "-V" => return Ok(Parsed::Version),
                "--no-drag-mode" => opts.drag_mode = false,
                other => {
                    if let Some(val) = other.strip_prefix("--items=") {
                        opts.items = number("--items", val)?;
                    } else if let Some(val) = other.strip_prefix("--rows=") {
                        opts.rows = number("--rows", val)?;
                    } else if let Some(val) = other.strip_prefix("--from=") {
                        opts.from = number("--from", val)?;
                    } else if let Some(val) = other.strip_prefix("--hold-ms=") {
                        opts.hold_ms = number("--hold-ms", val)?;
                    } else if let Some(val) = other.strip_prefix("--color=") {
                        opts.color = Rgba::from_hex(val)
                            .map_err(|err| format!("Invalid --color value: {val} ({err})"))?;
                    } else if let Some(val) = other.strip_prefix("--opacity=") {
                        opts.opacity = number("--opacity", val)?;
                    } else {
                        return Err(format!("Unknown argument: {other}"));
                    }
                }
            }
        }

        opts.validate()?;
        Ok(Parsed::Run(opts))
    }

    fn validate(&self) -> Result<(), String> {
        if self.items == 0 {
            return Err("--items must be at least 1".into());
        }
        if self.rows == 0 {
            return Err("--rows must be at least 1".into());
        }
        if self.from >= self.items.min(self.rows) {
            return Err(format!(
                "--from={} is not a visible row (0..{})",
                self.from,
                self.items.min(self.rows)
            ));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(format!("--opacity={} is outside [0, 1]", self.opacity));
        }
        Ok(())
    }
}

fn number<T: std::str::FromStr>(flag: &str, val: &str) -> Result<T, String> {
    val.parse()
        .map_err(|_| format!("Invalid {flag} value: {val}"))
}
