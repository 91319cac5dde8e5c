#![forbid(unsafe_code)]

//! Command-line parsing for the demo.
//!
//! Every option has a `SHOWIF_DEMO_*` environment override.

use clap::Parser;
use showif_runtime::GateConfig;
use showif_runtime::component::{DENIED_TEXT, GRANTED_TEXT};

use crate::app::App;
use crate::error::{DemoError, Result};
use crate::logging::{self, LogFormat};

/// Upper bound on scripted clicks.
pub const MAX_CLICKS: u32 = 10_000;

#[derive(Debug, Parser)]
#[command(
    name = "showif-demo",
    about = "Toggle between two mutually exclusive messages",
    version
)]
pub struct Cli {
    /// Toggle N times and exit instead of reading commands from stdin.
    #[arg(long, env = "SHOWIF_DEMO_CLICKS")]
    pub clicks: Option<u32>,

    /// Start with access granted.
    #[arg(long, env = "SHOWIF_DEMO_GRANTED")]
    pub granted: bool,

    /// Message shown while access is granted.
    #[arg(long, env = "SHOWIF_DEMO_GRANTED_TEXT", default_value = GRANTED_TEXT)]
    pub granted_text: String,

    /// Message shown while access is denied.
    #[arg(long, env = "SHOWIF_DEMO_DENIED_TEXT", default_value = DENIED_TEXT)]
    pub denied_text: String,

    /// Log output format (filter with RUST_LOG).
    #[arg(long, value_enum, env = "SHOWIF_LOG_FORMAT", default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Gate configuration described by these arguments.
    pub fn gate_config(&self) -> Result<GateConfig> {
        if self.granted_text.trim().is_empty() || self.denied_text.trim().is_empty() {
            return Err(DemoError::invalid("message texts must not be empty"));
        }
        Ok(GateConfig::default()
            .with_granted_text(self.granted_text.clone())
            .with_denied_text(self.denied_text.clone())
            .with_initially_granted(self.granted))
    }

    /// Validated click count, if scripted mode was requested.
    pub fn scripted_clicks(&self) -> Result<Option<u32>> {
        match self.clicks {
            Some(n) if n > MAX_CLICKS => Err(DemoError::invalid(format!(
                "--clicks must be at most {MAX_CLICKS}, got {n}"
            ))),
            other => Ok(other),
        }
    }
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_format)?;
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let mut app = App::new(cli.gate_config()?);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.scripted_clicks()? {
        Some(n) => app.run_scripted(n, &mut out),
        None => {
            let stdin = std::io::stdin();
            app.run_interactive(stdin.lock(), &mut out)
        }
    }
}
