use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use igo_cli::audit::JsonlStatusSink;
use igo_validate::{GateConfig, LogOnlySink, RequestValidator, StatusSink};

use crate::cli::{CheckArgs, FilterArgs};

/// Run the authoritative filter. Returns true when the request was
/// published (full or partial pass), false when rejected or skipped.
pub fn run_filter(args: &FilterArgs) -> Result<bool> {
    let request_json = read_input(&args.input)?;
    let config = GateConfig {
        cmo_requests_only: args.cmo_only,
    };

    let sink: Box<dyn StatusSink> = match &args.audit_dir {
        Some(dir) => Box::new(JsonlStatusSink::new(dir)),
        None => Box::new(LogOnlySink),
    };
    let gate = RequestValidator::new(config, sink.as_ref());

    let filtered = gate
        .filter_valid_request(&request_json)
        .context("filter request")?;
    match filtered {
        Some(document) => {
            write_output(args.output.as_deref(), &document)?;
            debug!(bytes = document.len(), "request published");
            Ok(true)
        }
        None => {
            info!("request rejected or skipped - nothing to publish");
            Ok(false)
        }
    }
}

/// Run the advisory metadata pre-check.
pub fn run_check(args: &CheckArgs) -> Result<bool> {
    let request_json = read_input(&args.input)?;
    let config = GateConfig {
        cmo_requests_only: args.cmo_only,
    };
    let sink = LogOnlySink;
    let gate = RequestValidator::new(config, &sink);
    gate.is_request_metadata_valid(&request_json)
        .context("check request metadata")
}

fn read_input(input: &Path) -> Result<String> {
    if input.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("read request from stdin")?;
        Ok(buffer)
    } else {
        fs::read_to_string(input)
            .with_context(|| format!("read request from {}", input.display()))
    }
}

fn write_output(output: Option<&Path>, document: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, format!("{document}\n"))
            .with_context(|| format!("write filtered request to {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{document}").context("write filtered request to stdout")
        }
    }
}
