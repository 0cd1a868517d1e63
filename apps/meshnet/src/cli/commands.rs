//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::console::Console;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

// =============================================================================
// RUN COMMAND
// =============================================================================

/// Interpret a command script line by line.
///
/// Each non-blank input line yields exactly one response line (or one JSON
/// object in `--json`). The topology lives for the duration of the
/// script and is dropped with the process; there is no persistence.
pub fn cmd_run(input: Option<&Path>, output: Option<&Path>, json: bool) -> io::Result<()> {
    let mut console = Console::new();

    let reader: Box<dyn BufRead> = match input {
        Some(path) => {
            tracing::info!(path = %path.display(), "reading command script");
            Box::new(BufReader::new(std::fs::File::open(path)?))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(std::fs::File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout())),
    };

    for line in reader.lines() {
        let line = line?;
        let Some(reply) = console.handle_line(&line) else {
            continue;
        };

        if !reply.ok {
            tracing::warn!(
                endpoint = reply.endpoint,
                code = reply.code,
                "command failed"
            );
        }

        if json {
            let rendered = serde_json::to_string(&reply).map_err(io::Error::other)?;
            writeln!(writer, "{rendered}")?;
        } else {
            writeln!(writer, "{}", reply.message)?;
        }
    }

    writer.flush()
}
