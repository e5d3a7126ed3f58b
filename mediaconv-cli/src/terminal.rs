// ============================================================================
// mediaconv-cli/src/terminal.rs
// ============================================================================
//
// TERMINAL OUTPUT: Status Markers and the Final Summary
//
// Every event of a run becomes one line prefixed with a status marker:
// [INFO], [SUCCESS], [WARNING] or [ERROR]. Markers are coloured when stdout
// supports it and NO_COLOR is unset.
//
// AI-ASSISTANT-INFO: Terminal event handler and summary printing for the CLI

// ---- Internal crate imports ----
use mediaconv_core::events::{Event, EventHandler};
use mediaconv_core::utils::{display_name, file_size};
use mediaconv_core::{BatchReport, format_bytes, format_duration};

// ---- External crate imports ----
use owo_colors::OwoColorize;

// ---- Standard library imports ----
use std::io::{self, Write};
use std::sync::Mutex;

/// Status marker printed in front of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Info,
    Success,
    Warning,
    Error,
}

impl Marker {
    pub fn label(self) -> &'static str {
        match self {
            Marker::Info => "[INFO]",
            Marker::Success => "[SUCCESS]",
            Marker::Warning => "[WARNING]",
            Marker::Error => "[ERROR]",
        }
    }

    fn styled(self, use_color: bool) -> String {
        let label = self.label();
        if !use_color {
            return label.to_string();
        }
        match self {
            Marker::Info => label.cyan().to_string(),
            Marker::Success => label.green().to_string(),
            Marker::Warning => label.yellow().to_string(),
            Marker::Error => label.bright_red().bold().to_string(),
        }
    }
}

/// Check if color should be used (respects NO_COLOR environment variable)
pub fn should_use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none() && supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Marker and message for an event, or `None` for events not shown.
pub fn describe(event: &Event) -> Option<(Marker, String)> {
    let line = match event {
        Event::BatchStarted { input_dir, output_dir } => (
            Marker::Info,
            format!("Converting {} into {}", input_dir.display(), output_dir.display()),
        ),
        Event::OutputDirectoryCreated { path } => {
            (Marker::Info, format!("Created output directory {}", path.display()))
        }
        Event::EntriesListed { .. } | Event::FileQueued { .. } => return None,
        Event::FileSkipped { source, .. } => (
            Marker::Warning,
            format!("Skipping unsupported file: {}", display_name(source)),
        ),
        Event::EntryIgnored { path } => {
            (Marker::Warning, format!("Skipping non-file item: {}", display_name(path)))
        }
        Event::CandidatesFound { count } => (Marker::Info, format!("Found {} file(s) to convert", count)),
        Event::ConversionStarted { source, target_path } => (
            Marker::Info,
            format!("Converting {} -> {}", display_name(source), display_name(target_path)),
        ),
        Event::AttemptSucceeded { source, backend } => (
            Marker::Success,
            format!("Converted {} using {}", display_name(source), backend),
        ),
        Event::AttemptFailed {
            source,
            backend,
            error,
            remaining,
        } if *remaining > 0 => (
            Marker::Warning,
            format!("{} failed for {}, trying next backend: {}", backend, display_name(source), error),
        ),
        Event::AttemptFailed {
            source, backend, error, ..
        } => (
            Marker::Error,
            format!("{} failed for {}: {}", backend, display_name(source), error),
        ),
        Event::ConversionFinished { source, succeeded } => {
            if *succeeded {
                return None;
            }
            (Marker::Error, format!("Failed to convert {}", display_name(source)))
        }
        Event::OutputCollision { target_path, source } => (
            Marker::Warning,
            format!(
                "{} overwrites {} written earlier in this run",
                display_name(source),
                display_name(target_path)
            ),
        ),
        Event::BatchComplete { succeeded, total, .. } => {
            let marker = if *succeeded > 0 { Marker::Success } else { Marker::Error };
            (marker, format!("{}/{} file(s) converted", succeeded, total))
        }
    };
    Some(line)
}

/// Prints events as marker lines.
pub struct TerminalEventHandler {
    out: Mutex<Box<dyn Write + Send>>,
    use_color: bool,
}

impl TerminalEventHandler {
    pub fn new() -> Self {
        Self::with_writer(Box::new(io::stdout()), should_use_color())
    }

    pub fn with_writer(out: Box<dyn Write + Send>, use_color: bool) -> Self {
        Self {
            out: Mutex::new(out),
            use_color,
        }
    }
}

impl Default for TerminalEventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for TerminalEventHandler {
    fn handle(&self, event: &Event) {
        let Some((marker, message)) = describe(event) else {
            return;
        };
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "{} {}", marker.styled(self.use_color), message);
            let _ = out.flush();
        }
    }
}

/// Writes the per-file summary and totals for a finished run.
pub fn write_summary(out: &mut dyn Write, report: &BatchReport, use_color: bool) -> io::Result<()> {
    let heading = "Conversion Summary:";
    writeln!(out)?;
    writeln!(out, "========================================")?;
    if use_color {
        writeln!(out, "{}", heading.bold())?;
    } else {
        writeln!(out, "{}", heading)?;
    }
    writeln!(out, "========================================")?;

    for outcome in &report.outcomes {
        let source = outcome.task.source_path();
        let target = outcome.task.target_path();
        writeln!(out, "{} -> {}", display_name(source), display_name(target))?;
        match outcome.successful_backend() {
            Some(backend) => {
                writeln!(out, "  Backend:     {}", backend)?;
                if let Some(size) = file_size(target) {
                    writeln!(out, "  Output size: {}", format_bytes(size))?;
                }
            }
            None => {
                let reason = outcome
                    .last_error()
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "no backend available".to_string());
                writeln!(out, "  Failed:      {}", reason)?;
            }
        }
        writeln!(out, "  Attempts:    {}", outcome.attempts.len())?;
    }

    writeln!(out, "----------------------------------------")?;
    if !report.skipped.is_empty() {
        writeln!(out, "Skipped (unsupported): {}", report.skipped.len())?;
    }
    if !report.collisions.is_empty() {
        writeln!(out, "Overwritten outputs:   {}", report.collisions.len())?;
    }
    let totals = format!(
        "{}/{} file(s) converted successfully",
        report.succeeded_count, report.total_candidates
    );
    if use_color && report.is_success() {
        writeln!(out, "{}", totals.green().bold())?;
    } else if use_color {
        writeln!(out, "{}", totals.bright_red().bold())?;
    } else {
        writeln!(out, "{}", totals)?;
    }
    writeln!(out, "Total time: {}", format_duration(report.elapsed.as_secs_f64()))?;
    Ok(())
}
