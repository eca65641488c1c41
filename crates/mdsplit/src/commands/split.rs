//! `mdsplit split` command implementation.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use mdsplit_sections::Section;

use crate::error::CliError;
use crate::output::Output;

/// Output format for split results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    /// JSON array of sections.
    #[default]
    Json,
    /// Each section re-rendered as markdown.
    Markdown,
}

/// Arguments for the split command.
#[derive(Args)]
pub(crate) struct SplitArgs {
    /// Markdown file to split (`-` or omitted reads stdin).
    path: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Pretty-print JSON output.
    #[arg(long)]
    pretty: bool,

    /// Write output to a file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl SplitArgs {
    /// Execute the split command.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read, is not UTF-8 text, or
    /// the output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let bytes = read_input(self.path.as_deref())?;
        let sections = mdsplit_sections::split_bytes(&bytes)?;
        tracing::info!(sections = sections.len(), "Split document");

        let rendered = render(&sections, self.format, self.pretty)?;

        if let Some(path) = &self.output {
            std::fs::write(path, &rendered)?;
            Output::new().success(&format!(
                "Wrote {} sections to {}",
                sections.len(),
                path.display()
            ));
        } else {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }

        Ok(())
    }
}

/// Read the document from `path`, or stdin when absent or `-`.
fn read_input(path: Option<&Path>) -> Result<Vec<u8>, CliError> {
    match path {
        Some(path) if path != Path::new("-") => Ok(std::fs::read(path)?),
        _ => {
            let mut buf = Vec::new();
            std::io::stdin().lock().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Render sections in the requested format, newline-terminated.
fn render(sections: &[Section], format: Format, pretty: bool) -> Result<String, CliError> {
    let mut rendered = match format {
        Format::Json if pretty => serde_json::to_string_pretty(sections)?,
        Format::Json => serde_json::to_string(sections)?,
        Format::Markdown => sections
            .iter()
            .map(Section::to_markdown)
            .collect::<Vec<_>>()
            .join("\n\n"),
    };
    rendered.push('\n');
    Ok(rendered)
}
