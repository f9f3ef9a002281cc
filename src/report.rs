use crate::{Interpretation, Payload};
use chrono::{DateTime, Utc};
use owo_colors::{OwoColorize, Style};
use std::io::{self, Write};

/// Layout of the "Tested on" line, in the style of RFC 1123.
const TIMESTAMP_FORMAT: &str = "%a, %d %b %Y %H:%M:%S UTC";

/// Writes the human-readable scan report.
///
/// Styling is purely cosmetic; with `color` off the output is plain text.
#[derive(Debug)]
pub struct Presenter<W> {
    out: W,
    color: bool,
}

impl<W: Write> Presenter<W> {
    /// Creates a presenter writing to `out`.
    #[must_use]
    pub fn new(out: W, color: bool) -> Presenter<W> {
        Presenter { out, color }
    }

    /// Consumes the presenter, returning the underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Names the key under test and when it was tested.
    pub fn banner(&mut self, api_key: &str, tested_on: DateTime<Utc>) -> io::Result<()> {
        let key = self.paint(api_key, Style::new().bold().magenta());
        let timestamp = self.paint(&format_timestamp(tested_on), Style::new().bold().cyan());
        writeln!(self.out)?;
        writeln!(self.out, "Checking restrictions on API key {key}")?;
        writeln!(self.out, "Tested on: {timestamp}")?;
        writeln!(self.out)
    }

    /// Echoes the request body about to be sent.
    pub fn post_body(&mut self, payload: &Payload<'_>) -> io::Result<()> {
        let label = self.paint("POST Body:", label_style());
        let url_key = self.paint(r#""url""#, Style::new().bold().red());
        let key_key = self.paint(r#""key""#, Style::new().bold().red());
        let url = self.paint(payload.url(), Style::new().bold().green());
        let key = self.paint(payload.key(), Style::new().bold().green());
        writeln!(
            self.out,
            "{label}      {{ {url_key}: '{url}', {key_key}: '{key}' }}"
        )
    }

    /// Prints the interpreted response.
    pub fn result(&mut self, interpretation: &Interpretation) -> io::Result<()> {
        let code = self.paint("Response Code: ", label_style());
        let status = self.paint("Status:        ", label_style());
        let message = self.paint("Message:       ", label_style());
        writeln!(self.out, "{code} {}", interpretation.code)?;
        writeln!(self.out, "{status} {}", interpretation.status)?;
        writeln!(self.out, "{message} {}", interpretation.short_message)?;
        writeln!(self.out)
    }

    /// Prints the database URL for a project name.
    pub fn project(&mut self, project: &str) -> io::Result<()> {
        writeln!(self.out, "{}", project_url(project))
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_owned()
        }
    }
}

fn label_style() -> Style {
    Style::new().bold().blue()
}

/// Formats a scan time for the banner, e.g. `Mon, 02 Jan 2006 15:04:05 UTC`.
#[must_use]
pub fn format_timestamp(time: DateTime<Utc>) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Returns the realtime-database URL for `project`.
#[must_use]
pub fn project_url(project: &str) -> String {
    format!("https://{project}.firebase.com/.json")
}
