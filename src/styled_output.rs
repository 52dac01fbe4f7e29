//! Styled terminal output for extraction results using anstyle.
//!
//! Renders the human summary of a run: a header with counts, the flat
//! address list, one card per domain group (largest first), and a footer
//! with batch statistics, failed inputs and written files.

use anstyle::{AnsiColor, Color, Style};
use std::fmt::Write;
use std::io::{self, Write as IoWrite};
use std::path::PathBuf;

use crate::session::ExtractionSession;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Style definitions for different UI elements
pub struct Styles {
    pub header: Style,
    pub subheader: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,
    pub info: Style,
    pub muted: Style,
    pub bold: Style,
    pub email: Style,
    pub domain: Style,
    pub path: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            header: Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Blue))),
            subheader: Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Cyan))),
            success: Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
            warning: Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
            error: Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
            info: Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))),
            muted: Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack))),
            bold: Style::new().bold(),
            email: Style::new()
                .fg_color(Some(Color::Ansi(AnsiColor::Green)))
                .underline(),
            domain: Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Magenta))),
            path: Style::new()
                .fg_color(Some(Color::Ansi(AnsiColor::Blue)))
                .underline(),
        }
    }
}

/// Styled summary formatter for an extraction session
pub struct StyledFormatter {
    styles: Styles,
    use_colors: bool,
}

impl StyledFormatter {
    /// Create a new styled formatter
    pub fn new() -> Self {
        Self {
            styles: Styles::default(),
            use_colors: Self::should_use_colors(),
        }
    }

    /// Create a formatter without colors (for non-interactive use)
    pub fn without_colors() -> Self {
        Self {
            styles: Styles::default(),
            use_colors: false,
        }
    }

    /// Determine if colors should be used based on environment
    pub fn should_use_colors() -> bool {
        atty::is(atty::Stream::Stdout) && std::env::var("NO_COLOR").is_err()
    }

    /// Apply style to text if colors are enabled
    fn styled(&self, text: &str, style: &Style) -> String {
        if self.use_colors {
            format!("{}{}{}", style.render(), text, style.render_reset())
        } else {
            text.to_string()
        }
    }

    /// Render the full summary.
    pub fn format_session(
        &self,
        session: &ExtractionSession,
        written: &[PathBuf],
    ) -> Result<String, std::fmt::Error> {
        let mut output = String::new();
        self.write_header(&mut output, session)?;
        self.write_addresses(&mut output, session)?;
        self.write_domain_cards(&mut output, session)?;
        self.write_footer(&mut output, session, written)?;
        Ok(output)
    }

    fn write_header(
        &self,
        output: &mut String,
        session: &ExtractionSession,
    ) -> Result<(), std::fmt::Error> {
        writeln!(output)?;
        writeln!(output, "{}", self.styled(RULE, &self.styles.muted))?;
        let title = format!(
            "📧 {} unique email(s) in {} domain group(s)",
            session.addresses().len(),
            session.domains().len()
        );
        writeln!(output, "  {}", self.styled(&title, &self.styles.header))?;
        writeln!(
            output,
            "  {} Files processed: {}",
            self.styled("📄", &self.styles.info),
            self.styled(&session.stats().sources_total.to_string(), &self.styles.bold)
        )?;
        writeln!(output, "{}", self.styled(RULE, &self.styles.muted))?;
        Ok(())
    }

    fn write_addresses(
        &self,
        output: &mut String,
        session: &ExtractionSession,
    ) -> Result<(), std::fmt::Error> {
        writeln!(output)?;
        if session.addresses().is_empty() {
            writeln!(
                output,
                "  {} {}",
                self.styled("⚠️", &self.styles.warning),
                self.styled("No valid emails found", &self.styles.warning)
            )?;
            return Ok(());
        }

        writeln!(
            output,
            "  {}",
            self.styled("📮 Extracted Addresses", &self.styles.subheader)
        )?;
        writeln!(output)?;
        for (i, email) in session.addresses().iter().enumerate() {
            writeln!(
                output,
                "    {} {}",
                self.styled(&format!("{:>3}.", i + 1), &self.styles.muted),
                self.styled(email.as_str(), &self.styles.email)
            )?;
        }
        Ok(())
    }

    fn write_domain_cards(
        &self,
        output: &mut String,
        session: &ExtractionSession,
    ) -> Result<(), std::fmt::Error> {
        if session.domains().is_empty() {
            return Ok(());
        }
        writeln!(output)?;
        writeln!(
            output,
            "  {}",
            self.styled("🗂  Domains", &self.styles.subheader)
        )?;

        for bucket in session.domains().sorted_by_size() {
            writeln!(output)?;
            writeln!(
                output,
                "    {} {}",
                self.styled(bucket.key(), &self.styles.domain),
                self.styled(&format!("({})", bucket.len()), &self.styles.muted)
            )?;
            let last = bucket.len().saturating_sub(1);
            for (i, email) in bucket.addresses().iter().enumerate() {
                let branch = if i == last { "└─" } else { "├─" };
                writeln!(
                    output,
                    "       {} {}",
                    self.styled(branch, &self.styles.muted),
                    email
                )?;
            }
        }
        Ok(())
    }

    fn write_footer(
        &self,
        output: &mut String,
        session: &ExtractionSession,
        written: &[PathBuf],
    ) -> Result<(), std::fmt::Error> {
        let stats = session.stats();
        writeln!(output)?;
        writeln!(output, "{}", self.styled(RULE, &self.styles.muted))?;
        writeln!(
            output,
            "  {} Statistics:",
            self.styled("📊", &self.styles.info)
        )?;
        writeln!(
            output,
            "    {} Candidates matched: {}",
            self.styled("├─", &self.styles.muted),
            self.styled(&stats.candidates_seen.to_string(), &self.styles.bold)
        )?;
        writeln!(
            output,
            "    {} Rejected by validation: {}",
            self.styled("├─", &self.styles.muted),
            self.styled(&stats.candidates_rejected.to_string(), &self.styles.bold)
        )?;
        writeln!(
            output,
            "    {} Total time: {}ms",
            self.styled("└─", &self.styles.muted),
            self.styled(&stats.duration_ms.to_string(), &self.styles.bold)
        )?;

        if !session.failures().is_empty() {
            writeln!(output)?;
            writeln!(
                output,
                "  {} Unreadable files:",
                self.styled("⚠️", &self.styles.warning)
            )?;
            for failure in session.failures() {
                writeln!(
                    output,
                    "    {} {}: {}",
                    self.styled("•", &self.styles.error),
                    self.styled(&failure.name, &self.styles.bold),
                    self.styled(&failure.reason, &self.styles.muted)
                )?;
            }
        }

        if !written.is_empty() {
            writeln!(output)?;
            writeln!(
                output,
                "  {} Files written:",
                self.styled("💾", &self.styles.success)
            )?;
            for path in written {
                writeln!(
                    output,
                    "    {} {}",
                    self.styled("•", &self.styles.success),
                    self.styled(&path.display().to_string(), &self.styles.path)
                )?;
            }
        }

        writeln!(output, "{}", self.styled(RULE, &self.styles.muted))?;
        Ok(())
    }

    /// Print the summary to stdout.
    pub fn print_session(&self, session: &ExtractionSession, written: &[PathBuf]) -> io::Result<()> {
        let formatted = self
            .format_session(session, written)
            .map_err(|e| io::Error::other(format!("{}", e)))?;
        let mut out = io::stdout().lock();
        out.write_all(formatted.as_bytes())?;
        out.flush()
    }
}

impl Default for StyledFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_session() -> ExtractionSession {
        ExtractionSession::new()
            .ingest_text("a@example.com b@test.net c@mail.example.com d@example.org")
    }

    #[test]
    fn test_styled_formatter_creation() {
        let formatter = StyledFormatter::new();
        assert!(formatter.use_colors || !atty::is(atty::Stream::Stdout));
    }

    #[test]
    fn test_summary_formatting() {
        let formatter = StyledFormatter::without_colors();
        let output = formatter
            .format_session(&create_test_session(), &[PathBuf::from("out/list.txt")])
            .unwrap();

        assert!(output.contains("4 unique email(s) in 3 domain group(s)"));
        assert!(output.contains("  1. a@example.com"));
        assert!(output.contains("out/list.txt"));
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_domain_cards_largest_first() {
        let formatter = StyledFormatter::without_colors();
        let output = formatter
            .format_session(&create_test_session(), &[])
            .unwrap();
        let big = output.find("example.com (2)").unwrap();
        let small = output.find("test.net (1)").unwrap();
        assert!(big < small);
        assert!(output.contains("└─ c@mail.example.com"));
    }

    #[test]
    fn test_empty_session() {
        let formatter = StyledFormatter::without_colors();
        let output = formatter
            .format_session(&ExtractionSession::new(), &[])
            .unwrap();
        assert!(output.contains("No valid emails found"));
        assert!(!output.contains("Domains"));
    }
}
