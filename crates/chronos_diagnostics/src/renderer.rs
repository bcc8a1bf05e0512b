//! Diagnostic rendering for terminal output.

use crate::diagnostic::Diagnostic;

/// Renders a diagnostic into a formatted string.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic.
    fn render(&self, diag: &Diagnostic) -> String;

    /// Renders every diagnostic, separated by blank lines.
    fn render_all(&self, diags: &[Diagnostic]) -> String {
        diags
            .iter()
            .map(|d| self.render(d))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Renders diagnostics in a rustc-style terminal format:
///
/// ```text
/// error[T201]: input delay on `en` has a min bound but no max bound
///   --> port `en`
///    = note: ...
///    = help: ...
/// ```
pub struct TerminalRenderer {
    /// Whether to wrap the severity in ANSI color codes.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn severity_label(&self, diag: &Diagnostic) -> String {
        if !self.color {
            return diag.severity.to_string();
        }
        format!(
            "\x1b[1;{}m{}\x1b[0m",
            diag.severity.ansi_color(),
            diag.severity
        )
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        let mut out = format!(
            "{}[{}]: {}\n",
            self.severity_label(diag),
            diag.code,
            diag.message
        );

        if let Some(subject) = &diag.subject {
            out.push_str(&format!("  --> `{subject}`\n"));
        }
        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }

        out
    }
}
