//! Types for standardized end-of-run reports to the user.
//!
//! Per-record conditions (a skipped variant, an unresolvable gene name) must
//! never abort a stream, but they should not vanish either. Commands
//! accumulate them in a [`Report`] which the binary prints to standard
//! error after the run completes.

/// The [`CommandOutput<U>`] type is generic over some data output from a
/// command, paired with a [`Report`] of diagnostics for the user.
#[derive(Debug)]
pub struct CommandOutput<U> {
    pub value: U,
    pub report: Report,
}

impl<U> CommandOutput<U> {
    pub fn new(value: U, report: Report) -> Self {
        Self { value, report }
    }
}

/// A type to (semi) standardize reporting to the user.
#[derive(Debug, Default)]
pub struct Report {
    entries: Vec<String>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_issue(&mut self, message: String) {
        self.entries.push(message)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Print all entries to standard error.
    pub fn print(&self) {
        for entry in &self.entries {
            eprintln!("{}", entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Report;

    #[test]
    fn report_collects_entries() {
        let mut report = Report::new();
        assert!(report.is_empty());
        report.add_issue("2 records were skipped".to_string());
        assert!(!report.is_empty());
    }
}
