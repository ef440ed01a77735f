//! Error and warning diagnostics raised while writing a syntax
//!
//! Diagnostics are informational: they go to a caller-registered handler
//! when one exists, otherwise one line is written to a fallback stream
//! (standard error by default). They never replace the `Result` returned by
//! the operation that raised them.
//!
//! # Examples
//!
//! ```rust
//! use oxirs_serialize::diagnostics::{Diagnostics, Locator, Severity};
//!
//! let mut diagnostics = Diagnostics::new();
//! let seen = std::sync::Arc::new(parking_lot::Mutex::new(Vec::new()));
//! let sink = seen.clone();
//! diagnostics.set_warning_handler(move |diagnostic| {
//!     sink.lock().push(diagnostic.message().to_string());
//! });
//!
//! let locator = Locator::new(Some("http://example.org/doc".into()));
//! diagnostics.report(Severity::Warning, &locator, format_args!("late namespace\n"));
//! assert_eq!(seen.lock().as_slice(), ["late namespace"]);
//! ```

use std::fmt::{self, Write as _};
use std::io::{self, Write};

/// Current output position used to annotate diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Locator {
    /// Identifier of the document being written (the session base URI)
    pub uri: Option<String>,
    /// Line number, starting at 0 for a new session
    pub line: usize,
    /// Column number, starting at 0 for a new session
    pub column: usize,
}

impl Locator {
    /// Locator at the start of a document
    pub fn new(uri: Option<String>) -> Self {
        Self {
            uri,
            line: 0,
            column: 0,
        }
    }

    /// Move to the start of the next line
    pub fn next_line(&mut self) {
        self.line += 1;
        self.column = 0;
    }

    /// Advance the column by `count` characters
    pub fn advance(&mut self, count: usize) {
        self.column += count;
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(uri) = &self.uri {
            write!(f, "<{uri}> ")?;
        }
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    fn label(self) -> &'static str {
        match self {
            Self::Error => "serializer error",
            Self::Warning => "serializer warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A formatted diagnostic event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    severity: Severity,
    locator: Locator,
    message: String,
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Position of the writer when the diagnostic was raised
    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    /// Message text without a trailing newline
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} - {}", self.locator, self.severity, self.message)
    }
}

/// Callback receiving diagnostics; user data is whatever the closure captures
pub type MessageHandler = Box<dyn FnMut(&Diagnostic) + Send>;

/// Message written when a diagnostic cannot be formatted
const FORMAT_FAILURE_LINE: &str = "serializer diagnostic: failed to format message\n";

/// Routes diagnostics to handlers or a fallback stream
pub struct Diagnostics {
    error_handler: Option<MessageHandler>,
    warning_handler: Option<MessageHandler>,
    fallback: Box<dyn Write + Send>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("error_handler", &self.error_handler.is_some())
            .field("warning_handler", &self.warning_handler.is_some())
            .finish_non_exhaustive()
    }
}

impl Diagnostics {
    /// No handlers, falling back to standard error
    pub fn new() -> Self {
        Self {
            error_handler: None,
            warning_handler: None,
            fallback: Box::new(io::stderr()),
        }
    }

    pub fn set_error_handler(&mut self, handler: impl FnMut(&Diagnostic) + Send + 'static) {
        self.error_handler = Some(Box::new(handler));
    }

    pub fn set_warning_handler(&mut self, handler: impl FnMut(&Diagnostic) + Send + 'static) {
        self.warning_handler = Some(Box::new(handler));
    }

    /// Remove both handlers
    pub fn clear_handlers(&mut self) {
        self.error_handler = None;
        self.warning_handler = None;
    }

    /// Replace the stream used when no handler is registered
    pub fn set_fallback_stream(&mut self, stream: impl Write + Send + 'static) {
        self.fallback = Box::new(stream);
    }

    /// Format and dispatch one diagnostic.
    ///
    /// One trailing newline is stripped from the message. The matching
    /// handler is invoked exactly once if registered; otherwise a single
    /// line is written to the fallback stream.
    pub fn report(&mut self, severity: Severity, locator: &Locator, args: fmt::Arguments<'_>) {
        let mut message = String::new();
        if message.write_fmt(args).is_err() {
            let _ = self.fallback.write_all(FORMAT_FAILURE_LINE.as_bytes());
            return;
        }
        if message.ends_with('\n') {
            message.pop();
        }

        let diagnostic = Diagnostic {
            severity,
            locator: locator.clone(),
            message,
        };

        let handler = match severity {
            Severity::Error => self.error_handler.as_mut(),
            Severity::Warning => self.warning_handler.as_mut(),
        };

        match handler {
            Some(handler) => handler(&diagnostic),
            None => {
                // Nothing sensible to do if the fallback stream itself fails
                let _ = writeln!(self.fallback, "{diagnostic}");
            }
        }
    }

    pub fn error(&mut self, locator: &Locator, args: fmt::Arguments<'_>) {
        self.report(Severity::Error, locator, args);
    }

    pub fn warning(&mut self, locator: &Locator, args: fmt::Arguments<'_>) {
        self.report(Severity::Warning, locator, args);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::SharedBuffer;
    use parking_lot::Mutex;
    use std::sync::Arc;

    struct FailingDisplay;

    impl fmt::Display for FailingDisplay {
        fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn test_locator_display() {
        let mut locator = Locator::new(Some("http://example.org/".to_string()));
        locator.next_line();
        locator.advance(4);
        assert_eq!(locator.to_string(), "<http://example.org/> line 1, column 4");
        assert_eq!(Locator::default().to_string(), "line 0, column 0");
    }

    #[test]
    fn test_fallback_single_line() {
        let buffer = SharedBuffer::new();
        let mut diagnostics = Diagnostics::new();
        diagnostics.set_fallback_stream(buffer.clone());

        let locator = Locator::new(Some("http://example.org/doc".to_string()));
        diagnostics.error(&locator, format_args!("bad term {}\n", 3));

        assert_eq!(
            buffer.to_string_lossy(),
            "<http://example.org/doc> line 0, column 0 serializer error - bad term 3\n"
        );
    }

    #[test]
    fn test_handler_receives_stripped_message() {
        let buffer = SharedBuffer::new();
        let received = Arc::new(Mutex::new(Vec::new()));
        let captured = received.clone();

        let mut diagnostics = Diagnostics::new();
        diagnostics.set_fallback_stream(buffer.clone());
        diagnostics.set_error_handler(move |diagnostic| {
            captured.lock().push(diagnostic.clone());
        });

        diagnostics.error(&Locator::default(), format_args!("broken\n"));

        let received = received.lock();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].message(), "broken");
        assert_eq!(received[0].severity(), Severity::Error);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_warning_does_not_use_error_handler() {
        let buffer = SharedBuffer::new();
        let calls = Arc::new(Mutex::new(0));
        let counter = calls.clone();

        let mut diagnostics = Diagnostics::new();
        diagnostics.set_fallback_stream(buffer.clone());
        diagnostics.set_error_handler(move |_| *counter.lock() += 1);
        diagnostics.warning(&Locator::default(), format_args!("careful"));

        assert_eq!(*calls.lock(), 0);
        assert!(buffer.to_string_lossy().contains("serializer warning - careful"));
    }

    #[test]
    fn test_format_failure_writes_fixed_line() {
        let buffer = SharedBuffer::new();
        let mut diagnostics = Diagnostics::new();
        diagnostics.set_fallback_stream(buffer.clone());
        diagnostics.set_error_handler(|_| panic!("handler must not run"));

        diagnostics.error(&Locator::default(), format_args!("{}", FailingDisplay));
        assert_eq!(buffer.to_string_lossy(), FORMAT_FAILURE_LINE);
    }
}
