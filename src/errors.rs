//! Pluggable diagnostics for the binary reader.
//!
//! Decoders never return error values; they report through an [`ErrorSink`]
//! and return `None`. The sink sees a stack of human-readable context
//! frames ("import", "limits", "u32", ...) pushed and popped around each
//! decoder, so a single malformed byte produces a trail describing where in
//! the module it was found.

use thiserror::Error;

/// Receives diagnostics and context frames from the decoders.
///
/// Implementations may accumulate, print, or discard. Errors are reported
/// in the exact order they are detected, outer context frames before inner
/// ones.
pub trait ErrorSink {
    fn push_context(&mut self, offset: usize, desc: &str);
    fn pop_context(&mut self);
    fn on_error(&mut self, offset: usize, message: &str);
}

/// Scoped context frame: pushes on construction, pops on drop.
///
/// The guard forwards [`ErrorSink`], so a decoder shadows its sink with the
/// guard and every nested report carries the frame:
///
/// ```
/// use lasm::{ErrorSink, ErrorsContextGuard, CollectingErrors};
///
/// let mut sink = CollectingErrors::new();
/// {
///     let mut errors = ErrorsContextGuard::new(&mut sink, 0, "limits");
///     errors.on_error(1, "Invalid flags value: 2");
/// }
/// assert_eq!(sink.errors[0].context[0].desc, "limits");
/// assert_eq!(sink.open_contexts(), 0);
/// ```
pub struct ErrorsContextGuard<'e> {
    errors: &'e mut dyn ErrorSink,
}

impl<'e> ErrorsContextGuard<'e> {
    pub fn new(errors: &'e mut dyn ErrorSink, offset: usize, desc: &str) -> Self {
        errors.push_context(offset, desc);
        ErrorsContextGuard { errors }
    }
}

impl ErrorSink for ErrorsContextGuard<'_> {
    fn push_context(&mut self, offset: usize, desc: &str) {
        self.errors.push_context(offset, desc);
    }

    fn pop_context(&mut self) {
        self.errors.pop_context();
    }

    fn on_error(&mut self, offset: usize, message: &str) {
        self.errors.on_error(offset, message);
    }
}

impl Drop for ErrorsContextGuard<'_> {
    fn drop(&mut self) {
        self.errors.pop_context();
    }
}

/// One context frame of a recorded error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorFrame {
    pub offset: usize,
    pub desc: String,
}

impl ErrorFrame {
    pub fn new(offset: usize, desc: impl Into<String>) -> Self {
        ErrorFrame {
            offset,
            desc: desc.into(),
        }
    }
}

/// A recorded diagnostic with a deep copy of the context stack at the
/// moment it was emitted, so the record outlives every decoder scope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (at offset {offset})")]
pub struct DecodeError {
    pub context: Vec<ErrorFrame>,
    pub offset: usize,
    pub message: String,
}

impl DecodeError {
    /// Context frames followed by the error itself, as (offset, text)
    /// pairs. Convenient for asserting whole trails.
    pub fn trail(&self) -> Vec<(usize, String)> {
        let mut frames: Vec<(usize, String)> = self
            .context
            .iter()
            .map(|frame| (frame.offset, frame.desc.clone()))
            .collect();
        frames.push((self.offset, self.message.clone()));
        frames
    }
}

/// Sink that accumulates every reported error as a [`DecodeError`].
#[derive(Debug, Default)]
pub struct CollectingErrors {
    pub context: Vec<ErrorFrame>,
    pub errors: Vec<DecodeError>,
}

impl CollectingErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Depth of the live context stack. Zero after any top-level decoder
    /// returns.
    pub fn open_contexts(&self) -> usize {
        self.context.len()
    }
}

impl ErrorSink for CollectingErrors {
    fn push_context(&mut self, offset: usize, desc: &str) {
        self.context.push(ErrorFrame::new(offset, desc));
    }

    fn pop_context(&mut self) {
        self.context.pop();
    }

    fn on_error(&mut self, offset: usize, message: &str) {
        self.errors.push(DecodeError {
            context: self.context.clone(),
            offset,
            message: message.to_string(),
        });
    }
}

/// Sink that discards everything.
#[derive(Debug, Default)]
pub struct NopErrors;

impl ErrorSink for NopErrors {
    fn push_context(&mut self, _offset: usize, _desc: &str) {}

    fn pop_context(&mut self) {}

    fn on_error(&mut self, _offset: usize, _message: &str) {}
}
