//! Submission: hand a snapshot of the record to a sink.
//!
//! `submit` copies the state at call time, so later changes never reach
//! an already-delivered submission. It does no validation of its own.

use std::io::Write;

use tracing::{info, warn};

use crate::error::SinkError;
use crate::report::format_submission;
use crate::types::{FormState, FormVariant, OutputFormat, Submission};

/// Receives submitted records.
pub trait SubmissionSink {
    /// # Errors
    /// Returns an error if the sink could not accept the submission.
    fn deliver(&mut self, submission: &Submission) -> Result<(), SinkError>;
}

/// Outcome of a submit request.
#[derive(Debug)]
pub enum SubmissionResult {
    Delivered(Submission),
    /// The sink refused; the snapshot is returned so nothing is lost.
    Rejected { submission: Submission, error: SinkError },
}

impl SubmissionResult {
    pub fn submission(&self) -> &Submission {
        match self {
            SubmissionResult::Delivered(s) => s,
            SubmissionResult::Rejected { submission, .. } => submission,
        }
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, SubmissionResult::Delivered(_))
    }
}

/// Snapshot `state` and deliver it once to `sink`.
pub fn submit(state: &FormState, form: FormVariant, sink: &mut dyn SubmissionSink) -> SubmissionResult {
    let submission = Submission { form, record: state.clone() };
    match sink.deliver(&submission) {
        Ok(()) => SubmissionResult::Delivered(submission),
        Err(error) => {
            warn!(%form, error = %error, "submission sink failed");
            SubmissionResult::Rejected { submission, error }
        }
    }
}

// ============================================================================
// SINKS
// ============================================================================

/// Emits each submission as one structured log event.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl SubmissionSink for LogSink {
    fn deliver(&mut self, submission: &Submission) -> Result<(), SinkError> {
        let record = serde_json::to_string(&submission.record)?;
        info!(
            target: "profile_form::submission",
            form = %submission.form,
            fields = submission.record.len(),
            %record,
            "form submitted"
        );
        Ok(())
    }
}

/// Writes each submission to a writer in the chosen format.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: W,
    format: OutputFormat,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        WriterSink { writer, format }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SubmissionSink for WriterSink<W> {
    fn deliver(&mut self, submission: &Submission) -> Result<(), SinkError> {
        let text = format_submission(submission, self.format)?;
        self.writer.write_all(text.as_bytes())?;
        if !text.ends_with('\n') {
            self.writer.write_all(b"\n")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Keeps every submission in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub received: Vec<Submission>,
}

impl SubmissionSink for MemorySink {
    fn deliver(&mut self, submission: &Submission) -> Result<(), SinkError> {
        self.received.push(submission.clone());
        Ok(())
    }
}

impl<S: SubmissionSink + ?Sized> SubmissionSink for &mut S {
    fn deliver(&mut self, submission: &Submission) -> Result<(), SinkError> {
        (**self).deliver(submission)
    }
}

/// Both sinks receive the submission; the first failure is reported.
impl<A: SubmissionSink, B: SubmissionSink> SubmissionSink for (A, B) {
    fn deliver(&mut self, submission: &Submission) -> Result<(), SinkError> {
        let first = self.0.deliver(submission);
        let second = self.1.deliver(submission);
        first.and(second)
    }
}

// ============================================================================
// TESTS
// ============================================================================
