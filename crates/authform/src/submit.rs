//! The submission boundary.

use crate::form::{FormMode, FormValues};

/// Receives the value record once a submit passes validation. Fire and
/// forget: the screen does not wait for or inspect any result.
pub trait SubmitHandler: Send + 'static {
    fn submit(&mut self, mode: FormMode, values: &FormValues);
}

/// Logs the (redacted) values in place of a real authentication call.
#[derive(Debug, Default)]
pub struct LogSubmitHandler;

impl SubmitHandler for LogSubmitHandler {
    fn submit(&mut self, mode: FormMode, values: &FormValues) {
        match serde_json::to_string(values) {
            Ok(json) => tracing::info!(%mode, values = %json, "form submitted"),
            Err(err) => tracing::warn!(%mode, error = %err, "could not encode submitted values"),
        }
        tracing::info!(%mode, email = %values.email, "submission acknowledged");
    }
}

impl<F> SubmitHandler for F
where
    F: FnMut(FormMode, &FormValues) + Send + 'static,
{
    fn submit(&mut self, mode: FormMode, values: &FormValues) {
        self(mode, values)
    }
}
