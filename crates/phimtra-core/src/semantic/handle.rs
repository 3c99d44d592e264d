use std::fmt;
use std::sync::{Mutex, OnceLock};

use super::{SemanticError, TextEncoder};

type Constructor = Box<dyn FnOnce() -> Result<Box<dyn TextEncoder>, SemanticError> + Send>;

/// Shared access to the process's sentence encoder.
///
/// A lazy handle runs its constructor on first use. If construction fails the
/// failure is logged once and the handle stays disabled.
pub struct EncoderHandle {
    mode: Mode,
}

enum Mode {
    Disabled,
    Ready(Box<dyn TextEncoder>),
    Lazy {
        init: Mutex<Option<Constructor>>,
        cell: OnceLock<Option<Box<dyn TextEncoder>>>,
    },
}

impl EncoderHandle {
    pub fn disabled() -> Self {
        Self { mode: Mode::Disabled }
    }

    pub fn ready(encoder: impl TextEncoder + 'static) -> Self {
        Self {
            mode: Mode::Ready(Box::new(encoder)),
        }
    }

    pub fn lazy<F>(init: F) -> Self
    where
        F: FnOnce() -> Result<Box<dyn TextEncoder>, SemanticError> + Send + 'static,
    {
        Self {
            mode: Mode::Lazy {
                init: Mutex::new(Some(Box::new(init))),
                cell: OnceLock::new(),
            },
        }
    }

    /// The encoder, constructing it on first call. `None` when disabled or
    /// when construction failed.
    pub fn get(&self) -> Option<&dyn TextEncoder> {
        match &self.mode {
            Mode::Disabled => None,
            Mode::Ready(encoder) => Some(&**encoder),
            Mode::Lazy { init, cell } => cell
                .get_or_init(|| {
                    let constructor = init.lock().ok().and_then(|mut slot| slot.take())?;
                    match constructor() {
                        Ok(encoder) => {
                            tracing::info!(encoder = encoder.name(), "sentence encoder ready");
                            Some(encoder)
                        }
                        Err(e) => {
                            tracing::warn!(
                                error = %e,
                                "sentence encoder unavailable, semantic keywords disabled"
                            );
                            None
                        }
                    }
                })
                .as_deref(),
        }
    }
}

impl fmt::Debug for EncoderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.mode {
            Mode::Disabled => "disabled",
            Mode::Ready(_) => "ready",
            Mode::Lazy { cell, .. } => match cell.get() {
                None => "pending",
                Some(Some(_)) => "ready",
                Some(None) => "failed",
            },
        };
        f.debug_struct("EncoderHandle").field("state", &state).finish()
    }
}
