use crate::models::air_handling::ProcessError;

/// Single-slot port holding one value.
///
/// An input connector is either set directly by the caller or bound to the
/// output of an earlier block, identified by its position in the engine. A
/// bound connector is refreshed by the engine and rejects direct writes.
#[derive(Debug, Clone, PartialEq)]
pub struct Connector<T> {
    value: Option<T>,
    source: Option<usize>,
}

impl<T> Default for Connector<T> {
    fn default() -> Self {
        Self {
            value: None,
            source: None,
        }
    }
}

impl<T> Connector<T> {
    /// An empty, unbound connector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An unbound connector holding `value`.
    #[must_use]
    pub fn with_value(value: T) -> Self {
        Self {
            value: Some(value),
            source: None,
        }
    }

    #[must_use]
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Index of the block this connector is bound to.
    #[must_use]
    pub fn source(&self) -> Option<usize> {
        self.source
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.source.is_some()
    }

    /// Stores `value`.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::Wiring`] if the connector is bound upstream.
    pub fn set(&mut self, value: T) -> Result<(), ProcessError> {
        if let Some(source) = self.source {
            return Err(ProcessError::wiring(format!(
                "connector is bound to block {source} and cannot be set directly"
            )));
        }
        self.value = Some(value);
        Ok(())
    }

    /// The stored value.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::MissingArgument`] naming `what` if empty.
    pub fn require(&self, what: &str) -> Result<&T, ProcessError> {
        self.value
            .as_ref()
            .ok_or_else(|| ProcessError::missing(what))
    }

    /// Empties the connector, keeping its binding.
    pub fn clear(&mut self) {
        self.value = None;
    }

    pub(crate) fn bind(&mut self, source: usize) {
        self.source = Some(source);
    }

    /// Writes a value that came from the bound source, or from the owning
    /// block for an output connector.
    pub(crate) fn refresh(&mut self, value: T) {
        self.value = Some(value);
    }
}
