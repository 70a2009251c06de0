/// How a rule proceeds after one of its validators fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CascadeMode {
    /// Run every validator in the chain and report each failure.
    #[default]
    Continue,
    /// Stop the chain at the first failure.
    Stop,
}

/// Builder-wide defaults applied to every rule declared afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidatorOptions {
    pub cascade_mode: CascadeMode,
}

impl ValidatorOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn cascade_mode(mut self, mode: CascadeMode) -> Self {
        self.cascade_mode = mode;
        self
    }
}
