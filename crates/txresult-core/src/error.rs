#[derive(Debug, thiserror::Error)]
pub enum XdrError {
    #[error("truncated input: needed {needed} bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    #[error("malformed input: {0}")]
    Malformed(String),

    #[error(transparent)]
    Base64(#[from] base64::DecodeError),
}

impl XdrError {
    /// `true` for short reads, as opposed to structurally invalid input.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::Truncated { .. })
    }
}
