use crate::domain::value::{ResultCode, ReturnCode};

#[derive(Debug, Clone, PartialEq)]
/// Decoded response envelope: the `return` block plus mapped `entries`.
///
/// A non-approved return code is kept as data; check [`ApiResponse::is_approved`].
pub struct ApiResponse<T> {
    pub(crate) return_code: ReturnCode,
    pub(crate) message: String,
    pub(crate) entries: Vec<T>,
}

impl<T> ApiResponse<T> {
    pub fn return_code(&self) -> ReturnCode {
        self.return_code
    }

    /// Known result for the return code, if any.
    pub fn result(&self) -> Option<ResultCode> {
        self.return_code.known()
    }

    /// Server-provided message for the return code.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_approved(&self) -> bool {
        self.return_code.is_approved()
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<T> {
        self.entries
    }
}
