use reqwest::StatusCode;

/// Shown when the server rejects a product without saying why.
pub const REJECTED_FALLBACK: &str = "Failed to add product";

/// Shown when a transport failure carries no message of its own.
pub const TRANSPORT_FALLBACK: &str = "Failed to add product. Please try again.";

/// Errors that can occur while creating a product through the API.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The server answered with a non-success status.
    ///
    /// Displays as the server-supplied message, or [`REJECTED_FALLBACK`].
    #[error("{message}")]
    Rejected {
        /// The HTTP status of the response.
        status: StatusCode,
        /// The message to show the user.
        message: String,
    },

    /// The request could not be sent or the response could not be read.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

impl SubmitError {
    /// Returns the single line displayed above the form.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            TRANSPORT_FALLBACK.to_string()
        } else {
            message
        }
    }
}
