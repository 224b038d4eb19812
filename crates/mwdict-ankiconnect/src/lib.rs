#![doc = include_str!("../README.md")]

#[cfg(feature = "client-reqwest")]
pub mod client;
pub mod request;

use {
    derive_more::{Display, Error},
    serde::{Deserialize, Serialize},
};

/// AnkiConnect API version which requests are written for.
pub const VERSION: u32 = 6;

/// Body of every AnkiConnect response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response<T> {
    /// Result of the action, if it succeeded.
    pub result: Option<T>,
    /// Error message, if it failed.
    pub error: Option<String>,
}

/// AnkiConnect reported that an action failed.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("AnkiConnect error: {_0}")]
pub struct Error(#[error(ignore)] pub String);

impl<T> Response<T> {
    /// Converts this response into its result.
    ///
    /// # Errors
    ///
    /// Errors with the response's error message if there is no result.
    pub fn into_result(self) -> Result<T, Error> {
        match (self.result, self.error) {
            (Some(result), _) => Ok(result),
            (None, Some(err)) => Err(Error(err)),
            (None, None) => Err(Error("(no message)".into())),
        }
    }
}
