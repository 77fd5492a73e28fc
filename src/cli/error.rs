use miette::Diagnostic;
use thiserror::Error;

use crate::client::DeepSourceError;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Client(#[from] DeepSourceError),

    #[error("Missing API key")]
    #[diagnostic(
        code(deepsource::cli::missing_api_key),
        help("Pass --api-key or set the DEEPSOURCE_API_KEY environment variable.")
    )]
    MissingApiKey,

    #[error("Failed to render output: {message}")]
    #[diagnostic(code(deepsource::cli::output))]
    Output { message: String },
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Output {
            message: e.to_string(),
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
