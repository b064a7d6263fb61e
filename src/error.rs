use std::{
    fmt::{Debug, Display},
    path::PathBuf,
};

pub struct Error {
    kind: ErrorKind,
    context: Vec<String>,
}

#[derive(Debug)]
pub enum ErrorKind {
    /// A static image asset (logo or signature) was not found at its expected path
    AssetMissing(PathBuf),
    /// The request payload did not match the typed invoice schema
    InvalidInput(String),
    /// A computed amount cannot be represented on the invoice
    InvalidAmount(String),
    Io(std::io::Error),
    Image(image::ImageError),
    Pdf(printpdf::Error),
}

pub trait AddContext<T> {
    fn add_context(self, ctx: &str) -> Result<T, Error>;
}

impl Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut context = self.context.clone();
        context.reverse();
        let context = if context.is_empty() {
            String::from("no context")
        } else {
            context.join(" -> ")
        };
        write!(f, "{context}")
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error {
            context: vec![format!("{:?}", value)],
            kind: ErrorKind::Io(value),
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(value: image::ImageError) -> Self {
        Error {
            context: vec![value.to_string()],
            kind: ErrorKind::Image(value),
        }
    }
}

impl From<printpdf::Error> for Error {
    fn from(value: printpdf::Error) -> Self {
        Error {
            context: vec![format!("{:?}", value)],
            kind: ErrorKind::Pdf(value),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::invalid_input(value.to_string())
    }
}

impl Error {
    pub fn asset_missing(path: impl Into<PathBuf>) -> Error {
        let path = path.into();
        Error {
            context: vec![format!("asset not found at '{}'", path.display())],
            kind: ErrorKind::AssetMissing(path),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Error {
        let message = message.into();
        Error {
            context: vec![format!("invalid input: {message}")],
            kind: ErrorKind::InvalidInput(message),
        }
    }

    pub fn invalid_amount(message: impl Into<String>) -> Error {
        let message = message.into();
        Error {
            context: vec![format!("invalid amount: {message}")],
            kind: ErrorKind::InvalidAmount(message),
        }
    }

    /// The underlying cause of this error, independent of any context added on the way up.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Add more context to the given error. This context will ultimately be displayed to the user
    /// or written to the server log, and could be useful for correcting bad input.
    ///
    /// Generally a single layer of context should be added for every level that an error is
    /// surfaced. When the error is displayed, all the context is shown outermost first.
    ///
    /// # Arguments
    /// * `context` - Any additional information that would be useful to see if the error is
    /// surfaced
    pub fn add_context(self, context: &str) -> Error {
        let mut existing = self.context.clone();
        existing.push(context.to_string());
        Self {
            context: existing,
            ..self
        }
    }
}

impl<T> AddContext<T> for Result<T, Error> {
    fn add_context(self, ctx: &str) -> Result<T, Error> {
        match self {
            Ok(d) => Ok(d),
            Err(e) => Err(e.add_context(ctx)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_is_displayed_outermost_first() {
        let err = Error::asset_missing("static/logo.png")
            .add_context("loading assets")
            .add_context("generating invoice");
        assert_eq!(
            err.to_string(),
            "generating invoice -> loading assets -> asset not found at 'static/logo.png'"
        );
    }

    #[test]
    fn kind_survives_added_context() {
        let result: Result<(), Error> = Err(Error::invalid_amount("too large"));
        let err = result.add_context("aggregating totals").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidAmount(m) if m == "too large"));
    }

    #[test]
    fn json_errors_become_invalid_input() {
        let err: Error = serde_json::from_str::<u32>("\"not a number\"")
            .unwrap_err()
            .into();
        assert!(matches!(err.kind(), ErrorKind::InvalidInput(_)));
    }
}
