// SPDX-License-Identifier: MPL-2.0
use crate::domain::error::RequestError;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Io(String),
    Config(String),
    /// A notification request could not be built.
    Request(RequestError),
    /// The default manager was used before [`install_default`] was called.
    ///
    /// [`install_default`]: crate::notifications::install_default
    NoDefaultManager,
    /// A default manager is already installed.
    DefaultInstalled,
    /// A thread panicked while holding the default manager.
    Poisoned,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Request(e) => write!(f, "Request Error: {}", e),
            Error::NoDefaultManager => write!(f, "No default notification manager installed"),
            Error::DefaultInstalled => {
                write!(f, "A default notification manager is already installed")
            }
            Error::Poisoned => write!(f, "Default notification manager lock is poisoned"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Request(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RequestError> for Error {
    fn from(err: RequestError) -> Self {
        Error::Request(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
