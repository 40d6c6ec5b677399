use serde::{Deserialize, Serialize};
use std::{convert::Infallible, fmt, str::FromStr};

/// Visual category of a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    /// A completed operation
    Success,
    /// A failed operation
    Error,
    /// Neutral information (default)
    #[default]
    Info,
}

impl ToastKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

impl From<&str> for ToastKind {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "success" => Self::Success,
            "error" => Self::Error,
            "info" => Self::Info,
            other => {
                tracing::warn!("Unknown toast kind {:?}, falling back to info", other);
                Self::Info
            }
        }
    }
}

impl FromStr for ToastKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
