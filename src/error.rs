use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConvertError>;

/// What is wrong with a single input line, before line context is attached.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LineFault {
    #[error("expected 2 fields (3 with a label), found {0}")]
    Arity(usize),

    #[error("not an integer: {0:?}")]
    NotInteger(String),

    #[error("{0} does not fit in a signed 32-bit integer")]
    OutOfRange(String),
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("line {line}: {fault}: {content:?}")]
    Format {
        line: usize,
        content: String,
        fault: LineFault,
    },

    #[error("line {line}: {token} does not fit in a signed 32-bit integer: {content:?}")]
    Range {
        line: usize,
        content: String,
        token: String,
    },

    #[error("{action} {}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is both the input and the output", .path.display())]
    SameFile { path: PathBuf },

    #[error("{} is {len} bytes, not a whole number of 8-byte records", .path.display())]
    Truncated { path: PathBuf, len: usize },
}

impl ConvertError {
    /// Attaches line context to a fault, splitting range faults from format faults.
    pub fn at_line(line: usize, content: &str, fault: LineFault) -> Self {
        let content = content.to_owned();
        match fault {
            LineFault::OutOfRange(token) => Self::Range {
                line,
                content,
                token,
            },
            fault => Self::Format {
                line,
                content,
                fault,
            },
        }
    }

    pub fn io(action: &'static str, path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io {
            action,
            path,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_faults_become_range_errors() {
        let err = ConvertError::at_line(3, "p 1 5000000000", LineFault::OutOfRange("5000000000".into()));
        assert!(matches!(err, ConvertError::Range { line: 3, ref token, .. } if token == "5000000000"));
        assert_eq!(
            err.to_string(),
            "line 3: 5000000000 does not fit in a signed 32-bit integer: \"p 1 5000000000\""
        );
    }

    #[test]
    fn format_messages_name_the_line() {
        let err = ConvertError::at_line(7, "1 2 3 4", LineFault::Arity(4));
        assert_eq!(err.to_string(), "line 7: expected 2 fields (3 with a label), found 4: \"1 2 3 4\"");
    }
}
