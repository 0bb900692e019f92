use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    WindowNotFound { label: String, path: PathBuf },
    HeightMismatch { declared: usize, parsed: usize },
    InvalidCharArg { name: &'static str, value: String },
    IOError(std::io::Error),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::IOError(e)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::WindowNotFound { label, path } => write!(
                f,
                "window table with label {} not found in {}, or does not fit the expected syntax",
                label,
                path.display()
            ),
            Error::HeightMismatch { declared, parsed } => write!(
                f,
                "length byte ({}) doesn't match number of rows in the data ({})",
                declared, parsed
            ),
            Error::InvalidCharArg { name, value } => write!(
                f,
                "the {} character argument should only be 1 character in length, length of \"{}\" is {}",
                name,
                value,
                value.chars().count()
            ),
            Error::IOError(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {}
