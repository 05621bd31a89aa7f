use std::convert::From;
use std::error;
use std::fmt;
use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: Option<String>,
}

#[derive(Debug)]
pub enum ErrorKind {
    DateParse,
    NameInvalid,
    GenderParse,
    StartModeParse,
    BirthInFuture,
    InputExhausted,
    Config,
    Render,
    IOError(io::Error),
}

impl Error {
    pub fn new(kind: ErrorKind, msg: &str) -> Self {
        Error {
            kind,
            message: Some(msg.to_owned()),
        }
    }

    pub fn with_msg(mut self, message: &str) -> Self {
        self.message = Some(message.to_owned());
        self
    }

    /// Errors caused by a bad answer that the user may correct by typing again.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::DateParse
                | ErrorKind::NameInvalid
                | ErrorKind::GenderParse
                | ErrorKind::StartModeParse
                | ErrorKind::BirthInFuture
        )
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            kind,
            message: None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(io_error: io::Error) -> Error {
        Error::from(ErrorKind::IOError(io_error))
    }
}

impl From<toml::de::Error> for Error {
    fn from(toml_error: toml::de::Error) -> Error {
        Error::new(ErrorKind::Config, &toml_error.to_string())
    }
}

impl From<printpdf::Error> for Error {
    fn from(pdf_error: printpdf::Error) -> Error {
        Error::new(ErrorKind::Render, &format!("{:?}", pdf_error))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "{}: {}", self.kind.as_str(), msg),
            None => write!(f, "{}", self.kind.as_str()),
        }
    }
}

impl error::Error for Error {}

impl ErrorKind {
    pub fn as_str(&self) -> String {
        match self {
            ErrorKind::DateParse => "invalid birth date".to_owned(),
            ErrorKind::NameInvalid => "invalid first name".to_owned(),
            ErrorKind::GenderParse => "invalid gender".to_owned(),
            ErrorKind::StartModeParse => "invalid start mode".to_owned(),
            ErrorKind::BirthInFuture => "birth date is not in the past".to_owned(),
            ErrorKind::InputExhausted => "no valid input given".to_owned(),
            ErrorKind::Config => "invalid configuration".to_owned(),
            ErrorKind::Render => "could not render calendar".to_owned(),
            ErrorKind::IOError(err) => err.to_string(),
        }
    }
}
