pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Connection: `{0}`")]
    Connection(String),
    #[error("UnsupportedType: `{0}`")]
    UnsupportedType(String),
    #[error("ColumnNotFound: `{0}`")]
    ColumnNotFound(String),
    #[error("IndexNotFound: `{0}`")]
    IndexNotFound(String),
    #[error("Execution: `{0}`")]
    Execution(String),
    #[error("Unsupported: `{0}`")]
    Unsupported(String),
    #[error("Argument: `{0}`")]
    Argument(String),
    #[error("FromValue: `{0}`")]
    FromValue(String),
    #[error("OutOfRange: `{0}`")]
    OutOfRange(String),
    #[error("Runtime: `{0}`")]
    Runtime(String),
}

#[macro_export]
macro_rules! connection {
    ($($arg:tt)*) => { $crate::Error::Connection(format!($($arg)*)) };
}

#[macro_export]
macro_rules! unsupported_type {
    ($($arg:tt)*) => { $crate::Error::UnsupportedType(format!($($arg)*)) };
}

#[macro_export]
macro_rules! column_not_found {
    ($($arg:tt)*) => { $crate::Error::ColumnNotFound(format!($($arg)*)) };
}

#[macro_export]
macro_rules! index_not_found {
    ($($arg:tt)*) => { $crate::Error::IndexNotFound(format!($($arg)*)) };
}

#[macro_export]
macro_rules! execution {
    ($($arg:tt)*) => { $crate::Error::Execution(format!($($arg)*)) };
}

#[macro_export]
macro_rules! unsupported {
    ($($arg:tt)*) => { $crate::Error::Unsupported(format!($($arg)*)) };
}

#[macro_export]
macro_rules! argument {
    ($($arg:tt)*) => { $crate::Error::Argument(format!($($arg)*)) };
}

#[macro_export]
macro_rules! from_value {
    ($($arg:tt)*) => { $crate::Error::FromValue(format!($($arg)*)) };
}

#[macro_export]
macro_rules! out_of_range {
    ($($arg:tt)*) => { $crate::Error::OutOfRange(format!($($arg)*)) };
}

#[macro_export]
macro_rules! runtime {
    ($($arg:tt)*) => { $crate::Error::Runtime(format!($($arg)*)) };
}
