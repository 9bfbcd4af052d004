#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Sensor tool exited with {status}: {stderr}")]
    SensorExit { status: String, stderr: String },

    #[error("Invalid sensor output: {0:?}")]
    InvalidOutput(String),

    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParam { name: String, reason: String },
}

impl Error {
    pub(crate) fn sensor_exit<S: Into<String>, T: Into<String>>(status: S, stderr: T) -> Self {
        Error::SensorExit { status: status.into(), stderr: stderr.into() }
    }

    pub(crate) fn invalid_output<S: Into<String>>(output: S) -> Self {
        Error::InvalidOutput(output.into())
    }

    pub(crate) fn invalid_param<S: Into<String>, T: Into<String>>(name: S, reason: T) -> Self {
        Error::InvalidParam { name: name.into(), reason: reason.into() }
    }
}

/// Result type for gpu-thermal-gate operations
pub type Result<T> = std::result::Result<T, Error>;
