use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{Error, Result};
use crate::sensor::TemperatureSensor;

/// Query arguments understood by every nvidia-smi release since CUDA 8
const QUERY_ARGS: [&str; 2] = ["--query-gpu=temperature.gpu", "--format=csv,noheader"];

/// Temperature sensor backed by the `nvidia-smi` command-line tool
///
/// Each read spawns a short-lived subprocess and parses its single-line
/// integer output. No handles are held between reads.
#[derive(Debug, Clone)]
pub struct NvidiaSmi {
    program: String,
}

impl Default for NvidiaSmi {
    fn default() -> Self {
        Self::new("nvidia-smi")
    }
}

impl NvidiaSmi {
    /// Create a sensor invoking the given program
    ///
    /// Useful when nvidia-smi is not on `PATH` or a wrapper script stands in
    /// for it.
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    /// The program this sensor invokes
    pub fn program(&self) -> &str {
        &self.program
    }

    fn parse_output(stdout: &[u8]) -> Result<i32> {
        let text = std::str::from_utf8(stdout)
            .map_err(|_| Error::invalid_output(String::from_utf8_lossy(stdout)))?;
        let line = text.trim();
        line.parse::<i32>().map_err(|_| Error::invalid_output(line))
    }
}

#[async_trait]
impl TemperatureSensor for NvidiaSmi {
    async fn read_celsius(&self) -> Result<i32> {
        let output = Command::new(&self.program).args(QUERY_ARGS).output().await?;
        if !output.status.success() {
            return Err(Error::sensor_exit(
                output.status.to_string(),
                String::from_utf8_lossy(&output.stderr).trim(),
            ));
        }
        Self::parse_output(&output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_integer() {
        assert_eq!(NvidiaSmi::parse_output(b"47").unwrap(), 47);
    }

    #[test]
    fn parses_trailing_newline() {
        assert_eq!(NvidiaSmi::parse_output(b"63\n").unwrap(), 63);
    }

    #[test]
    fn parses_surrounding_whitespace() {
        assert_eq!(NvidiaSmi::parse_output(b"  55  \r\n").unwrap(), 55);
    }

    #[test]
    fn rejects_empty_output() {
        let err = NvidiaSmi::parse_output(b"").unwrap_err();
        assert!(matches!(err, Error::InvalidOutput(_)), "expected InvalidOutput, got {err:?}");
    }

    #[test]
    fn rejects_csv_header_junk() {
        let err = NvidiaSmi::parse_output(b"temperature.gpu\n47\n").unwrap_err();
        assert!(matches!(err, Error::InvalidOutput(_)), "expected InvalidOutput, got {err:?}");
    }

    #[test]
    fn rejects_non_utf8_output() {
        let err = NvidiaSmi::parse_output(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, Error::InvalidOutput(_)), "expected InvalidOutput, got {err:?}");
    }

    #[tokio::test]
    async fn missing_tool_reports_io_error() {
        let sensor = NvidiaSmi::new("definitely-not-a-real-nvidia-smi");
        let err = sensor.read_celsius().await.unwrap_err();
        assert!(matches!(err, Error::Io(_)), "expected Io, got {err:?}");
    }
}
