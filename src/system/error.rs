/// Errors that can occur when reading a host metric.
#[derive(Debug, thiserror::Error)]
pub enum SampleError {
    /// A sysfs or procfs file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    /// A sensor file held something other than a number.
    #[error("failed to parse value from {path}: {detail}")]
    Parse { path: String, detail: String },

    #[error("no IPv4 address assigned to any interface")]
    NoAddress,

    #[error("no CPU temperature sensor found")]
    NoSensor,
}
