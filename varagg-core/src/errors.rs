use thiserror::Error;

#[derive(Error, Debug)]
pub enum DumpError {
    #[error("Malformed chromosome: {0}")]
    MalformedChromosome(String),

    #[error("Malformed sample id, no '-' delimiter: {0}")]
    MalformedSampleId(String),

    #[error("Malformed run log line: {0}")]
    MalformedLogLine(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
