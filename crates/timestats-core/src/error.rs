use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Wire encoding error: {0}")]
    Encoding(#[from] postcard::Error),

    /// The histogram holds no observations, so it has no mean.
    #[error("Histogram has no observations")]
    EmptyHistogram,
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GlobalStatsProto, Histogram};

    fn describe(err: &Error) -> &'static str {
        match err {
            Error::Serialization(_) => "serialization",
            Error::Encoding(_) => "encoding",
            Error::EmptyHistogram => "empty",
        }
    }

    #[test]
    fn test_every_variant_comes_from_a_core_operation() {
        let json = GlobalStatsProto::from_json("{").unwrap_err();
        assert_eq!(describe(&json), "serialization");

        let bytes = GlobalStatsProto::from_bytes(&[]).unwrap_err();
        assert_eq!(describe(&bytes), "encoding");

        let empty = Histogram::new().average_time().unwrap_err();
        assert_eq!(describe(&empty), "empty");
    }
}
