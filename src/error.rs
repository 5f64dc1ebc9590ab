use thiserror::Error;

/// Failure kinds reported by [`RingBuffer`](crate::RingBuffer) operations.
///
/// Every fallible call returns one of these to its immediate caller; the
/// buffer never retries or recovers internally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RingError {
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: &'static str },

    #[error("out of memory allocating {requested} slots")]
    OutOfMemory { requested: usize },

    #[error("buffer full ({capacity} elements)")]
    BufferFull { capacity: usize },

    #[error("buffer empty")]
    BufferEmpty,
}

impl RingError {
    /// Stable machine-readable name, used in log fields and JSON output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            RingError::InvalidArgument { .. } => "invalid_argument",
            RingError::OutOfMemory { .. }     => "out_of_memory",
            RingError::BufferFull { .. }      => "buffer_full",
            RingError::BufferEmpty            => "buffer_empty",
        }
    }
}

pub type Result<T> = std::result::Result<T, RingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_are_distinct() {
        let kinds = [
            RingError::InvalidArgument { reason: "x" }.kind_name(),
            RingError::OutOfMemory { requested: 1 }.kind_name(),
            RingError::BufferFull { capacity: 1 }.kind_name(),
            RingError::BufferEmpty.kind_name(),
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_display_includes_detail() {
        let e = RingError::BufferFull { capacity: 8 };
        assert_eq!(e.to_string(), "buffer full (8 elements)");
        let e = RingError::InvalidArgument { reason: "capacity must be positive" };
        assert!(e.to_string().contains("capacity must be positive"));
    }

    #[test]
    fn test_converts_into_anyhow() {
        fn fails() -> anyhow::Result<()> {
            let r: Result<()> = Err(RingError::BufferEmpty);
            r?;
            Ok(())
        }
        let err = fails().unwrap_err();
        assert_eq!(err.downcast_ref::<RingError>(), Some(&RingError::BufferEmpty));
    }
}
