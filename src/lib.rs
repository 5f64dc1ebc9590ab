//! Fixed-capacity FIFO ring buffer with block transfer and non-destructive peeking.
//!
//! ```
//! use cbuf::RingBuffer;
//!
//! let mut rb = RingBuffer::new(3)?;
//! rb.push("a")?;
//! rb.push("b")?;
//! assert_eq!(rb.pop()?, "a");
//! # Ok::<(), cbuf::RingError>(())
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod ring_buffer;
pub mod stage;

pub use error::{Result, RingError};
pub use ring_buffer::{RingBuffer, Snapshot};
