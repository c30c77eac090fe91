//! The open/read-or-write/dispose lifecycle shared by [`crate::Reader`] and [`crate::Writer`].

use crate::{Error, Result};

/// Where a stream sits in its lifecycle.
///
/// `Opened` is the state right after construction, before any record has been read or written.
/// The first successful record moves it to `Streaming`. Once the reader has produced its last
/// record (or the writer has written its last one and been closed) the stream is
/// `EndOfStream`/done; `Disposed` is terminal and makes every further operation fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StreamState {
    /// Constructed, nothing read or written yet.
    Opened,
    /// At least one record has moved through the stream.
    Streaming,
    /// The reader has produced its last record.
    EndOfStream,
    /// The stream has been disposed; any further operation is a contract violation.
    Disposed,
}

impl StreamState {
    /// Fails with [`Error::Contract`] if this stream has already been disposed.
    pub(crate) fn check_live(self, op: &'static str) -> Result<()> {
        if self == StreamState::Disposed {
            Err(Error::Contract(op))
        } else {
            Ok(())
        }
    }

    /// Returns the state after a read attempt, given whether it produced a record.
    pub(crate) fn advance(self, produced_record: bool) -> StreamState {
        if produced_record {
            StreamState::Streaming
        } else {
            StreamState::EndOfStream
        }
    }

    /// True once the stream has produced its last record.
    pub(crate) fn is_end_of_stream(self) -> bool {
        self == StreamState::EndOfStream
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disposed_rejects_every_operation() {
        assert!(StreamState::Opened.check_live("read").is_ok());
        assert!(StreamState::Streaming.check_live("read").is_ok());
        assert!(StreamState::EndOfStream.check_live("read").is_ok());
        assert!(matches!(
            StreamState::Disposed.check_live("read"),
            Err(Error::Contract("read"))
        ));
    }

    #[test]
    fn advance_tracks_last_record() {
        assert_eq!(StreamState::Opened.advance(true), StreamState::Streaming);
        assert_eq!(StreamState::Streaming.advance(false), StreamState::EndOfStream);
        assert!(StreamState::Streaming.advance(false).is_end_of_stream());
        assert!(!StreamState::Streaming.advance(true).is_end_of_stream());
    }
}
