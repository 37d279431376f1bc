//! Advisory warnings.
//!
//! Warnings never change a result. Decode and encode calls take a
//! [`WarningSink`] so the host decides whether to collect, log or ignore
//! them: `Vec<Warning>` collects, `()` discards, [`TracingSink`] logs.

use alloc::vec::Vec;
use core::fmt;

use crate::frame::FrameId;

/// A non-fatal observation made while decoding, encoding or merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The frame type decoded has not been verified against real files.
    UntestedFrame {
        /// Frame identifier.
        id: FrameId,
    },
    /// The frame type encoded has virtually no reader support.
    DiscouragedFrame {
        /// Frame identifier.
        id: FrameId,
    },
    /// Duplicate frames of a single-instance type were collapsed.
    DuplicateCollapsed {
        /// Frame identifier.
        id: FrameId,
        /// Number of instances discarded.
        dropped: usize,
    },
    /// The frame header carried flag bits this version does not define.
    UnknownFlags {
        /// Frame identifier.
        id: FrameId,
        /// The unrecognised raw bits.
        bits: u16,
    },
}

impl Warning {
    /// Identifier of the frame the warning is about.
    #[must_use]
    pub fn frame_id(&self) -> &FrameId {
        match self {
            Self::UntestedFrame { id }
            | Self::DiscouragedFrame { id }
            | Self::DuplicateCollapsed { id, .. }
            | Self::UnknownFlags { id, .. } => id,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UntestedFrame { id } => {
                write!(f, "Support for {id} is untested; please verify results")
            }
            Self::DiscouragedFrame { id } => write!(
                f,
                "General support for frame {id} is virtually nonexistent; its use is discouraged"
            ),
            Self::DuplicateCollapsed { id, dropped } => write!(
                f,
                "Frame {id} duplicated, only the last instance is kept ({dropped} dropped)"
            ),
            Self::UnknownFlags { id, bits } => {
                write!(f, "Frame {id} has unknown flags 0x{bits:04X}")
            }
        }
    }
}

/// Receiver for advisory warnings.
pub trait WarningSink {
    /// Deliver one warning.
    fn warn(&mut self, warning: Warning);
}

impl WarningSink for Vec<Warning> {
    fn warn(&mut self, warning: Warning) {
        self.push(warning);
    }
}

impl WarningSink for () {
    fn warn(&mut self, _warning: Warning) {}
}

impl<S: WarningSink + ?Sized> WarningSink for &mut S {
    fn warn(&mut self, warning: Warning) {
        (**self).warn(warning);
    }
}

/// Forwards every warning to `tracing` at `WARN` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl WarningSink for TracingSink {
    fn warn(&mut self, warning: Warning) {
        tracing::warn!(frame = %warning.frame_id(), "{}", warning);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn id(s: &str) -> FrameId {
        FrameId::new(s).unwrap()
    }

    #[test]
    fn vec_sink_collects_in_order() {
        let mut sink: Vec<Warning> = Vec::new();
        sink.warn(Warning::UntestedFrame { id: id("ETCO") });
        sink.warn(Warning::DiscouragedFrame { id: id("RVRB") });
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[0].frame_id(), "ETCO");
        assert_eq!(sink[1].frame_id(), "RVRB");
    }

    #[test]
    fn unit_sink_discards() {
        WarningSink::warn(&mut (), Warning::UntestedFrame { id: id("ETCO") });
    }

    #[test]
    fn borrowed_sink_forwards() {
        fn deliver<S: WarningSink>(mut sink: S) {
            sink.warn(Warning::UnknownFlags {
                id: FrameId::new("TIT2").unwrap(),
                bits: 0x0010,
            });
        }

        let mut inner: Vec<Warning> = Vec::new();
        deliver(&mut inner);
        assert_eq!(inner.len(), 1);
    }

    #[test]
    fn messages_are_stable() {
        let warning = Warning::DuplicateCollapsed {
            id: id("TLEN"),
            dropped: 1,
        };
        assert_eq!(
            warning.to_string(),
            "Frame TLEN duplicated, only the last instance is kept (1 dropped)"
        );
        assert_eq!(
            Warning::UnknownFlags {
                id: id("TIT2"),
                bits: 0x0010
            }
            .to_string(),
            "Frame TIT2 has unknown flags 0x0010"
        );
    }

    #[test]
    fn tracing_sink_accepts_warnings_without_subscriber() {
        let mut sink = TracingSink;
        sink.warn(Warning::UntestedFrame { id: id("ETCO") });
    }
}
