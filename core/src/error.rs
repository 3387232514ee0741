//! Negative error codes returned in place of a positive ID.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RtcError {
    /// Could not enqueue the new/cancel request: queue full, or `seconds`
    /// exceeded `MAX_SECS`.
    Add,
    /// Entry allocation failed.
    Mem,
    /// Invalid arguments: `seconds == 0`, or an alarm time out of range.
    Fmt,
    /// `Cancel` called with a non-positive id.
    Id,
}

impl RtcError {
    pub const fn code(self) -> i32 {
        match self {
            RtcError::Add => -1,
            RtcError::Mem => -2,
            RtcError::Fmt => -3,
            RtcError::Id => -4,
        }
    }
}

impl From<RtcError> for i32 {
    fn from(err: RtcError) -> Self {
        err.code()
    }
}
