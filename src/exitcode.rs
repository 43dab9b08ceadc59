/// Exit codes of the newtab binary, following the BSD sysexits convention where one applies.
///
/// Successful termination
pub const SUCCESS: i32 = 0;

/// Invalid arguments, validation failures, unavailable storage and anything else that went wrong
pub const USAGE: i32 = 64;

/// Another bookmark already has the requested name
pub const DUP: i32 = 65;

/// A confirmation was declined or the command was interrupted
pub const CANCEL: i32 = 130;
