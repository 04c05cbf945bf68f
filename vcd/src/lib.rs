//! Splitting of Value Change Dump (VCD) files in time.
//!
//! A VCD file is a header (declarations, plus the initial `$dumpvars` values)
//! followed by a body of `#<time>` markers and value changes. Splitting copies
//! the header into both outputs and hands each body line to whichever side of
//! the split time its governing timestamp falls on.
//!
//! Nothing here interprets the value changes. Lines are carried as raw bytes,
//! terminators included, so the outputs are byte-for-byte slices of the input.

use derive_more::{Display, From};

pub mod header;
pub mod line;
pub mod split;

/// Simulation time in picoseconds. Signed and wide so that any integer after
/// a `#` can be ordered against the split time.
#[derive(From, Display, Debug, Default, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Time(pub i128);

/// Split a buffer into lines, keeping the `\n` (and any `\r` before it) on
/// each line. A final line without a terminator is still returned.
pub fn lines(input: &[u8]) -> Vec<&[u8]> {
    input.split_inclusive(|b| *b == b'\n').collect()
}
