use log::warn;

use crate::line::{classify, LineKind};

/// Find the number of header lines, i.e. the index one past the first `$end`
/// at or after the first `$dumpvars`. Only the first `$dumpvars` section
/// counts; nothing later is looked at.
///
/// If there is no `$dumpvars`, or it is never closed, this returns 0 and the
/// whole file is body. The outputs then have no declarations, which is a
/// known limitation rather than an error.
pub fn header_len(lines: &[&[u8]]) -> usize {
    let mut in_dumpvars = false;
    for (i, line) in lines.iter().enumerate() {
        let kind = classify(line);
        if let LineKind::Dumpvars { .. } = kind {
            in_dumpvars = true;
        }
        if in_dumpvars && kind.is_end() {
            return i + 1;
        }
    }
    if in_dumpvars {
        warn!(
            "$dumpvars section is never closed; treating all {} lines as body",
            lines.len()
        );
    } else {
        warn!("No $dumpvars section; treating all {} lines as body", lines.len());
    }
    0
}
