use crate::Time;

/// What a single VCD line means to the splitter. Every line is classified
/// exactly once; the header scan and the time routing both branch on this.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LineKind {
    /// Contains `$dumpvars`. `closed` is set if the same line also has `$end`.
    Dumpvars { closed: bool },
    /// Contains `$end` (which includes `$enddefinitions`).
    End,
    /// `#<time>`.
    Timestamp(Time),
    /// Starts with `#` but the rest isn't a time. It doesn't move the clock.
    BadTimestamp,
    /// Anything else: value changes, comments, blank lines.
    Other,
}

impl LineKind {
    pub fn is_end(&self) -> bool {
        matches!(
            self,
            LineKind::End | LineKind::Dumpvars { closed: true }
        )
    }
}

/// Whether a line starts with `#` but doesn't set the time. This includes
/// `#` lines that also hold a marker, which `classify()` reports as markers.
pub fn is_bad_timestamp(line: &[u8], kind: LineKind) -> bool {
    line.starts_with(b"#") && !matches!(kind, LineKind::Timestamp(_))
}

const DUMPVARS: &[u8] = b"$dumpvars";
const END: &[u8] = b"$end";

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

/// Parse the time after a `#`. Surrounding whitespace (including the line
/// terminator) is ignored. Any integer is accepted: an optional sign, then
/// digits with single `_` separators between them. Values too big for an
/// `i128` saturate, so they still order correctly against any split time.
fn parse_time(rest: &[u8]) -> Option<Time> {
    let s = std::str::from_utf8(rest).ok()?.trim();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(d) => (true, d),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    if digits.is_empty()
        || digits.starts_with('_')
        || digits.ends_with('_')
        || digits.contains("__")
        || !digits.bytes().all(|b| b.is_ascii_digit() || b == b'_')
    {
        return None;
    }
    let value = digits
        .bytes()
        .filter(|b| *b != b'_')
        .fold(0i128, |acc, b| {
            acc.saturating_mul(10).saturating_add(i128::from(b - b'0'))
        });
    Some(Time(if negative { -value } else { value }))
}

/// Classify a line. The line may include its terminator.
///
/// Markers are matched anywhere in the line, so they are checked first. A
/// line containing `$` can never be a valid timestamp anyway, but it may
/// still start with `#` (see `is_bad_timestamp()`).
pub fn classify(line: &[u8]) -> LineKind {
    if contains(line, DUMPVARS) {
        return LineKind::Dumpvars {
            closed: contains(line, END),
        };
    }
    if contains(line, END) {
        return LineKind::End;
    }
    match line.strip_prefix(b"#") {
        Some(rest) => match parse_time(rest) {
            Some(t) => LineKind::Timestamp(t),
            None => LineKind::BadTimestamp,
        },
        None => LineKind::Other,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_timestamps() {
        assert_eq!(classify(b"#0\n"), LineKind::Timestamp(Time(0)));
        assert_eq!(classify(b"#100\r\n"), LineKind::Timestamp(Time(100)));
        assert_eq!(classify(b"#42"), LineKind::Timestamp(Time(42)));
        assert_eq!(classify(b"# 7 \n"), LineKind::Timestamp(Time(7)));
        assert_eq!(
            classify(b"#18446744073709551615\n"),
            LineKind::Timestamp(Time(u64::MAX.into()))
        );
        assert_eq!(classify(b"#+3\n"), LineKind::Timestamp(Time(3)));
        assert_eq!(classify(b"#1_000\n"), LineKind::Timestamp(Time(1000)));
    }

    #[test]
    fn test_negative_and_huge_timestamps() {
        assert_eq!(classify(b"#-5\n"), LineKind::Timestamp(Time(-5)));
        assert_eq!(classify(b"# -5 \r\n"), LineKind::Timestamp(Time(-5)));
        assert_eq!(
            classify(b"#18446744073709551616\n"),
            LineKind::Timestamp(Time(18446744073709551616))
        );
        assert_eq!(
            classify(b"#99999999999999999999999999999999999999999999999\n"),
            LineKind::Timestamp(Time(i128::MAX))
        );
        assert_eq!(
            classify(b"#-99999999999999999999999999999999999999999999999\n"),
            LineKind::Timestamp(Time(-i128::MAX))
        );
    }

    #[test]
    fn test_bad_timestamps() {
        assert_eq!(classify(b"#abc\n"), LineKind::BadTimestamp);
        assert_eq!(classify(b"#\n"), LineKind::BadTimestamp);
        assert_eq!(classify(b"#1.5\n"), LineKind::BadTimestamp);
        assert_eq!(classify(b"#- 5\n"), LineKind::BadTimestamp);
        assert_eq!(classify(b"#--5\n"), LineKind::BadTimestamp);
        assert_eq!(classify(b"#_5\n"), LineKind::BadTimestamp);
        assert_eq!(classify(b"#5_\n"), LineKind::BadTimestamp);
        assert_eq!(classify(b"#1__0\n"), LineKind::BadTimestamp);
        assert_eq!(classify(b"#\xff\n"), LineKind::BadTimestamp);
    }

    #[test]
    fn test_markers() {
        assert_eq!(classify(b"$dumpvars\n"), LineKind::Dumpvars { closed: false });
        assert_eq!(
            classify(b"$dumpvars 0! $end\n"),
            LineKind::Dumpvars { closed: true }
        );
        assert_eq!(classify(b"$end\n"), LineKind::End);
        assert_eq!(classify(b"$enddefinitions $end\n"), LineKind::End);
        assert_eq!(classify(b"  $end\n"), LineKind::End);
        assert!(classify(b"$end").is_end());
        assert!(!classify(b"$dumpvars").is_end());
    }

    #[test]
    fn test_hash_line_with_marker() {
        let line = b"#5 $end\n";
        assert_eq!(classify(line), LineKind::End);
        assert!(is_bad_timestamp(line, classify(line)));
        assert!(is_bad_timestamp(b"#abc\n", classify(b"#abc\n")));
        assert!(!is_bad_timestamp(b"#5\n", classify(b"#5\n")));
        assert!(!is_bad_timestamp(b"$end\n", classify(b"$end\n")));
    }

    #[test]
    fn test_other() {
        assert_eq!(classify(b"1!\n"), LineKind::Other);
        assert_eq!(classify(b"b0101 \"\n"), LineKind::Other);
        assert_eq!(classify(b"\n"), LineKind::Other);
        assert_eq!(classify(b" #100\n"), LineKind::Other);
    }
}
