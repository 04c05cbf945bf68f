use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::{
    header::header_len,
    line::{classify, is_bad_timestamp, LineKind},
    lines, Time,
};

/// The body lines of a dump, divided at a split time.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Partitions<'a> {
    /// Lines whose governing timestamp is <= the split time. Lines before the
    /// first timestamp are at time 0 so they always end up here.
    pub before: Vec<&'a [u8]>,
    /// Lines whose governing timestamp is > the split time.
    pub after: Vec<&'a [u8]>,
    /// Number of `#` lines that weren't valid times, including ones that
    /// also hold a `$end` or `$dumpvars` marker.
    pub bad_timestamps: usize,
    /// The clock after the last line.
    pub last_time: Time,
}

/// Route body lines to either side of `split_time`. Each timestamp line sets
/// the current time and every line (the timestamp included) goes to the side
/// the current time is on, so a timestamp and its value changes are never
/// separated. Splitting is inclusive: `#T` itself goes in `before`.
pub fn route<'a>(body: &[&'a [u8]], split_time: Time) -> Partitions<'a> {
    let mut parts = Partitions::default();
    let mut current_time = Time::default();

    for &line in body {
        let kind = classify(line);
        match kind {
            LineKind::Timestamp(t) => {
                if t < current_time {
                    debug!("Time goes backwards from {current_time} to {t}");
                }
                current_time = t;
            }
            _ if is_bad_timestamp(line, kind) => {
                parts.bad_timestamps += 1;
                debug!(
                    "Ignoring invalid timestamp {:?} at time {current_time}",
                    String::from_utf8_lossy(line).trim_end()
                );
            }
            _ => {}
        }

        if current_time <= split_time {
            parts.before.push(line);
        } else {
            parts.after.push(line);
        }
    }

    parts.last_time = current_time;
    parts
}

/// Line counts for a completed split.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct SplitStats {
    pub header_lines: usize,
    pub before_lines: usize,
    pub after_lines: usize,
    pub bad_timestamps: usize,
    pub last_time: Time,
}

/// A whole dump split in two. Borrows its lines from the input buffer.
#[derive(Debug)]
pub struct Split<'a> {
    pub split_time: Time,
    /// Everything up to and including the end of the `$dumpvars` section.
    /// Written verbatim at the start of both outputs.
    pub header: Vec<&'a [u8]>,
    pub body: Partitions<'a>,
}

impl<'a> Split<'a> {
    pub fn new(input: &'a [u8], split_time: Time) -> Self {
        let lines = lines(input);
        let header_end = header_len(&lines);
        let body = route(&lines[header_end..], split_time);

        Self {
            split_time,
            header: lines[..header_end].to_vec(),
            body,
        }
    }

    /// Write the header and the lines up to the split time.
    pub fn write_before<W: Write>(&self, out: W) -> io::Result<()> {
        write_lines(out, &self.header, &self.body.before)
    }

    /// Write the header and the lines after the split time.
    pub fn write_after<W: Write>(&self, out: W) -> io::Result<()> {
        write_lines(out, &self.header, &self.body.after)
    }

    pub fn stats(&self) -> SplitStats {
        SplitStats {
            header_lines: self.header.len(),
            before_lines: self.body.before.len(),
            after_lines: self.body.after.len(),
            bad_timestamps: self.body.bad_timestamps,
            last_time: self.body.last_time,
        }
    }
}

fn write_lines<W: Write>(mut out: W, header: &[&[u8]], body: &[&[u8]]) -> io::Result<()> {
    for line in header.iter().chain(body) {
        out.write_all(line)?;
    }
    out.flush()
}

fn write_file(path: &Path, write: impl FnOnce(&mut BufWriter<File>) -> io::Result<()>) -> Result<()> {
    let f = File::create(path).with_context(|| format!("Couldn't create {}", path.display()))?;
    let mut writer = BufWriter::new(f);
    write(&mut writer).with_context(|| format!("Couldn't write {}", path.display()))
}

/// Split the dump at `input` into `before` (up to and including
/// `split_time`) and `after`. Both outputs get a copy of the header.
///
/// The input is read fully into memory. If writing fails the outputs are
/// left as they are.
pub fn split_file(input: &Path, split_time: Time, before: &Path, after: &Path) -> Result<SplitStats> {
    let data = fs::read(input).with_context(|| format!("Couldn't read {}", input.display()))?;
    info!("Read {} bytes from {}", data.len(), input.display());

    let split = Split::new(&data, split_time);
    let stats = split.stats();
    if stats.bad_timestamps > 0 {
        warn!(
            "{} invalid timestamp lines in {} did not advance the time",
            stats.bad_timestamps,
            input.display()
        );
    }

    write_file(before, |w| split.write_before(w))?;
    info!(
        "Wrote {} header + {} body lines to {}",
        stats.header_lines,
        stats.before_lines,
        before.display()
    );

    write_file(after, |w| split.write_after(w))?;
    info!(
        "Wrote {} header + {} body lines to {}",
        stats.header_lines,
        stats.after_lines,
        after.display()
    );

    Ok(stats)
}
