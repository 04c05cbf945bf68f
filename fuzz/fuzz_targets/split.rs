#![no_main]

use libfuzzer_sys::fuzz_target;
use vcd::{lines, split::Split, Time};

fuzz_target!(|input: (i64, &[u8])| {
    let (split_time, data) = input;
    let split = Split::new(data, Time(split_time.into()));

    let mut before = Vec::new();
    let mut after = Vec::new();
    split.write_before(&mut before).unwrap();
    split.write_after(&mut after).unwrap();

    let header = split.header.concat();
    assert!(before.starts_with(&header));
    assert!(after.starts_with(&header));

    // No line is lost or duplicated.
    let all = lines(data);
    assert_eq!(
        split.header.len() + split.body.before.len() + split.body.after.len(),
        all.len()
    );
    assert_eq!(before.len() + after.len(), data.len() + header.len());
});
