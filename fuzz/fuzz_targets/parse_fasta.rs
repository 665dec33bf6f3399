#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate fastago;

use fastago::parser::{Event, FastaReader};
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    let reader = FastaReader::new(Cursor::new([b">", data].concat()));
    let mut terminals = 0;
    for event in reader {
        if let Event::Finished(res) = event {
            assert!(res.is_ok());
            terminals += 1;
        }
    }
    assert_eq!(terminals, 1);
});
