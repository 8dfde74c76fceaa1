//! Fuzz target for cuboid table parsing, including the flattened column
//! names and the boolean spellings of `stationary`.
//!
//! Run with:
//!   cargo +nightly fuzz run cuboid_table_parse

#![no_main]

use libfuzzer_sys::fuzz_target;
use pandaset::data::io_table::from_cuboid_table_str;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let _ = from_cuboid_table_str(text);
    }
});
