//! Fuzz target for LiDAR point table parsing.
//!
//! Run with:
//!   cargo +nightly fuzz run point_table_parse

#![no_main]

use libfuzzer_sys::fuzz_target;
use pandaset::data::io_table::from_point_table_slice;

fuzz_target!(|data: &[u8]| {
    // A real sweep is a few MB of CSV.
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = from_point_table_slice(data);
});
