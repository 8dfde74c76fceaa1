//! Fuzz target for pose track parsing followed by transform construction.
//!
//! Run with:
//!   cargo +nightly fuzz run pose_json_parse

#![no_main]

use libfuzzer_sys::fuzz_target;
use pandaset::data::io_json::from_json_str;
use pandaset::data::Pose;
use pandaset::geometry::pose_to_transform;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(poses) = from_json_str::<Vec<Pose>>(text) {
        for pose in &poses {
            let _ = pose_to_transform(pose);
        }
    }
});
