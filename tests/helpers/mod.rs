// Shared by several test crates; not every crate uses every helper.
#![allow(dead_code)]

pub mod api_test_helper;
pub mod test_data_builder;
