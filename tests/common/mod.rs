//! Fixture helpers shared by the integration tests
#![allow(unused_macros)]

macro_rules! relative_file {
    ($f : expr) => {{
        let base = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        base.join($f)
    }};
}

macro_rules! source_from_relative_file {
    ($f : expr) => {{
        std::fs::read_to_string(relative_file!($f)).unwrap()
    }};
}
