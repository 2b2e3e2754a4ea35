#[macro_export]
macro_rules! relative_file {
    ($f : expr) => {{
        let base = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        base.join($f)
    }};
}

#[macro_export]
macro_rules! source_from_relative_file {
    ($f : expr) => {{
        std::fs::read_to_string($crate::relative_file!($f)).unwrap()
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn should_load_fixtures() {
        let source = source_from_relative_file!("fixtures/json/valid/simple.json");
        assert!(crate::parse_str(&source).is_ok());
    }
}
