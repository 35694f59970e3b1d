//! Assertion helpers for testing

/// Assert that a file exists
#[macro_export]
macro_rules! assert_file_exists {
    ($path:expr) => {
        assert!($path.is_file(), "File should exist: {}", $path.display());
    };
}

/// Assert that a file does not exist
#[macro_export]
macro_rules! assert_file_not_exists {
    ($path:expr) => {
        assert!(
            !$path.exists(),
            "File should not exist: {}",
            $path.display()
        );
    };
}

/// Assert that file content matches expected content byte for byte
#[macro_export]
macro_rules! assert_file_content {
    ($path:expr, $expected:expr) => {
        let content = std::fs::read_to_string(&$path)
            .unwrap_or_else(|e| panic!("Failed to read file {}: {}", $path.display(), e));
        pretty_assertions::assert_eq!(
            content,
            $expected,
            "File content mismatch in: {}",
            $path.display()
        );
    };
}
