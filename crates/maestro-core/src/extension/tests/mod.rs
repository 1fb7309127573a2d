pub mod loader_tests;
pub mod manifest_tests;
pub mod version_tests;
