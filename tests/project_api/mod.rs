//! Facade, configuration and file system tests.

pub mod tests_facade;
pub mod tests_os_file_system;
