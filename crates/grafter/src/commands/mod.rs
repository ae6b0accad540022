//! Command implementations that need more than a few lines of glue.

pub mod init;
