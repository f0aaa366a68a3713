//! CLI subcommands.

pub mod blocks;
pub mod build;
pub mod dev;
pub mod init;
pub mod render;
pub mod serve;
