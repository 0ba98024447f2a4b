//! CLI command implementations - one module per subcommand.

pub mod generate;
pub mod init;
