//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::io;
use std::process;

use geofleet::registry::RegistryError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(io::Error),
    /// Failed to set up the registry or sweeper
    Registry(RegistryError),
    /// HTTP server error
    Serve(io::Error),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        if let CliError::Serve(_) = self {
            eprintln!();
            eprintln!("Common issues:");
            eprintln!("  1. Address in use: Another process is bound to the port");
            eprintln!("  2. Permissions: Ports below 1024 need elevated privileges");
            eprintln!("  3. Bad address: Check the --bind-addr value");
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(e) => write!(f, "Failed to initialize logging: {}", e),
            CliError::Registry(e) => write!(f, "Failed to set up registry: {}", e),
            CliError::Serve(e) => write!(f, "HTTP server error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::LoggingInit(e) => Some(e),
            CliError::Registry(e) => Some(e),
            CliError::Serve(e) => Some(e),
        }
    }
}

impl From<RegistryError> for CliError {
    fn from(e: RegistryError) -> Self {
        CliError::Registry(e)
    }
}
