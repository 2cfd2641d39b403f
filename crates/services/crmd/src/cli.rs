//! Command-line interface definitions for crmd.

use clap::{Parser, Subcommand};

/// CRM backend service.
#[derive(Parser)]
#[command(name = "crmd")]
#[command(about = "CRM backend - REST API server and operator commands")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API until Ctrl-C (default)
    Serve,

    /// Create an administrator account directly in the database
    CreateAdmin {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password
        /// Recommended to leave this empty and type it when prompted
        #[arg(long)]
        password: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default() {
        let cli = Cli::try_parse_from(["crmd"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_create_admin() {
        let cli = Cli::try_parse_from(["crmd", "create-admin", "--email", "root@x.com"]).unwrap();
        match cli.command {
            Some(Commands::CreateAdmin { email, password }) => {
                assert_eq!(email, "root@x.com");
                assert!(password.is_none());
            }
            _ => panic!("expected create-admin"),
        }
    }
}
