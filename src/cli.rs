//! Command-line interface definitions.
//!
//! All options can be given as flags; API keys can also come from the
//! environment.
//!
//! # Examples
//!
//! ```sh
//! # Serve the HTTP API
//! company_news_digest serve --bind 127.0.0.1:5000
//!
//! # One-off analysis printed as JSON, also saved under ./reports
//! company_news_digest analyze "Tesla" -j ./reports
//!
//! # With a config file and an explicit API key
//! company_news_digest --config digest.yaml --news-api-key YOUR_KEY analyze Tesla
//! ```

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// NewsAPI key (overrides the config file)
    #[arg(long, env = "NEWS_API_KEY", global = true, hide_env_values = true)]
    pub news_api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP API
    Serve {
        /// Address to listen on
        #[arg(short, long, default_value = "127.0.0.1:5000")]
        bind: String,
    },
    /// Analyze one company and print the report as JSON
    Analyze {
        /// Company name to search news for
        company: String,

        /// Also write the report under this directory
        #[arg(short, long)]
        json_output_dir: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_serve_default_bind() {
        let cli = Cli::parse_from(["company_news_digest", "serve"]);
        match cli.command {
            Command::Serve { bind } => assert_eq!(bind, "127.0.0.1:5000"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_analyze_with_flags() {
        let cli = Cli::parse_from([
            "company_news_digest",
            "analyze",
            "Tesla",
            "-j",
            "/tmp/json",
            "--config",
            "digest.yaml",
        ]);

        assert_eq!(cli.config.as_deref(), Some("digest.yaml"));
        match cli.command {
            Command::Analyze {
                company,
                json_output_dir,
            } => {
                assert_eq!(company, "Tesla");
                assert_eq!(json_output_dir.as_deref(), Some("/tmp/json"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["company_news_digest"]).is_err());
    }
}
