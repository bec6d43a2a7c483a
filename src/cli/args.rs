//! Command-line argument parsing

use clap::Parser;

pub const DEFAULT_ENDPOINT: &str = "https://modules.wippy.ai";

#[derive(Parser, Debug, Clone)]
#[command(name = "module-registry-pusher")]
#[command(about = "Upload a module archive to the module registry and label the resulting commit")]
#[command(version)]
pub struct Args {
    /// Module identifier in the registry
    pub module_id: String,

    /// Label name to put on the uploaded commit
    pub tag: String,

    /// Path to the module zip archive
    pub zip_file: String,

    /// Basic Auth username
    pub basic_auth_user: String,

    /// Basic Auth password
    pub basic_auth_password: String,

    /// Registry endpoint
    #[arg(
        long = "endpoint",
        short = 'e',
        help = "Registry base URL (default: https://modules.wippy.ai)"
    )]
    pub endpoint: Option<String>,

    /// Timeout in seconds for each remote call
    #[arg(
        long = "timeout",
        short = 't',
        help = "Timeout for each remote call in seconds (default: none)"
    )]
    pub timeout: Option<u64>,

    /// Verbose output
    #[arg(long = "verbose", short = 'v', help = "Enable verbose output")]
    pub verbose: bool,

    /// Quiet output
    #[arg(
        long = "quiet",
        short = 'q',
        conflicts_with = "verbose",
        help = "Only print warnings and errors"
    )]
    pub quiet: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Args::parse()
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    pub fn timeout(&self) -> Option<u64> {
        self.timeout
    }

    /// Load configuration from environment variables
    pub fn from_env(self) -> Self {
        self.from_env_with(|key| std::env::var(key).ok())
    }

    /// Fill unset options from `lookup`; explicit flags always win
    pub fn from_env_with(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if self.endpoint.is_none() {
            self.endpoint = lookup("MODULE_PUSHER_ENDPOINT");
        }

        if self.timeout.is_none() {
            if let Some(t) = lookup("MODULE_PUSHER_TIMEOUT").and_then(|v| v.parse().ok()) {
                self.timeout = Some(t);
            }
        }

        if !self.quiet && lookup("MODULE_PUSHER_VERBOSE").is_some() {
            self.verbose = true;
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(extra: &[&str]) -> Result<Args, clap::Error> {
        let mut argv = vec![
            "module-registry-pusher",
            "acme/http",
            "v1.2.0",
            "http.zip",
            "ci-bot",
            "s3cret",
        ];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv)
    }

    #[test]
    fn test_positional_arguments() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.module_id, "acme/http");
        assert_eq!(args.tag, "v1.2.0");
        assert_eq!(args.zip_file, "http.zip");
        assert_eq!(args.basic_auth_user, "ci-bot");
        assert_eq!(args.basic_auth_password, "s3cret");
        assert_eq!(args.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(args.timeout(), None);
    }

    #[test]
    fn test_wrong_argument_count_is_usage_error() {
        let err = Args::try_parse_from(["module-registry-pusher", "acme/http", "v1.2.0"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        let err = parse(&["extra"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_flags() {
        let args = parse(&["--endpoint", "http://localhost:9000", "-t", "30", "-v"]).unwrap();
        assert_eq!(args.endpoint(), "http://localhost:9000");
        assert_eq!(args.timeout(), Some(30));
        assert!(args.verbose);

        assert!(parse(&["-v", "-q"]).is_err());
    }

    #[test]
    fn test_env_fills_only_unset_options() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("MODULE_PUSHER_ENDPOINT", "http://env-registry:8080"),
            ("MODULE_PUSHER_TIMEOUT", "45"),
            ("MODULE_PUSHER_VERBOSE", "1"),
        ]);
        let lookup = |key: &str| env.get(key).map(|v| v.to_string());

        let args = parse(&[]).unwrap().from_env_with(lookup);
        assert_eq!(args.endpoint(), "http://env-registry:8080");
        assert_eq!(args.timeout(), Some(45));
        assert!(args.verbose);

        let args = parse(&["--timeout", "10"]).unwrap().from_env_with(lookup);
        assert_eq!(args.timeout(), Some(10));
    }
}
