use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "phishscan",
    version,
    about = "Check a URL against a phishing analysis service"
)]
pub struct Args {
    /// URL to scan. Prompts for URLs one at a time when omitted.
    pub url: Option<String>,
    /// Scanning service endpoint (overrides PHISHSCAN_ENDPOINT).
    #[arg(long)]
    pub endpoint: Option<String>,
    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_url_and_flags() {
        let args = Args::try_parse_from([
            "phishscan",
            "https://example.com",
            "--endpoint",
            "http://10.0.0.2:5000/predict",
            "--json",
        ])
        .expect("args");
        assert_eq!(args.url.as_deref(), Some("https://example.com"));
        assert_eq!(args.endpoint.as_deref(), Some("http://10.0.0.2:5000/predict"));
        assert!(args.json);
        assert!(!args.no_color);
    }

    #[test]
    fn url_is_optional() {
        let args = Args::try_parse_from(["phishscan", "--no-color"]).expect("args");
        assert!(args.url.is_none());
        assert!(args.no_color);
    }

    #[test]
    fn rejects_more_than_one_url() {
        assert!(Args::try_parse_from(["phishscan", "https://a.test", "https://b.test"]).is_err());
    }
}
