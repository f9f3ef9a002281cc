#![deny(elided_lifetimes_in_paths)]
#![warn(clippy::pedantic)]

use anyhow::Result;
use clap::{CommandFactory, Parser, ValueEnum};
use fbscan::{ApiKey, BodyEncoding, Client, ScanConfig, DEFAULT_TARGET_URL};
use std::ffi::OsString;
use std::io::{self, IsTerminal};
use tracing_subscriber::{fmt, EnvFilter};

/// Check whether a Google Cloud API key is usable from an unrestricted client
#[derive(Parser)]
#[command(name = "fbscan", version, about, long_about = None)]
#[command(after_help = "Flags may also be written with a single dash, e.g. -api KEY -post.")]
struct Cli {
    /// URL submitted to the testing service
    #[arg(long, value_name = "URL", default_value = DEFAULT_TARGET_URL)]
    url: String,

    /// API key to test
    #[arg(long, value_name = "KEY")]
    api: Option<ApiKey>,

    /// Print https://<project>.firebase.com/.json for a project name
    #[arg(long, value_name = "NAME")]
    project: Option<String>,

    /// Print the POST body before sending it
    #[arg(long)]
    post: bool,

    /// Wire layout of the request body
    #[arg(long, value_enum, value_name = "FORMAT", default_value_t = BodyFormat::Legacy)]
    body: BodyFormat,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum BodyFormat {
    /// The JSON string literal deployed scanners send
    Legacy,
    /// The payload object, JSON-encoded inside a JSON string
    Double,
    /// A plain JSON object
    Object,
}

impl From<BodyFormat> for BodyEncoding {
    fn from(format: BodyFormat) -> BodyEncoding {
        match format {
            BodyFormat::Legacy => BodyEncoding::Legacy,
            BodyFormat::Double => BodyEncoding::DoubleEncoded,
            BodyFormat::Object => BodyEncoding::Object,
        }
    }
}

impl Cli {
    fn into_config(self) -> ScanConfig {
        ScanConfig {
            url: self.url,
            api_key: self.api,
            project: self.project,
            show_post: self.post,
            encoding: self.body.into(),
            color: !self.no_color && io::stdout().is_terminal(),
        }
    }
}

/// Rewrites `-name` and `-name=value` to `--name` forms for every long flag, so the single-dash
/// spelling of older scanners keeps working. Everything after `--` is left alone.
fn normalize_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    let command = Cli::command();
    let longs: Vec<&str> = command
        .get_arguments()
        .filter_map(clap::Arg::get_long)
        .chain(["help", "version"])
        .collect();

    let mut passthrough = false;
    args.into_iter()
        .enumerate()
        .map(|(i, arg)| {
            if i == 0 || passthrough {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                passthrough = true;
                return arg;
            }
            match text.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') => {
                    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
                    if longs.contains(&name) {
                        format!("-{text}").into()
                    } else {
                        arg
                    }
                }
                _ => arg,
            }
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let config = Cli::parse_from(normalize_args(std::env::args_os())).into_config();
    if !config.has_work() {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    }

    let client = Client::new()?;
    if let Err(err) = fbscan::run(&client, &config, io::stdout().lock()).await {
        tracing::error!(%err, "scan failed");
        return Err(err.into());
    }
    Ok(())
}
