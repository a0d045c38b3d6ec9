use clap::Parser;
use std::path::PathBuf;

use crate::fetch::DEFAULT_USER_AGENT;

#[derive(Parser, Debug)]
#[command(
    name = "webpage-mirror",
    about = "Saves a self-contained local copy of a single web page",
    version,
    long_about = "Downloads the page at URL together with every stylesheet, script, image and font it references, rewriting all references so the copy works offline. The result is a flat directory with an index.html."
)]
pub struct MirrorCommand {
    /// The URL of the web page to download
    #[arg(required = true)]
    pub url: String,

    /// Directory the page and its assets are written to
    #[arg(short, long, default_value = "./mirror")]
    pub output_dir: PathBuf,

    /// User agent string sent with every request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,
}
