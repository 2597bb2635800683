use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "tvdl")]
#[command(about = "Resolves tweet URLs into direct video / GIF download descriptors")]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Twitter API bearer token override
    #[arg(long)]
    pub bearer_token: Option<String>,

    /// HTTP port override
    #[arg(long)]
    pub port: Option<u16>,

    /// Database URL override
    #[arg(long)]
    pub database_url: Option<String>,
}
