use clap::Parser;

#[derive(Parser, Debug)]
#[command(name="pagesmith", version, about="LLM single-page app generator with GitHub Pages publishing")]
pub struct Args {
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, default_value_t = 8000)]
    pub port: u16,

    /// Override the model configured via PAGESMITH_MODEL.
    #[arg(long)]
    pub model: Option<String>,

    #[arg(long, default_value_t = 300)]
    pub timeout_secs: u64,

    #[arg(long, default_value_t = false)]
    pub debug: bool,
}
