use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vecdemo")]
#[command(version, about = "Drive MyVector from operation scripts and randomized checks", long_about = None)]
pub struct Cli {
    /// The .vops script file to run
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Run the built-in walkthrough
    #[arg(short, long)]
    pub scenario: bool,

    /// Cross-check N random operations against std's Vec
    #[arg(long, value_name = "N")]
    pub stress: Option<usize>,

    /// Seed for --stress
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Set verbose level
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
