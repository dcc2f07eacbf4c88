use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::Path;
use vector_demo::cli::Cli;
use vector_demo::scenario;
use vector_demo::script::{self, Report, Runner};
use vector_demo::stress::{self, StressConfig};

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    let mut ran = false;

    if cli.scenario {
        println!("Running walkthrough...");
        let report = scenario::run_walkthrough(cli.verbose).context("Walkthrough failed")?;
        print_report(&report);
        println!("Walkthrough passed!");
        ran = true;
    }

    if let Some(ops) = cli.stress {
        let config = StressConfig {
            ops,
            seed: cli.seed,
        };
        println!("Cross-checking {} random operations (seed {})...", ops, cli.seed);
        let report = stress::run(config)
            .with_context(|| format!("MyVector diverged from Vec with seed {}", cli.seed))?;
        println!(
            "ok: max len {}, final capacity {}, {} reallocations, {} rejected operations",
            report.max_len, report.final_capacity, report.reallocations, report.rejected
        );
        ran = true;
    }

    if let Some(file_path) = &cli.file {
        run_script(file_path, cli.verbose)
            .with_context(|| format!("Failed to run script: {:?}", file_path))?;
        ran = true;
    }

    if !ran {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
    }

    Ok(())
}

fn run_script(path: &Path, verbose: u8) -> Result<()> {
    // 1. Verify file existence and extension
    if !path.exists() {
        return Err(anyhow!("File not found: {:?}", path));
    }
    if path.extension().and_then(|s| s.to_str()) != Some("vops") {
        return Err(anyhow!("File must have .vops extension: {:?}", path));
    }

    // 2. Read source
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {:?}", path))?;

    // 3. Parse
    let stmts = script::parse(&source).context("Parse error")?;
    if verbose >= 1 {
        println!("Parsed {} statements", stmts.len());
    }

    // 4. Execute
    let mut runner = Runner::new(verbose);
    let report = runner.run(&stmts)?;
    print_report(&report);
    println!("Final contents: {:?}", runner.vector());

    Ok(())
}

fn print_report(report: &Report) {
    for line in &report.output {
        println!("{}", line);
    }
    println!(
        "{} statements, {} reallocations",
        report.executed, report.reallocations
    );
}
