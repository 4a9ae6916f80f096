use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use testcase_params::cli;
use testcase_params::logging::{self, Verbosity};
use testcase_params::output::OutputFormatter;
use testcase_params::{FileSource, ParameterResolver};

fn main() -> Result<()> {
    let args = cli::Args::parse();
    logging::init(Verbosity::from_flags(args.verbose, args.quiet));
    args.validate().context("Invalid arguments")?;

    let source = FileSource::load(&args.records)
        .with_context(|| format!("Failed to load records from {}", args.records.display()))?;
    tracing::info!(
        records = source.len(),
        work_item = args.work_item,
        format = args.format.as_str(),
        "resolving test case"
    );

    let resolver = ParameterResolver::new(source);
    let rows = resolver
        .resolve(args.work_item)
        .with_context(|| format!("Failed to resolve test case {}", args.work_item))?;

    let rendered = OutputFormatter::format(args.work_item, &rows, &args.method, args.format)?;

    match args.output_file {
        Some(ref path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            tracing::info!(path = %path.display(), rows = rows.len(), "wrote parameter rows");
        }
        None => println!("{rendered}"),
    }

    Ok(())
}
