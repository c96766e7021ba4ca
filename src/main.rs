use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use downurl::cli::{usage, Args};
use downurl::input::InputSource;
use downurl::logging::{init_logging, Verbosity};
use downurl::table::render_table;
use downurl::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let Some(source) = InputSource::from_args(args.input.as_deref(), args.url.as_deref()) else {
        eprintln!("{}", usage());
        std::process::exit(1);
    };

    init_logging(Verbosity::from_flags(args.verbose, args.quiet));

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, finishing up");
            on_signal.cancel();
        }
    });

    let config = Config::from_args(&args);
    let output = downurl::run_with_cancel(&config, &source, cancel)
        .await
        .with_context(|| format!("downurl failed for {source}"))?;

    if !args.quiet {
        println!("\n{}", render_table(&output.results));
    }

    let archive = output
        .archive_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string());

    println!(
        "\nDone: {} success, {} failed",
        output.summary.successful, output.summary.failed
    );
    println!(
        "[+] Done. Output in: {}/, report: {}, archive: {}",
        config.output_dir.display(),
        output.report_path.display(),
        archive
    );

    if output.cancelled {
        std::process::exit(130);
    }
    Ok(())
}
