use anyhow::Result;
use clap::Parser;
use sage_image_fetch::options::Options;
use sage_image_fetch::pipeline::{self, Outcome};
use sage_image_fetch::provider::SageClient;
use std::{io, process};

async fn run(options: Options) -> Result<Outcome> {
    let config = options.fetch_config()?;
    log::debug!("Fetch config: {:?}", config);

    let client = SageClient::from_config(&config)?;
    let outcome =
        pipeline::run(&client, &config.query(), &config.output_dir, &mut io::stdout()).await?;
    Ok(outcome)
}

#[tokio::main]
async fn main() {
    let options = Options::parse();

    let log_filter = match options.verbosity {
        0 => "info",
        1 => "info,sage_image_fetch=debug",
        2 => "info,sage_image_fetch=trace",
        _ => "trace",
    };

    let log_env = env_logger::Env::default().default_filter_or(log_filter);

    env_logger::Builder::from_env(log_env)
        .format_module_path(false)
        .format_timestamp(None)
        .format_indent(Some(8))
        .init();

    match run(options).await {
        Ok(Outcome::Saved(_)) => {}
        Ok(Outcome::NoImage(reason)) => log::debug!("No image downloaded: {reason}"),
        Err(err) => {
            log::error!("fetch exited with error {err:?}");
            eprintln!("Error: {err:#}");
            process::exit(1);
        }
    }
}
