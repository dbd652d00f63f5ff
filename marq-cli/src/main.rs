mod cli;
mod config;
mod watch;

use anyhow::{Context, Result};
use marq_core::{Converter, Template};
use marq_live::{LiveServer, LiveServerConfig};
use owo_colors::OwoColorize;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{}", format!("Error: {err:#}").red());
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let matches = cli::build_command().get_matches();
    let options = config::load_options(&matches)?;

    let template =
        Template::load(options.template.as_deref()).context("error reading template file")?;

    let converter = Converter::new(
        template,
        options.css.clone(),
        marq_live::reload_script(options.port),
    );

    converter.run(&options.input, &options.output, options.single)?;

    if options.watch {
        let notifier = if options.live {
            let server = LiveServer::new(LiveServerConfig {
                port: options.port,
                root: options.output.clone(),
            });
            let notifier = server.notifier();
            tokio::spawn(async move {
                if let Err(e) = server.run().await {
                    eprintln!("{}", format!("Live server error: {e:#}").red());
                }
            });
            Some(notifier)
        } else {
            None
        };

        watch::watch(&options, &converter, notifier).await?;
    }

    Ok(())
}
