use debugread_core::{
    ReaderConfig, ReportOptions, Result, TelemetryReference, metric_names, metric_values_report,
    metrics_summary,
};

use super::Context;

pub struct MetricsCommandConfig<'a> {
    pub name: Option<&'a str>,
    pub validate: bool,
    pub sort_by_value: bool,
    pub list: bool,
    pub summary: bool,
    pub names: bool,
}

fn fetch_reference(config: &ReaderConfig) -> Result<TelemetryReference> {
    let url = config.telemetry_url();
    log::info!("=> fetching telemetry metrics reference from {url}");
    TelemetryReference::fetch(url, config.fetch_timeout())
}

pub fn run(ctx: &Context, cmd: MetricsCommandConfig<'_>) -> Result<()> {
    if cmd.list {
        // The listing needs no bundle.
        let config = ctx
            .reader_config()
            .unwrap_or_else(|_| ReaderConfig::default());
        let reference = fetch_reference(&config)?;
        print!(
            "\nConsul Telemetry Metric Names (pulled from: {})\n\n",
            reference.url()
        );
        println!("{}", reference.listing());
        return Ok(());
    }

    let (config, mut bundle) = ctx.open_bundle()?;

    if cmd.summary || cmd.names {
        let index = bundle.read_index()?.cloned();
        let series = bundle.read_metrics()?;
        if cmd.summary {
            println!("{}", metrics_summary(series, index.as_ref()));
        }
        if cmd.names {
            if cmd.summary {
                println!();
            }
            for name in metric_names(series) {
                println!("{name}");
            }
        }
        return Ok(());
    }

    let Some(name) = cmd.name else {
        println!("Usage: consul-debug-read metrics --name <metric> [--skip-name-validation] [--sort-by-value]");
        println!("       consul-debug-read metrics --list | --summary | --names");
        return Ok(());
    };

    let series = bundle.read_metrics()?;
    let reference = fetch_reference(&config)?;
    let table = metric_values_report(
        series,
        &reference,
        name,
        ReportOptions {
            validate: cmd.validate,
            sort_by_value: cmd.sort_by_value,
        },
    )?;
    println!("{table}");
    Ok(())
}
