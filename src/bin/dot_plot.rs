use anyhow::Context;
use dot_plot::plot::{init_log, parse_cli};
use dot_plot::{PrecisionTranscripts, OUTPUT_SVG};
use log::info;

fn main() -> anyhow::Result<()> {
    let (precision_file, transcripts_file, verbosity, quiet) = parse_cli();
    init_log(verbosity, quiet)?;
    info!(
        "read data from {} and {} and plot to {}",
        precision_file.display(),
        transcripts_file.display(),
        OUTPUT_SVG
    );
    let pt = PrecisionTranscripts::from_csv(&precision_file, &transcripts_file)
        .context("could not load the input data")?;
    info!("loaded values:\n{}", pt);
    pt.plot_scatter(OUTPUT_SVG)?;
    info!("plotted {} points", pt.len());
    Ok(())
}
