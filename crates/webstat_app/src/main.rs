mod chart;
mod config;
mod logging;
mod pipeline;

use std::io::{self, BufRead, Write};

use anyhow::Context;
use engine_logging::engine_info;
use webstat_engine::{RasterImageDecoder, ReqwestFetcher, SystemViewer};

use chart::WindowChart;
use config::AnalyzerConfig;
use pipeline::Pipeline;

fn main() -> anyhow::Result<()> {
    logging::initialize();
    let config = AnalyzerConfig::default();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let url = prompt_url(&mut input, &mut out)?;
    engine_info!("Analyzing {}", url);

    let fetcher = ReqwestFetcher::new(config.fetch);
    let chart = WindowChart::new(config.chart);
    let pipeline = Pipeline {
        fetcher: &fetcher,
        decoder: &RasterImageDecoder,
        viewer: &SystemViewer,
        chart: &chart,
    };
    let summary = pipeline.run(&url, &mut out)?;
    engine_info!(
        "Done: {} words, {} images opened",
        summary.total_words,
        summary.images.opened
    );

    // Keep the console open until the user acknowledges.
    input
        .read_line(&mut String::new())
        .context("failed to read from stdin")?;
    Ok(())
}

/// Print the prompt and read one line; surrounding whitespace is dropped.
fn prompt_url<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> anyhow::Result<String> {
    write!(out, "Enter a URL: ")?;
    out.flush()?;
    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("failed to read URL from stdin")?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::prompt_url;

    #[test]
    fn prompt_reads_one_trimmed_line() {
        let mut input = "  https://example.com/page \r\nnext line\n".as_bytes();
        let mut out = Vec::new();
        let url = prompt_url(&mut input, &mut out).expect("read url");
        assert_eq!(url, "https://example.com/page");
        assert_eq!(out, b"Enter a URL: ");
    }

    #[test]
    fn prompt_on_closed_stdin_yields_empty_url() {
        let mut input: &[u8] = b"";
        let mut out = Vec::new();
        assert_eq!(prompt_url(&mut input, &mut out).expect("read url"), "");
    }
}
