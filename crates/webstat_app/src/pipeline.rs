use std::io::Write;

use anyhow::Context;
use engine_logging::engine_info;
use webstat_core::{print_word_statistics, WordCount};
use webstat_engine::{
    extract_images, extract_words, fetch_page, DisplaySummary, Fetcher, ImageDecoder,
    ImagePresenter, ImageViewer, ParsedDocument,
};

use crate::chart::ChartRenderer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub images: DisplaySummary,
    pub total_words: usize,
    pub top_words: Vec<WordCount>,
}

/// The external capabilities one analysis run talks to.
pub struct Pipeline<'a> {
    pub fetcher: &'a dyn Fetcher,
    pub decoder: &'a dyn ImageDecoder,
    pub viewer: &'a dyn ImageViewer,
    pub chart: &'a dyn ChartRenderer,
}

impl Pipeline<'_> {
    /// Fetch `url`, show its images, print word statistics, then block on the chart.
    ///
    /// Only a failed page fetch, a broken `out` or a chart window failure
    /// end the run early; individual images never do.
    pub fn run<W: Write>(&self, url: &str, out: &mut W) -> anyhow::Result<RunSummary> {
        let page = fetch_page(self.fetcher, url)
            .with_context(|| format!("failed to fetch page {url}"))?;
        let doc = ParsedDocument::parse(&page.text);

        let images = extract_images(&doc);
        let presenter = ImagePresenter::new(self.fetcher, self.decoder, self.viewer);
        let image_summary = presenter.display_images(out, &images)?;
        engine_info!(
            "Images: {} opened, {} failed",
            image_summary.opened,
            image_summary.failed
        );

        let words = extract_words(&doc);
        drop(doc);
        let top_words = print_word_statistics(out, &words)?;
        out.flush()?;

        self.chart.present(&top_words)?;

        Ok(RunSummary {
            images: image_summary,
            total_words: words.len(),
            top_words,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use webstat_core::WordCount;
    use webstat_engine::{
        FailureKind, FetchError, FetchMetadata, FetchOutput, Fetcher, ImageDecoder,
        ImageDimensions, ImageError, ImageViewer,
    };

    use super::Pipeline;
    use crate::chart::{ChartError, ChartRenderer};

    const PAGE: &str = "http://site.test/";

    #[derive(Default)]
    struct StubFetcher {
        bodies: HashMap<String, Vec<u8>>,
    }

    impl StubFetcher {
        fn page(html: &str) -> Self {
            let mut fetcher = Self::default();
            fetcher
                .bodies
                .insert(PAGE.to_string(), html.as_bytes().to_vec());
            fetcher
        }

        fn with(mut self, url: &str, body: &[u8]) -> Self {
            self.bodies.insert(url.to_string(), body.to_vec());
            self
        }
    }

    impl Fetcher for StubFetcher {
        fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
            let bytes = self.bodies.get(url).cloned().ok_or_else(|| FetchError {
                kind: FailureKind::HttpStatus(404),
                message: "404 Not Found".to_string(),
            })?;
            Ok(FetchOutput {
                metadata: FetchMetadata {
                    original_url: url.to_string(),
                    final_url: url.to_string(),
                    redirect_count: 0,
                    content_type: Some("text/html; charset=utf-8".to_string()),
                    byte_len: bytes.len() as u64,
                },
                bytes,
            })
        }
    }

    /// Accepts any buffer starting with the `IMG` marker.
    struct MarkerDecoder;

    impl ImageDecoder for MarkerDecoder {
        fn decode(&self, bytes: &[u8]) -> Result<ImageDimensions, ImageError> {
            if bytes.starts_with(b"IMG") {
                Ok(ImageDimensions {
                    width: 1,
                    height: 1,
                })
            } else {
                Err(ImageError::Decode("no marker".to_string()))
            }
        }
    }

    #[derive(Default)]
    struct RecordingViewer {
        opened: RefCell<Vec<String>>,
    }

    impl ImageViewer for RecordingViewer {
        fn open(&self, target: &str) -> Result<(), ImageError> {
            self.opened.borrow_mut().push(target.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingChart {
        shown: RefCell<Option<Vec<WordCount>>>,
    }

    impl ChartRenderer for RecordingChart {
        fn present(&self, words: &[WordCount]) -> Result<(), ChartError> {
            *self.shown.borrow_mut() = Some(words.to_vec());
            Ok(())
        }
    }

    fn run(fetcher: &StubFetcher) -> (anyhow::Result<super::RunSummary>, String, RecordingChart) {
        let viewer = RecordingViewer::default();
        let chart = RecordingChart::default();
        let pipeline = Pipeline {
            fetcher,
            decoder: &MarkerDecoder,
            viewer: &viewer,
            chart: &chart,
        };
        let mut out = Vec::new();
        let result = pipeline.run(PAGE, &mut out);
        (result, String::from_utf8(out).expect("utf8 output"), chart)
    }

    #[test]
    fn empty_page_reports_nothing_found() {
        let (result, out, chart) = run(&StubFetcher::page(""));
        let summary = result.expect("run ok");

        assert_eq!(
            out,
            "No images found.\nTotal words: 0\nTop 7 occurring words:\n"
        );
        assert_eq!(summary.total_words, 0);
        assert_eq!(chart.shown.borrow().as_deref(), Some(&[][..]));
    }

    #[test]
    fn missing_image_is_reported_before_statistics() {
        let html = r#"<body><img src="http://img.test/gone.png">
            <img src="http://img.test/ok.png"><p>Hello, World! Hello</p></body>"#;
        let fetcher = StubFetcher::page(html).with("http://img.test/ok.png", b"IMG...");
        let (result, out, chart) = run(&fetcher);
        let summary = result.expect("run ok");

        assert_eq!(
            out,
            "Failed to display image: http://img.test/gone.png\n\
             Total words: 3\n\
             Top 7 occurring words:\n\
             hello: 2\n\
             world: 1\n"
        );
        assert_eq!(summary.images.opened, 1);
        assert_eq!(summary.images.failed, 1);
        assert_eq!(
            chart.shown.borrow().clone().expect("chart shown"),
            summary.top_words
        );
    }

    #[test]
    fn page_fetch_failure_aborts_before_output() {
        let (result, out, chart) = run(&StubFetcher::default());
        let err = result.unwrap_err();

        assert_eq!(err.to_string(), format!("failed to fetch page {PAGE}"));
        let fetch_err = err.downcast_ref::<FetchError>().expect("fetch error source");
        assert_eq!(fetch_err.kind, FailureKind::HttpStatus(404));
        assert!(out.is_empty());
        assert!(chart.shown.borrow().is_none());
    }
}
