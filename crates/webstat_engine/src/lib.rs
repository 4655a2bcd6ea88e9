//! Webstat engine: page retrieval, HTML extraction and image display.
mod decode;
mod document;
mod extract;
mod fetch;
mod images;
mod types;

pub use decode::{decode_text, DecodedText};
pub use document::{attr_or, ParsedDocument};
pub use extract::{extract_images, extract_words};
pub use fetch::{fetch_page, FetchSettings, Fetcher, ReqwestFetcher};
pub use images::{
    DisplaySummary, ImageDecoder, ImageDimensions, ImageError, ImagePresenter, ImageViewer,
    RasterImageDecoder, SystemViewer,
};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput, PageContent};
