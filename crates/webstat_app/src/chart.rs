use engine_logging::engine_info;
use minifb::{Key, Window, WindowOptions};
use plotters::coord::ranged1d::SegmentValue;
use plotters::prelude::*;
use webstat_core::WordCount;

#[derive(Debug, Clone)]
pub struct ChartSettings {
    pub width: u32,
    pub height: u32,
    pub caption: String,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: 600,
            height: 400,
            caption: format!("Top {} occurring words", webstat_core::TOP_WORDS),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("failed to draw chart: {0}")]
    Draw(String),
    #[error("failed to open chart window: {0}")]
    Window(String),
}

/// Shows a column chart of word counts and returns once the user dismisses it.
pub trait ChartRenderer {
    fn present(&self, words: &[WordCount]) -> Result<(), ChartError>;
}

/// Draws with plotters into an RGB buffer and shows it in a minifb window.
#[derive(Debug, Clone, Default)]
pub struct WindowChart {
    settings: ChartSettings,
}

impl WindowChart {
    pub fn new(settings: ChartSettings) -> Self {
        Self { settings }
    }
}

impl ChartRenderer for WindowChart {
    fn present(&self, words: &[WordCount]) -> Result<(), ChartError> {
        let width = self.settings.width as usize;
        let height = self.settings.height as usize;

        let mut rgb = vec![0u8; width * height * 3];
        draw_bar_chart(&mut rgb, &self.settings, words)?;
        let pixels = pack_rgb(&rgb);

        let mut window = Window::new(
            &self.settings.caption,
            width,
            height,
            WindowOptions::default(),
        )
        .map_err(|err| ChartError::Window(err.to_string()))?;
        window.set_target_fps(30);

        engine_info!("Chart window open with {} bars", words.len());
        while window.is_open() && !window.is_key_down(Key::Escape) {
            window
                .update_with_buffer(&pixels, width, height)
                .map_err(|err| ChartError::Window(err.to_string()))?;
        }
        engine_info!("Chart window closed");
        Ok(())
    }
}

fn draw_bar_chart(
    buffer: &mut [u8],
    settings: &ChartSettings,
    words: &[WordCount],
) -> Result<(), ChartError> {
    let root = BitMapBackend::with_buffer(buffer, (settings.width, settings.height))
        .into_drawing_area();
    root.fill(&WHITE).map_err(draw_error)?;

    let labels: Vec<&str> = words.iter().map(|entry| entry.word.as_str()).collect();
    let mut chart = ChartBuilder::on(&root)
        .caption(&settings.caption, ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(48)
        .build_cartesian_2d(
            (0..labels.len().max(1)).into_segmented(),
            0usize..axis_max(words),
        )
        .map_err(draw_error)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("word")
        .y_desc("count")
        .x_label_formatter(&|value| match value {
            SegmentValue::CenterOf(slot) => labels
                .get(*slot)
                .map(|label| label.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .draw()
        .map_err(draw_error)?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(BLUE.filled())
                .margin(10)
                .data(words.iter().enumerate().map(|(slot, entry)| (slot, entry.count))),
        )
        .map_err(draw_error)?;

    root.present().map_err(draw_error)?;
    Ok(())
}

/// Upper bound of the count axis, leaving headroom above the tallest bar.
fn axis_max(words: &[WordCount]) -> usize {
    words.iter().map(|entry| entry.count).max().unwrap_or(0) + 1
}

/// Pack `RGB` byte triples into minifb's `0RGB` pixels.
fn pack_rgb(rgb: &[u8]) -> Vec<u32> {
    rgb.chunks_exact(3)
        .map(|px| (u32::from(px[0]) << 16) | (u32::from(px[1]) << 8) | u32::from(px[2]))
        .collect()
}

fn draw_error(err: impl std::fmt::Display) -> ChartError {
    ChartError::Draw(err.to_string())
}
