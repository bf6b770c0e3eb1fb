use std::io::Cursor;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use plotters::coord::Shift;
use plotters::element::DashedPathElement;
use plotters::prelude::*;
use plotters::style::register_font;

use crate::color::SeriesColors;
use crate::config::{ImageFormat, PlotConfig};
use crate::data::model::ResultSet;
use crate::error::{PlotError, Result};

/// Font family every text element is drawn with.
const FONT_FAMILY: &str = "sans-serif";

/// Looked up in order when no font is configured.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Font file currently registered for [`FONT_FAMILY`].
static REGISTERED_FONT: Mutex<Option<PathBuf>> = Mutex::new(None);

// ---------------------------------------------------------------------------
// Output path
// ---------------------------------------------------------------------------

/// Same directory and base name as `input`, extension replaced by the image
/// extension.
pub fn output_path_for(input: &Path, format: ImageFormat) -> PathBuf {
    input.with_extension(format.extension())
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Render the chart and write it to `output`, replacing any existing file.
pub fn write_chart(
    results: &ResultSet,
    config: &PlotConfig,
    colors: &SeriesColors,
    output: &Path,
) -> Result<()> {
    let bytes = render_chart(results, config, colors)?;
    std::fs::write(output, &bytes).map_err(|e| PlotError::io(output, e))?;
    log::info!(
        "Wrote {} chart ({} bytes) to {}",
        config.format,
        bytes.len(),
        output.display()
    );
    Ok(())
}

/// Render the chart into an encoded image held in memory.
pub fn render_chart(
    results: &ResultSet,
    config: &PlotConfig,
    colors: &SeriesColors,
) -> Result<Vec<u8>> {
    if results.is_empty() {
        return Err(PlotError::Render("nothing to plot: no rows".to_string()));
    }
    config.validate()?;
    ensure_font(config.font_path.as_deref())?;

    match config.format {
        ImageFormat::Png => render_png(results, config, colors),
        ImageFormat::Svg => render_svg(results, config, colors),
    }
}

fn render_png(results: &ResultSet, config: &PlotConfig, colors: &SeriesColors) -> Result<Vec<u8>> {
    let (w, h) = (config.width, config.height);
    let frame_len = (w as usize)
        .checked_mul(h as usize)
        .and_then(|px| px.checked_mul(3))
        .ok_or_else(|| PlotError::Config(format!("image size {w}x{h} is too large")))?;
    let mut frame = vec![0u8; frame_len];
    {
        let root = BitMapBackend::with_buffer(&mut frame, (w, h)).into_drawing_area();
        draw_chart(&root, results, config, colors).map_err(render_error)?;
    }

    let image = image::RgbImage::from_raw(w, h, frame)
        .ok_or_else(|| PlotError::Render(format!("frame buffer does not match {w}x{h}")))?;
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| PlotError::Render(format!("PNG encoding failed: {e}")))?;
    Ok(bytes)
}

fn render_svg(results: &ResultSet, config: &PlotConfig, colors: &SeriesColors) -> Result<Vec<u8>> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (config.width, config.height))
            .into_drawing_area();
        draw_chart(&root, results, config, colors).map_err(render_error)?;
    }
    Ok(svg.into_bytes())
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    results: &ResultSet,
    config: &PlotConfig,
    colors: &SeriesColors,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let x_range = padded(results.input_range().unwrap_or((0.0, 1.0)));
    let y_range = padded(results.output_range().unwrap_or((0.0, 1.0)));
    log::debug!("Axis ranges: x {x_range:?}, y {y_range:?}");

    let mut chart = ChartBuilder::on(root)
        .caption(&config.title, (FONT_FAMILY, 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, y_range)?;

    // Grid on both axes
    chart
        .configure_mesh()
        .x_desc(config.x_label.as_str())
        .y_desc(config.y_label.as_str())
        .axis_desc_style((FONT_FAMILY, 18))
        .label_style((FONT_FAMILY, 14))
        .bold_line_style(BLACK.mix(0.2))
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    let expected_style = colors.expected.to_rgb().stroke_width(2);
    chart
        .draw_series(LineSeries::new(results.expected_points(), expected_style))?
        .label("Expected")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], expected_style));

    let actual_style = colors.actual.to_rgb().stroke_width(2);
    chart
        .draw_series(DashedLineSeries::new(
            results.actual_points(),
            8,
            5,
            actual_style,
        ))?
        .label("Actual")
        .legend(move |(x, y)| {
            DashedPathElement::new(vec![(x, y), (x + 20, y)], 5, 3, actual_style)
        });

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font((FONT_FAMILY, 14))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Data range widened by 5 % on each side; a zero-width range is opened up so
/// the axis still has a scale.
fn padded((lo, hi): (f64, f64)) -> Range<f64> {
    let span = hi - lo;
    let pad = if span.abs() > f64::EPSILON {
        span * 0.05
    } else if lo.abs() > f64::EPSILON {
        lo.abs() * 0.05
    } else {
        1.0
    };
    (lo - pad)..(hi + pad)
}

fn render_error<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> PlotError {
    PlotError::Render(err.to_string())
}

// ---------------------------------------------------------------------------
// Fonts
// ---------------------------------------------------------------------------

/// Make sure a font is registered for [`FONT_FAMILY`].
///
/// An explicitly configured font replaces whatever is registered; otherwise the
/// first system font found is registered once per process.
fn ensure_font(configured: Option<&Path>) -> Result<()> {
    let mut registered = REGISTERED_FONT
        .lock()
        .map_err(|_| PlotError::Render("font registry lock poisoned".to_string()))?;

    let path = match configured {
        Some(path) => path.to_path_buf(),
        None if registered.is_some() => return Ok(()),
        None => find_system_font().ok_or_else(|| {
            log::warn!("No font found in any of: {}", SYSTEM_FONTS.join(", "));
            PlotError::Render(
                "no usable font found; set `font_path` in the configuration or pass --font"
                    .to_string(),
            )
        })?,
    };
    if registered.as_deref() == Some(path.as_path()) {
        return Ok(());
    }

    let bytes = std::fs::read(&path)
        .map_err(|e| PlotError::Config(format!("cannot read font {}: {e}", path.display())))?;
    // The font table keeps `'static` references; each distinct file is leaked once.
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    register_font(FONT_FAMILY, FontStyle::Normal, bytes)
        .map_err(|_| PlotError::Render(format!("{} is not a valid font file", path.display())))?;

    log::debug!("Registered font {}", path.display());
    *registered = Some(path);
    Ok(())
}

fn find_system_font() -> Option<PathBuf> {
    SYSTEM_FONTS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
}
