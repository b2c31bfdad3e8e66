//! Age distribution chart rendered to SVG

use plotters::prelude::*;
use survey_common::analytics::AGE_LABELS;

use crate::error::{ApiError, ApiResult};

const WIDTH: u32 = 600;
const HEIGHT: u32 = 400;

/// Draw a bar per age bucket and return the SVG document
pub fn render_age_chart(counts: &[usize; 5]) -> ApiResult<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(chart_error)?;

        let max_count = counts.iter().copied().max().unwrap_or(0) as u32;

        let mut chart = ChartBuilder::on(&root)
            .caption("Age Distribution", ("sans-serif", 24).into_font())
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d((0u32..4u32).into_segmented(), 0u32..max_count + 1)
            .map_err(chart_error)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Age Group")
            .y_desc("Count")
            .x_label_formatter(&|value| match value {
                SegmentValue::CenterOf(i) => AGE_LABELS
                    .get(*i as usize)
                    .map(|label| label.to_string())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .draw()
            .map_err(chart_error)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(RGBColor(0, 128, 128).filled())
                    .margin(12)
                    .data(counts.iter().enumerate().map(|(i, &c)| (i as u32, c as u32))),
            )
            .map_err(chart_error)?;

        root.present().map_err(chart_error)?;
    }
    Ok(svg)
}

fn chart_error<E: std::fmt::Display>(e: E) -> ApiError {
    ApiError::Internal(format!("Error generating chart: {}", e))
}
