use crate::api::{ChartSessionConfig, ScaleCoordinator};
use crate::core::LinearScale;
use crate::error::ChartResult;
use crate::render::{
    Color, LinePrimitive, PointPrimitive, RenderFrame, SceneShape, SceneStore, TextHAlign,
    TextPrimitive,
};

const AXIS_COLOR: Color = Color::rgb(0.35, 0.35, 0.35);
const AXIS_STROKE_WIDTH: f64 = 1.0;
const TICK_LENGTH_PX: f64 = 4.0;

/// Builds the draw pass for the current scene and scales.
///
/// Axis furniture first, then series primitives in scene insertion order so
/// the aggregate stays beneath the state overlays.
pub(super) fn build_frame(
    config: &ChartSessionConfig,
    coordinator: &ScaleCoordinator,
    scene: &SceneStore,
) -> ChartResult<RenderFrame> {
    let mut frame = RenderFrame::new(config.viewport);

    let (x_range_start, x_range_end) = coordinator.x().range();
    let (y_range_start, y_range_end) = coordinator.y().range();
    let plot_left = x_range_start;
    let plot_right = x_range_end;
    let plot_bottom = y_range_start;
    let plot_top = y_range_end;

    frame.lines.push(LinePrimitive::new(
        plot_left,
        plot_bottom,
        plot_right,
        plot_bottom,
        AXIS_STROKE_WIDTH,
        AXIS_COLOR,
        1.0,
    ));
    frame.lines.push(LinePrimitive::new(
        plot_left,
        plot_top,
        plot_left,
        plot_bottom,
        AXIS_STROKE_WIDTH,
        AXIS_COLOR,
        1.0,
    ));

    push_x_axis_labels(&mut frame, coordinator.x(), config, plot_bottom)?;
    push_y_axis_labels(&mut frame, coordinator.y(), config, plot_left)?;

    for (_, primitive) in scene.iter() {
        match primitive.shape {
            SceneShape::Point { x, y } => {
                frame.points.push(PointPrimitive::new(
                    x,
                    y,
                    config.point_radius,
                    primitive.color,
                    primitive.opacity,
                ));
            }
            SceneShape::Segment { x1, y1, x2, y2 } => {
                frame.lines.push(LinePrimitive::new(
                    x1,
                    y1,
                    x2,
                    y2,
                    config.stroke_width,
                    primitive.color,
                    primitive.opacity,
                ));
            }
        }
    }

    Ok(frame)
}

fn push_x_axis_labels(
    frame: &mut RenderFrame,
    scale: LinearScale,
    config: &ChartSessionConfig,
    plot_bottom: f64,
) -> ChartResult<()> {
    let mut last_position = f64::NAN;
    for value in tick_values(scale, config.axis_tick_count) {
        let position = scale.apply(value)?;
        if position == last_position {
            continue;
        }
        last_position = position;

        frame.lines.push(LinePrimitive::new(
            position,
            plot_bottom,
            position,
            plot_bottom + TICK_LENGTH_PX,
            AXIS_STROKE_WIDTH,
            AXIS_COLOR,
            1.0,
        ));
        frame.texts.push(TextPrimitive::new(
            format!("{}", value.round() as i64),
            position,
            plot_bottom + TICK_LENGTH_PX + config.label_font_size_px,
            config.label_font_size_px,
            AXIS_COLOR,
            TextHAlign::Center,
        ));
    }
    Ok(())
}

fn push_y_axis_labels(
    frame: &mut RenderFrame,
    scale: LinearScale,
    config: &ChartSessionConfig,
    plot_left: f64,
) -> ChartResult<()> {
    let mut last_position = f64::NAN;
    for value in tick_values(scale, config.axis_tick_count) {
        let position = scale.apply(value)?;
        if position == last_position {
            continue;
        }
        last_position = position;

        frame.lines.push(LinePrimitive::new(
            plot_left - TICK_LENGTH_PX,
            position,
            plot_left,
            position,
            AXIS_STROKE_WIDTH,
            AXIS_COLOR,
            1.0,
        ));
        frame.texts.push(TextPrimitive::new(
            format_rate(value),
            plot_left - TICK_LENGTH_PX - 2.0,
            position + config.label_font_size_px / 3.0,
            config.label_font_size_px,
            AXIS_COLOR,
            TextHAlign::Right,
        ));
    }
    Ok(())
}

/// Evenly spaced values across the domain, endpoints included.
fn tick_values(scale: LinearScale, count: usize) -> Vec<f64> {
    let (domain_start, domain_end) = scale.domain();
    match count {
        0 => Vec::new(),
        1 => vec![domain_start],
        _ => {
            let span = domain_end - domain_start;
            let denominator = (count - 1) as f64;
            (0..count)
                .map(|index| domain_start + span * (index as f64) / denominator)
                .collect()
        }
    }
}

fn format_rate(rate: f64) -> String {
    if rate.abs() >= 100.0 {
        format!("{rate:.0}")
    } else {
        format!("{rate:.1}")
    }
}
