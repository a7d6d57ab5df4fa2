//! Places symbols and labels along ways.

use cgmath::{InnerSpace, Point2, Vector2};

use crate::{
    render::{
        clipper::{Clip, LineClipper},
        labels::{LabelIndex, PlacedLabel, SymbolItem, SymbolSource, TextItem},
        text_measure::TextMeasure,
    },
    theme::style::{LineSymbolStyle, StyleId, TextStyle},
};

/// Maximum difference of the slopes of two segments merged into one label segment.
const MAX_SLOPE_DIFF: f32 = 0.2;
/// Margin added to the measured label width.
const LABEL_MARGIN: f32 = 10.0;

/// Distances used when decorating ways.
#[derive(Debug, Clone, Copy)]
pub struct DecoratorSettings {
    pub tile_size: f32,
    pub symbol_start: f32,
    pub symbol_spacing: f32,
    pub label_spacing: f32,
    pub label_slack: f32,
}

impl Default for DecoratorSettings {
    fn default() -> Self {
        Self {
            tile_size: 256.0,
            symbol_start: 30.0,
            symbol_spacing: 200.0,
            label_spacing: 500.0,
            label_slack: 10.0,
        }
    }
}

fn point(points: &[f32], i: usize) -> (f32, f32) {
    (points[i * 2], points[i * 2 + 1])
}

/// Repeats a symbol along the line. The first symbol keeps `symbol_start` pixels from the
/// beginning, further ones are `symbol_spacing` apart.
pub fn render_symbols(
    points: &[f32],
    symbol: &LineSymbolStyle,
    settings: &DecoratorSettings,
    out: &mut Vec<SymbolItem>,
) {
    let n = points.len() / 2;
    if n < 2 {
        return;
    }

    let safety = settings.symbol_start;
    let mut skip = safety;
    let (x, y) = point(points, 0);
    let mut prev = Point2::new(x, y);

    for i in 1..n {
        let (x, y) = point(points, i);
        let cur = Point2::new(x, y);
        let mut diff: Vector2<f32> = cur - prev;
        let mut remaining = diff.magnitude();

        while remaining - skip > safety {
            prev += diff * (skip / remaining);

            let direction = cur - prev;
            out.push(SymbolItem {
                source: SymbolSource::Bitmap(symbol.src.clone()),
                x: prev.x,
                y: prev.y,
                angle: direction.y.atan2(direction.x).to_degrees(),
                align_center: symbol.align_center,
            });
            if !symbol.repeat {
                return;
            }

            diff = direction;
            remaining -= skip;
            skip = settings.symbol_spacing;
        }

        skip = (skip - remaining).max(safety);
        prev = cur;
    }
}

/// Places the label `text` on straight stretches of the line that are long enough to hold it.
/// Near-collinear segments are merged. Candidates crossing a placed label, or close to a placed
/// label with the same text, are rejected. Accepted labels are added to `index`.
#[allow(clippy::too_many_arguments)]
pub fn render_text(
    points: &[f32],
    text: &str,
    style_id: StyleId,
    style: &TextStyle,
    measure: &dyn TextMeasure,
    settings: &DecoratorSettings,
    index: &mut LabelIndex,
    out: &mut Vec<TextItem>,
) {
    let n = points.len() / 2;
    if n < 2 || text.is_empty() {
        return;
    }

    let min_width = settings.tile_size / 10.0;
    let mut clipper = LineClipper::new(0.0, 0.0, settings.tile_size, settings.tile_size);
    let mut label_width: Option<f32> = None;
    let mut skip = 0.0;

    let (mut prev_x, mut prev_y) = point(points, 0);
    let mut i = 1;
    while i < n {
        let (mut cur_x, mut cur_y) = point(points, i);
        let mut last = i;

        let diff_x = cur_x - prev_x;
        let diff_y = cur_y - prev_y;
        for j in i + 1..n {
            let (next_x, next_y) = point(points, j);
            if diff_y == 0.0 {
                if cur_y != next_y {
                    break;
                }
            } else {
                if cur_y == next_y {
                    break;
                }
                let slope_diff = diff_x / diff_y - (cur_x - next_x) / (cur_y - next_y);
                if slope_diff >= MAX_SLOPE_DIFF || slope_diff <= -MAX_SLOPE_DIFF {
                    break;
                }
            }
            cur_x = next_x;
            cur_y = next_y;
            last = j;
        }
        i = last + 1;

        let dx = (cur_x - prev_x).abs();
        let dy = (cur_y - prev_y).abs();
        let too_short = dx + dy < min_width || label_width.map_or(false, |w| dx + dy < w);
        if too_short {
            prev_x = cur_x;
            prev_y = cur_y;
            continue;
        }

        let length = (dx * dx + dy * dy).sqrt();
        if skip > 0.0 {
            skip -= length;
        } else if length > min_width {
            let width = *label_width
                .get_or_insert_with(|| measure.text_width(text, style) + LABEL_MARGIN);
            if length > width {
                let placed = place_on_segment(
                    (prev_x, prev_y, cur_x, cur_y),
                    (width + LABEL_MARGIN) / length,
                    &mut clipper,
                )
                .map(|(x1, y1, x2, y2)| PlacedLabel {
                    text: text.to_string(),
                    x1,
                    y1,
                    x2,
                    y2,
                })
                .filter(|candidate| !index.collides(candidate, settings.label_slack));

                if let Some(label) = placed {
                    let item = TextItem {
                        text: text.to_string(),
                        style: style_id,
                        outline: false,
                        x: label.x1 + (label.x2 - label.x1) / 2.0,
                        y: label.y1 + (label.y2 - label.y1) / 2.0,
                        x1: label.x1,
                        y1: label.y1,
                        x2: label.x2,
                        y2: label.y2,
                        width,
                    };
                    if style.has_outline() {
                        let outline = TextItem {
                            outline: true,
                            ..item.clone()
                        };
                        out.push(item);
                        out.push(outline);
                    } else {
                        out.push(item);
                    }
                    index.insert(label);
                    skip = settings.label_spacing;
                }
            }
        }

        prev_x = cur_x;
        prev_y = cur_y;
    }
}

/// Shrinks the segment around its center by `scale`, orders its ends by x and clips it to the
/// tile.
fn place_on_segment(
    (ax, ay, bx, by): (f32, f32, f32, f32),
    scale: f32,
    clipper: &mut LineClipper,
) -> Option<(f32, f32, f32, f32)> {
    let (mut x1, mut y1, mut x2, mut y2) = if ax < bx {
        (ax, ay, bx, by)
    } else {
        (bx, by, ax, ay)
    };

    let half_width = (x2 - x1) / 2.0;
    x1 += half_width - scale * half_width;
    x2 -= half_width - scale * half_width;
    let half_height = (y2 - y1) / 2.0;
    y1 += half_height - scale * half_height;
    y2 -= half_height - scale * half_height;

    match clipper.clip_segment(x1, y1, x2, y2) {
        Clip::Inside => Some((x1, y1, x2, y2)),
        Clip::Clipped([x1, y1, x2, y2]) => Some((x1, y1, x2, y2)),
        Clip::Outside => None,
    }
}
