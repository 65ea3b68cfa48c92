//! Minimal SVG scatter plot.

use super::LabelledPoint;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 600.0;
const MARGIN: f64 = 40.0;
const POINT_RADIUS: f64 = 4.0;

/// Render labelled points as an annotated scatter plot.
pub fn render(points: &[LabelledPoint]) -> String {
    let (min_x, max_x) = bounds(points.iter().map(|p| p.position[0]));
    let (min_y, max_y) = bounds(points.iter().map(|p| p.position[1]));
    let scale_x = (WIDTH - 2.0 * MARGIN) / (max_x - min_x).max(f64::EPSILON);
    let scale_y = (HEIGHT - 2.0 * MARGIN) / (max_y - min_y).max(f64::EPSILON);

    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{WIDTH}\" height=\"{HEIGHT}\" \
         viewBox=\"0 0 {WIDTH} {HEIGHT}\" font-family=\"sans-serif\" font-size=\"12\">\n\
         <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n"
    );
    for point in points {
        let x = MARGIN + (point.position[0] - min_x) * scale_x;
        // SVG y grows downwards.
        let y = HEIGHT - MARGIN - (point.position[1] - min_y) * scale_y;
        let label = escape(&point.label);
        svg.push_str(&format!(
            "<g><title>{token}</title>\
             <circle cx=\"{x:.2}\" cy=\"{y:.2}\" r=\"{POINT_RADIUS}\" fill=\"cyan\" stroke=\"teal\"/>\
             <text x=\"{tx:.2}\" y=\"{ty:.2}\">{label}</text></g>\n",
            token = escape(&point.token),
            tx = x + POINT_RADIUS + 2.0,
            ty = y - POINT_RADIUS,
        ));
    }
    svg.push_str("</svg>\n");
    svg
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if min.is_finite() { (min, max) } else { (0.0, 0.0) }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
