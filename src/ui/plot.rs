use eframe::egui::{self, Align2, FontId, Pos2, Sense, Stroke, Ui};
use knn_scatter::{Axis, DrawArea, Record, Snapshot};

use crate::color::PlotColors;
use crate::state::{AppState, LoadState};

/// Space around the drawing area for ticks and titles.
const MARGIN_LEFT: f32 = 60.0;
const MARGIN_RIGHT: f32 = 20.0;
const MARGIN_TOP: f32 = 20.0;
const MARGIN_BOTTOM: f32 = 60.0;

const TICK_DIVISIONS: usize = 5;
const TICK_LENGTH: f32 = 6.0;

const POINT_RADIUS: f32 = 6.0;
const NEIGHBOR_RADIUS: f32 = 8.0;
const QUERY_RADIUS: f32 = 7.0;

/// What the pointer is over.
#[derive(Clone, Copy)]
enum Hovered<'a> {
    Query,
    Point(&'a Record),
}

// ---------------------------------------------------------------------------
// Scatter plot (central panel)
// ---------------------------------------------------------------------------

/// Render the scatter plot, neighbour highlights and query point.
pub fn scatter_plot(ui: &mut Ui, state: &AppState, snapshot: Option<&Snapshot<'_>>) {
    let Some(snapshot) = snapshot else {
        let message = match &state.load {
            LoadState::Loading { source, .. } => format!("Loading {source} …"),
            _ => "No data available  (File → Open…)".to_string(),
        };
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(message);
        });
        return;
    };

    let colors = PlotColors::default();

    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
    let rect = response.rect;
    let area = DrawArea {
        left: f64::from(rect.left() + MARGIN_LEFT),
        top: f64::from(rect.top() + MARGIN_TOP),
        right: f64::from(rect.right() - MARGIN_RIGHT),
        bottom: f64::from(rect.bottom() - MARGIN_BOTTOM),
    };

    draw_axes(&painter, snapshot, &area, state, &colors, ui.visuals().text_color());

    for record in snapshot.active_subset() {
        if let Some(pos) = to_pos(snapshot.project(record, &area)) {
            painter.circle_filled(pos, POINT_RADIUS, colors.point);
        }
    }
    for neighbor in snapshot.neighbors() {
        if let Some(pos) = to_pos(snapshot.project(neighbor.record, &area)) {
            painter.circle_stroke(pos, NEIGHBOR_RADIUS, Stroke::new(2.5, colors.neighbor));
        }
    }
    let query_pos = to_pos(snapshot.query_point(&area));
    if let Some(pos) = query_pos {
        painter.circle_filled(pos, QUERY_RADIUS, colors.query);
    }

    let hovered = response
        .hover_pos()
        .and_then(|pointer| hit_test(snapshot, &area, query_pos, pointer));
    let Some(hovered) = hovered else {
        return;
    };

    let x_title = &state.config.x_title;
    let y_title = &state.config.y_title;
    response.on_hover_ui_at_pointer(|ui: &mut Ui| match hovered {
        Hovered::Query => {
            ui.strong("Query");
            ui.label(format!("{}: {}", x_title.to_lowercase(), snapshot.query_x()));
            ui.label(format!(
                "predicted {}: {:.2}",
                y_title.to_lowercase(),
                snapshot.prediction()
            ));
        }
        Hovered::Point(record) => {
            ui.strong(&record.label);
            ui.label(format!("{}: {}", x_title.to_lowercase(), record.x));
            ui.label(format!("{}: {}", y_title.to_lowercase(), record.y));
        }
    });
}

/// Screen position, or `None` when a coordinate is not finite (NaN fields).
fn to_pos((x, y): (f64, f64)) -> Option<Pos2> {
    (x.is_finite() && y.is_finite()).then(|| Pos2::new(x as f32, y as f32))
}

/// The query point wins over records; otherwise the closest record under the pointer.
fn hit_test<'a>(
    snapshot: &Snapshot<'a>,
    area: &DrawArea,
    query_pos: Option<Pos2>,
    pointer: Pos2,
) -> Option<Hovered<'a>> {
    if query_pos.is_some_and(|q| q.distance(pointer) <= QUERY_RADIUS) {
        return Some(Hovered::Query);
    }
    snapshot
        .active_subset()
        .iter()
        .filter_map(|&record| {
            let pos = to_pos(snapshot.project(record, area))?;
            let d = pos.distance(pointer);
            (d <= NEIGHBOR_RADIUS).then_some((record, d))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(record, _)| Hovered::Point(record))
}

// ---------------------------------------------------------------------------
// Axes, ticks, titles
// ---------------------------------------------------------------------------

fn draw_axes(
    painter: &egui::Painter,
    snapshot: &Snapshot<'_>,
    area: &DrawArea,
    state: &AppState,
    colors: &PlotColors,
    text_color: egui::Color32,
) {
    let left = area.left as f32;
    let right = area.right as f32;
    let top = area.top as f32;
    let bottom = area.bottom as f32;
    let axis_stroke = Stroke::new(1.0, colors.axis);
    let font = FontId::proportional(12.0);

    painter.line_segment([Pos2::new(left, bottom), Pos2::new(right, bottom)], axis_stroke);
    painter.line_segment([Pos2::new(left, top), Pos2::new(left, bottom)], axis_stroke);

    for t in snapshot.axis_range(Axis::X).ticks(TICK_DIVISIONS) {
        let x = snapshot.map_to_draw(t, Axis::X, area) as f32;
        if !x.is_finite() {
            continue;
        }
        painter.line_segment(
            [Pos2::new(x, bottom), Pos2::new(x, bottom + TICK_LENGTH)],
            axis_stroke,
        );
        painter.text(
            Pos2::new(x, bottom + TICK_LENGTH + 4.0),
            Align2::CENTER_TOP,
            t.round(),
            font.clone(),
            text_color,
        );
    }
    for t in snapshot.axis_range(Axis::Y).ticks(TICK_DIVISIONS) {
        let y = snapshot.map_to_draw(t, Axis::Y, area) as f32;
        if !y.is_finite() {
            continue;
        }
        painter.line_segment(
            [Pos2::new(left - TICK_LENGTH, y), Pos2::new(left, y)],
            axis_stroke,
        );
        painter.text(
            Pos2::new(left - TICK_LENGTH - 4.0, y),
            Align2::RIGHT_CENTER,
            t.round(),
            font.clone(),
            text_color,
        );
    }

    let title_font = FontId::proportional(13.0);
    painter.text(
        Pos2::new((left + right) / 2.0, bottom + 40.0),
        Align2::CENTER_TOP,
        &state.config.x_title,
        title_font.clone(),
        text_color,
    );
    painter.text(
        Pos2::new(left + 4.0, top),
        Align2::LEFT_TOP,
        &state.config.y_title,
        title_font,
        text_color,
    );
}
