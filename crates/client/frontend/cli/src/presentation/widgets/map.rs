//! Map widget drawing region polygons on a half-block canvas.
//!
//! Paint comes straight from each [`FeatureLayer`]; this module only maps
//! between terminal cells and geographic coordinates.

use client_frontend_core::map::{Bounds, FeatureLayer, GeoPoint, MapLayer, RegionFeature};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::{Line as TextLine, Span},
    widgets::{
        Block, Borders, Paragraph,
        canvas::{Canvas, Line, Painter, Shape},
    },
};

use crate::presentation::theme::RatatuiTheme;

/// Mapping between the map panel's cells and the geographic plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapViewport {
    /// Inner canvas area, borders excluded.
    pub area: Rect,
    /// Geographic extent shown, widened to the area's aspect ratio.
    pub bounds: Bounds,
}

impl MapViewport {
    /// Fit `visible` into `area` without distortion.
    ///
    /// Half-block cells are two pixels tall, so one cell row spans twice
    /// the geographic height of a pixel column.
    pub fn fit(area: Rect, visible: Bounds) -> Self {
        let pixels_wide = f64::from(area.width.max(1));
        let pixels_tall = f64::from(area.height.max(1)) * 2.0;
        let area_aspect = pixels_wide / pixels_tall;

        let width = visible.width().max(f64::EPSILON);
        let height = visible.height().max(f64::EPSILON);
        let center = visible.center();

        let (half_width, half_height) = if width / height > area_aspect {
            (width / 2.0, width / area_aspect / 2.0)
        } else {
            (height * area_aspect / 2.0, height / 2.0)
        };

        Self {
            area,
            bounds: Bounds::from_center(center, half_width, half_height),
        }
    }

    /// Geographic point under the center of a terminal cell.
    pub fn geo_at(&self, column: u16, row: u16) -> Option<GeoPoint> {
        let area = self.area;
        if area.width == 0
            || area.height == 0
            || column < area.x
            || row < area.y
            || column >= area.x + area.width
            || row >= area.y + area.height
        {
            return None;
        }

        let fx = (f64::from(column - area.x) + 0.5) / f64::from(area.width);
        let fy = (f64::from(row - area.y) + 0.5) / f64::from(area.height);
        Some(GeoPoint::new(
            self.bounds.min.lon + fx * self.bounds.width(),
            self.bounds.max.lat - fy * self.bounds.height(),
        ))
    }

    fn pixel_size(&self) -> (f64, f64) {
        (
            self.bounds.width() / f64::from(self.area.width.max(1)),
            self.bounds.height() / (f64::from(self.area.height.max(1)) * 2.0),
        )
    }
}

/// Solid fill of one feature, sampled at every canvas pixel it covers.
struct RegionFill<'a> {
    feature: &'a RegionFeature,
    viewport: &'a MapViewport,
    color: Color,
}

impl Shape for RegionFill<'_> {
    fn draw(&self, painter: &mut Painter) {
        let view = &self.viewport.bounds;
        let own = &self.feature.bounds;
        if !view.intersects(own) {
            return;
        }

        let (dx, dy) = self.viewport.pixel_size();
        let columns = usize::from(self.viewport.area.width);
        let rows = usize::from(self.viewport.area.height) * 2;

        let first_col = (((own.min.lon - view.min.lon) / dx).floor().max(0.0)) as usize;
        let last_col = (((own.max.lon - view.min.lon) / dx).ceil().max(0.0) as usize).min(columns);
        let first_row = (((view.max.lat - own.max.lat) / dy).floor().max(0.0)) as usize;
        let last_row = (((view.max.lat - own.min.lat) / dy).ceil().max(0.0) as usize).min(rows);

        for row in first_row..last_row {
            let lat = view.max.lat - (row as f64 + 0.5) * dy;
            for col in first_col..last_col {
                let lon = view.min.lon + (col as f64 + 0.5) * dx;
                if !self.feature.contains(GeoPoint::new(lon, lat)) {
                    continue;
                }
                if let Some((x, y)) = painter.get_point(lon, lat) {
                    painter.paint(x, y, self.color);
                }
            }
        }
    }
}

/// Render the map panel and return the viewport used, for mouse mapping.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    map: &MapLayer,
    selected: usize,
    theme: &RatatuiTheme,
) -> MapViewport {
    let title = match map.hovered_label() {
        Some(label) => format!(" Map · {label} "),
        None => " Map ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_bottom(format!(" {selected} selected "));
    let inner = block.inner(area);
    let viewport = MapViewport::fit(inner, map.camera().visible_bounds());
    let bounds = viewport.bounds;

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::HalfBlock)
        .background_color(Color::Black)
        .x_bounds([bounds.min.lon, bounds.max.lon])
        .y_bounds([bounds.min.lat, bounds.max.lat])
        .paint(|ctx| {
            let painted: Vec<(&RegionFeature, &FeatureLayer)> = map
                .painted()
                .filter(|(feature, _)| bounds.intersects(&feature.bounds))
                .collect();

            for (feature, layer) in &painted {
                ctx.draw(&RegionFill {
                    feature,
                    viewport: &viewport,
                    color: theme.region_fill(&layer.style),
                });
            }
            ctx.layer();
            for (feature, layer) in &painted {
                let color = theme.region_border(&layer.style);
                for polygon in &feature.polygons {
                    for ring in polygon.rings() {
                        for edge in ring.windows(2) {
                            ctx.draw(&Line::new(
                                edge[0].lon,
                                edge[0].lat,
                                edge[1].lon,
                                edge[1].lat,
                                color,
                            ));
                        }
                    }
                }
            }
        });

    frame.render_widget(canvas, area);
    viewport
}

/// Placeholder while the dataset loads or after it failed.
pub fn render_placeholder(frame: &mut Frame, area: Rect, text: &str, failed: bool) {
    let color = if failed { Color::LightRed } else { Color::DarkGray };
    let paragraph = Paragraph::new(TextLine::from(Span::styled(
        text.to_string(),
        Style::default().fg(color),
    )))
    .block(Block::default().borders(Borders::ALL).title(" Map "));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Bounds {
        Bounds::from_center(GeoPoint::new(0.0, 0.0), 10.0, 10.0)
    }

    #[test]
    fn fit_widens_to_area_aspect() {
        // 40 columns x 10 rows is 40 x 20 pixels, twice as wide as tall.
        let viewport = MapViewport::fit(Rect::new(0, 0, 40, 10), square());
        assert!((viewport.bounds.width() - 40.0).abs() < 1e-9);
        assert!((viewport.bounds.height() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn cells_map_to_geo_points() {
        let viewport = MapViewport::fit(Rect::new(10, 5, 20, 10), square());
        let top_left = viewport.geo_at(10, 5).unwrap();
        assert!(top_left.lon < 0.0 && top_left.lat > 0.0);

        let bottom_right = viewport.geo_at(29, 14).unwrap();
        assert!(bottom_right.lon > 0.0 && bottom_right.lat < 0.0);

        assert!(viewport.geo_at(9, 5).is_none());
        assert!(viewport.geo_at(30, 5).is_none());
        assert!(viewport.geo_at(10, 15).is_none());
    }
}
