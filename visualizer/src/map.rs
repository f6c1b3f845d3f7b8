use crate::Message;
use explorercore::map::scene::MARKER_SIZE;
use explorercore::map::SceneEngine;
use explorercore::prelude::{AttractionId, GeoPoint};
use explorercore::view::{Marker, MarkerEvent};
use iced::{
    mouse,
    widget::canvas::{self, Frame, Geometry, Path, Stroke, Text},
    Color, Point, Rectangle, Renderer, Size, Theme,
};
use std::time::Duration;

const LAND: Color = Color::from_rgb(0.91, 0.93, 0.88);
const GRATICULE: Color = Color::from_rgb(0.80, 0.83, 0.78);

fn rgb(color: [u8; 3]) -> Color {
    Color::from_rgb8(color[0], color[1], color[2])
}

/// Canvas front end of the in-memory map engine: draws the placed markers at
/// the camera pose for `now` and turns pointer input into marker events.
pub struct MapCanvas<'a> {
    pub engine: &'a SceneEngine,
    pub now: Duration,
}

#[derive(Debug, Default)]
pub struct MapCanvasState {
    size: Option<Size>,
    under_cursor: Option<AttractionId>,
}

impl MapCanvas<'_> {
    fn marker_under(&self, bounds: Rectangle, cursor: mouse::Cursor) -> Option<AttractionId> {
        let position = cursor.position_in(bounds)?;
        self.engine.marker_at(position.x, position.y, self.now)
    }

    fn draw_graticule(&self, frame: &mut Frame) {
        let stroke = || Stroke::default().with_width(1.0).with_color(GRATICULE);
        for lat in -2..=14 {
            let line = Path::new(|builder| {
                for (i, lng) in (-8..=6).enumerate() {
                    let (x, y) = self
                        .engine
                        .screen_position(GeoPoint::new(f64::from(lat), f64::from(lng)), self.now);
                    if i == 0 {
                        builder.move_to(Point::new(x, y));
                    } else {
                        builder.line_to(Point::new(x, y));
                    }
                }
            });
            frame.stroke(&line, stroke());
        }
        for lng in -8..=6 {
            let line = Path::new(|builder| {
                let (x0, y0) = self
                    .engine
                    .screen_position(GeoPoint::new(-2.0, f64::from(lng)), self.now);
                let (x1, y1) = self
                    .engine
                    .screen_position(GeoPoint::new(14.0, f64::from(lng)), self.now);
                builder.move_to(Point::new(x0, y0));
                builder.line_to(Point::new(x1, y1));
            });
            frame.stroke(&line, stroke());
        }
    }

    fn draw_marker(&self, frame: &mut Frame, marker: &Marker) {
        let (x, y) = self.engine.screen_position(marker.position, self.now);
        let scale = marker.visual.scale();
        let radius = MARKER_SIZE / 2.0 * scale;
        let head = Point::new(x, y - MARKER_SIZE / 2.0 - marker.visual.lift());
        let fill = rgb(marker.visual.color());

        let pin = Path::new(|builder| {
            builder.move_to(Point::new(head.x - radius * 0.55, head.y + radius * 0.6));
            builder.line_to(Point::new(x, y - marker.visual.lift()));
            builder.line_to(Point::new(head.x + radius * 0.55, head.y + radius * 0.6));
            builder.close();
        });
        frame.fill(&pin, fill);
        frame.fill(&Path::circle(head, radius * 0.7), fill);
        frame.fill(&Path::circle(head, radius * 0.25), Color::WHITE);

        if marker.is_selected {
            frame.stroke(
                &Path::circle(head, radius * 0.7 + 2.0),
                Stroke::default().with_width(2.0).with_color(Color::WHITE),
            );
        }
        if marker.is_focused {
            frame.stroke(
                &Path::circle(head, radius * 0.7 + 5.0),
                Stroke::default()
                    .with_width(2.0)
                    .with_color(Color::from_rgb(0.98, 0.75, 0.14)),
            );
        }
        if marker.is_hovered {
            frame.fill_text(Text {
                content: marker.tooltip.clone(),
                position: Point::new(head.x + radius, head.y - radius),
                color: Color::from_rgb(0.1, 0.1, 0.12),
                size: 14.0.into(),
                ..Text::default()
            });
        }
    }
}

impl canvas::Program<Message> for MapCanvas<'_> {
    type State = MapCanvasState;

    fn update(
        &self,
        state: &mut Self::State,
        event: &canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        if state.size != Some(bounds.size()) {
            state.size = Some(bounds.size());
            return Some(canvas::Action::publish(Message::MapResized(bounds.size())));
        }

        match event {
            canvas::Event::Mouse(mouse::Event::CursorMoved { .. })
            | canvas::Event::Mouse(mouse::Event::CursorLeft) => {
                let under = self.marker_under(bounds, cursor);
                if under == state.under_cursor {
                    return None;
                }
                let previous = std::mem::replace(&mut state.under_cursor, under);
                Some(canvas::Action::publish(Message::MarkerPointer {
                    left: previous,
                    entered: under,
                }))
            }
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let id = self.marker_under(bounds, cursor)?;
                Some(canvas::Action::publish(Message::Marker(id, MarkerEvent::Click)).and_capture())
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), LAND);
        self.draw_graticule(&mut frame);

        let markers = self.engine.markers();
        // Emphasized pins are drawn last so they sit on top.
        for marker in markers.iter().filter(|marker| !marker.is_selected && !marker.is_hovered) {
            self.draw_marker(&mut frame, marker);
        }
        for marker in markers.iter().filter(|marker| marker.is_selected || marker.is_hovered) {
            self.draw_marker(&mut frame, marker);
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if self.marker_under(bounds, cursor).is_some() {
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::default()
        }
    }
}
