use explorercore::catalog::Catalog;
use explorercore::map::{MapHealth, SceneEngine};
use explorercore::prelude::{AttractionId, ExplorerConfig, ExplorerError, Size as MapSize};
use explorercore::state::debounce::leave_elapsed;
use explorercore::state::LeaveTicket;
use explorercore::view::{DetailModel, ListModel, ListNavigation, ListRow, MarkerEvent, RowEvent};
use explorercore::{Category, Explorer, Outcome};
use iced::{
    event, keyboard, time,
    widget::{
        button, container, mouse_area, scrollable, stack, text, text_input, Canvas, Column,
        Container,
    },
    window, Alignment, Color, Element, Length, Subscription, Task, Theme,
};
use log::{error, info};
use map::MapCanvas;
use std::env;
use std::time::{Duration, Instant};

mod map;

const MAP_LOAD_DELAY: Duration = Duration::from_millis(150);
const FRAME: Duration = Duration::from_millis(16);

fn main() -> iced::Result {
    env_logger::init();
    let (catalog, config) = match load_inputs() {
        Ok(inputs) => inputs,
        Err(err) => {
            error!("could not load explorer inputs: {err}");
            std::process::exit(1);
        }
    };

    iced::application(
        move || Visualizer::boot(catalog.clone(), config.clone()),
        Visualizer::update,
        Visualizer::view,
    )
    .title(application_title)
    .subscription(application_subscription)
    .theme(application_theme)
    .run()
}

/// Catalog and tunables come from `EXPLORER_CATALOG` / `EXPLORER_CONFIG`
/// when set, otherwise the built-in Ghana catalog and defaults.
fn load_inputs() -> Result<(Catalog, ExplorerConfig), ExplorerError> {
    let config = match env::var_os("EXPLORER_CONFIG") {
        Some(path) => ExplorerConfig::load(path)?,
        None => ExplorerConfig::default(),
    };
    let catalog = match env::var_os("EXPLORER_CATALOG") {
        Some(path) => Catalog::load(path)?,
        None => Catalog::ghana()?,
    };
    Ok((catalog, config))
}

fn application_title(_: &Visualizer) -> String {
    "Discover Ghana".into()
}

fn application_subscription(state: &Visualizer) -> Subscription<Message> {
    let keys = event::listen_with(keyboard_shortcut);
    if state.is_animating() {
        Subscription::batch([keys, time::every(FRAME).map(|_| Message::Tick)])
    } else {
        keys
    }
}

fn application_theme(_: &Visualizer) -> Theme {
    Theme::Light
}

fn keyboard_shortcut(event: iced::Event, status: event::Status, _: window::Id) -> Option<Message> {
    if matches!(status, event::Status::Captured) {
        return None;
    }
    let iced::Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) = event else {
        return None;
    };
    use keyboard::key::Named;
    match key {
        keyboard::Key::Named(Named::ArrowDown) => Some(Message::ListKey(ListNavigation::Next)),
        keyboard::Key::Named(Named::ArrowUp) => Some(Message::ListKey(ListNavigation::Previous)),
        keyboard::Key::Named(Named::Home) => Some(Message::ListKey(ListNavigation::First)),
        keyboard::Key::Named(Named::End) => Some(Message::ListKey(ListNavigation::Last)),
        keyboard::Key::Named(Named::Enter) | keyboard::Key::Named(Named::Space) => {
            Some(Message::ActivateRow)
        }
        keyboard::Key::Named(Named::Escape) => Some(Message::CloseDetail),
        _ => None,
    }
}

struct Visualizer {
    explorer: Explorer<SceneEngine>,
    leave_window: Duration,
    started: Instant,
}

#[derive(Debug, Clone)]
pub enum Message {
    Tick,
    MapLoad,
    RetryMap,
    MapResized(iced::Size),
    QueryChanged(String),
    Row(AttractionId, RowEvent),
    Marker(AttractionId, MarkerEvent),
    MarkerPointer {
        left: Option<AttractionId>,
        entered: Option<AttractionId>,
    },
    ListKey(ListNavigation),
    ActivateRow,
    CloseDetail,
    LeaveElapsed(LeaveTicket),
}

impl Visualizer {
    fn boot(catalog: Catalog, config: ExplorerConfig) -> (Self, Task<Message>) {
        info!("starting explorer with {} attractions", catalog.len());
        let engine = SceneEngine::new(&config);
        (
            Visualizer {
                leave_window: config.leave_debounce(),
                explorer: Explorer::new(catalog, config, engine),
                started: Instant::now(),
            },
            Task::perform(tokio::time::sleep(MAP_LOAD_DELAY), |_| Message::MapLoad),
        )
    }

    fn now(&self) -> Duration {
        self.started.elapsed()
    }

    fn is_animating(&self) -> bool {
        self.explorer.engine().camera().is_animating(self.now())
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        let now = state.now();
        let outcome = state.explorer.advance(now);
        let mut tasks = vec![state.follow(outcome)];

        match message {
            Message::Tick => {
                state.explorer.engine_mut().camera_mut().settle(now);
            }
            Message::MapLoad => {
                state.explorer.start();
            }
            Message::RetryMap => {
                state.explorer.retry_map();
            }
            Message::MapResized(size) => {
                state.explorer.resize_map(MapSize::new(size.width, size.height));
            }
            Message::QueryChanged(query) => {
                let outcome = state.explorer.set_query(query);
                tasks.push(state.follow(outcome));
            }
            Message::Row(id, event) => {
                let outcome = state.explorer.row_event(id, event);
                tasks.push(state.follow(outcome));
            }
            Message::Marker(id, event) => {
                let outcome = state.explorer.marker_event(id, event);
                tasks.push(state.follow(outcome));
            }
            Message::MarkerPointer { left, entered } => {
                if let Some(id) = left {
                    let outcome = state.explorer.marker_event(id, MarkerEvent::PointerLeave);
                    tasks.push(state.follow(outcome));
                }
                if let Some(id) = entered {
                    let outcome = state.explorer.marker_event(id, MarkerEvent::PointerEnter);
                    tasks.push(state.follow(outcome));
                }
            }
            Message::ListKey(direction) => {
                let outcome = state.explorer.navigate_list(direction);
                tasks.push(state.follow(outcome));
            }
            Message::ActivateRow => {
                let outcome = state.explorer.activate_focused_row();
                tasks.push(state.follow(outcome));
            }
            Message::CloseDetail => {
                let outcome = state.explorer.close_detail();
                tasks.push(state.follow(outcome));
            }
            Message::LeaveElapsed(ticket) => {
                state.explorer.flush_leave(ticket);
            }
        }

        Task::batch(tasks)
    }

    /// Schedules the debounced leave, if any; camera commands were already
    /// handed to the engine.
    fn follow(&self, outcome: Outcome) -> Task<Message> {
        match outcome.pending_leave {
            Some(ticket) => Task::perform(
                leave_elapsed(ticket, self.leave_window),
                Message::LeaveElapsed,
            ),
            None => Task::none(),
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let list = state.explorer.list_model();
        let sidebar = Column::new()
            .push(text("Discover Ghana").size(28))
            .push(
                text_input("Search attractions...", state.explorer.state().query())
                    .on_input(Message::QueryChanged)
                    .padding(10),
            )
            .push(attraction_list(list))
            .spacing(12)
            .padding(16)
            .width(Length::Fixed(380.0))
            .height(Length::Fill);

        let map_panel: Element<'_, Message> = match state.explorer.map_health() {
            MapHealth::Loading => Container::new(text("Loading map...").size(16))
                .center(Length::Fill)
                .into(),
            MapHealth::Faulted { reason } => Container::new(
                Column::new()
                    .push(text("Something went wrong with the map").size(20))
                    .push(text(reason.clone()).size(12))
                    .push(button("Try again").on_press(Message::RetryMap).padding(10))
                    .spacing(12)
                    .align_x(Alignment::Center),
            )
            .center(Length::Fill)
            .into(),
            MapHealth::Ready => Canvas::new(MapCanvas {
                engine: state.explorer.engine(),
                now: state.now(),
            })
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        };

        let map_area: Element<'_, Message> = match state.explorer.detail() {
            Some(detail) => stack![map_panel, detail_overlay(detail)].into(),
            None => map_panel,
        };

        let metrics = state.explorer.metrics();
        let status = text(format!(
            "{} intents | {} camera moves | {} leaves cancelled | map faults {} (retries {})",
            metrics.intents,
            metrics.camera_commands,
            metrics.leaves_cancelled,
            metrics.map_faults,
            metrics.map_retries
        ))
        .size(12);

        let body = iced::widget::row![sidebar, map_area].height(Length::Fill);
        Container::new(Column::new().push(body).push(Container::new(status).padding(6)))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

fn rgb(color: [u8; 3]) -> Color {
    Color::from_rgb8(color[0], color[1], color[2])
}

fn category_badge<'a>(category: Category) -> Element<'a, Message> {
    let (background, foreground) = category.palette();
    container(text(category.label()).size(12).color(rgb(foreground)))
        .padding([2, 8])
        .style(move |_theme: &Theme| container::Style::default().background(rgb(background)))
        .into()
}

fn attraction_list<'a>(model: ListModel) -> Element<'a, Message> {
    let header = text(model.header).size(14);
    if let Some(empty) = model.empty {
        return Column::new()
            .push(header)
            .push(text(empty.title).size(18))
            .push(text(empty.hint).size(13))
            .spacing(8)
            .into();
    }

    let rows = model
        .rows
        .into_iter()
        .fold(Column::new().spacing(6), |column, row| {
            column.push(attraction_row(row))
        });
    Column::new()
        .push(header)
        .push(scrollable(rows).height(Length::Fill))
        .spacing(8)
        .into()
}

fn attraction_row<'a>(row: ListRow) -> Element<'a, Message> {
    let id = row.id;
    let title = if row.is_focused {
        format!("> {}", row.name)
    } else {
        row.name
    };
    let content = Column::new()
        .push(
            iced::widget::row![text(title).size(16).width(Length::Fill), category_badge(row.category)]
                .spacing(8)
                .align_y(Alignment::Center),
        )
        .push(text(format!("{:.1} stars | {}", row.rating, row.duration)).size(12))
        .spacing(4);

    let style = if row.is_selected {
        button::primary
    } else if row.is_hovered || row.is_focused {
        button::secondary
    } else {
        button::text
    };
    let card = button(content)
        .on_press(Message::Row(id, RowEvent::Click))
        .style(style)
        .width(Length::Fill)
        .padding(10);

    mouse_area(card)
        .on_enter(Message::Row(id, RowEvent::PointerEnter))
        .on_exit(Message::Row(id, RowEvent::PointerLeave))
        .into()
}

fn detail_overlay<'a>(detail: DetailModel) -> Element<'a, Message> {
    let highlights = detail
        .highlights
        .into_iter()
        .fold(Column::new().spacing(2), |column, highlight| {
            column.push(text(format!("- {highlight}")).size(13))
        });

    let card = Column::new()
        .push(
            iced::widget::row![
                text(detail.name).size(22).width(Length::Fill),
                button(text("x")).on_press(Message::CloseDetail).style(button::text),
            ]
            .align_y(Alignment::Center),
        )
        .push(category_badge(detail.category))
        .push(text(format!("{:.1} stars | {}", detail.rating, detail.duration)).size(13))
        .push(text(detail.location).size(13))
        .push(text(detail.description).size(14))
        .push(text("Highlights").size(16))
        .push(highlights)
        .push(text(detail.image).size(10))
        .spacing(8);

    Container::new(
        container(card)
            .width(Length::Fixed(340.0))
            .padding(16)
            .style(container::rounded_box),
    )
    .width(Length::Fill)
    .align_x(Alignment::End)
    .padding(16)
    .into()
}
