use std::path::Path;
use std::time::{Duration, Instant};

use constellation::backdrop::{init, Backdrop, Visibility};
use constellation::config::{MotionPreference, Settings, SETTINGS_FILE};
use constellation::render::{DisplayList, DrawCommand, Rgb, Rgba};
use constellation::{FrameQueue, Parameters, Theme, ThemeStore, Viewport};
use log::{debug, info, warn};

use iced::canvas::{self, Cache, Canvas, Cursor, Geometry, Path as Shape, Stroke};
use iced::time;
use iced::{
    executor, mouse, Application, Clipboard, Color, Command, Container, Element, Length, Point,
    Rectangle, Settings as WindowSettings, Subscription,
};
use iced_native::keyboard::{self, KeyCode};

/// Roughly one display refresh.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug)]
enum Message {
    Frame,
    Resized { width: u32, height: u32 },
    ResizeSettled,
    PointerMoved(Point),
    PointerLeft,
    TogglePlay,
    ToggleTheme,
    ThemeLoaded(Option<Theme>),
    ThemeSaved,
}

struct Flags {
    settings: Settings,
    motion: MotionPreference,
}

struct App {
    backdrop: Option<Backdrop<FrameQueue>>,
    sky: Sky,
    theme: Theme,
    store: ThemeStore,
    paused: bool,
    minimized: bool,
}

impl App {
    fn palette_changed(&mut self) {
        let palette = self.theme.palette();
        self.sky.background = palette.background;
        if let Some(backdrop) = &self.backdrop {
            if !backdrop.is_running() {
                backdrop.redraw(&mut self.sky.display, &palette.colors);
            }
        }
        self.sky.cache.clear();
    }

    fn sync_running(&mut self) {
        let visibility = if self.paused || self.minimized {
            Visibility::Hidden
        } else {
            Visibility::Visible
        };
        if let Some(backdrop) = &mut self.backdrop {
            backdrop.set_visibility(visibility);
        }
    }

    fn frame(&mut self) {
        let colors = self.theme.palette().colors;
        if let Some(backdrop) = &mut self.backdrop {
            if let Some(handle) = backdrop.scheduler_mut().take() {
                if backdrop.on_frame(handle, &mut self.sky.display, &colors) {
                    self.sky.cache.clear();
                }
            }
        }
    }

    fn persist_theme(&self) -> Command<Message> {
        let store = self.store.clone();
        let theme = self.theme;
        Command::perform(
            async move {
                if let Err(err) = store.save(theme).await {
                    warn!("cannot remember theme in {}: {}", store.path().display(), err);
                }
                Message::ThemeSaved
            },
            |message| message,
        )
    }
}

impl Application for App {
    type Executor = executor::Default;
    type Message = Message;
    type Flags = Flags;

    fn new(flags: Flags) -> (Self, Command<Message>) {
        let Flags { settings, motion } = flags;
        let viewport = Viewport::new(settings.width, settings.height);
        let backdrop = init(
            motion,
            || Ok(viewport),
            Parameters::DEFAULT,
            FrameQueue::new(),
        );
        let store = ThemeStore::new(settings.theme_file.clone());

        let app = App {
            backdrop,
            sky: Sky {
                display: DisplayList::new(),
                background: settings.theme.palette().background,
                cache: Cache::default(),
            },
            theme: settings.theme,
            store: store.clone(),
            paused: false,
            minimized: false,
        };

        (
            app,
            Command::perform(
                async move {
                    match store.load().await {
                        Ok(theme) => Message::ThemeLoaded(theme),
                        Err(err) => {
                            warn!("ignoring stored theme: {}", err);
                            Message::ThemeLoaded(None)
                        }
                    }
                },
                |message| message,
            ),
        )
    }

    fn title(&self) -> String {
        String::from("Constellation")
    }

    fn subscription(&self) -> Subscription<Message> {
        let events = iced_native::subscription::events_with(window_event);
        let awaiting_frame = self
            .backdrop
            .as_ref()
            .map_or(false, |backdrop| !backdrop.scheduler().is_idle());

        if awaiting_frame {
            Subscription::batch(vec![
                events,
                time::every(FRAME_INTERVAL).map(|_| Message::Frame),
            ])
        } else {
            events
        }
    }

    fn update(&mut self, message: Self::Message, _clipboard: &mut Clipboard) -> Command<Message> {
        match message {
            Message::Frame => self.frame(),
            Message::Resized { width, height } => {
                self.minimized = width == 0 || height == 0;
                self.sync_running();
                if let Some(backdrop) = &mut self.backdrop {
                    if !self.minimized {
                        backdrop.resize(Viewport::new(width, height), Instant::now());
                        let wait = backdrop.parameters().resize_debounce;
                        return Command::perform(tokio::time::sleep(wait), |_| {
                            Message::ResizeSettled
                        });
                    }
                }
            }
            Message::ResizeSettled => {
                if let Some(backdrop) = &mut self.backdrop {
                    if backdrop.settle(Instant::now()) {
                        backdrop.redraw(&mut self.sky.display, &self.theme.palette().colors);
                        self.sky.cache.clear();
                    }
                }
            }
            Message::PointerMoved(position) => {
                if let Some(backdrop) = &mut self.backdrop {
                    backdrop.pointer_moved(position.x, position.y);
                }
            }
            Message::PointerLeft => {
                if let Some(backdrop) = &mut self.backdrop {
                    backdrop.pointer_left();
                }
            }
            Message::TogglePlay => {
                self.paused = !self.paused;
                debug!("paused: {}", self.paused);
                self.sync_running();
            }
            Message::ToggleTheme => {
                self.theme = self.theme.toggle();
                self.palette_changed();
                return self.persist_theme();
            }
            Message::ThemeLoaded(theme) => {
                if let Some(theme) = theme {
                    self.theme = theme;
                    self.palette_changed();
                }
            }
            Message::ThemeSaved => {}
        }
        Command::none()
    }

    fn view(&mut self) -> Element<Message> {
        Container::new(
            Canvas::new(&mut self.sky)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }
}

fn window_event(event: iced_native::Event, _status: iced_native::event::Status) -> Option<Message> {
    match event {
        iced_native::Event::Window(iced_native::window::Event::Resized { width, height }) => {
            Some(Message::Resized { width, height })
        }
        iced_native::Event::Keyboard(keyboard::Event::KeyPressed { key_code, .. }) => {
            match key_code {
                KeyCode::Space => Some(Message::TogglePlay),
                KeyCode::T => Some(Message::ToggleTheme),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Canvas program replaying the backdrop's last recorded frame.
struct Sky {
    display: DisplayList,
    background: Rgb,
    cache: Cache,
}

impl canvas::Program<Message> for Sky {
    fn update(
        &mut self,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (canvas::event::Status, Option<Message>) {
        match event {
            canvas::Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                let message = match cursor.position_in(&bounds) {
                    Some(position) => Message::PointerMoved(position),
                    None => Message::PointerLeft,
                };
                (canvas::event::Status::Ignored, Some(message))
            }
            canvas::Event::Mouse(mouse::Event::CursorLeft) => {
                (canvas::event::Status::Ignored, Some(Message::PointerLeft))
            }
            _ => (canvas::event::Status::Ignored, None),
        }
    }

    fn draw(&self, bounds: Rectangle, _cursor: Cursor) -> Vec<Geometry> {
        let geometry = self.cache.draw(bounds.size(), |frame| {
            let background = Shape::rectangle(Point::ORIGIN, frame.size());
            frame.fill(&background, color(self.background.with_alpha(1.0)));

            for command in self.display.commands() {
                match *command {
                    DrawCommand::Clear(_) => {}
                    DrawCommand::Line {
                        from,
                        to,
                        color: stroke,
                        width,
                    } => {
                        let line = Shape::line(Point::new(from.x, from.y), Point::new(to.x, to.y));
                        frame.stroke(
                            &line,
                            Stroke {
                                color: color(stroke),
                                width,
                                ..Stroke::default()
                            },
                        );
                    }
                    DrawCommand::Dot {
                        center,
                        radius,
                        color: fill,
                    } => {
                        let dot = Shape::circle(Point::new(center.x, center.y), radius);
                        frame.fill(&dot, color(fill));
                    }
                }
            }
        });

        vec![geometry]
    }
}

fn color(rgba: Rgba) -> Color {
    Color::from_rgba8(rgba.rgb.r, rgba.rgb.g, rgba.rgb.b, rgba.alpha)
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let settings = Settings::load_or_default(Path::new(SETTINGS_FILE));
    let motion = MotionPreference::detect(&settings);
    info!(
        "starting {}x{}, motion {:?}",
        settings.width, settings.height, motion
    );

    App::run(WindowSettings {
        window: iced::window::Settings {
            size: (settings.width, settings.height),
            ..iced::window::Settings::default()
        },
        antialiasing: true,
        ..WindowSettings::with_flags(Flags { settings, motion })
    })
}
