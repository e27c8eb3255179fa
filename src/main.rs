#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use iced::{
    Application, Command, Element, Length, Settings, Theme, executor,
    widget::{button, column, container, horizontal_rule, horizontal_space, row, text, text_input},
};

mod api;
mod browser;
mod file_type;
mod pdf_preview;
mod preview;
mod settings;

use api::DirectoryClient;
use browser::{BrowserMessage, DirectoryBrowser};
use settings::AppSettings;

pub fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    log::info!("Starting Filedir Viewer v{}", env!("CARGO_PKG_VERSION"));

    FiledirViewer::run(Settings {
        window: iced::window::Settings {
            size: iced::Size::new(1000.0, 700.0),
            min_size: Some(iced::Size::new(700.0, 500.0)),
            ..Default::default()
        },
        ..Default::default()
    })
}

#[derive(Debug, Clone)]
pub enum Message {
    Browser(BrowserMessage),
    ServerInputChanged(String),
    ConnectPressed,
    DismissMessage,
}

pub struct FiledirViewer {
    browser: DirectoryBrowser,
    settings: AppSettings,
    server_input: String,
    user_message: Option<String>,
}

impl Application for FiledirViewer {
    type Message = Message;
    type Theme = Theme;
    type Executor = executor::Default;
    type Flags = ();

    fn new(_flags: ()) -> (Self, Command<Message>) {
        let settings = match AppSettings::load() {
            Ok(s) => s,
            Err(e) => {
                log::warn!("Could not load settings: {}. Using defaults.", e);
                AppSettings::default()
            }
        };

        let client = DirectoryClient::new(&settings.server.base_url).unwrap_or_else(|e| {
            log::warn!(
                "Configured server URL rejected ({}), falling back to default",
                e
            );
            DirectoryClient::new(settings::DEFAULT_SERVER_URL)
                .expect("default server URL is valid")
        });

        let server_input = client.base_url().to_string();
        let mut browser = DirectoryBrowser::new(client, settings.download_dir());

        log::info!("Fetching file list from {}", server_input);
        let initial = browser.load_command().map(Message::Browser);

        (
            Self {
                browser,
                settings,
                server_input,
                user_message: None,
            },
            initial,
        )
    }

    fn title(&self) -> String {
        format!("Filedir Viewer - {}", self.browser.base_url())
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::Browser(msg) => self.browser.update(msg).map(Message::Browser),

            Message::ServerInputChanged(value) => {
                self.server_input = value;
                Command::none()
            }

            Message::ConnectPressed => {
                match DirectoryClient::new(self.server_input.trim()) {
                    Ok(client) => {
                        self.settings.server.base_url = client.base_url().to_string();
                        if let Err(e) = self.settings.save() {
                            log::warn!("Could not save settings: {}", e);
                        }
                        self.user_message = None;
                        self.browser.set_client(client);
                        self.browser.load_command().map(Message::Browser)
                    }
                    Err(e) => {
                        self.user_message = Some(format!("Invalid server URL: {}", e));
                        Command::none()
                    }
                }
            }

            Message::DismissMessage => {
                self.user_message = None;
                Command::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let server_bar = self.view_server_bar();

        let content = container(self.browser.view().map(Message::Browser))
            .padding(10)
            .width(Length::Fill)
            .height(Length::Fill);

        container(column![server_bar, horizontal_rule(1), content])
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

impl FiledirViewer {
    fn view_server_bar(&self) -> Element<'_, Message> {
        let mut bar = row![
            text("Server:").size(12),
            text_input("http://localhost:8080/api/web/files", &self.server_input)
                .on_input(Message::ServerInputChanged)
                .on_submit(Message::ConnectPressed)
                .size(14)
                .padding(4)
                .width(Length::Fixed(360.0)),
            button(text("Connect").size(12))
                .on_press(Message::ConnectPressed)
                .padding([4, 8]),
            horizontal_space(),
        ]
        .spacing(10)
        .align_items(iced::Alignment::Center);

        if let Some(msg) = &self.user_message {
            bar = bar.push(
                text(msg)
                    .size(12)
                    .style(iced::theme::Text::Color(iced::Color::from_rgb(
                        0.8, 0.2, 0.2,
                    ))),
            );
            bar = bar.push(
                button(text("X").size(10))
                    .on_press(Message::DismissMessage)
                    .padding([2, 6]),
            );
        }

        container(bar).padding([5, 10]).into()
    }
}
