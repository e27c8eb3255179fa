//! Directory browser component: file list, selection, preview and download.
//!
//! Owns all UI state for one server directory. Exactly one fetch is in
//! flight per user action; results carry the file name they were fetched
//! for and are discarded when that name no longer matches the current
//! selection, so a late response can never overwrite a newer one.

use iced::{
    Command, Element, Length,
    widget::{Column, Space, button, column, container, horizontal_rule, row, scrollable, text},
};
use std::path::PathBuf;

use crate::api::{DirectoryClient, FileRecord, TransportError};
use crate::file_type::{self, FileKind};
use crate::preview::{self, ContentPreview};

#[derive(Debug, Clone)]
pub enum BrowserMessage {
    Reload,
    FilesLoaded(Result<Vec<FileRecord>, TransportError>),
    FileSelected(FileRecord),
    /// Text content result, tagged with the file name it was fetched for.
    TextLoaded(String, Result<String, TransportError>),
    /// Binary preview result, tagged with the file name it was fetched for.
    PreviewLoaded(String, Result<ContentPreview, String>),
    DownloadFile(String),
    DownloadComplete(Result<(String, PathBuf), String>),
    OpenLastDownload,
}

pub struct DirectoryBrowser {
    client: DirectoryClient,
    files: Vec<FileRecord>,
    selected: Option<FileRecord>,
    loading: bool,
    error_message: Option<String>,
    status_message: Option<String>,
    preview: Option<ContentPreview>,
    last_download: Option<PathBuf>,
    download_dir: PathBuf,
}

impl DirectoryBrowser {
    pub fn new(client: DirectoryClient, download_dir: PathBuf) -> Self {
        Self {
            client,
            files: Vec::new(),
            selected: None,
            loading: false,
            error_message: None,
            status_message: None,
            preview: None,
            last_download: None,
            download_dir,
        }
    }

    /// Point the browser at a different server. Clears everything held
    /// from the previous one.
    pub fn set_client(&mut self, client: DirectoryClient) {
        self.client = client;
        self.files.clear();
        self.selected = None;
        self.preview = None;
        self.error_message = None;
        self.status_message = None;
        self.loading = false;
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// The command that kicks off the initial list fetch.
    pub fn load_command(&mut self) -> Command<BrowserMessage> {
        self.update(BrowserMessage::Reload)
    }

    pub fn update(&mut self, message: BrowserMessage) -> Command<BrowserMessage> {
        match message {
            BrowserMessage::Reload => {
                self.loading = true;
                self.error_message = None;
                self.status_message = Some("Loading file list...".to_string());
                let client = self.client.clone();
                Command::perform(
                    async move { client.list_files().await },
                    BrowserMessage::FilesLoaded,
                )
            }

            BrowserMessage::FilesLoaded(result) => {
                self.loading = false;
                match result {
                    Ok(files) => {
                        self.status_message = Some(format!("{} files", files.len()));
                        self.error_message = None;
                        self.files = files;
                    }
                    Err(e) => {
                        log::error!("Failed to load file list: {}", e);
                        self.files.clear();
                        self.error_message = Some(format!("Failed to load files: {}", e));
                        self.status_message = None;
                    }
                }
                Command::none()
            }

            BrowserMessage::FileSelected(record) => {
                // Prior preview is dropped before the new fetch starts so
                // stale content is never shown under the new name.
                self.preview = None;
                self.error_message = None;
                self.loading = true;
                self.status_message = Some(format!("Loading {}...", record.file_name));
                self.selected = Some(record.clone());

                let client = self.client.clone();
                let file_name = record.file_name.clone();
                let kind = FileKind::classify(&record.file_type);
                log::debug!("Selected {} ({:?})", file_name, kind);

                if kind.is_text() {
                    Command::perform(
                        async move {
                            let result = client.fetch_text_content(&file_name).await;
                            (file_name, result)
                        },
                        |(name, result)| BrowserMessage::TextLoaded(name, result),
                    )
                } else {
                    let file_type = record.file_type.clone();
                    Command::perform(
                        load_binary_preview(client, file_name, file_type, kind),
                        |(name, result)| BrowserMessage::PreviewLoaded(name, result),
                    )
                }
            }

            BrowserMessage::TextLoaded(file_name, result) => {
                if !self.is_current_selection(&file_name) {
                    log::debug!("Discarding stale text content for {}", file_name);
                    return Command::none();
                }
                self.loading = false;
                match result {
                    Ok(content) => {
                        self.status_message = None;
                        self.preview = Some(preview::text_preview(file_name, content));
                    }
                    Err(e) => {
                        log::error!("Failed to load content of {}: {}", file_name, e);
                        self.error_message = Some(format!("Failed to load file content: {}", e));
                        self.status_message = None;
                    }
                }
                Command::none()
            }

            BrowserMessage::PreviewLoaded(file_name, result) => {
                if !self.is_current_selection(&file_name) {
                    log::debug!("Discarding stale preview for {}", file_name);
                    return Command::none();
                }
                self.loading = false;
                match result {
                    Ok(content) => {
                        self.status_message = None;
                        self.preview = Some(content);
                    }
                    Err(e) => {
                        log::error!("Failed to load preview of {}: {}", file_name, e);
                        self.error_message = Some(format!("Failed to load file for viewing: {}", e));
                        self.status_message = None;
                    }
                }
                Command::none()
            }

            BrowserMessage::DownloadFile(file_name) => {
                // Independent of selection and preview state.
                self.status_message = Some(format!("Downloading {}...", file_name));
                let client = self.client.clone();
                let dir = self.download_dir.clone();
                Command::perform(
                    download_to_dir(client, file_name, dir),
                    BrowserMessage::DownloadComplete,
                )
            }

            BrowserMessage::DownloadComplete(result) => {
                match result {
                    Ok((file_name, path)) => {
                        log::info!("Downloaded {} to {:?}", file_name, path);
                        self.status_message = Some(format!("Downloaded: {}", file_name));
                        self.last_download = Some(path);
                    }
                    Err(e) => {
                        log::error!("Download failed: {}", e);
                        self.error_message = Some(format!("Download failed: {}", e));
                        self.status_message = None;
                    }
                }
                Command::none()
            }

            BrowserMessage::OpenLastDownload => {
                if let Some(path) = &self.last_download {
                    if let Err(e) = open::that(path) {
                        self.error_message = Some(format!("Could not open {:?}: {}", path, e));
                    }
                }
                Command::none()
            }
        }
    }

    fn is_current_selection(&self, file_name: &str) -> bool {
        self.selected
            .as_ref()
            .map(|f| f.file_name == file_name)
            .unwrap_or(false)
    }

    pub fn view(&self) -> Element<'_, BrowserMessage> {
        row![self.view_file_list(), self.view_preview_pane()]
            .spacing(8)
            .height(Length::Fill)
            .into()
    }

    fn view_file_list(&self) -> Element<'_, BrowserMessage> {
        let header = row![
            text(format!("{} files", self.files.len()))
                .size(12)
                .width(Length::Fill),
            button(text("Reload").size(12))
                .on_press(BrowserMessage::Reload)
                .padding([2, 8]),
        ]
        .align_items(iced::Alignment::Center)
        .padding(5);

        let list: Element<'_, BrowserMessage> = if self.files.is_empty() {
            if self.loading {
                text("Loading...").size(14).into()
            } else if self.error_message.is_some() {
                text("File list unavailable - Reload to retry").size(14).into()
            } else {
                text("No files on server").size(14).into()
            }
        } else {
            let mut items: Vec<Element<'_, BrowserMessage>> = Vec::new();

            for (i, file) in self.files.iter().enumerate() {
                if i > 0 {
                    items.push(horizontal_rule(1).into());
                }

                let is_selected = self
                    .selected
                    .as_ref()
                    .map(|s| s.file_name == file.file_name)
                    .unwrap_or(false);
                let name_label = if is_selected {
                    format!("> {}", file.file_name)
                } else {
                    file.file_name.clone()
                };

                items.push(
                    row![
                        button(text(name_label).size(14))
                            .on_press(BrowserMessage::FileSelected(file.clone()))
                            .padding([4, 6])
                            .width(Length::Fill)
                            .style(iced::theme::Button::Text),
                        text(file.file_type.to_uppercase())
                            .size(10)
                            .width(Length::Fixed(44.0)),
                        text(file_type::format_size(file.file_size))
                            .size(10)
                            .width(Length::Fixed(80.0)),
                        button(text("Download").size(10))
                            .on_press(BrowserMessage::DownloadFile(file.file_name.clone()))
                            .padding([2, 6]),
                    ]
                    .spacing(4)
                    .align_items(iced::Alignment::Center)
                    .into(),
                );
            }

            scrollable(Column::with_children(items).width(Length::Fill))
                .height(Length::Fill)
                .into()
        };

        container(column![header, horizontal_rule(1), list].spacing(4))
            .width(Length::FillPortion(1))
            .height(Length::Fill)
            .padding(5)
            .into()
    }

    fn view_preview_pane(&self) -> Element<'_, BrowserMessage> {
        let body: Element<'_, BrowserMessage> = match &self.preview {
            Some(ContentPreview::Text {
                file_name,
                content,
                line_count,
            }) => column![
                text(format!("{} ({} lines)", file_name, line_count)).size(12),
                horizontal_rule(1),
                scrollable(text(content).size(13)).height(Length::Fill),
            ]
            .spacing(4)
            .into(),

            Some(ContentPreview::Image {
                file_name,
                data,
                width,
                height,
            }) => {
                let handle = iced::widget::image::Handle::from_memory(data.clone());
                column![
                    text(format!("{} ({}x{})", file_name, width, height)).size(12),
                    horizontal_rule(1),
                    scrollable(iced::widget::image(handle).width(Length::Fill))
                        .height(Length::Fill),
                ]
                .spacing(4)
                .into()
            }

            Some(ContentPreview::Unsupported {
                file_name,
                file_type,
                size,
            }) => column![
                text(file_name.as_str()).size(12),
                horizontal_rule(1),
                text(format!(
                    "No inline preview for .{} files ({})",
                    file_type.to_lowercase(),
                    file_type::format_size(*size)
                ))
                .size(13),
                text("Use Download to save a copy").size(13),
            ]
            .spacing(6)
            .into(),

            None if self.loading && self.selected.is_some() => {
                text("Loading preview...").size(14).into()
            }
            None => text("Select a file to preview it").size(14).into(),
        };

        let mut status_row = row![].spacing(8).align_items(iced::Alignment::Center);
        if let Some(err) = &self.error_message {
            status_row = status_row.push(text(err).size(12));
        } else if let Some(msg) = &self.status_message {
            status_row = status_row.push(text(msg).size(12));
        }
        if self.last_download.is_some() {
            status_row = status_row.push(Space::with_width(Length::Fill));
            status_row = status_row.push(
                button(text("Open last download").size(10))
                    .on_press(BrowserMessage::OpenLastDownload)
                    .padding([2, 6]),
            );
        }

        container(column![body, horizontal_rule(1), status_row].spacing(4))
            .width(Length::FillPortion(1))
            .height(Length::Fill)
            .padding(5)
            .into()
    }
}

async fn load_binary_preview(
    client: DirectoryClient,
    file_name: String,
    file_type: String,
    kind: FileKind,
) -> (String, Result<ContentPreview, String>) {
    let result = match client.fetch_view_bytes(&file_name).await {
        Ok(data) => preview::binary_preview(kind, file_name.clone(), file_type, data).await,
        Err(e) => Err(e.to_string()),
    };
    (file_name, result)
}

async fn download_to_dir(
    client: DirectoryClient,
    file_name: String,
    dir: PathBuf,
) -> Result<(String, PathBuf), String> {
    let data = client
        .fetch_download_bytes(&file_name)
        .await
        .map_err(|e| e.to_string())?;

    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| format!("Failed to create {:?}: {}", dir, e))?;

    let out_path = dir.join(&file_name);
    tokio::fs::write(&out_path, &data)
        .await
        .map_err(|e| format!("Failed to write {:?}: {}", out_path, e))?;

    // The fetched buffer is dropped at return; nothing retains it after
    // the save completes.
    Ok((file_name, out_path))
}
