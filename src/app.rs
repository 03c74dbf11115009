use egui::Vec2;

use crate::contact::ContactForm;
use crate::file_picker::{self, PickError, PickedFile};
use crate::form::{InputPanel, Preview};
use crate::gallery::GalleryStore;
use crate::image_uri::ImageUris;
use crate::notice::{NoticeKind, Notices};
use crate::overlay::Overlay;
use crate::submit::{self, Submitted};
use crate::task::{BackgroundTask, TaskPoll};

const DEFAULT_THUMBNAIL_SIZE: f32 = 160.0;
const THUMBNAIL_RANGE: std::ops::RangeInclusive<f32> = 64.0..=320.0;
const PREVIEW_MAX_SIZE: Vec2 = Vec2::new(260.0, 200.0);
const OVERLAY_MAX_SIZE: Vec2 = Vec2::new(720.0, 540.0);

/// Only view preferences are persisted; the gallery and forms live for one session.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct GalleryApp {
    thumbnail_size: f32,
    show_contact_form: bool,

    #[serde(skip)]
    gallery: GalleryStore,

    #[serde(skip)]
    panel: InputPanel,

    #[serde(skip)]
    contact: ContactForm,

    #[serde(skip)]
    overlay: Overlay,

    #[serde(skip)]
    notices: Notices,

    // Decode for the file currently in the preview, tagged with its selection serial.
    #[serde(skip)]
    preview_task: Option<(u64, BackgroundTask<String>)>,

    // No guard against overlapping submissions: each gets its own task.
    #[serde(skip)]
    submissions: Vec<BackgroundTask<Submitted>>,

    #[serde(skip)]
    image_uris: ImageUris,

    // What each gallery entry is drawn from, in gallery order.
    #[serde(skip)]
    thumbnails: Vec<String>,

    // Bytes of the file in the preview, registered under its selection serial.
    #[serde(skip)]
    preview_uri: Option<(u64, String)>,

    #[serde(skip)]
    overlay_uri: String,
}

impl Default for GalleryApp {
    fn default() -> Self {
        Self {
            thumbnail_size: DEFAULT_THUMBNAIL_SIZE,
            show_contact_form: true,
            gallery: GalleryStore::default(),
            panel: InputPanel::default(),
            contact: ContactForm::default(),
            overlay: Overlay::default(),
            notices: Notices::default(),
            preview_task: None,
            submissions: Vec::new(),
            image_uris: ImageUris::default(),
            thumbnails: Vec::new(),
            preview_uri: None,
            overlay_uri: String::new(),
        }
    }
}

impl GalleryApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Load previous view preferences (if any).
        let mut this: Self = if let Some(storage) = cc.storage {
            eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default()
        } else {
            Default::default()
        };
        this.thumbnail_size = this
            .thumbnail_size
            .clamp(*THUMBNAIL_RANGE.start(), *THUMBNAIL_RANGE.end());

        // URLs go through the egui_extras http loader, uploads through bytes:// URIs.
        egui_extras::install_image_loaders(&cc.egui_ctx);

        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        this
    }

    fn poll_background(&mut self, ctx: &egui::Context) {
        if let Some(picked) = file_picker::take_picked_file() {
            self.accept_pick(ctx, picked);
        }
        self.poll_tasks(ctx);
    }

    fn accept_pick(&mut self, ctx: &egui::Context, picked: Result<PickedFile, PickError>) {
        match picked {
            Ok(file) => match self.panel.choose_file(file) {
                Ok(pending) => {
                    self.release_abandoned_preview(ctx);
                    let uri = self.image_uris.register(ctx, "preview", &pending.file);
                    self.preview_uri = Some((pending.serial, uri));
                    let task = BackgroundTask::spawn(
                        ctx,
                        "preview-decode",
                        submit::read_as_data_url(pending.file),
                    );
                    self.preview_task = Some((pending.serial, task));
                }
                Err(err) => {
                    self.preview_task = None;
                    self.release_abandoned_preview(ctx);
                    self.notices.error(&err);
                }
            },
            Err(err) => {
                log::error!("{err}");
                self.notices.error(&err);
            }
        }
    }

    fn poll_tasks(&mut self, ctx: &egui::Context) {

        let preview = self
            .preview_task
            .as_ref()
            .map(|(serial, task)| (*serial, task.poll()));
        match preview {
            None | Some((_, TaskPoll::Pending)) => {}
            Some((serial, TaskPoll::Ready(data_url))) => {
                log::debug!("preview #{serial} decoded");
                self.panel.file_decoded(serial, data_url);
                self.preview_task = None;
            }
            Some((serial, TaskPoll::Lost)) => {
                log::warn!("preview #{serial} decode ended without a result");
                self.preview_task = None;
            }
        }

        let mut finished = Vec::new();
        self.submissions.retain(|task| match task.poll() {
            TaskPoll::Pending => true,
            TaskPoll::Ready(submitted) => {
                finished.push(submitted);
                false
            }
            TaskPoll::Lost => {
                log::warn!("submission decode ended without a result");
                false
            }
        });
        for submitted in finished {
            self.append(ctx, submitted);
        }

        self.release_abandoned_preview(ctx);
    }

    fn append(&mut self, ctx: &egui::Context, submitted: Submitted) {
        let thumbnail = match &submitted.upload {
            Some(file) => self.image_uris.register(ctx, "gallery", file),
            None => submitted.entry.image_source.clone(),
        };
        let message = submit::complete(&mut self.gallery, &mut self.panel, submitted);
        self.thumbnails.push(thumbnail);
        self.notices.info(message);
    }

    /// Forgets the preview bytes once their file is no longer selected.
    fn release_abandoned_preview(&mut self, ctx: &egui::Context) {
        let selected = self.panel.selected_serial();
        let abandoned = self
            .preview_uri
            .take_if(|(serial, _)| Some(*serial) != selected);
        if let Some((serial, uri)) = abandoned {
            log::debug!("preview #{serial} abandoned");
            ImageUris::release(ctx, &uri);
        }
    }

    fn submit_image(&mut self, ctx: &egui::Context) {
        match submit::validate(self.panel.draft()) {
            Ok(valid) => {
                log::info!("submission accepted ({:?})", valid.kind());
                let task = BackgroundTask::spawn(ctx, "submit-decode", valid.resolve());
                self.submissions.push(task);
            }
            Err(err) => {
                log::info!("submission rejected: {err}");
                self.notices.error(&err);
            }
        }
    }

    fn image_form_ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("Add Your Image");
        ui.separator();

        egui::Grid::new("image_form").num_columns(2).show(ui, |ui| {
            ui.label("Author email:");
            ui.text_edit_singleline(&mut self.panel.author_email);
            ui.end_row();

            ui.label("Author name:");
            ui.text_edit_singleline(&mut self.panel.author_name);
            ui.end_row();

            ui.label("Image description:");
            ui.text_edit_singleline(&mut self.panel.alt_text);
            ui.end_row();

            ui.label("Upload:");
            ui.horizontal(|ui| {
                let button = egui::Button::new("Choose file…");
                if ui.add_enabled(file_picker::is_available(), button).clicked() {
                    file_picker::open_image_picker();
                }
                match self.panel.selected_file_name() {
                    Some(name) => {
                        ui.label(name);
                        if ui.small_button("✖").on_hover_text("Remove file").clicked() {
                            self.panel.clear_file();
                            self.preview_task = None;
                            self.release_abandoned_preview(ui.ctx());
                        }
                    }
                    None => {
                        ui.label("(no file)");
                    }
                }
            });
            ui.end_row();

            ui.label("…or image URL:");
            let mut url = self.panel.url().to_owned();
            let edit = egui::TextEdit::singleline(&mut url).hint_text("https://");
            if ui.add(edit).changed() {
                self.panel.set_url(url);
            }
            ui.end_row();
        });

        match self.panel.preview() {
            Preview::Hidden => {}
            Preview::Loading => {
                ui.spinner();
            }
            Preview::File { serial, .. } => match &self.preview_uri {
                Some((registered, uri)) if *registered == serial => {
                    ui.add(egui::Image::new(uri.as_str()).max_size(PREVIEW_MAX_SIZE));
                }
                _ => {
                    ui.spinner();
                }
            },
            Preview::Url(url) => {
                ui.add(egui::Image::new(url).max_size(PREVIEW_MAX_SIZE));
            }
        }

        if ui.button("Submit Image").clicked() {
            self.submit_image(ui.ctx());
        }
        if !self.submissions.is_empty() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(format!("Adding {} image(s)…", self.submissions.len()));
            });
        }
    }

    fn contact_form_ui(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Enter your data here")
            .default_open(false)
            .show(ui, |ui| {
                egui::Grid::new("contact_form").num_columns(2).show(ui, |ui| {
                    ui.label("Email:");
                    ui.text_edit_singleline(&mut self.contact.email);
                    ui.end_row();

                    ui.label("Name:");
                    ui.text_edit_singleline(&mut self.contact.name);
                    ui.end_row();

                    ui.label("Message:");
                    ui.text_edit_multiline(&mut self.contact.message);
                    ui.end_row();
                });
                if ui.button("Send").clicked() {
                    match self.contact.submit() {
                        Ok(summary) => self.notices.info(summary),
                        Err(err) => self.notices.error(&err),
                    }
                }
            });
    }

    fn gallery_ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("Gallery");
        ui.separator();

        if self.gallery.is_empty() {
            ui.label("No images yet. Add one with the form on the left.");
            return;
        }

        let size = Vec2::splat(self.thumbnail_size);
        let activated = egui::ScrollArea::vertical()
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    let mut activated = None;
                    for (entry, uri) in self.gallery.entries().zip(&self.thumbnails) {
                        let thumbnail = egui::Image::new(uri.as_str())
                            .max_size(size)
                            .sense(egui::Sense::click());
                        if ui.add(thumbnail).on_hover_text(entry.alt_text.as_str()).clicked() {
                            activated = Some((entry.image_source.clone(), uri.clone()));
                        }
                    }
                    activated
                })
                .inner
            })
            .inner;

        if let Some((source, uri)) = activated {
            self.overlay.open(&self.gallery, &source);
            self.overlay_uri = uri;
        }
    }

    fn overlay_ui(&mut self, ctx: &egui::Context) {
        let Some(view) = self.overlay.view() else {
            return;
        };

        let mut close = false;
        egui::Window::new("Image details")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                ui.add(egui::Image::new(self.overlay_uri.as_str()).max_size(OVERLAY_MAX_SIZE));
                ui.label(view.author_line.as_str());
                ui.label(view.email_line.as_str());
                close = ui.button("Close").clicked();
            });

        if close {
            self.overlay.dismiss();
        }
    }

    fn notice_ui(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.notices.current() else {
            return;
        };

        let response = egui::Modal::new(egui::Id::new("notice")).show(ctx, |ui| {
            match notice.kind {
                NoticeKind::Info => ui.label(notice.text.as_str()),
                NoticeKind::Error => ui.colored_label(egui::Color32::RED, notice.text.as_str()),
            };
            ui.add_space(8.0);
            ui.button("OK").clicked()
        });

        if response.inner || response.should_close() {
            self.notices.dismiss_current();
        }
    }
}

impl eframe::App for GalleryApp {
    /// Called by the framework to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_background(ctx);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                // NOTE: no File->Quit on web pages!
                let is_web = cfg!(target_arch = "wasm32");
                if !is_web {
                    ui.menu_button("File", |ui| {
                        if ui.button("Quit").clicked() {
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                }
                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_contact_form, "Contact form");
                    ui.add(
                        egui::Slider::new(&mut self.thumbnail_size, THUMBNAIL_RANGE)
                            .text("Thumbnail size"),
                    );
                });
                ui.add_space(16.0);

                egui::widgets::global_theme_preference_buttons(ui);
            });
        });

        egui::SidePanel::left("input_panel")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.image_form_ui(ui);
                    if self.show_contact_form {
                        ui.add_space(12.0);
                        self.contact_form_ui(ui);
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.gallery_ui(ui);

            ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
                egui::warn_if_debug_build(ui);
            });
        });

        self.overlay_ui(ctx);
        self.notice_ui(ctx);
    }
}
