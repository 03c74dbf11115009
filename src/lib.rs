#![warn(clippy::all, rust_2018_idioms)]

//! An image gallery: submit a picture by upload or URL with its author, browse
//! the thumbnails, and open any of them full-size with the author's details.

mod app;
pub mod contact;
pub mod data_url;
pub mod error;
pub mod file_picker;
pub mod form;
pub mod gallery;
pub mod image_uri;
pub mod notice;
pub mod overlay;
pub mod submit;
pub mod task;

pub use app::GalleryApp;

#[cfg(not(target_arch = "wasm32"))]
use eframe::NativeOptions;

#[cfg(target_os = "android")]
use egui_winit::winit;

pub const APP_NAME: &str = "Image Gallery";

impl GalleryApp {
    /// Run the app with provided `NativeOptions` (used by the desktop and Android entrypoints).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn run(options: NativeOptions) -> Result<(), eframe::Error> {
        eframe::run_native(
            APP_NAME,
            options,
            Box::new(|cc| Ok(Box::new(GalleryApp::new(cc)))),
        )
    }
}

#[cfg(target_os = "android")]
#[allow(unsafe_code)]
#[unsafe(no_mangle)]
pub extern "C" fn android_main(app: winit::platform::android::activity::AndroidApp) {
    use eframe::Renderer;

    android_logger::init_once(
        android_logger::Config::default().with_max_level(log::LevelFilter::Info),
    );

    let options = NativeOptions {
        android_app: Some(app),
        renderer: Renderer::Wgpu,
        ..Default::default()
    };

    if let Err(err) = GalleryApp::run(options) {
        log::error!("{err}");
    }
}
