use std::sync::Arc;

use egui::{Color32, Key, Rect, Sense, TextureHandle, TextureOptions};
use parking_lot::Mutex;

use crate::config::SessionConfig;
use crate::error::InkResult;
use crate::image_loader::load_image;
use crate::input::InputHandler;
use crate::session::{DrawingSession, Mode};
use crate::ticker::FrameTicker;

const CONFIG_KEY: &str = "inkpad_config";

/// Native host for a drawing session: routes egui pointer input into the
/// session and shows the raster as a texture. Draw ticks run on a
/// `FrameTicker`, not in the UI loop.
pub struct InkApp {
    config: SessionConfig,
    session: Arc<Mutex<DrawingSession>>,
    ticker: FrameTicker,
    input: InputHandler,
    texture: Option<TextureHandle>,
    texture_revision: Option<u64>,
    status: Option<String>,
}

impl InkApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> InkResult<Self> {
        let config = cc
            .storage
            .and_then(|storage| eframe::get_value::<SessionConfig>(storage, CONFIG_KEY))
            .filter(|config| match config.validate() {
                Ok(()) => true,
                Err(err) => {
                    log::warn!("Ignoring stored config: {}", err);
                    false
                }
            })
            .unwrap_or_default();

        Self::with_config(config)
    }

    pub fn with_config(config: SessionConfig) -> InkResult<Self> {
        let session = Arc::new(Mutex::new(DrawingSession::new(&config)?));
        let ticker = FrameTicker::for_session(Arc::clone(&session), config.tick_interval());

        Ok(Self {
            config,
            session,
            ticker,
            input: InputHandler::new(),
            texture: None,
            texture_revision: None,
            status: None,
        })
    }

    fn report<T>(&mut self, result: InkResult<T>) {
        if let Err(err) = result {
            log::warn!("{}", err);
            self.status = Some(err.to_string());
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let current = self.session.lock().mode();
            for mode in Mode::ALL {
                if ui.selectable_label(current == mode, mode.name()).clicked() && mode != current {
                    let result = self.session.lock().set_mode(mode);
                    if result.is_ok() {
                        self.config.mode = mode;
                    }
                    self.report(result);
                }
            }

            ui.separator();

            if egui::color_picker::color_edit_button_srgba(
                ui,
                &mut self.config.brush_color,
                egui::color_picker::Alpha::Opaque,
            )
            .changed()
            {
                self.session.lock().set_brush_color(self.config.brush_color);
            }

            if ui
                .add(egui::Slider::new(&mut self.config.brush_width, 1.0..=64.0).text("width"))
                .changed()
            {
                let result = self.session.lock().set_brush_width(self.config.brush_width);
                self.report(result);
            }

            ui.separator();

            let (can_undo, can_redo) = {
                let session = self.session.lock();
                (session.can_undo(), session.can_redo())
            };
            if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                let result = self.session.lock().undo();
                self.report(result);
            }
            if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                let result = self.session.lock().redo();
                self.report(result);
            }
            if ui.button("Fill").clicked() {
                let result = self.session.lock().fill_canvas(self.config.brush_color);
                self.report(result);
            }
            if ui.button("Clear").clicked() {
                let result = self.session.lock().clear_canvas();
                self.report(result);
            }

            if let Some(status) = &self.status {
                ui.separator();
                ui.colored_label(Color32::from_rgb(200, 60, 60), status);
            }
        });
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let (undo, redo) = ctx.input(|i| {
            let cmd = i.modifiers.command;
            let undo = cmd && !i.modifiers.shift && i.key_pressed(Key::Z);
            let redo = cmd && ((i.modifiers.shift && i.key_pressed(Key::Z)) || i.key_pressed(Key::Y));
            (undo, redo)
        });
        if undo {
            let result = self.session.lock().undo();
            self.report(result);
        }
        if redo {
            let result = self.session.lock().redo();
            self.report(result);
        }
    }

    /// Overlay any image files dropped on the window. Holding shift replaces
    /// the canvas instead.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let (dropped, replace) = ctx.input(|i| (i.raw.dropped_files.clone(), i.modifiers.shift));
        for file in dropped {
            let bytes = if let Some(bytes) = &file.bytes {
                bytes.to_vec()
            } else if let Some(path) = &file.path {
                match std::fs::read(path) {
                    Ok(bytes) => bytes,
                    Err(err) => {
                        log::error!("Failed to read image file: {}: {}", path.display(), err);
                        continue;
                    }
                }
            } else {
                log::warn!("Dropped file has no accessible data: {}", file.name);
                continue;
            };

            let result = futures::executor::block_on(load_image(bytes)).and_then(|image| {
                let mut session = self.session.lock();
                if replace {
                    session.replace_image(&image)
                } else {
                    session.draw_image(&image, egui::Pos2::ZERO)
                }
            });
            self.report(result);
        }
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        let [width, height] = self.raster_size();
        let available = ui.available_size();
        let scale = (available.x / width as f32).min(available.y / height as f32).max(0.01);
        let size = egui::vec2(width as f32 * scale, height as f32 * scale);

        let (response, painter) = ui.allocate_painter(size, Sense::drag());

        for event in self.input.process(&response, [width, height]) {
            let result = self.session.lock().handle_input(event);
            self.report(result);
        }

        {
            let session = self.session.lock();
            if self.texture_revision != Some(session.revision()) || self.texture.is_none() {
                let image = session.raster().to_color_image();
                match &mut self.texture {
                    Some(texture) => texture.set(image, TextureOptions::NEAREST),
                    None => {
                        self.texture = Some(ui.ctx().load_texture("inkpad-canvas", image, TextureOptions::NEAREST));
                    }
                }
                self.texture_revision = Some(session.revision());
            }
        }

        painter.rect_filled(response.rect, 0.0, Color32::WHITE);
        if let Some(texture) = &self.texture {
            painter.image(
                texture.id(),
                response.rect,
                Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }
    }

    fn raster_size(&self) -> [usize; 2] {
        self.session.lock().raster().size()
    }
}

impl eframe::App for InkApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, CONFIG_KEY, &self.config);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);
        self.handle_dropped_files(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.toolbar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.canvas(ui);
        });

        // The ticker draws in the background; keep the texture current
        if self.ticker.is_running() {
            ctx.request_repaint_after(self.config.tick_interval());
        }
    }
}
