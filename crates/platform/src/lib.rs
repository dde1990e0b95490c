//! Demo window: an inspector-style panel exercising the numeric fields.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::{thread, time::Duration};

use egui::{Context as EguiContext, Grid, viewport::ViewportId};
use egui_winit::State as EguiWinitState;
use egui_wgpu::{Renderer as EguiWgpuRenderer, ScreenDescriptor, wgpu};
use field_core::{FieldValue, NumericValue};
use widgets::{NumericTextbox, RadioRow};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    window::{Window, WindowId},
};

enum UserEvent {
    Tick,
}

/// Open the demo window and run until it is closed.
pub fn run() {
    let event_loop = EventLoop::<UserEvent>::with_user_event()
        .build()
        .expect("failed to create event loop");
    let proxy = event_loop.create_proxy();

    let mut app = DemoApp {
        window: None,
        proxy: Some(proxy),
        ticker_started: false,
        egui_ctx: None,
        egui_state: None,
        gpu: None,
        demo: DemoState::new(),
    };
    event_loop.run_app(&mut app).expect("event loop crashed");
}

/// The document-model side of the demo: the caller-owned field values and
/// whatever the numeric callbacks last reported.
struct DemoState {
    x: FieldValue,
    y: FieldValue,
    opacity: FieldValue,
    rotation: FieldValue,
    corner_radius: FieldValue,
    align: Option<usize>,
    locked: FieldValue,
    settled: BTreeMap<String, String>,
}

impl DemoState {
    fn new() -> Self {
        Self {
            x: FieldValue::new("24"),
            y: FieldValue::new("117.5"),
            opacity: FieldValue::new("100"),
            rotation: FieldValue::new("0"),
            // Several objects with differing corner radii are "selected".
            corner_radius: FieldValue::Mixed,
            align: Some(0),
            locked: FieldValue::new("8"),
            settled: BTreeMap::new(),
        }
    }

    fn ui(&mut self, ctx: &EguiContext) {
        egui::TopBottomPanel::top("title").show(ctx, |ui| {
            ui.label("fieldwork — numeric fields demo");
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let settled = &mut self.settled;
            let mut report = |name: Option<&str>, value: NumericValue| {
                let text = match value {
                    NumericValue::Value(n) => format!("{n}"),
                    NumericValue::Invalid => "—".to_string(),
                    NumericValue::Mixed => "mixed".to_string(),
                };
                settled.insert(name.unwrap_or("?").to_string(), text);
            };

            Grid::new("inspector").num_columns(2).show(ui, |ui| {
                ui.label("Position X");
                NumericTextbox::new(&mut self.x)
                    .name("x")
                    .icon("X")
                    .on_numeric_value_change(|v, name| report(name, v))
                    .show(ui);
                ui.end_row();

                ui.label("Position Y");
                NumericTextbox::new(&mut self.y)
                    .name("y")
                    .icon("Y")
                    .on_numeric_value_change(|v, name| report(name, v))
                    .show(ui);
                ui.end_row();

                ui.label("Opacity");
                NumericTextbox::new(&mut self.opacity)
                    .name("opacity")
                    .icon("%")
                    .minimum(0.0)
                    .maximum(100.0)
                    .on_numeric_value_change(|v, name| report(name, v))
                    .show(ui);
                ui.end_row();

                ui.label("Rotation");
                NumericTextbox::new(&mut self.rotation)
                    .name("rotation")
                    .icon("°")
                    .integer(true)
                    .increment_big(15.0)
                    .minimum(-180.0)
                    .maximum(180.0)
                    .on_numeric_value_change(|v, name| report(name, v))
                    .show(ui);
                ui.end_row();

                ui.label("Corner radius");
                NumericTextbox::new(&mut self.corner_radius)
                    .name("corner_radius")
                    .minimum(0.0)
                    .placeholder("0")
                    .on_numeric_value_change(|v, name| report(name, v))
                    .show(ui);
                ui.end_row();

                ui.label("Align");
                RadioRow::new(&mut self.align, &["Left", "Center", "Right"])
                    .name("align")
                    .show(ui);
                ui.end_row();

                ui.label("Locked value");
                NumericTextbox::new(&mut self.locked).disabled(true).show(ui);
                ui.end_row();
            });

            ui.separator();
            ui.label("Settled numeric values:");
            for (name, text) in &self.settled {
                ui.monospace(format!("{name}: {text}"));
            }
        });
    }
}

/// Everything the swapchain needs, created once the window exists.
struct Gpu {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: EguiWgpuRenderer,
}

impl Gpu {
    fn new(window: &Arc<Window>) -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(Arc::clone(window))
            .expect("create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            force_fallback_adapter: false,
            compatible_surface: Some(&surface),
        }))
        .expect("no suitable adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::default(),
        }))
        .expect("device");

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(caps.formats[0]);

        let size = window.inner_size();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 0,
        };
        surface.configure(&device, &config);

        let renderer = EguiWgpuRenderer::new(&device, format, None, 1, true);

        Self {
            surface,
            device,
            queue,
            config,
            renderer,
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
    }
}

struct DemoApp {
    window: Option<Arc<Window>>,
    proxy: Option<EventLoopProxy<UserEvent>>,
    ticker_started: bool,
    egui_ctx: Option<EguiContext>,
    egui_state: Option<EguiWinitState>,
    gpu: Option<Gpu>,
    demo: DemoState,
}

impl ApplicationHandler<UserEvent> for DemoApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window = event_loop
                .create_window(Window::default_attributes().with_title("fieldwork"))
                .expect("create window");
            self.window = Some(Arc::new(window));
        }
        let window = Arc::clone(self.window.as_ref().expect("window just created"));

        if !self.ticker_started {
            self.ticker_started = true;
            if let Some(proxy) = self.proxy.clone() {
                thread::spawn(move || {
                    let frame = Duration::from_millis(16); // ~60Hz
                    loop {
                        if proxy.send_event(UserEvent::Tick).is_err() {
                            break;
                        }
                        thread::sleep(frame);
                    }
                });
            }
        }

        if self.egui_ctx.is_none() {
            let ctx = EguiContext::default();
            let state = EguiWinitState::new(
                ctx.clone(),
                ViewportId::ROOT,
                &window,
                Some(window.scale_factor() as f32),
                None,
                None,
            );
            self.egui_ctx = Some(ctx);
            self.egui_state = Some(state);
        }

        if self.gpu.is_none() {
            self.gpu = Some(Gpu::new(&window));
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: UserEvent) {
        match event {
            UserEvent::Tick => {
                if let Some(window) = self.window.as_ref() {
                    window.request_redraw();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let (Some(window), Some(state)) = (self.window.as_ref(), self.egui_state.as_mut()) {
            let _response = state.on_window_event(window, &event);
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                let (Some(window), Some(ctx), Some(state), Some(gpu)) = (
                    self.window.as_ref(),
                    self.egui_ctx.as_ref(),
                    self.egui_state.as_mut(),
                    self.gpu.as_mut(),
                ) else {
                    return;
                };

                let frame = match gpu.surface.get_current_texture() {
                    Ok(frame) => frame,
                    Err(wgpu::SurfaceError::Lost) => {
                        // Common after display changes; reconfigure and try
                        // again next frame.
                        gpu.surface.configure(&gpu.device, &gpu.config);
                        return;
                    }
                    Err(wgpu::SurfaceError::Outdated) => return, // minimized / moved
                    Err(err) => {
                        eprintln!("surface error: {err:?}");
                        return;
                    }
                };
                let view = frame
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                let raw_input = state.take_egui_input(window);
                ctx.begin_pass(raw_input);
                self.demo.ui(ctx);
                let full_output = ctx.end_pass();
                state.handle_platform_output(window, full_output.platform_output);

                let clipped = ctx.tessellate(full_output.shapes, ctx.pixels_per_point());
                for (id, delta) in &full_output.textures_delta.set {
                    gpu.renderer
                        .update_texture(&gpu.device, &gpu.queue, *id, delta);
                }

                let mut encoder =
                    gpu.device
                        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                            label: Some("encoder"),
                        });
                let screen = ScreenDescriptor {
                    size_in_pixels: [gpu.config.width, gpu.config.height],
                    pixels_per_point: ctx.pixels_per_point(),
                };
                gpu.renderer
                    .update_buffers(&gpu.device, &gpu.queue, &mut encoder, &clipped, &screen);

                {
                    let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                        label: Some("egui rpass"),
                        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                                store: wgpu::StoreOp::Store,
                            },
                        })],
                        depth_stencil_attachment: None,
                        timestamp_writes: None,
                        occlusion_query_set: None,
                    });
                    gpu.renderer
                        .render(&mut rpass.forget_lifetime(), &clipped, &screen);
                }

                for id in full_output.textures_delta.free {
                    gpu.renderer.free_texture(&id);
                }

                gpu.queue.submit(Some(encoder.finish()));
                frame.present();
            }
            _ => {}
        }
    }
}
