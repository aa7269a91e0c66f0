//! Demo lifecycle and application event loop.
//!
//! A [`Demo`] is one step of the tutorial sequence: it builds its GPU resources
//! once, reacts to input, updates its state every frame and records its draw
//! calls into the frame's render pass. [`run`] owns everything around it: the
//! window, the GPU context, the frame clock and teardown.
//!
//! # Lifecycle
//!
//! 1. The window and [`Context`] are created, then the [`DemoConstructor`] runs
//! 2. `on_init` is called once with mutable access to the context
//! 3. Keyboard events update [`Context::actions`], then `on_window_events` sees them
//! 4. Every frame: `on_update(dt)`, clear colour + depth, `on_render`, present
//! 5. Window close or Escape ends the loop; all resources drop with the app
//!
//! Any error while setting up ends the loop and is returned from [`run`].

use std::{fmt::Debug, iter, pin::Pin, sync::Arc};

use anyhow::Context as _;
use instant::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

#[cfg(feature = "integration-tests")]
use crate::capture::FrameCapture;
#[cfg(feature = "integration-tests")]
pub use crate::capture::ImageTestResult;
use crate::{
    config::DemoConfig,
    context::{Context, InitContext},
};

/// One demo program.
pub trait Demo {
    /// Configure the context once before the first frame, e.g. the clear colour.
    fn on_init(&mut self, _ctx: &mut Context) {}

    /// Window events (keyboard, resizing, ...). Movement keys are already applied to
    /// [`Context::actions`] when this is called.
    fn on_window_events(&mut self, _ctx: &Context, _event: &WindowEvent) {}

    /// Called every frame with the time the previous frame took.
    fn on_update(&mut self, ctx: &Context, dt: Duration);

    /// Record draw calls. The pass is already cleared and has the depth buffer attached.
    fn on_render(&self, ctx: &Context, render_pass: &mut wgpu::RenderPass<'_>);

    /// Inspect a rendered frame. The loop exits once this returns `Passed`.
    #[cfg(feature = "integration-tests")]
    fn validate_frame(
        &mut self,
        _ctx: &Context,
        _frame: &image::RgbaImage,
    ) -> anyhow::Result<ImageTestResult> {
        Ok(ImageTestResult::Passed)
    }
}

impl Debug for dyn Demo + 'static {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Demo")
    }
}

/// Asynchronous factory that loads a demo's resources.
pub type DemoConstructor =
    Box<dyn FnOnce(InitContext) -> Pin<Box<dyn Future<Output = anyhow::Result<Box<dyn Demo>>>>>>;

/// Wrap an async closure into a [`DemoConstructor`].
pub fn constructor<F, Fut, D>(f: F) -> DemoConstructor
where
    F: FnOnce(InitContext) -> Fut + 'static,
    Fut: Future<Output = anyhow::Result<D>> + 'static,
    D: Demo + 'static,
{
    Box::new(move |ctx| {
        Box::pin(async move {
            let demo: Box<dyn Demo> = Box::new(f(ctx).await?);
            Ok(demo)
        })
    })
}

enum FrameOutcome {
    Presented,
    /// No surface texture this frame (timeout, occluded window).
    Skipped,
    /// The surface must be configured again before the next frame.
    Reconfigure,
    #[cfg(feature = "integration-tests")]
    Validated(ImageTestResult),
}

/// GPU context plus the demo drawing into it.
#[derive(Debug)]
pub struct AppState {
    pub(crate) ctx: Context,
    demo: Box<dyn Demo>,
    is_surface_configured: bool,
}

impl AppState {
    async fn new(
        window: Arc<Window>,
        settings: DemoConfig,
        constructor: DemoConstructor,
    ) -> anyhow::Result<Self> {
        let mut ctx = Context::new(window, settings)
            .await
            .context("Cannot create the main context")?;
        let size = ctx.window.inner_size();
        let is_surface_configured = ctx.resize(size.width, size.height);

        let mut demo = constructor((&ctx).into())
            .await
            .context("Demo initialization failed")?;
        demo.on_init(&mut ctx);

        Ok(Self {
            ctx,
            demo,
            is_surface_configured,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.ctx.resize(width, height) {
            self.is_surface_configured = true;
        }
    }

    #[allow(unused_variables)]
    fn render(
        &mut self,
        async_runtime: &tokio::runtime::Runtime,
    ) -> FrameOutcome {
        // keep the loop spinning
        self.ctx.window.request_redraw();

        if !self.is_surface_configured {
            return FrameOutcome::Skipped;
        }

        let (output, suboptimal) = match self.ctx.surface.get_current_texture() {
            wgpu::CurrentSurfaceTexture::Success(output) => (output, false),
            // draw this one, reconfigure before the next
            wgpu::CurrentSurfaceTexture::Suboptimal(output) => (output, true),
            wgpu::CurrentSurfaceTexture::Timeout | wgpu::CurrentSurfaceTexture::Occluded => {
                return FrameOutcome::Skipped;
            }
            wgpu::CurrentSurfaceTexture::Outdated | wgpu::CurrentSurfaceTexture::Lost => {
                return FrameOutcome::Reconfigure;
            }
            wgpu::CurrentSurfaceTexture::Validation => {
                log::error!("Unable to acquire the next surface texture");
                return FrameOutcome::Skipped;
            }
        };
        #[cfg(not(feature = "integration-tests"))]
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        #[cfg(feature = "integration-tests")]
        let capture = FrameCapture::new(
            &self.ctx.device,
            self.ctx.config.format,
            self.ctx.config.width,
            self.ctx.config.height,
        );
        #[cfg(feature = "integration-tests")]
        let view = capture.view();

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
                multiview_mask: None,
            });

            self.demo.on_render(&self.ctx, &mut render_pass);
        }

        #[cfg(feature = "integration-tests")]
        capture.copy_to_buffer(&mut encoder);

        self.ctx.queue.submit(iter::once(encoder.finish()));

        #[cfg(feature = "integration-tests")]
        let outcome = {
            let result = capture
                .read(async_runtime, &self.ctx.device)
                .and_then(|frame| self.demo.validate_frame(&self.ctx, &frame));
            FrameOutcome::Validated(match result {
                Ok(result) => result,
                Err(e) => {
                    log::error!("Frame validation failed: {e:#}");
                    ImageTestResult::Failed
                }
            })
        };
        #[cfg(not(feature = "integration-tests"))]
        let outcome = FrameOutcome::Presented;

        output.present();
        if suboptimal {
            self.ctx.surface.configure(&self.ctx.device, &self.ctx.config);
        }
        outcome
    }
}

pub struct App {
    async_runtime: tokio::runtime::Runtime,
    settings: DemoConfig,
    state: Option<AppState>,
    // taken on the first `resumed`
    constructor: Option<DemoConstructor>,
    failure: Option<anyhow::Error>,
    last_time: Instant,
}

impl App {
    fn new(settings: DemoConfig, constructor: DemoConstructor) -> anyhow::Result<Self> {
        let async_runtime =
            tokio::runtime::Runtime::new().context("Cannot start the async runtime")?;
        Ok(Self {
            async_runtime,
            settings,
            state: None,
            constructor: Some(constructor),
            failure: None,
            last_time: Instant::now(),
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.failure = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(constructor) = self.constructor.take() else {
            return;
        };

        let window_attributes = Window::default_attributes()
            .with_title(self.settings.window.title.clone())
            .with_inner_size(PhysicalSize::new(
                self.settings.window.width,
                self.settings.window.height,
            ))
            .with_resizable(false);

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.fail(event_loop, anyhow::Error::new(e).context("Cannot create the window"));
                return;
            }
        };

        let init = AppState::new(window, self.settings.clone(), constructor);
        match self.async_runtime.block_on(init) {
            Ok(state) => {
                self.state = Some(state);
                self.last_time = Instant::now();
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        if let WindowEvent::KeyboardInput { event: key, .. } = &event {
            if key.physical_key == PhysicalKey::Code(KeyCode::Escape) && key.state.is_pressed() {
                event_loop.exit();
                return;
            }
            state.ctx.actions.handle_key(key);
        }

        state.demo.on_window_events(&state.ctx, &event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                let dt: Duration = self.last_time.elapsed();
                self.last_time = Instant::now();

                state.demo.on_update(&state.ctx, dt);

                match state.render(&self.async_runtime) {
                    FrameOutcome::Presented | FrameOutcome::Skipped => {}
                    FrameOutcome::Reconfigure => {
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    #[cfg(feature = "integration-tests")]
                    FrameOutcome::Validated(result) => match result {
                        ImageTestResult::Passed => event_loop.exit(),
                        ImageTestResult::Waiting => {}
                        ImageTestResult::Failed => {
                            self.fail(event_loop, anyhow::anyhow!("Rendered frame did not match"))
                        }
                    },
                }
            }
            _ => {}
        }
    }
}

/// Load the configuration (see [`DemoConfig::discover`]) and run a demo until it quits.
pub fn run(constructor: DemoConstructor) -> anyhow::Result<()> {
    init_logger();
    let settings = DemoConfig::discover().inspect_err(|e| log::error!("{e}"))?;
    run_with(settings, constructor)
}

/// Run a demo with an explicit configuration.
pub fn run_with(settings: DemoConfig, constructor: DemoConstructor) -> anyhow::Result<()> {
    init_logger();

    #[cfg(all(feature = "integration-tests", target_os = "linux"))]
    let event_loop: EventLoop<()> = {
        use winit::platform::wayland::EventLoopBuilderExtWayland;

        EventLoop::with_user_event().with_any_thread(true).build()?
    };

    #[cfg(all(feature = "integration-tests", target_os = "windows"))]
    let event_loop: EventLoop<()> = {
        use winit::platform::windows::EventLoopBuilderExtWindows;

        EventLoop::with_user_event().with_any_thread(true).build()?
    };

    #[cfg(not(all(
        feature = "integration-tests",
        any(target_os = "linux", target_os = "windows")
    )))]
    let event_loop: EventLoop<()> = EventLoop::with_user_event().build()?;

    let mut app = App::new(settings, constructor)?;
    event_loop.run_app(&mut app)?;

    match app.failure.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn init_logger() {
    // a second call (e.g. `run` -> `run_with`) is expected to fail
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
