use std::sync::Arc;

use vello::wgpu;
use winit::{
  application::ApplicationHandler,
  dpi::LogicalSize,
  event::{KeyEvent, WindowEvent},
  event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
  keyboard::Key,
  window::{Window, WindowId},
};

use crate::{
  Error, Label, Plot, Result, ResultExt,
  render::{GpuHandle, Render, RenderConfig},
};

pub fn show(plot: &Plot) -> Result<()> {
  let event_loop = EventLoop::new()?;
  event_loop.set_control_flow(ControlFlow::Wait);

  let mut app = App { plot, stale: true, render: None, init: None, error: None };
  event_loop.run_app(&mut app)?;
  tracing::info!("viewer closed");

  let error = app.error.take();
  // Tearing down the surface after the loop has exited crashes on some drivers.
  std::mem::forget(app);

  match error {
    Some(e) => Err(e),
    None => Ok(()),
  }
}

struct App<'a> {
  plot:   &'a Plot<'a>,
  stale:  bool,
  render: Option<Render>,
  init:   Option<Init>,
  error:  Option<Error>,
}

struct Init {
  window:  Arc<Window>,
  surface: wgpu::Surface<'static>,
  config:  wgpu::SurfaceConfiguration,
  handle:  GpuHandle,

  blit:  wgpu::util::TextureBlitter,
  vello: vello::Renderer,
}

impl App<'_> {
  fn open(&mut self, event_loop: &ActiveEventLoop) -> Result<Init> {
    let title = self.plot.title.as_ref().map_or("rosenplot", Label::display).to_string();
    let window = Arc::new(
      event_loop.create_window(
        Window::default_attributes()
          .with_title(title)
          .with_inner_size(LogicalSize::new(1000, 1000))
          .with_min_inner_size(LogicalSize::new(100, 100)),
      )?,
    );
    let size = window.inner_size();

    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
    let surface = instance.create_surface(window.clone())?;

    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
      compatible_surface: Some(&surface),
      ..Default::default()
    }))?;

    let surface_caps = surface.get_capabilities(&adapter);
    let surface_format = surface_caps
      .formats
      .iter()
      .copied()
      .find(|f| f.is_srgb())
      .or(surface_caps.formats.first().copied())
      .ok_or_else(|| Error::Gpu("surface has no supported formats".into()))?;

    let render_config = RenderConfig { width: size.width.max(1), height: size.height.max(1) };
    let handle = GpuHandle::new(&render_config, &adapter)?;

    let config = wgpu::SurfaceConfiguration {
      usage:                         wgpu::TextureUsages::RENDER_ATTACHMENT,
      format:                        surface_format,
      width:                         render_config.width,
      height:                        render_config.height,
      present_mode:                  wgpu::PresentMode::AutoVsync,
      alpha_mode:                    surface_caps.alpha_modes[0],
      view_formats:                  vec![],
      desired_maximum_frame_latency: 2,
    };
    surface.configure(&handle.device, &config);

    let vello = vello::Renderer::new(&handle.device, vello::RendererOptions::default())?;
    let blit = wgpu::util::TextureBlitter::new(&handle.device, config.format);

    tracing::info!(
      width = config.width,
      height = config.height,
      format = ?config.format,
      "viewer opened"
    );
    Ok(Init { window, surface, config, handle, blit, vello })
  }

  /// Re-encodes the scene if the plot or the window size changed since the
  /// last frame.
  fn draw(&mut self) -> Result<()> {
    let Some(init) = &mut self.init else { return Ok(()) };
    let render = self.render.get_or_insert_with(Render::new);

    if self.stale {
      self.stale = false;
      render.scene.reset();
      self.plot.draw(render, f64::from(init.config.width), f64::from(init.config.height))?;

      init.vello.render_to_texture(
        &init.handle.device,
        &init.handle.queue,
        &render.scene,
        &init.handle.view,
        &vello::RenderParams {
          base_color:          render.background,
          width:               init.config.width,
          height:              init.config.height,
          antialiasing_method: vello::AaConfig::Msaa16,
        },
      )?;
    }

    init.present()
  }
}

impl ApplicationHandler for App<'_> {
  fn resumed(&mut self, event_loop: &ActiveEventLoop) {
    if self.init.is_some() {
      return;
    }

    match self.open(event_loop) {
      Ok(init) => self.init = Some(init),
      Err(e) => {
        self.error = Some(e);
        event_loop.exit();
      }
    }
  }

  fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
    match event {
      WindowEvent::CloseRequested => {
        event_loop.exit();
      }

      WindowEvent::KeyboardInput {
        event: KeyEvent { logical_key: Key::Character(c), .. }, ..
      } if c == "q" => {
        event_loop.exit();
      }

      WindowEvent::Resized(new_size) => {
        if let Some(init) = &mut self.init {
          if new_size.width > 0 && new_size.height > 0 {
            init.config.width = new_size.width;
            init.config.height = new_size.height;
            init
              .handle
              .resize(&RenderConfig { width: init.config.width, height: init.config.height });
            init.surface.configure(&init.handle.device, &init.config);

            self.stale = true;
            init.window.request_redraw();
          }
        }
      }

      WindowEvent::RedrawRequested => {
        self.draw().log_err();
      }

      _ => (),
    }
  }
}

impl Init {
  fn present(&mut self) -> Result<()> {
    let frame = match self.surface.get_current_texture() {
      Ok(frame) => frame,
      Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
        self.surface.configure(&self.handle.device, &self.config);
        self.window.request_redraw();
        return Ok(());
      }
      Err(e) => return Err(Error::Gpu(format!("dropped frame: {e}"))),
    };

    let surface_view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

    let mut encoder = self
      .handle
      .device
      .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("Render Encoder") });

    self.blit.copy(&self.handle.device, &mut encoder, &self.handle.view, &surface_view);

    self.handle.queue.submit(std::iter::once(encoder.finish()));
    self.window.pre_present_notify();
    frame.present();
    Ok(())
  }
}
