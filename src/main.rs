use house_tour::camera::Camera;
use house_tour::cli::Cli;
use house_tour::frame::FrameClock;
use house_tour::loaders::{spawn_painting_load, PaintingImage};
use house_tour::renderer::SceneRenderer;
use house_tour::scenes::create_house_scene;
use house_tour::tour::{Pose, TourController};

use clap::Parser;
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

struct App {
    cli: Cli,
    window: Option<Arc<Window>>,
    renderer: Option<SceneRenderer>,
    camera: Camera,
    tour: TourController,
    painting_rx: Option<Receiver<PaintingImage>>,
    clock: FrameClock,
}

impl App {
    fn new(cli: Cli) -> Self {
        let aspect = cli.width as f32 / cli.height as f32;
        Self {
            cli,
            window: None,
            renderer: None,
            camera: Camera::new(aspect),
            tour: TourController::new(),
            painting_rx: None,
            clock: FrameClock::new(),
        }
    }

    /// One animation step: the scripted tour owns the camera unless
    /// free-cam is on, and look rotation applies in either mode.
    fn update_camera(&mut self) {
        if self.cli.free_cam {
            self.camera.update_movement();
        } else {
            let pose = self.tour.tick(Pose::at(self.camera.position));
            self.camera.apply_pose(&pose);
        }
        self.camera.update_look();
    }

    fn poll_painting(&mut self) {
        let Some(rx) = &self.painting_rx else {
            return;
        };
        match rx.try_recv() {
            Ok(image) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.add_paintings(&image);
                }
                self.painting_rx = None;
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => {}
            // Load failed; the warning was already logged by the worker.
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                self.painting_rx = None;
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window = match event_loop.create_window(
                Window::default_attributes()
                    .with_title("House Tour")
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        self.cli.width,
                        self.cli.height,
                    )),
            ) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    eprintln!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            let scene = create_house_scene();
            let renderer = match pollster::block_on(SceneRenderer::new(window.clone(), &scene)) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Failed to initialize renderer: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            self.painting_rx = Some(spawn_painting_load(self.cli.painting.clone()));
            self.window = Some(window);
            self.renderer = Some(renderer);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => self.camera.process_keyboard(&event),
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(new_size);
                }
                self.camera.set_aspect(new_size.width, new_size.height);
            }
            WindowEvent::RedrawRequested => {
                if let Some(fps) = self.clock.tick() {
                    println!("FPS: {:.1}", fps);
                }

                self.update_camera();
                self.poll_painting();

                if let Some(renderer) = &mut self.renderer {
                    if let Err(e) = renderer.render(&self.camera) {
                        eprintln!("Render error: {}", e);
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let event_loop = EventLoop::new()?;
    let mut app = App::new(cli);

    println!("House Tour - Controls: Q/E to look around, Escape to quit");
    println!("            --free-cam enables WASD + Space/Shift flight");
    event_loop.run_app(&mut app)?;

    Ok(())
}
