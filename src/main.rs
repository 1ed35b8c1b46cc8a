use std::time::Instant;
use std::io::{self, Write};

use winit::{
    event::*,
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

use dragspin::config::Config;
use dragspin::controller::RotationController;
use dragspin::delta::Delta;

fn main() {
    env_logger::init();

    let args = std::env::args().skip(1).collect::<Vec<String>>();
    let config = match Config::new(args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };
    println!("{config}");

    let mut controller = match RotationController::new(&config.controller) {
        Ok(controller) => controller,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("dragspin")
        .build(&event_loop)
        .unwrap();

    let mut delta = Delta::new();
    let mut stdout = io::stdout().lock();

    // Opens the window and starts processing events
    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match event {
            Event::NewEvents(StartCause::Poll) => {
                delta.update(Instant::now());
            }
            Event::WindowEvent { ref event, window_id, } if window_id == window.id() => {
                if !controller.process_event(event) {
                    match event {
                        WindowEvent::CloseRequested | WindowEvent::KeyboardInput {
                            input: KeyboardInput {
                                state: ElementState::Pressed,
                                virtual_keycode: Some(VirtualKeyCode::Escape),
                                ..
                            },
                            ..
                        } => {
                            *control_flow = ControlFlow::Exit;
                        }
                        _ => {}
                    }
                }
            }
            Event::MainEventsCleared => {
                let rotation = controller.current_rotation();
                stdout.write_fmt(
                    format_args!(
                        "\rframetime: {:?}  rotation: [{:+.4} {:+.4} {:+.4} {:+.4}]   ",
                        delta.frame_time(),
                        rotation.x,
                        rotation.y,
                        rotation.z,
                        rotation.w,
                    )
                ).unwrap();

                window.request_redraw();
            }
            _ => {},
        }
    });
}
