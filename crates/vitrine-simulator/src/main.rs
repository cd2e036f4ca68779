//! Desktop simulator for the vitrine slide carousel.
//!
//! Renders a vitrine-core [`CarouselWidget`] in an SDL2 window via
//! `embedded-graphics-simulator`. Mouse input is turned into touch events so
//! swipes, button clicks and indicator clicks can be exercised without a
//! touch panel.
//!
//! # Key bindings
//!
//! | Key      | Action                          |
//! |----------|---------------------------------|
//! | ← / →    | Previous / next button          |
//! | 1 - 9    | Indicator click                 |
//! | H        | Toggle pointer hover            |
//! | V        | Toggle page visibility          |
//! | P        | Toggle explicit pause           |
//! | R        | Destroy / reinitialize          |
//! | Q        | Quit                            |
//!
//! Mouse press, drag and release are forwarded as touch events.

use std::time::{Duration, Instant};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{error, info, warn};

use vitrine_core::carousel::{InputChannel, InputSender, submit};
use vitrine_core::ui::styling::COLOR_BACKGROUND;
use vitrine_core::ui::{CarouselWidget, Drawable, TouchEvent, TouchPoint};
use vitrine_core::{CarouselConfig, CarouselInput, Lifecycle, SliderController};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

const DISPLAY_WIDTH_PX: u32 = 320;
const DISPLAY_HEIGHT_PX: u32 = 240;

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 2;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Inputs produced by the SDL event pump, consumed by the carousel loop.
static INPUT_CHANNEL: InputChannel<CriticalSectionRawMutex> = Channel::new();

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Maps wall-clock time onto the engine's millisecond instants.
struct SimClock {
    started: Instant,
}

impl SimClock {
    fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    fn now(&self) -> embassy_time::Instant {
        embassy_time::Instant::from_millis(self.started.elapsed().as_millis() as u64)
    }
}

// ---------------------------------------------------------------------------
// Carousel setup
// ---------------------------------------------------------------------------

fn build_widget() -> CarouselWidget {
    let bounds = Rectangle::new(
        Point::zero(),
        Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX),
    );
    ["Welcome", "Projects", "Studio", "Team", "Contact"]
        .into_iter()
        .fold(CarouselWidget::new(bounds), |widget, title| {
            widget.with_titled_slide(title)
        })
}

/// Toggles driven from the keyboard.
#[derive(Default)]
struct KeyState {
    hovering: bool,
    hidden: bool,
    paused: bool,
}

/// Map an SDL keycode to a carousel input, updating the toggle state.
fn keycode_to_input(keycode: Keycode, keys: &mut KeyState) -> Option<CarouselInput> {
    let indicator = |index: usize| Some(CarouselInput::Indicator(index));
    match keycode {
        Keycode::Left => Some(CarouselInput::PrevButton),
        Keycode::Right => Some(CarouselInput::NextButton),
        Keycode::Num1 | Keycode::Kp1 => indicator(0),
        Keycode::Num2 | Keycode::Kp2 => indicator(1),
        Keycode::Num3 | Keycode::Kp3 => indicator(2),
        Keycode::Num4 | Keycode::Kp4 => indicator(3),
        Keycode::Num5 | Keycode::Kp5 => indicator(4),
        Keycode::Num6 | Keycode::Kp6 => indicator(5),
        Keycode::Num7 | Keycode::Kp7 => indicator(6),
        Keycode::Num8 | Keycode::Kp8 => indicator(7),
        Keycode::Num9 | Keycode::Kp9 => indicator(8),
        Keycode::H => {
            keys.hovering = !keys.hovering;
            Some(if keys.hovering {
                CarouselInput::PointerEnter
            } else {
                CarouselInput::PointerLeave
            })
        }
        Keycode::V => {
            keys.hidden = !keys.hidden;
            Some(CarouselInput::VisibilityChanged {
                visible: !keys.hidden,
            })
        }
        Keycode::P => {
            keys.paused = !keys.paused;
            Some(if keys.paused {
                CarouselInput::Pause
            } else {
                CarouselInput::Resume
            })
        }
        _ => None,
    }
}

fn touch_point(point: Point) -> TouchPoint {
    TouchPoint::new(point.x.max(0) as u16, point.y.max(0) as u16)
}

fn send_touch(
    widget: &CarouselWidget,
    sender: &InputSender<'_, CriticalSectionRawMutex>,
    event: TouchEvent,
) {
    if let Some(input) = widget.route(event) {
        submit(sender, input);
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting vitrine simulator");
    info!(
        "Display: {}×{} (scale {}×)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, WINDOW_SCALE
    );
    info!("Keys: ←/→=Prev/Next  1-9=Indicator  H=Hover  V=Visibility  P=Pause  R=Reset  Q=Quit");

    let mut display =
        SimulatorDisplay::<Rgb565>::new(Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Vitrine Simulator", &output_settings);

    let clock = SimClock::new();
    let sender = INPUT_CHANNEL.sender();
    let receiver = INPUT_CHANNEL.receiver();

    let config = CarouselConfig::default();
    let mut carousel = SliderController::initialize(build_widget(), config, clock.now());
    let mut keys = KeyState::default();
    let mut mouse_down = false;

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    display.clear(COLOR_BACKGROUND).ok();
    if let Err(e) = carousel.view().draw(&mut display) {
        error!("Draw error: {:?}", e);
    }
    carousel.view_mut().mark_clean();
    window.update(&display);

    // -----------------------------------------------------------------------
    // Main loop
    // -----------------------------------------------------------------------
    'running: loop {
        let frame_start = Instant::now();

        // --- SDL events ---------------------------------------------------
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown { keycode, .. } => {
                    if keycode == Keycode::Q || keycode == Keycode::Escape {
                        break 'running;
                    }

                    if keycode == Keycode::R {
                        if carousel.lifecycle() == Lifecycle::Destroyed {
                            match carousel.reinitialize(clock.now()) {
                                Ok(()) => info!("Carousel reinitialized"),
                                Err(e) => warn!("Reinitialize failed: {}", e),
                            }
                        } else {
                            carousel.destroy();
                        }
                        continue;
                    }

                    if let Some(input) = keycode_to_input(keycode, &mut keys) {
                        submit(&sender, input);
                    }
                }

                SimulatorEvent::MouseButtonDown { point, .. } => {
                    mouse_down = true;
                    send_touch(carousel.view(), &sender, TouchEvent::Press(touch_point(point)));
                }

                SimulatorEvent::MouseMove { point } if mouse_down => {
                    send_touch(carousel.view(), &sender, TouchEvent::Drag(touch_point(point)));
                }

                SimulatorEvent::MouseButtonUp { point, .. } => {
                    mouse_down = false;
                    send_touch(
                        carousel.view(),
                        &sender,
                        TouchEvent::Release(touch_point(point)),
                    );
                }

                _ => {}
            }
        }

        // --- Carousel tick ------------------------------------------------
        let now = clock.now();
        carousel.drain(&receiver, now);
        if let Some(done) = carousel.poll(now) {
            info!("Slide {} -> {}", done.from + 1, done.to + 1);
        }

        // --- Render -------------------------------------------------------
        if carousel.view().is_dirty() {
            display.clear(COLOR_BACKGROUND).ok();
            if let Err(e) = carousel.view().draw(&mut display) {
                error!("Draw error: {:?}", e);
            }
            carousel.view_mut().mark_clean();
        }

        window.update(&display);

        // --- Frame pacing -------------------------------------------------
        // Sleep a full frame while animating or dragging, otherwise wake at
        // the next carousel deadline if it comes sooner.
        let mut budget = FRAME_DURATION;
        if !carousel.is_animating() && !mouse_down {
            if let Some(deadline) = carousel.next_deadline() {
                let until = deadline.as_millis().saturating_sub(now.as_millis());
                budget = budget.min(Duration::from_millis(until));
            }
        }
        let elapsed = frame_start.elapsed();
        if elapsed < budget {
            std::thread::sleep(budget - elapsed);
        }
    }

    info!("Simulator exiting");
}
