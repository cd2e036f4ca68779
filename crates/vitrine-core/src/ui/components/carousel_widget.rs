// src/ui/components/carousel_widget.rs
//! Carousel rendered with embedded-graphics
//!
//! Layout, top to bottom:
//!
//! ```text
//! ┌────────────────────────────┐
//! │                     2 / 5  │
//! │         slide area         │
//! │                            │
//! ├──┬──────────────────────┬──┤
//! │< │      ○ ● ○ ○ ○       │ >│  footer
//! └──┴──────────────────────┴──┘
//! ```
//!
//! The widget only stores what the engine wrote to it. Which slide is
//! current, when it moves and how far a drag has travelled are all decided
//! by [`SliderController`](crate::carousel::SliderController).

use core::fmt::Write;

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::{
    MonoTextStyle,
    ascii::{FONT_6X10, FONT_10X20},
};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle, Rectangle, RoundedRectangle};
use embedded_graphics::text::{Alignment as TextAlignment, Baseline, Text, TextStyleBuilder};
use log::warn;

use crate::carousel::{CarouselInput, CarouselView, NavAvailability, SlideVisual};
use crate::config::TransitionStyle;
use crate::geometry::GeometryProbe;
use crate::ui::core::{Drawable, TouchEvent, TouchPoint};
use crate::ui::styling::{ColorPalette, SLIDE_COLORS, blend};

/// Upper bound on slides a single widget can hold
pub const MAX_SLIDES: usize = 12;

const FOOTER_HEIGHT: u32 = 24;
const BUTTON_WIDTH: u32 = 12;
const INDICATOR_DIAMETER: u32 = 8;
const INDICATOR_SPACING: i32 = 14;
const CORNER_RADIUS: u32 = 6;

/// Content of one slide
#[derive(Debug, Clone, PartialEq)]
pub struct SlideCard {
    title: heapless::String<24>,
    color: Rgb565,
}

impl SlideCard {
    /// Create a card. Titles longer than the label capacity are cut.
    pub fn new(title: &str, color: Rgb565) -> Self {
        let mut label = heapless::String::new();
        for c in title.chars() {
            if label.push(c).is_err() {
                break;
            }
        }
        Self {
            title: label,
            color,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn color(&self) -> Rgb565 {
        self.color
    }
}

pub struct CarouselWidget {
    bounds: Rectangle,
    slides: heapless::Vec<SlideCard, MAX_SLIDES>,
    visuals: heapless::Vec<SlideVisual, MAX_SLIDES>,
    show_indicators: bool,
    active_indicator: Option<usize>,
    current: usize,
    total: usize,
    counter: heapless::String<16>,
    nav: NavAvailability,
    palette: ColorPalette,
    writes: usize,
    dirty: bool,
}

impl CarouselWidget {
    pub fn new(bounds: Rectangle) -> Self {
        Self {
            bounds,
            slides: heapless::Vec::new(),
            visuals: heapless::Vec::new(),
            show_indicators: true,
            active_indicator: None,
            current: 0,
            total: 0,
            counter: heapless::String::new(),
            nav: NavAvailability {
                prev: false,
                next: false,
            },
            palette: ColorPalette::default(),
            writes: 0,
            dirty: true,
        }
    }

    /// Append a slide. Slides beyond [`MAX_SLIDES`] are dropped.
    pub fn with_slide(mut self, title: &str, color: Rgb565) -> Self {
        self.push_slide(SlideCard::new(title, color));
        self
    }

    /// Append a slide using the next color of the default slide palette.
    pub fn with_titled_slide(self, title: &str) -> Self {
        let color = SLIDE_COLORS[self.slides.len() % SLIDE_COLORS.len()];
        self.with_slide(title, color)
    }

    pub fn with_indicators(mut self, show: bool) -> Self {
        self.show_indicators = show;
        self.dirty = true;
        self
    }

    pub fn push_slide(&mut self, card: SlideCard) -> bool {
        if self.slides.is_full() {
            warn!(" Carousel widget full; dropping slide {:?}", card.title());
            return false;
        }
        self.slides.push(card).ok();
        self.visuals.push(SlideVisual::Hidden).ok();
        self.dirty = true;
        true
    }

    pub fn slide(&self, index: usize) -> Option<&SlideCard> {
        self.slides.get(index)
    }

    pub fn slide_visual(&self, index: usize) -> Option<SlideVisual> {
        self.visuals.get(index).copied()
    }

    pub fn active_indicator(&self) -> Option<usize> {
        self.active_indicator
    }

    pub fn counter_label(&self) -> &str {
        &self.counter
    }

    pub fn nav(&self) -> NavAvailability {
        self.nav
    }

    /// Number of view writes received from the engine.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    pub fn slide_area(&self) -> Rectangle {
        let height = self.bounds.size.height.saturating_sub(FOOTER_HEIGHT);
        Rectangle::new(
            self.bounds.top_left,
            Size::new(self.bounds.size.width, height),
        )
    }

    fn footer(&self) -> Rectangle {
        let area = self.slide_area();
        Rectangle::new(
            area.top_left + Point::new(0, area.size.height as i32),
            Size::new(
                self.bounds.size.width,
                self.bounds.size.height - area.size.height,
            ),
        )
    }

    fn prev_button(&self) -> Rectangle {
        let footer = self.footer();
        Rectangle::new(
            footer.top_left,
            Size::new(BUTTON_WIDTH, footer.size.height),
        )
    }

    fn next_button(&self) -> Rectangle {
        let footer = self.footer();
        let x = footer.size.width.saturating_sub(BUTTON_WIDTH) as i32;
        Rectangle::new(
            footer.top_left + Point::new(x, 0),
            Size::new(BUTTON_WIDTH, footer.size.height),
        )
    }

    fn indicator_center(&self, index: usize) -> Point {
        let footer = self.footer().center();
        let count = self.indicator_count() as i32;
        let first = footer.x - (count * INDICATOR_SPACING) / 2 + INDICATOR_SPACING / 2;
        Point::new(first + index as i32 * INDICATOR_SPACING, footer.y)
    }

    /// Touch target of indicator `index`.
    pub fn indicator_bounds(&self, index: usize) -> Option<Rectangle> {
        if index >= self.indicator_count() {
            return None;
        }
        Some(Rectangle::with_center(
            self.indicator_center(index),
            Size::new(INDICATOR_SPACING as u32, FOOTER_HEIGHT),
        ))
    }

    // ------------------------------------------------------------------
    // Touch routing
    // ------------------------------------------------------------------

    /// Map a point on the footer to a button or indicator input.
    ///
    /// Disabled buttons do not produce an input.
    pub fn hit_test(&self, point: TouchPoint) -> Option<CarouselInput> {
        let p = point.to_point();
        if !self.footer().contains(p) {
            return None;
        }
        if self.prev_button().contains(p) {
            return self.nav.prev.then_some(CarouselInput::PrevButton);
        }
        if self.next_button().contains(p) {
            return self.nav.next.then_some(CarouselInput::NextButton);
        }
        (0..self.indicator_count())
            .find(|&index| {
                self.indicator_bounds(index)
                    .is_some_and(|bounds| bounds.contains(p))
            })
            .map(CarouselInput::Indicator)
    }

    /// Translate a raw touch event into carousel input.
    ///
    /// Presses on the footer become clicks, presses on the slide area start a
    /// gesture. Drags and releases are always forwarded so a swipe that
    /// leaves the widget still ends.
    pub fn route(&self, event: TouchEvent) -> Option<CarouselInput> {
        match event {
            TouchEvent::Press(point) => self.hit_test(point).or_else(|| {
                self.slide_area()
                    .contains(point.to_point())
                    .then_some(CarouselInput::Touch(event))
            }),
            TouchEvent::Drag(_) | TouchEvent::Release(_) => Some(CarouselInput::Touch(event)),
        }
    }

    // ------------------------------------------------------------------
    // Drawing
    // ------------------------------------------------------------------

    /// Horizontal offset and opacity of a slide in `visual`.
    fn placement(&self, visual: SlideVisual) -> Option<(i32, f32)> {
        let width = self.slide_area().size.width as f32;
        match visual {
            SlideVisual::Hidden => None,
            SlideVisual::Active => Some((0, 1.0)),
            SlideVisual::Dragged { offset_px } => Some((offset_px as i32, 1.0)),
            SlideVisual::Outgoing(motion) => match motion.style {
                TransitionStyle::Slide => {
                    let sign = motion.direction.exit_sign() as f32;
                    Some(((sign * motion.progress * width) as i32, 1.0))
                }
                TransitionStyle::Fade => Some((0, 1.0 - motion.progress)),
            },
            SlideVisual::Incoming(motion) => match motion.style {
                TransitionStyle::Slide => {
                    let sign = -motion.direction.exit_sign() as f32;
                    Some(((sign * (1.0 - motion.progress) * width) as i32, 1.0))
                }
                TransitionStyle::Fade => Some((0, motion.progress)),
            },
        }
    }

    /// Paint order: outgoing below resting below incoming.
    fn layer(visual: SlideVisual) -> u8 {
        match visual {
            SlideVisual::Outgoing(_) => 0,
            SlideVisual::Incoming(_) => 2,
            _ => 1,
        }
    }

    fn draw_slide<D: DrawTarget<Color = Rgb565>>(
        &self,
        target: &mut D,
        card: &SlideCard,
        offset: i32,
        opacity: f32,
    ) -> Result<(), D::Error> {
        let area = self.slide_area().translate(Point::new(offset, 0));
        let fill = blend(self.palette.background, card.color, opacity);
        let corner = Size::new(CORNER_RADIUS, CORNER_RADIUS);
        RoundedRectangle::with_equal_corners(area, corner)
            .into_styled(PrimitiveStyle::with_fill(fill))
            .draw(target)?;

        let text_color = blend(self.palette.background, self.palette.text_primary, opacity);
        let text_style = TextStyleBuilder::new()
            .alignment(TextAlignment::Center)
            .baseline(Baseline::Middle)
            .build();
        Text::with_text_style(
            card.title(),
            area.center(),
            MonoTextStyle::new(&FONT_10X20, text_color),
            text_style,
        )
        .draw(target)?;
        Ok(())
    }

    fn draw_counter<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let area = self.slide_area();
        let anchor = area.top_left + Point::new(area.size.width as i32 - 4, 10);
        Text::with_alignment(
            &self.counter,
            anchor,
            MonoTextStyle::new(&FONT_6X10, self.palette.text_primary),
            TextAlignment::Right,
        )
        .draw(display)?;
        Ok(())
    }

    fn draw_footer<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        self.footer()
            .into_styled(PrimitiveStyle::with_fill(self.palette.surface))
            .draw(display)?;

        for (label, bounds, enabled) in [
            ("<", self.prev_button(), self.nav.prev),
            (">", self.next_button(), self.nav.next),
        ] {
            let color = if enabled {
                self.palette.primary
            } else {
                self.palette.text_secondary
            };
            let text_style = TextStyleBuilder::new()
                .alignment(TextAlignment::Center)
                .baseline(Baseline::Middle)
                .build();
            Text::with_text_style(
                label,
                bounds.center(),
                MonoTextStyle::new(&FONT_6X10, color),
                text_style,
            )
            .draw(display)?;
        }

        for index in 0..self.indicator_count() {
            let dot = Circle::with_center(self.indicator_center(index), INDICATOR_DIAMETER);
            let style = if self.active_indicator == Some(index) {
                PrimitiveStyle::with_fill(self.palette.primary)
            } else {
                PrimitiveStyle::with_stroke(self.palette.border, 1)
            };
            dot.into_styled(style).draw(display)?;
        }
        Ok(())
    }

    fn rebuild_counter(&mut self) {
        self.counter.clear();
        write!(self.counter, "{} / {}", self.current, self.total).ok();
    }

    fn record_write(&mut self) {
        self.writes += 1;
        self.dirty = true;
    }
}

impl GeometryProbe for CarouselWidget {
    fn slide_count(&self) -> usize {
        self.slides.len()
    }

    fn container_size(&self) -> Size {
        self.slide_area().size
    }
}

impl CarouselView for CarouselWidget {
    fn apply_slide(&mut self, index: usize, visual: SlideVisual) {
        if let Some(slot) = self.visuals.get_mut(index) {
            *slot = visual;
            self.record_write();
        }
    }

    fn indicator_count(&self) -> usize {
        if self.show_indicators {
            self.slides.len()
        } else {
            0
        }
    }

    fn set_indicator_active(&mut self, index: usize, active: bool) {
        if active {
            self.active_indicator = Some(index);
        } else if self.active_indicator == Some(index) {
            self.active_indicator = None;
        }
        self.record_write();
    }

    fn set_counter(&mut self, current: usize) {
        self.current = current;
        self.rebuild_counter();
        self.record_write();
    }

    fn set_total(&mut self, total: usize) {
        self.total = total;
        self.rebuild_counter();
        self.record_write();
    }

    fn set_nav_availability(&mut self, nav: NavAvailability) {
        self.nav = nav;
        self.record_write();
    }

    fn relayout(&mut self, container: Size) {
        self.bounds = Rectangle::new(
            self.bounds.top_left,
            Size::new(container.width, container.height + FOOTER_HEIGHT),
        );
        self.record_write();
    }
}

impl Drawable for CarouselWidget {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        self.bounds
            .into_styled(PrimitiveStyle::with_fill(self.palette.background))
            .draw(display)?;

        let area = self.slide_area();
        {
            let mut clipped = display.clipped(&area);
            for layer in 0..3 {
                for (card, visual) in self.slides.iter().zip(self.visuals.iter()) {
                    if Self::layer(*visual) != layer {
                        continue;
                    }
                    if let Some((offset, opacity)) = self.placement(*visual) {
                        self.draw_slide(&mut clipped, card, offset, opacity)?;
                    }
                }
            }
        }

        self.draw_counter(display)?;
        self.draw_footer(display)?;
        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::SliderController;
    use crate::config::CarouselConfig;
    use embassy_time::Instant;
    use embedded_graphics::mock_display::MockDisplay;

    const RED: Rgb565 = Rgb565::new(31, 0, 0);
    const GREEN: Rgb565 = Rgb565::new(0, 63, 0);
    const BLUE: Rgb565 = Rgb565::new(0, 0, 31);

    fn widget() -> CarouselWidget {
        CarouselWidget::new(Rectangle::new(Point::zero(), Size::new(64, 64)))
            .with_slide("A", RED)
            .with_slide("B", GREEN)
            .with_slide("C", BLUE)
    }

    fn render(widget: &CarouselWidget) -> MockDisplay<Rgb565> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        display.set_allow_out_of_bounds_drawing(true);
        widget.draw(&mut display).unwrap();
        display
    }

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn test_geometry_excludes_footer() {
        let widget = widget();
        assert_eq!(widget.slide_count(), 3);
        assert_eq!(widget.container_size(), Size::new(64, 40));
    }

    #[test]
    fn test_renders_active_slide_and_indicator() {
        let carousel = SliderController::initialize(widget(), CarouselConfig::default(), at(0));
        let widget = carousel.view();
        assert_eq!(widget.counter_label(), "1 / 3");
        assert_eq!(widget.active_indicator(), Some(0));

        let display = render(widget);
        assert_eq!(display.get_pixel(Point::new(4, 20)), Some(RED));

        let palette = ColorPalette::default();
        let first = widget.indicator_center(0);
        let second = widget.indicator_center(1);
        assert_eq!(display.get_pixel(first), Some(palette.primary));
        assert_eq!(display.get_pixel(second), Some(palette.surface));
    }

    #[test]
    fn test_renders_slide_transition_midway() {
        let mut carousel =
            SliderController::initialize(widget(), CarouselConfig::default(), at(0));
        carousel.next(at(0)).unwrap();
        carousel.poll(at(250));

        let display = render(carousel.view());
        assert_eq!(display.get_pixel(Point::new(8, 20)), Some(RED));
        assert_eq!(display.get_pixel(Point::new(40, 20)), Some(GREEN));
    }

    #[test]
    fn test_renders_fade_transition() {
        let config = CarouselConfig::default().with_transition_style(TransitionStyle::Fade);
        let mut carousel = SliderController::initialize(widget(), config, at(0));
        carousel.next(at(0)).unwrap();
        carousel.poll(at(250));

        let display = render(carousel.view());
        let background = ColorPalette::default().background;
        assert_eq!(
            display.get_pixel(Point::new(4, 20)),
            Some(blend(background, GREEN, 0.5))
        );
    }

    #[test]
    fn test_counter_follows_transitions() {
        let mut carousel =
            SliderController::initialize(widget(), CarouselConfig::default(), at(0));
        carousel.go_to(2, at(0)).unwrap();
        carousel.poll(at(500));
        assert_eq!(carousel.view().counter_label(), "3 / 3");
        assert_eq!(carousel.view().active_indicator(), Some(2));
        assert_eq!(carousel.view().slide_visual(2), Some(SlideVisual::Active));
        assert_eq!(carousel.view().slide_visual(0), Some(SlideVisual::Hidden));
    }

    #[test]
    fn test_hit_test_buttons_and_indicators() {
        let carousel = SliderController::initialize(widget(), CarouselConfig::default(), at(0));
        let widget = carousel.view();

        assert_eq!(
            widget.hit_test(TouchPoint::new(2, 52)),
            Some(CarouselInput::PrevButton)
        );
        assert_eq!(
            widget.hit_test(TouchPoint::new(62, 52)),
            Some(CarouselInput::NextButton)
        );
        for index in 0..3 {
            let center = widget.indicator_center(index);
            let point = TouchPoint::new(center.x as u16, center.y as u16);
            assert_eq!(widget.hit_test(point), Some(CarouselInput::Indicator(index)));
        }
        assert_eq!(widget.hit_test(TouchPoint::new(10, 10)), None);
    }

    #[test]
    fn test_disabled_button_is_not_hit() {
        let config = CarouselConfig::default().with_loop(false);
        let carousel = SliderController::initialize(widget(), config, at(0));
        assert_eq!(carousel.view().hit_test(TouchPoint::new(2, 52)), None);
    }

    #[test]
    fn test_route_press_on_slide_starts_gesture() {
        let widget = widget();
        let press = TouchEvent::Press(TouchPoint::new(30, 20));
        assert_eq!(widget.route(press), Some(CarouselInput::Touch(press)));

        let release = TouchEvent::Release(TouchPoint::new(200, 200));
        assert_eq!(widget.route(release), Some(CarouselInput::Touch(release)));
    }

    #[test]
    fn test_hidden_indicators_are_absent() {
        let carousel = SliderController::initialize(
            widget().with_indicators(false),
            CarouselConfig::default(),
            at(0),
        );
        assert_eq!(carousel.view().indicator_count(), 0);
        assert_eq!(carousel.view().active_indicator(), None);
        assert_eq!(carousel.view().counter_label(), "1 / 3");
    }

    #[test]
    fn test_capacity_is_bounded() {
        let mut widget = CarouselWidget::new(Rectangle::new(Point::zero(), Size::new(64, 64)));
        for _ in 0..MAX_SLIDES {
            assert!(widget.push_slide(SlideCard::new("x", RED)));
        }
        assert!(!widget.push_slide(SlideCard::new("overflow", RED)));
        assert_eq!(widget.slide_count(), MAX_SLIDES);
    }

    #[test]
    fn test_writes_mark_dirty() {
        let mut carousel =
            SliderController::initialize(widget(), CarouselConfig::default(), at(0));
        carousel.view_mut().mark_clean();
        carousel.next(at(0)).unwrap();
        assert!(carousel.view().is_dirty());
        assert!(carousel.view().write_count() > 0);
    }

    #[test]
    fn test_long_title_is_truncated() {
        let card = SlideCard::new("An unusually long slide title here", RED);
        assert_eq!(card.title().len(), 24);
    }
}
