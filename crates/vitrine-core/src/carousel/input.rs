// src/carousel/input.rs
//! Carousel input events and the queue that carries them to the UI loop.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embedded_graphics::prelude::Size;
use log::warn;

use crate::ui::TouchEvent;

/// Queue depth for pending carousel input
pub const INPUT_CHANNEL_CAPACITY: usize = 16;

/// Everything that can drive the carousel from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselInput {
    /// Previous button clicked
    PrevButton,
    /// Next button clicked
    NextButton,
    /// Indicator for the given slide clicked
    Indicator(usize),
    /// Raw touch event over the slide area
    Touch(TouchEvent),
    /// Pointer entered the carousel region
    PointerEnter,
    /// Pointer left the carousel region
    PointerLeave,
    /// Page visibility flipped
    VisibilityChanged { visible: bool },
    /// Container was resized
    Resized(Size),
    /// Explicit pause request
    Pause,
    /// Explicit resume request
    Resume,
}

pub type InputChannel<M> = Channel<M, CarouselInput, INPUT_CHANNEL_CAPACITY>;
pub type InputSender<'a, M> = Sender<'a, M, CarouselInput, INPUT_CHANNEL_CAPACITY>;
pub type InputReceiver<'a, M> = Receiver<'a, M, CarouselInput, INPUT_CHANNEL_CAPACITY>;

/// Queue `input` without blocking the producer.
///
/// Returns `false` when the queue was full and the input was dropped.
pub fn submit<M: RawMutex>(sender: &InputSender<'_, M>, input: CarouselInput) -> bool {
    match sender.try_send(input) {
        Ok(()) => true,
        Err(_) => {
            warn!("Carousel input queue full, dropping {:?}", input);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::TouchPoint;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    #[test]
    fn test_inputs_arrive_in_order() {
        let channel: InputChannel<NoopRawMutex> = Channel::new();
        let sender = channel.sender();
        let receiver = channel.receiver();

        assert!(submit(&sender, CarouselInput::NextButton));
        assert!(submit(
            &sender,
            CarouselInput::Touch(TouchEvent::Press(TouchPoint::new(10, 20)))
        ));
        assert!(submit(&sender, CarouselInput::Indicator(3)));

        assert_eq!(receiver.try_receive().ok(), Some(CarouselInput::NextButton));
        assert_eq!(
            receiver.try_receive().ok(),
            Some(CarouselInput::Touch(TouchEvent::Press(TouchPoint::new(
                10, 20
            ))))
        );
        assert_eq!(receiver.try_receive().ok(), Some(CarouselInput::Indicator(3)));
        assert!(receiver.try_receive().is_err());
    }

    #[test]
    fn test_full_queue_drops_input() {
        let channel: InputChannel<NoopRawMutex> = Channel::new();
        let sender = channel.sender();

        for _ in 0..INPUT_CHANNEL_CAPACITY {
            assert!(submit(&sender, CarouselInput::Pause));
        }
        assert!(!submit(&sender, CarouselInput::Resume));
        assert_eq!(channel.len(), INPUT_CHANNEL_CAPACITY);
    }
}
