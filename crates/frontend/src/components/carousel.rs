use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

/// Minimum horizontal travel, in pixels, for a touch gesture to count as a
/// swipe rather than a tap.
pub const SWIPE_THRESHOLD_PX: f64 = 50.0;

pub fn next_index(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (current + 1) % len
    }
}

pub fn prev_index(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (current + len - 1) % len
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    Next,
    Prev,
}

/// Classify a completed touch gesture from its horizontal delta
/// (end X minus start X). Short drags are taps and do nothing.
pub fn swipe_from_delta(delta_x: f64) -> Option<Swipe> {
    if delta_x <= -SWIPE_THRESHOLD_PX {
        Some(Swipe::Next)
    } else if delta_x >= SWIPE_THRESHOLD_PX {
        Some(Swipe::Prev)
    } else {
        None
    }
}

#[component]
pub fn Carousel(images: Vec<String>, auto_play: bool, interval_ms: u32) -> Element {
    // Blank entries come from sloppy gallery data and would render broken
    // image frames.
    let images: Vec<String> = images
        .into_iter()
        .filter(|s| !s.trim().is_empty())
        .collect();
    let len = images.len();

    let mut current = use_signal(|| 0usize);
    let mut touch_start_x = use_signal(|| None::<f64>);
    // Bumped on every manual navigation so the autoplay timer restarts its
    // countdown instead of advancing right after a user action.
    let mut autoplay_epoch = use_signal(|| 0u64);

    let _autoplay = use_resource(move || {
        let _epoch = *autoplay_epoch.read();
        async move {
            if !auto_play || len <= 1 {
                return;
            }
            loop {
                TimeoutFuture::new(interval_ms).await;
                let idx = *current.peek();
                current.set(next_index(idx, len));
            }
        }
    });

    if len == 0 {
        return rsx! {
            div { class: "carousel carousel-empty",
                p { "No images available" }
            }
        };
    }

    // The image list can shrink between renders when the selected model
    // changes; clamp rather than index out of bounds.
    let idx = if *current.read() >= len { 0 } else { *current.read() };

    rsx! {
        div {
            class: "carousel",
            ontouchstart: move |evt: Event<TouchData>| {
                if let Some(touch) = evt.touches().first() {
                    touch_start_x.set(Some(touch.client_coordinates().x));
                }
            },
            ontouchend: move |evt: Event<TouchData>| {
                let Some(start_x) = *touch_start_x.read() else { return };
                touch_start_x.set(None);
                let touches = evt.touches_changed();
                let Some(touch) = touches.first() else { return };
                let delta = touch.client_coordinates().x - start_x;
                match swipe_from_delta(delta) {
                    Some(Swipe::Next) => {
                        let idx = *current.peek();
                        current.set(next_index(idx, len));
                        autoplay_epoch += 1;
                    }
                    Some(Swipe::Prev) => {
                        let idx = *current.peek();
                        current.set(prev_index(idx, len));
                        autoplay_epoch += 1;
                    }
                    None => {}
                }
            },

            img {
                class: "carousel-image",
                src: "{images[idx]}",
                alt: "Gallery image {idx + 1} of {len}",
            }

            if len > 1 {
                button {
                    class: "carousel-arrow carousel-arrow-left",
                    onclick: move |_| {
                        let idx = *current.peek();
                        current.set(prev_index(idx, len));
                        autoplay_epoch += 1;
                    },
                    "\u{2039}"
                }
                button {
                    class: "carousel-arrow carousel-arrow-right",
                    onclick: move |_| {
                        let idx = *current.peek();
                        current.set(next_index(idx, len));
                        autoplay_epoch += 1;
                    },
                    "\u{203a}"
                }
                div { class: "carousel-dots",
                    for i in 0..len {
                        button {
                            class: if i == idx { "carousel-dot active" } else { "carousel-dot" },
                            onclick: move |_| {
                                current.set(i);
                                autoplay_epoch += 1;
                            },
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_index_wraps() {
        assert_eq!(next_index(0, 3), 1);
        assert_eq!(next_index(2, 3), 0);
    }

    #[test]
    fn test_prev_index_wraps() {
        assert_eq!(prev_index(1, 3), 0);
        assert_eq!(prev_index(0, 3), 2);
    }

    #[test]
    fn test_indices_with_empty_list() {
        assert_eq!(next_index(0, 0), 0);
        assert_eq!(prev_index(0, 0), 0);
    }

    #[test]
    fn test_single_image_stays_put() {
        assert_eq!(next_index(0, 1), 0);
        assert_eq!(prev_index(0, 1), 0);
    }

    #[test]
    fn test_swipe_left_advances() {
        assert_eq!(swipe_from_delta(-80.0), Some(Swipe::Next));
    }

    #[test]
    fn test_swipe_right_goes_back() {
        assert_eq!(swipe_from_delta(120.0), Some(Swipe::Prev));
    }

    #[test]
    fn test_short_drag_is_a_tap() {
        assert_eq!(swipe_from_delta(-49.9), None);
        assert_eq!(swipe_from_delta(0.0), None);
        assert_eq!(swipe_from_delta(49.9), None);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert_eq!(swipe_from_delta(-SWIPE_THRESHOLD_PX), Some(Swipe::Next));
        assert_eq!(swipe_from_delta(SWIPE_THRESHOLD_PX), Some(Swipe::Prev));
    }
}
