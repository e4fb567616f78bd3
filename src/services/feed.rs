use serde::Serialize;

use crate::models::Product;

/// Horizontal drag distance that triggers navigation, in on-screen units
pub const DEFAULT_GESTURE_THRESHOLD: f64 = 100.0;

/// Direction of the last navigation, used only for transition sequencing
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    None,
    Forward,
    Backward,
}

/// What a swipe gesture asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Next,
    Previous,
    Ignored,
}

/// Cursor over a fixed sequence of products
///
/// The index never leaves `[0, len - 1]`. An empty sequence has no current
/// item; consumers render an empty state instead of treating it as an error.
#[derive(Debug, Clone)]
pub struct FeedNavigator {
    items: Vec<Product>,
    index: usize,
    direction: Direction,
    liked: bool,
    gesture_threshold: f64,
}

impl FeedNavigator {
    pub fn new(items: Vec<Product>) -> Self {
        Self::with_gesture_threshold(items, DEFAULT_GESTURE_THRESHOLD)
    }

    pub fn with_gesture_threshold(items: Vec<Product>, gesture_threshold: f64) -> Self {
        Self {
            items,
            index: 0,
            direction: Direction::None,
            liked: false,
            gesture_threshold: gesture_threshold.abs(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Current position, `None` for an empty feed
    pub fn index(&self) -> Option<usize> {
        (!self.items.is_empty()).then_some(self.index)
    }

    pub fn current(&self) -> Option<&Product> {
        self.items.get(self.index)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn liked(&self) -> bool {
        self.liked
    }

    pub fn gesture_threshold(&self) -> f64 {
        self.gesture_threshold
    }

    pub fn can_go_next(&self) -> bool {
        self.index + 1 < self.items.len()
    }

    pub fn can_go_previous(&self) -> bool {
        self.index > 0
    }

    /// "3 / 8" style position label, `None` for an empty feed
    pub fn position_label(&self) -> Option<String> {
        self.index()
            .map(|i| format!("{} / {}", i + 1, self.items.len()))
    }

    /// Advances one item. Returns false at the last item.
    pub fn next(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.move_to(self.index + 1, Direction::Forward);
        true
    }

    /// Steps back one item. Returns false at the first item.
    pub fn previous(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.move_to(self.index - 1, Direction::Backward);
        true
    }

    /// Jumps to `index`; out-of-range requests are rejected, not clamped
    ///
    /// Any index not greater than the current one counts as backward.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            tracing::debug!(index, len = self.items.len(), "Ignoring out-of-range feed jump");
            return false;
        }

        let direction = if index > self.index {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.move_to(index, direction);
        true
    }

    /// Maps a completed horizontal drag to navigation
    ///
    /// Dragging left past the threshold goes to the next item, dragging right
    /// goes back. The threshold itself is a no-op.
    pub fn interpret_gesture(&mut self, horizontal_offset: f64) -> Gesture {
        if horizontal_offset < -self.gesture_threshold {
            self.next();
            Gesture::Next
        } else if horizontal_offset > self.gesture_threshold {
            self.previous();
            Gesture::Previous
        } else {
            Gesture::Ignored
        }
    }

    /// Flips the like toggle of the current item
    pub fn toggle_like(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        self.liked = !self.liked;
        self.liked
    }

    fn move_to(&mut self, index: usize, direction: Direction) {
        self.index = index;
        self.direction = direction;
        self.liked = false;
    }
}
