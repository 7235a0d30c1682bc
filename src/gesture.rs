//! Touch gestures.
//!
//! A [`Gesture`] is a single-finger pointer sequence in viewport
//! coordinates. Drivers translate it into whatever their backend speaks
//! (W3C pointer actions, `mobile:` scripts, XCUITest events).
//!
//! | Gesture | Pointer sequence |
//! |---------|------------------|
//! | [`Gesture::LongPress`] | down at `at`, hold `duration`, up |
//! | [`Gesture::Swipe`] | down at `from`, move to `to` over `duration`, up |

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::element::{Point, Size};
use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Hold time of a long press.
pub const LONG_PRESS_DURATION: Duration = Duration::from_millis(2000);

/// Travel time of an element swipe.
pub const SWIPE_DURATION: Duration = Duration::from_millis(500);

/// Travel time of a scroll swipe.
pub const SCROLL_DURATION: Duration = Duration::from_millis(600);

// ============================================================================
// Direction
// ============================================================================

/// Direction of a swipe or scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards the top of the screen.
    Up,
    /// Towards the bottom of the screen.
    Down,
    /// Towards the left edge.
    Left,
    /// Towards the right edge.
    Right,
}

impl Direction {
    /// Lowercase name.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Returns `true` for [`Left`](Self::Left) and [`Right`](Self::Right).
    #[inline]
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Returns `true` for [`Up`](Self::Up) and [`Down`](Self::Down).
    #[inline]
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        !self.is_horizontal()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = Error;

    /// Parses a direction name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(Error::invalid_direction(s, "up, down, left or right")),
        }
    }
}

// ============================================================================
// Gesture
// ============================================================================

/// A single-finger touch gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Gesture {
    /// Press and hold at one point.
    LongPress {
        /// Where the finger goes down.
        at: Point,
        /// How long it stays down.
        #[serde(with = "crate::config::millis")]
        duration: Duration,
    },
    /// Press, drag and release.
    Swipe {
        /// Where the finger goes down.
        from: Point,
        /// Where the finger is lifted.
        to: Point,
        /// Travel time.
        #[serde(with = "crate::config::millis")]
        duration: Duration,
    },
}

impl Gesture {
    /// Long press of [`LONG_PRESS_DURATION`] at `at`.
    #[inline]
    #[must_use]
    pub const fn long_press(at: Point) -> Self {
        Self::LongPress {
            at,
            duration: LONG_PRESS_DURATION,
        }
    }

    /// Horizontal swipe across an element from its center.
    ///
    /// The finger travels half the element width towards `direction`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDirection`] for [`Direction::Up`] or
    /// [`Direction::Down`].
    pub fn swipe_across(origin: Point, size: Size, direction: Direction) -> Result<Self> {
        let from = size.center_from(origin);
        let reach = size.width / 2;
        let to = match direction {
            Direction::Left => Point::new(from.x - reach, from.y),
            Direction::Right => Point::new(from.x + reach, from.y),
            Direction::Up | Direction::Down => {
                return Err(Error::invalid_direction(direction.as_str(), "left or right"));
            }
        };
        Ok(Self::Swipe {
            from,
            to,
            duration: SWIPE_DURATION,
        })
    }

    /// Vertical scroll swipe along the middle of a window.
    ///
    /// `near` and `far` are fractions of the window height, `near` being
    /// the one closer to the top. Scrolling [`Direction::Down`] drags the
    /// content up, so the finger moves from `far` to `near`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDirection`] for [`Direction::Left`] or
    /// [`Direction::Right`].
    pub fn scroll(window: Size, direction: Direction, near: f64, far: f64) -> Result<Self> {
        let x = window.width / 2;
        let (from, to) = match direction {
            Direction::Up => (near, far),
            Direction::Down => (far, near),
            Direction::Left | Direction::Right => {
                return Err(Error::invalid_direction(direction.as_str(), "up or down"));
            }
        };
        Ok(Self::Swipe {
            from: Point::new(x, fraction_of(window.height, from)),
            to: Point::new(x, fraction_of(window.height, to)),
            duration: SCROLL_DURATION,
        })
    }

    /// Short name for logs.
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::LongPress { .. } => "long press",
            Self::Swipe { .. } => "swipe",
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn fraction_of(length: i32, fraction: f64) -> i32 {
    (f64::from(length) * fraction) as i32
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_str() {
        assert_eq!("LEFT".parse::<Direction>().unwrap(), Direction::Left);
        assert_eq!(" down ".parse::<Direction>().unwrap(), Direction::Down);

        let err = "sideways".parse::<Direction>().unwrap_err();
        assert!(matches!(err, Error::InvalidDirection { .. }));
        assert_eq!(
            err.to_string(),
            "Invalid direction: 'sideways', expected up, down, left or right"
        );
    }

    #[test]
    fn test_swipe_across_from_center() {
        let origin = Point::new(100, 200);
        let size = Size::new(300, 60);

        let left = Gesture::swipe_across(origin, size, Direction::Left).unwrap();
        assert_eq!(
            left,
            Gesture::Swipe {
                from: Point::new(250, 230),
                to: Point::new(100, 230),
                duration: SWIPE_DURATION,
            }
        );

        let right = Gesture::swipe_across(origin, size, Direction::Right).unwrap();
        let Gesture::Swipe { to, .. } = right else {
            panic!("expected a swipe");
        };
        assert_eq!(to, Point::new(400, 230));
    }

    #[test]
    fn test_swipe_across_rejects_vertical() {
        let err = Gesture::swipe_across(Point::default(), Size::new(10, 10), Direction::Up)
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid direction: 'up', expected left or right");
    }

    #[test]
    fn test_scroll_geometry() {
        let window = Size::new(1000, 2000);

        let down = Gesture::scroll(window, Direction::Down, 0.2, 0.8).unwrap();
        assert_eq!(
            down,
            Gesture::Swipe {
                from: Point::new(500, 1600),
                to: Point::new(500, 400),
                duration: SCROLL_DURATION,
            }
        );

        let up = Gesture::scroll(window, Direction::Up, 0.4, 0.6).unwrap();
        let Gesture::Swipe { from, to, .. } = up else {
            panic!("expected a swipe");
        };
        assert_eq!((from.y, to.y), (800, 1200));

        assert!(Gesture::scroll(window, Direction::Right, 0.2, 0.8).is_err());
    }

    #[test]
    fn test_gesture_json() {
        let json = serde_json::to_value(Gesture::long_press(Point::new(5, 6))).unwrap();
        assert_eq!(json["type"], "longPress");
        assert_eq!(json["duration"], 2000);
        assert_eq!(json["at"]["x"], 5);
    }
}
