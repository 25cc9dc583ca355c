//! Geometry primitives for the annotation stage.
//!
//! Box geometry lives in image pixel space, pointer input arrives in display
//! surface space, and the YOLO encoder speaks normalized space. Each space is
//! a marker type so the compiler keeps them apart.
//!
//! # Design Principles
//!
//! 1. **Type Safety**: Marker types prevent mixing surface and pixel
//!    coordinates; only the stage viewport converts between them.
//!
//! 2. **Permissive Construction**: [`Rect`] happily holds negative extents
//!    or out-of-bounds origins, because a box being dragged passes through
//!    such states. [`normalize`] is what makes a rectangle valid.
//!
//! # Example
//!
//! ```
//! use boxer::geometry::{normalize, ImageBounds, Pixel, Rect};
//!
//! let candidate = Rect::<Pixel>::new(-5.0, 10.0, 20.0, 1.0);
//! let fixed = normalize(candidate, ImageBounds::new(100.0, 50.0), 3.0);
//! assert_eq!(fixed.rect(), Rect::new(0.0, 10.0, 15.0, 3.0));
//! ```

mod coord;
mod ids;
mod normalize;
mod rect;
mod space;

pub use coord::Coord;
pub use ids::BoxId;
pub use normalize::{normalize, ImageBounds, NormalizedRect};
pub use rect::Rect;
pub use space::{Normalized, Pixel, Surface};
