//! Rendering collaborator interface
//!
//! The core never draws. Screens produce a [`Frame`]; a backend turns the
//! world snapshot into [`RectInstance`] records for a GPU instance buffer.

pub mod frame;
pub mod snapshot;
pub mod vertex;

pub use frame::{Frame, MenuView};
pub use snapshot::{BallView, BonusView, BrickView, EffectView, Hud, WorldSnapshot};
pub use vertex::{RectInstance, colors, rgba};
