//! Chaos Game - iterated function system simulator
//!
//! Plays the chaos game on a discrete canvas: starting from the origin,
//! repeatedly apply a randomly chosen transform and plot the point.
//! Descriptions come from a built-in catalogue or from text files.

pub mod canvas;
pub mod config;
pub mod description;
pub mod factory;
pub mod file_handler;
pub mod game;
pub mod logging;
pub mod math;
pub mod transform;

pub use canvas::ChaosCanvas;
pub use description::{ChaosGameDescription, DescriptionError};
pub use factory::{BuiltinFractal, DescriptionFactory};
pub use file_handler::FileHandlerError;
pub use game::{ChaosGame, ChaosGameObserver, ObserverId};
pub use math::{Complex, Matrix2x2, Vector2d};
pub use transform::{JuliaSign, Transform2D, TransformKind};
