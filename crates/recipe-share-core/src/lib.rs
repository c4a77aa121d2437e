pub mod driver;
pub use driver::Driver;

mod error;
pub use error::Error;

pub mod model;
pub use model::{Profile, Recipe, RecipeWithProfile};

pub mod stmt;

/// A Result type alias that uses recipe-share's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
