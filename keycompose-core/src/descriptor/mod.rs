//! Construction and validation of layout descriptors

mod builder;
mod derive;

pub use builder::LayoutBuilder;
pub use derive::{combining_form, DeriveTransforms};
