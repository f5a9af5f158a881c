//! glyphcorpus
//!
//! Curates fonts whose Regular style renders every letter distinctly and
//! renders labelled letter images from them.
pub mod core;
pub mod corpus;
pub mod data;
pub mod dataset;
pub mod font_source;
pub mod geometry;
pub mod logging;
pub mod placement;
pub mod rendering;
pub mod selection;
#[cfg(test)]
mod tests;
pub mod validity;
