//! dia resolves and renders composite images stored in `.dia` archives.
//!
//! A `.dia` archive is a zip container holding layer images, optional alpha-map images, and a
//! JSON manifest (`optimization_map.json`) that maps each image identifier to its file, its
//! alpha map, and the parent identifier it is layered on top of.
//!
//! # Pipeline overview
//!
//! 1. **Index**: manifest JSON -> [`DependencyIndex`] (built once, immutable)
//! 2. **Resolve**: identifier -> [`Chain`] (root first, requested leaf last; cycles rejected)
//! 3. **Composite**: [`Chain`] -> [`PixelBuffer`] via an [`AssetStore`] and an [`ImageCodec`]
//!
//! Compositing pastes each overlay top-left aligned at full opacity, then folds its alpha map
//! into the canvas alpha with an [`AlphaPolicy`]: `Replace` for the base layer, `Combine` for
//! overlays.
//!
//! ```no_run
//! use dia::{ArchiveOpts, DependencyIndex, ImageRsCodec, ZipAssetStore, render};
//!
//! # fn main() -> dia::DiaResult<()> {
//! let store = ZipAssetStore::open("sprites.dia")?;
//! let index = DependencyIndex::from_store(&store, &ArchiveOpts::default())?;
//! let canvas = render(&index, &store, &ImageRsCodec, "hero_smile")?;
//! println!("{}x{}", canvas.width(), canvas.height());
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assets;
mod foundation;
mod index;
mod render;

pub use assets::decode::{ImageCodec, ImageRsCodec, encode_png};
pub use assets::store::{
    AssetStore, DirAssetStore, MemoryAssetStore, ZipAssetStore, normalize_rel_path,
};
pub use foundation::core::{PixelBuffer, Size};
pub use foundation::error::{DiaError, DiaResult};
pub use foundation::natural::natural_cmp;
pub use index::listing::{ListingNode, ListingTree};
pub use index::manifest::{
    ArchiveOpts, DEFAULT_MANIFEST_NAME, DependencyIndex, build_dependency_index,
};
pub use render::blend::{AlphaPolicy, apply_alpha_map, paste_overlay};
pub use render::chain::{Chain, resolve_chain};
pub use render::compositor::{Compositor, render};
pub use render::fit::{VIEWPORT_MARGIN, fit_within, scale_to_fit};
