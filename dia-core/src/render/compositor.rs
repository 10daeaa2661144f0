use crate::assets::decode::ImageCodec;
use crate::assets::store::AssetStore;
use crate::foundation::core::PixelBuffer;
use crate::foundation::error::{DiaError, DiaResult};
use crate::index::manifest::DependencyIndex;
use crate::render::blend::{AlphaPolicy, apply_alpha_map, paste_overlay};
use crate::render::chain::{Chain, resolve_chain};

/// Layers a resolved [`Chain`] into one RGBA canvas.
///
/// Borrows its collaborators and holds no mutable state; each render owns its own canvas, so a
/// single compositor may serve concurrent renders when the store and codec allow it.
#[derive(Clone, Copy)]
pub struct Compositor<'a> {
    index: &'a DependencyIndex,
    store: &'a dyn AssetStore,
    codec: &'a dyn ImageCodec,
}

impl<'a> Compositor<'a> {
    /// Borrow the collaborators used for every render.
    pub fn new(
        index: &'a DependencyIndex,
        store: &'a dyn AssetStore,
        codec: &'a dyn ImageCodec,
    ) -> Self {
        Self {
            index,
            store,
            codec,
        }
    }

    /// Resolve `id`'s chain and composite it.
    pub fn render_id(&self, id: &str) -> DiaResult<PixelBuffer> {
        let chain = resolve_chain(self.index, id)?;
        self.render(&chain)
    }

    /// Composite `chain` bottom to top.
    ///
    /// The root layer becomes the canvas (normalised to RGBA) and its alpha map, if any, replaces
    /// the canvas alpha. Each overlay is pasted top-left aligned, then its alpha map, if any, is
    /// combined into the canvas alpha. Any failure aborts the whole render; partially built
    /// canvases are dropped, never returned.
    #[tracing::instrument(level = "debug", skip_all, fields(leaf = %chain.leaf(), depth = chain.len()))]
    pub fn render(&self, chain: &Chain) -> DiaResult<PixelBuffer> {
        let root = chain.root();
        let mut canvas = self.load_layer(root)?;
        if let Some(map) = self.load_alpha(root)? {
            apply_alpha_map(&mut canvas, &map, AlphaPolicy::Replace)?;
            tracing::debug!(id = %root, "replaced base alpha");
        }

        for id in chain.overlays() {
            let overlay = self.load_layer(id)?;
            let (w, h) = paste_overlay(&mut canvas, &overlay)?;
            tracing::debug!(
                id = %id,
                overlay_w = overlay.width(),
                overlay_h = overlay.height(),
                pasted_w = w,
                pasted_h = h,
                "pasted overlay"
            );
            drop(overlay);

            if let Some(map) = self.load_alpha(id)? {
                apply_alpha_map(&mut canvas, &map, AlphaPolicy::Combine)?;
                tracing::debug!(id = %id, "combined overlay alpha");
            }
        }

        Ok(canvas)
    }

    fn load_layer(&self, id: &str) -> DiaResult<PixelBuffer> {
        let name = self
            .index
            .image_of(id)
            .ok_or_else(|| DiaError::MissingImageMapping { id: id.to_string() })?;
        Ok(self.decode_asset(name)?.with_alpha_channel())
    }

    fn load_alpha(&self, id: &str) -> DiaResult<Option<PixelBuffer>> {
        self.index
            .alpha_of(id)
            .map(|name| self.decode_asset(name))
            .transpose()
    }

    fn decode_asset(&self, name: &str) -> DiaResult<PixelBuffer> {
        let bytes = self.store.fetch(name)?;
        self.codec.decode(&bytes).map_err(|source| DiaError::Decode {
            name: name.to_string(),
            source,
        })
    }
}

/// Resolve `id` against `index` and composite its chain into a single RGBA buffer.
pub fn render(
    index: &DependencyIndex,
    store: &dyn AssetStore,
    codec: &dyn ImageCodec,
    id: &str,
) -> DiaResult<PixelBuffer> {
    Compositor::new(index, store, codec).render_id(id)
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
