use std::sync::atomic::{AtomicU8, Ordering};

/// Minification / magnification filter.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FilterMode {
    /// Interpolates between neighbouring texels; blurry when scaled up.
    Linear,
    /// Picks the nearest texel; scales up in a pixelated fashion.
    Nearest,
}

impl FilterMode {
    pub(crate) fn to_wgpu(self) -> wgpu::FilterMode {
        match self {
            FilterMode::Linear => wgpu::FilterMode::Linear,
            FilterMode::Nearest => wgpu::FilterMode::Nearest,
        }
    }

    fn bit(self) -> u8 {
        match self {
            FilterMode::Linear => 0,
            FilterMode::Nearest => 1,
        }
    }

    fn from_bit(bit: u8) -> Self {
        if bit & 1 == 0 { FilterMode::Linear } else { FilterMode::Nearest }
    }
}

/// A `(min, mag)` filter pair.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SamplerFilter {
    pub min: FilterMode,
    pub mag: FilterMode,
}

impl SamplerFilter {
    /// Number of distinct pairs; the sampler cache holds one sampler each.
    pub(crate) const COUNT: usize = 4;

    pub const fn new(min: FilterMode, mag: FilterMode) -> Self {
        Self { min, mag }
    }

    /// Dense index in `0..COUNT`.
    pub(crate) fn index(self) -> usize {
        (self.min.bit() | (self.mag.bit() << 1)) as usize
    }

    pub(crate) fn from_index(index: usize) -> Self {
        let bits = index as u8;
        Self::new(FilterMode::from_bit(bits), FilterMode::from_bit(bits >> 1))
    }
}

/// Linear both ways, like a freshly created GL texture sampled without mipmaps.
impl Default for SamplerFilter {
    fn default() -> Self {
        Self::new(FilterMode::Linear, FilterMode::Linear)
    }
}

/// Filter pair stored on a shared texture handle.
#[derive(Debug)]
pub(crate) struct FilterCell(AtomicU8);

impl FilterCell {
    pub(crate) fn new(filter: SamplerFilter) -> Self {
        Self(AtomicU8::new(filter.index() as u8))
    }

    pub(crate) fn get(&self) -> SamplerFilter {
        SamplerFilter::from_index(self.0.load(Ordering::Relaxed) as usize)
    }

    pub(crate) fn set(&self, filter: SamplerFilter) {
        self.0.store(filter.index() as u8, Ordering::Relaxed);
    }
}

/// One immutable sampler per filter pair, created once with the render state.
///
/// wgpu samplers cannot be edited, so `set_filter` only records the pair on
/// the resource and the next draw picks the matching sampler here.
pub(crate) struct SamplerCache {
    samplers: Vec<wgpu::Sampler>,
}

impl SamplerCache {
    pub(crate) fn new(device: &wgpu::Device) -> Self {
        let samplers = (0..SamplerFilter::COUNT)
            .map(|i| {
                let filter = SamplerFilter::from_index(i);
                device.create_sampler(&wgpu::SamplerDescriptor {
                    label: Some("vellum sprite sampler"),
                    address_mode_u: wgpu::AddressMode::ClampToEdge,
                    address_mode_v: wgpu::AddressMode::ClampToEdge,
                    address_mode_w: wgpu::AddressMode::ClampToEdge,
                    mag_filter: filter.mag.to_wgpu(),
                    min_filter: filter.min.to_wgpu(),
                    mipmap_filter: wgpu::MipmapFilterMode::Nearest,
                    ..Default::default()
                })
            })
            .collect();
        Self { samplers }
    }

    pub(crate) fn get(&self, filter: SamplerFilter) -> &wgpu::Sampler {
        &self.samplers[filter.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [FilterMode; 2] = [FilterMode::Linear, FilterMode::Nearest];

    #[test]
    fn index_round_trips_every_pair() {
        let mut seen = [false; SamplerFilter::COUNT];
        for min in ALL {
            for mag in ALL {
                let f = SamplerFilter::new(min, mag);
                assert_eq!(SamplerFilter::from_index(f.index()), f);
                seen[f.index()] = true;
            }
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn cell_keeps_last_pair() {
        let cell = FilterCell::new(SamplerFilter::default());
        assert_eq!(cell.get(), SamplerFilter::new(FilterMode::Linear, FilterMode::Linear));

        cell.set(SamplerFilter::new(FilterMode::Linear, FilterMode::Nearest));
        cell.set(SamplerFilter::new(FilterMode::Nearest, FilterMode::Nearest));
        assert_eq!(cell.get(), SamplerFilter::new(FilterMode::Nearest, FilterMode::Nearest));
    }
}
