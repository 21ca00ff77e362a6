// File: crates/chart-core/src/scale.rs
// Summary: Per-axis affine projection (zoom about center + offset), batched in fixed-width
// lanes, and the exponential zoom gesture law.

/// Lane width of the batched recompute loops. Full lanes run on fixed-size arrays
/// (auto-vectorized), the tail runs scalar.
pub const LANES: usize = 8;

/// Screen-space cache for one axis. Derived entirely from base positions and the
/// current projection; rebuilt, never patched by callers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AxisLayout {
    pub pos: Vec<f32>,
    pub label_pos: Vec<f32>,
    pub in_bounds: Vec<bool>,
}

impl AxisLayout {
    pub fn with_len(n: usize) -> Self {
        Self { pos: vec![0.0; n], label_pos: vec![0.0; n], in_bounds: vec![false; n] }
    }

    pub fn len(&self) -> usize { self.pos.len() }
    pub fn is_empty(&self) -> bool { self.pos.is_empty() }

    /// Element under screen coordinate `at`, clamped into range.
    pub fn index_at(&self, at: f32) -> usize {
        crate::geometry::index_at(&self.pos, at)
    }
}

/// `screen = base * scale + origin`, with `origin = center * (1 - scale) + offset`,
/// so scaling happens about `center` shifted by `offset`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisProjection {
    pub scale: f32,
    pub origin: f32,
    /// Scaled element size along the axis.
    pub extent: f32,
    /// Shift that centers a label box of a different size on the element.
    pub label_offset: f32,
    /// Visible window `[lo, hi]`.
    pub lo: f32,
    pub hi: f32,
}

impl AxisProjection {
    pub fn new(scale: f32, center: f32, offset: f32, base_extent: f32, label_extent: f32, lo: f32, hi: f32) -> Self {
        let extent = base_extent * scale;
        Self {
            scale,
            origin: center * (1.0 - scale) + offset,
            extent,
            label_offset: (label_extent - extent) / 2.0,
            lo,
            hi,
        }
    }

    #[inline]
    pub fn to_screen(&self, base: f32) -> f32 {
        base * self.scale + self.origin
    }

    /// AABB overlap of `[pos, pos + extent]` with the visible window.
    #[inline]
    pub fn overlaps(&self, pos: f32) -> bool {
        self.lo <= pos + self.extent && pos <= self.hi
    }

    /// Recompute positions, label positions and in-bounds flags for every element.
    pub fn project(&self, base: &[f32], out: &mut AxisLayout) {
        let n = base.len();
        out.pos.resize(n, 0.0);
        out.label_pos.resize(n, 0.0);
        out.in_bounds.resize(n, false);

        let full = n - n % LANES;
        let lanes = base[..full]
            .chunks_exact(LANES)
            .zip(out.pos[..full].chunks_exact_mut(LANES))
            .zip(out.label_pos[..full].chunks_exact_mut(LANES))
            .zip(out.in_bounds[..full].chunks_exact_mut(LANES));
        for (((b, pos), label), flags) in lanes {
            let mut lane = [0.0f32; LANES];
            for k in 0..LANES {
                lane[k] = b[k] * self.scale + self.origin;
            }
            for k in 0..LANES {
                pos[k] = lane[k];
                label[k] = lane[k] - self.label_offset;
                flags[k] = self.lo <= lane[k] + self.extent && lane[k] <= self.hi;
            }
        }
        for i in full..n {
            let p = self.to_screen(base[i]);
            out.pos[i] = p;
            out.label_pos[i] = p - self.label_offset;
            out.in_bounds[i] = self.overlaps(p);
        }
    }
}

/// `out[i] = ratio[i] * width`, lane-batched like [`AxisProjection::project`].
pub fn scale_widths(ratio: &[f32], width: f32, out: &mut Vec<f32>) {
    let n = ratio.len();
    out.resize(n, 0.0);
    let full = n - n % LANES;
    for (r, w) in ratio[..full].chunks_exact(LANES).zip(out[..full].chunks_exact_mut(LANES)) {
        for k in 0..LANES {
            w[k] = r[k] * width;
        }
    }
    for i in full..n {
        out[i] = ratio[i] * width;
    }
}

/// Exponential zoom: `scale * exp(delta * ratio)`, clamped into `[min, max]`.
#[inline]
pub fn zoom(scale: f32, delta: f32, ratio: f32, min: f32, max: f32) -> f32 {
    (scale * (delta * ratio).exp()).clamp(min, max)
}
