//! CPU execution of the per-pixel program.
//!
//! Applies [`shade_pixel`](crate::shader::program::shade_pixel) to every
//! pixel of a frame, row-parallel via rayon. The source is snapshotted once
//! per call so spatial taps (blur, diplopia ghost) read the original image
//! while rows are rewritten in place.

use rayon::prelude::*;

use crate::foundation::core::Frame;
use crate::foundation::error::{VisimError, VisimResult};
use crate::shader::program::shade_pixel;
use crate::shader::uniforms::{UniformLayout, UniformSet};

/// CPU renderer for the shared per-pixel program.
#[derive(Debug)]
pub struct CpuBackend {
    layout: UniformLayout,
}

impl CpuBackend {
    /// Construct the backend, validating the catalog ↔ uniform layout once
    /// up front so any mismatch fails here and not at frame time.
    pub fn new() -> VisimResult<Self> {
        Ok(Self {
            layout: UniformLayout::new()?,
        })
    }

    /// The validated uniform layout.
    pub fn layout(&self) -> &UniformLayout {
        &self.layout
    }

    /// Apply the program to `frame` in place. Alpha bytes are preserved.
    #[tracing::instrument(skip_all, fields(w = frame.width, h = frame.height))]
    pub fn render(&self, uniforms: &UniformSet, frame: &mut Frame) -> VisimResult<()> {
        let w = frame.width as usize;
        let h = frame.height as usize;
        if frame.data.len() != w * h * 4 {
            return Err(VisimError::render("frame buffer length mismatch"));
        }

        let source = frame.data.clone();
        let sample = move |uv: [f32; 2]| -> [f32; 3] {
            let x = ((uv[0] * w as f32) as usize).min(w - 1);
            let y = ((uv[1] * h as f32) as usize).min(h - 1);
            let idx = (y * w + x) * 4;
            [
                source[idx] as f32 / 255.0,
                source[idx + 1] as f32 / 255.0,
                source[idx + 2] as f32 / 255.0,
            ]
        };

        frame
            .data
            .par_chunks_exact_mut(w * 4)
            .enumerate()
            .for_each(|(y, row)| {
                let v = (y as f32 + 0.5) / h as f32;
                for (x, px) in row.chunks_exact_mut(4).enumerate() {
                    let u = (x as f32 + 0.5) / w as f32;
                    let rgb = shade_pixel(uniforms, [u, v], &sample);
                    px[0] = (rgb[0] * 255.0 + 0.5) as u8;
                    px[1] = (rgb[1] * 255.0 + 0.5) as u8;
                    px[2] = (rgb[2] * 255.0 + 0.5) as u8;
                    // Alpha is never touched.
                }
            });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::{DiplopiaSettings, EffectState};

    fn gradient_frame(w: u32, h: u32) -> Frame {
        let mut f = Frame::new(w, h).unwrap();
        for y in 0..h as usize {
            for x in 0..w as usize {
                let idx = (y * w as usize + x) * 4;
                f.data[idx] = ((x * 255) / (w as usize - 1)) as u8;
                f.data[idx + 1] = 128;
                f.data[idx + 2] = ((y * 255) / (h as usize - 1)) as u8;
                f.data[idx + 3] = 200;
            }
        }
        f
    }

    #[test]
    fn identity_uniforms_leave_frame_unchanged() {
        let backend = CpuBackend::new().unwrap();
        let mut frame = gradient_frame(16, 12);
        let before = frame.clone();
        backend.render(&UniformSet::zeroed(), &mut frame).unwrap();
        assert_eq!(frame, before);
    }

    #[test]
    fn alpha_bytes_are_preserved() {
        let backend = CpuBackend::new().unwrap();
        let mut frame = gradient_frame(16, 12);
        let mut u = UniformSet::zeroed();
        u.update(
            &[EffectState::enabled("cataracts", 0.8)],
            DiplopiaSettings::default(),
            0.0,
        );
        backend.render(&u, &mut frame).unwrap();
        for px in frame.data.chunks_exact(4) {
            assert_eq!(px[3], 200);
        }
    }

    #[test]
    fn terminal_blindness_blacks_out_every_pixel() {
        let backend = CpuBackend::new().unwrap();
        let mut frame = gradient_frame(8, 8);
        let mut u = UniformSet::zeroed();
        u.update(
            &[EffectState::enabled("retinitisPigmentosa", 1.0)],
            DiplopiaSettings::default(),
            0.0,
        );
        backend.render(&u, &mut frame).unwrap();
        for px in frame.data.chunks_exact(4) {
            assert_eq!(&px[..3], &[0, 0, 0]);
        }
    }

    #[test]
    fn render_is_deterministic() {
        let backend = CpuBackend::new().unwrap();
        let mut u = UniformSet::zeroed();
        u.update(
            &[
                EffectState::enabled("glaucoma", 0.5),
                EffectState::enabled("deuteranomaly", 0.7),
            ],
            DiplopiaSettings::default(),
            1.5,
        );

        let mut a = gradient_frame(24, 16);
        let mut b = gradient_frame(24, 16);
        backend.render(&u, &mut a).unwrap();
        backend.render(&u, &mut b).unwrap();
        assert_eq!(a, b);
    }
}
