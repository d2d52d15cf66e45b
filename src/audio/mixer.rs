use super::tone::{Tone, ToneShape};

/// Sums every live voice into one mono buffer.
#[derive(Clone, Debug, Default)]
pub struct AudioMixer {
    shape: ToneShape,
}

impl AudioMixer {
    pub fn new(shape: ToneShape) -> Self {
        Self { shape }
    }

    pub fn shape(&self) -> &ToneShape {
        &self.shape
    }

    /// Overwrite `out` with the mix of `voices`.
    ///
    /// The mix is rescaled to a peak of 1.0 only when it would clip.
    /// Returns the pre-normalization peak.
    pub fn mix<'a, I>(&self, voices: I, out: &mut [f32]) -> f32
    where
        I: IntoIterator<Item = &'a Tone>,
    {
        out.fill(0.0);
        for voice in voices {
            voice.render_into(out, &self.shape);
        }

        let peak = out.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        if peak > 1.0 {
            let inv = 1.0 / peak;
            for s in out.iter_mut() {
                *s *= inv;
            }
        }
        peak
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loud_mix_is_normalized_to_unit_peak() {
        let mixer = AudioMixer::default();
        let voices: Vec<Tone> = (0..8).map(|_| Tone::new(330.0, 1.0)).collect();

        // Skip past the attack so the partials are near full level
        let mut warmup = vec![0.0f32; 4410];
        mixer.mix(voices.iter(), &mut warmup);

        let mut out = vec![0.0f32; 512];
        let peak = mixer.mix(voices.iter(), &mut out);
        assert!(peak > 1.0);
        let max = out.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!((max - 1.0).abs() < 1e-5);
    }

    #[test]
    fn quiet_mix_is_left_alone() {
        let mixer = AudioMixer::default();
        let voice = Tone::new(330.0, 0.01);
        let mut out = vec![0.0f32; 256];
        let peak = mixer.mix(std::iter::once(&voice), &mut out);
        assert!(peak <= 1.0);
        let max = out.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert_eq!(max, peak);
    }
}
