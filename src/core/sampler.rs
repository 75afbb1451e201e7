use crate::config::{FixedTemplate, RangeTemplate};
use crate::core::random::random_between;
use crate::errors::{AppError, AppResult};
use crate::models::TripCandidate;
use rand::Rng;

/// Per-run aggregate target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationTarget {
    pub target_km: u32,
    pub dominant_pct: u32,
}

impl GenerationTarget {
    /// Exact dominant share of the target, `target * pct / 100`.
    pub fn dominant_km(&self) -> f64 {
        self.target_km as f64 * self.dominant_pct as f64 / 100.0
    }

    /// What is left of the target once the exact dominant share is taken.
    pub fn remainder_km(&self) -> f64 {
        self.target_km as f64 - self.dominant_km()
    }

    // both shares in hundredths of a km, so comparisons stay exact
    fn dominant_hundredths(&self) -> u64 {
        self.target_km as u64 * self.dominant_pct as u64
    }

    fn remainder_hundredths(&self) -> u64 {
        self.target_km as u64 * (100 - self.dominant_pct as u64)
    }
}

pub struct TripSampler<'a> {
    pub dominant: &'a FixedTemplate,
    pub secondary: &'a [RangeTemplate],
    pub overshoot_km: u32,
}

impl TripSampler<'_> {
    /// Draw an unordered list of trips whose distances add up to at least
    /// `target.target_km`.
    ///
    /// Templates are expected to come from a validated `GenerationConfig`.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        target: GenerationTarget,
    ) -> AppResult<Vec<TripCandidate>> {
        if target.dominant_pct > 100 {
            return Err(AppError::Config(format!(
                "dominant percentage {} exceeds 100",
                target.dominant_pct
            )));
        }

        let mut out = Vec::new();

        let dominant_goal = target.dominant_hundredths();
        let mut dominant_sum = 0u64;
        while dominant_sum * 100 < dominant_goal {
            out.push(TripCandidate {
                distance_km: self.dominant.fixed_km,
                category: self.dominant.category,
            });
            dominant_sum += self.dominant.fixed_km as u64;
        }

        let remainder_goal = target.remainder_hundredths();
        if remainder_goal > 0 && self.secondary.is_empty() {
            return Err(AppError::Config(
                "no secondary category to cover the remaining distance".into(),
            ));
        }

        let mut remainder_sum = 0u64;
        while remainder_sum * 100 < remainder_goal {
            let idx = rng.gen_range(0..self.secondary.len());
            let template = &self.secondary[idx];

            // whole km still missing, rounded up
            let remaining = (remainder_goal - remainder_sum * 100).div_ceil(100);
            let remaining = u32::try_from(remaining).unwrap_or(u32::MAX);
            let upper = template
                .max_km
                .min(remaining.saturating_add(self.overshoot_km))
                .max(template.min_km);
            let km = random_between(rng, template.min_km, upper);

            out.push(TripCandidate {
                distance_km: km,
                category: template.category,
            });
            remainder_sum += km as u64;
        }

        tracing::debug!(
            target_km = target.target_km,
            dominant_pct = target.dominant_pct,
            trips = out.len(),
            "trips sampled"
        );
        Ok(out)
    }
}
