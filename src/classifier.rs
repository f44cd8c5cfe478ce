use crate::{
    config::ExtractionConfig,
    filter::{Filter, RelaxedFilter, StrictFilter},
    resample::PixelSample,
};

/// Which pass produced the kept pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pass {
    Strict,
    Relaxed,
}

/// Terminal state of classification.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Classification {
    Success { pixels: Vec<PixelSample>, pass: Pass },
    Fail,
}

/// Separates logo content from background and noise.
///
/// Runs the strict filter first. Only when it keeps nothing does the relaxed filter get a turn, and only when that
/// also keeps nothing does classification fail.
pub(crate) struct PixelClassifier {
    strict: StrictFilter,
    relaxed: RelaxedFilter,
}

impl PixelClassifier {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            strict: StrictFilter::from_config(config),
            relaxed: RelaxedFilter::from_config(config),
        }
    }

    pub fn classify(&self, samples: &[PixelSample]) -> Classification {
        let strict = keep(samples, &self.strict);
        if !strict.is_empty() {
            return Classification::Success {
                pixels: strict,
                pass: Pass::Strict,
            };
        }

        tracing::debug!("strict pass kept no pixels, retrying with relaxed filter");

        let relaxed = keep(samples, &self.relaxed);
        if !relaxed.is_empty() {
            return Classification::Success {
                pixels: relaxed,
                pass: Pass::Relaxed,
            };
        }

        Classification::Fail
    }
}

fn keep(samples: &[PixelSample], filter: &impl Filter) -> Vec<PixelSample> {
    samples
        .iter()
        .copied()
        .filter(|sample| filter.is_allowed(*sample, sample.saturation_value()))
        .collect()
}
