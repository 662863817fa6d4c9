//! Engine registry: selector-to-engine and name-to-selector lookup.

use crate::additive::AdditionDp;
use crate::engine::{Algorithm, EngineError, FibEngine};
use crate::fastdoubling::FastDoubling;
use crate::multiply::{NativeMultiplier, ShiftAddMultiplier};

static ADDITION_DP: AdditionDp = AdditionDp;
static FAST_NATIVE: FastDoubling<NativeMultiplier> = FastDoubling::native();
static FAST_CLZ: FastDoubling<NativeMultiplier> = FastDoubling::clz();
static FAST_SHIFT_ADD: FastDoubling<ShiftAddMultiplier> = FastDoubling::shift_add();

/// Get the engine behind a selector.
#[must_use]
pub fn engine_for(algo: Algorithm) -> &'static dyn FibEngine {
    match algo {
        Algorithm::AdditionDp => &ADDITION_DP,
        Algorithm::FastDoublingNative => &FAST_NATIVE,
        Algorithm::FastDoublingClz => &FAST_CLZ,
        Algorithm::FastDoublingShiftAdd => &FAST_SHIFT_ADD,
    }
}

/// Resolve a selector by short name (`add`, `fast`, `clz`, `smul`) or by
/// engine name, case-insensitively.
pub fn lookup(name: &str) -> Result<Algorithm, EngineError> {
    let wanted = name.trim();
    Algorithm::ALL
        .into_iter()
        .find(|algo| {
            algo.short_name().eq_ignore_ascii_case(wanted)
                || engine_for(*algo).name().eq_ignore_ascii_case(wanted)
        })
        .ok_or_else(|| {
            tracing::debug!(name = wanted, "no engine registered under this name");
            EngineError::UnknownEngine(wanted.to_string())
        })
}

/// List all short names.
#[must_use]
pub fn available() -> Vec<&'static str> {
    Algorithm::ALL.iter().map(|a| a.short_name()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_names_match_selectors() {
        assert_eq!(engine_for(Algorithm::AdditionDp).name(), "AdditionDp");
        assert_eq!(engine_for(Algorithm::FastDoublingNative).name(), "FastDoublingNative");
        assert_eq!(engine_for(Algorithm::FastDoublingClz).name(), "FastDoublingClz");
        assert_eq!(
            engine_for(Algorithm::FastDoublingShiftAdd).name(),
            "FastDoublingShiftAdd"
        );
    }

    #[test]
    fn lookup_short_and_long_names() {
        assert_eq!(lookup("add"), Ok(Algorithm::AdditionDp));
        assert_eq!(lookup("fast"), Ok(Algorithm::FastDoublingNative));
        assert_eq!(lookup(" SMUL "), Ok(Algorithm::FastDoublingShiftAdd));
        assert_eq!(lookup("fastdoublingclz"), Ok(Algorithm::FastDoublingClz));
    }

    #[test]
    fn lookup_unknown_name() {
        assert_eq!(
            lookup("fft"),
            Err(EngineError::UnknownEngine("fft".to_string()))
        );
    }

    #[test]
    fn available_lists_every_selector() {
        assert_eq!(available(), vec!["add", "fast", "clz", "smul"]);
    }

    #[test]
    fn registered_engines_agree_at_ten() {
        for algo in Algorithm::ALL {
            assert_eq!(engine_for(algo).compute(10), 55, "{algo}");
        }
    }
}
