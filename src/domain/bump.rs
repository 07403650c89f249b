use crate::domain::prerelease::{validate_prefix, PreReleaseFormat};
use crate::domain::version::{BumpCategory, SemanticVersion};
use crate::error::Result;
use chrono::{Local, NaiveDateTime};

/// Compute the next tag for `base`.
///
/// Date based pre-release formats read the local clock; see [`bump_at`].
pub fn bump(
    base: &SemanticVersion,
    category: BumpCategory,
    format: PreReleaseFormat,
    prefix: &str,
    pre_release: bool,
) -> Result<String> {
    bump_at(base, category, format, prefix, pre_release, Local::now().naive_local())
}

/// Compute the next tag for `base` with an explicit clock reading.
///
/// The positional increment comes first. Without `pre_release` the result is
/// the incremented version as is, which for [`BumpCategory::None`] means the
/// base passes through unchanged. With `pre_release` a suffix is minted, or an
/// existing numeric counter is advanced:
///
/// - `1.0.0` + Patch → `1.0.1-rc.1`
/// - `1.0.0-rc.1` + None → `1.0.0-rc.2`
/// - `1.0.0-rc.abc` + None → `1.0.0-rc.abc.1`
///
/// Fails when a positional component would overflow, or when `pre_release`
/// is set and `prefix` is not a usable pre-release identifier.
pub fn bump_at(
    base: &SemanticVersion,
    category: BumpCategory,
    format: PreReleaseFormat,
    prefix: &str,
    pre_release: bool,
    now: NaiveDateTime,
) -> Result<String> {
    let working = base.increment(category)?;
    if !pre_release {
        return Ok(working.to_string());
    }
    validate_prefix(prefix)?;

    let suffix = match (format.timestamp(now), working.prerelease()) {
        (Some(stamp), _) => stamp,
        (None, None) => "1".to_string(),
        (None, Some(existing)) => {
            let counter = existing
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix('.'))
                .unwrap_or(existing);
            match counter.parse::<u64>().ok().and_then(|n| n.checked_add(1)) {
                Some(next) => next.to_string(),
                // keep the unparseable text and start a counter after it
                None => return Ok(format!("{}.1", working)),
            }
        }
    };

    Ok(format!("{}-{}.{}", working.core(), prefix, suffix))
}
