//! Command-line overrides layered on top of loaded settings.

use crate::error::{Diagnostic, OptionError};
use crate::settings::{Settings, SET_COUNT_OPTION};
use tracing::{debug, warn};

/// Apply `name value` overrides in order, later entries winning.
///
/// The set count is applied first so per-set overrides can address new
/// sets. Failing overrides are skipped and reported; the rest still apply.
pub fn apply<N, V>(settings: &mut Settings, overrides: &[(N, V)]) -> Vec<Diagnostic>
where
    N: AsRef<str>,
    V: AsRef<str>,
{
    let mut diagnostics = Vec::new();
    let mut apply_one = |settings: &mut Settings, name: &str, raw: &str| {
        match settings.set_from_str(name, raw) {
            Ok(()) => debug!(name, value = raw, "applied override"),
            Err(err) => {
                warn!("Ignoring override {}: {}", name, err);
                diagnostics.push(Diagnostic::detached(err));
            }
        }
    };

    if let Some((name, raw)) = overrides
        .iter()
        .rev()
        .find(|(name, _)| name.as_ref() == SET_COUNT_OPTION)
    {
        apply_one(settings, name.as_ref(), raw.as_ref());
    }
    for (name, raw) in overrides
        .iter()
        .filter(|(name, _)| name.as_ref() != SET_COUNT_OPTION)
    {
        apply_one(settings, name.as_ref(), raw.as_ref());
    }
    diagnostics
}

/// Split a `name=value` argument.
pub fn parse_assignment(arg: &str) -> Result<(String, String), OptionError> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| OptionError::Malformed {
            name: arg.to_string(),
            value: String::new(),
            expected: "name=value",
        })?;
    let name = name.trim().trim_start_matches("--");
    if name.is_empty() {
        return Err(OptionError::Malformed {
            name: arg.to_string(),
            value: value.to_string(),
            expected: "name=value",
        });
    }
    Ok((name.to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SetColorKind;
    use crate::value::Color;

    #[test]
    fn last_override_wins() {
        let mut settings = Settings::new();
        let diagnostics = apply(&mut settings, &[("scale", "1.0"), ("scale", "2.0")]);
        assert!(diagnostics.is_empty());
        assert_eq!(settings.store().globals.scale, 2.0);
    }

    #[test]
    fn bad_override_does_not_block_the_rest() {
        let mut settings = Settings::new();
        let diagnostics = apply(
            &mut settings,
            &[("bogus", "1"), ("minKey", "300"), ("showWave", "0")],
        );
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics[0].error.is_unknown());
        assert!(matches!(
            diagnostics[1].error,
            OptionError::OutOfRange { .. }
        ));
        assert!(!settings.store().flags.show_wave);
        assert_eq!(settings.store().globals.min_key, 21);
    }

    #[test]
    fn set_count_is_applied_before_per_set_overrides() {
        let mut settings = Settings::new();
        let diagnostics = apply(
            &mut settings,
            &[
                ("notes.minorColors.30", "0 1 0"),
                ("sets.count", "20"),
                ("sets.count", "32"),
            ],
        );
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        assert_eq!(settings.store().set_count(), 32);
        assert_eq!(
            settings.store().set_color(SetColorKind::NotesMinor, 30),
            Some(Color::new(0.0, 1.0, 0.0))
        );
    }

    #[test]
    fn assignments_are_split_on_first_equals() {
        assert_eq!(
            parse_assignment("--background.imagePath=/a=b.png").unwrap(),
            ("background.imagePath".to_string(), "/a=b.png".to_string())
        );
        assert!(parse_assignment("scale").is_err());
        assert!(parse_assignment("=1").is_err());
    }
}
