//! # Time Formatting Module
//!
//! Step timing, storage shelf life, total time and the total-time aggregator.

use crate::config::DEFAULT_UNSPECIFIED_STORAGE_TEXT;
use crate::measurement_patterns::{
    ISO_DAYS_REGEX, ISO_HOURS_REGEX, ISO_MONTHS_REGEX, ISO_WEEKS_REGEX,
};
use crate::recipe_model::{InstructionEntry, StepDuration, StorageMethod, Timing};
use log::{debug, trace};
use regex::Regex;

const PASSIVE_SUFFIX: &str = " (passive)";

/// Largest total time that can be shown, in minutes
pub const MAX_TOTAL_MINUTES: f64 = u32::MAX as f64;

/// Format the timing of a step
///
/// Durations come first: a range renders as "10-15m", a single value as "45m"
/// or "1h 30m", a legacy hours/minutes pair as its non-zero components. A step
/// without a usable duration shows its completion cue instead. Passive steps
/// get a " (passive)" suffix. Returns `None` when there is nothing to show.
pub fn format_timing(timing: &Timing) -> Option<String> {
    let cue = timing
        .completion_cue
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let parts = timing
        .duration
        .as_ref()
        .map(duration_parts)
        .unwrap_or_default();

    let text = if parts.is_empty() {
        cue?.to_string()
    } else {
        parts.join(" ")
    };

    if timing.is_passive() {
        Some(format!("{text}{PASSIVE_SUFFIX}"))
    } else {
        Some(text)
    }
}

fn duration_parts(duration: &StepDuration) -> Vec<String> {
    match duration {
        StepDuration::Range {
            min_minutes,
            max_minutes,
        } => {
            if *max_minutes <= 0.0 {
                return Vec::new();
            }
            vec![format!("{}-{}m", min_minutes, max_minutes)]
        }
        StepDuration::Minutes(minutes) => {
            let minutes = *minutes;
            if minutes <= 0.0 {
                Vec::new()
            } else if minutes >= 60.0 {
                let hours = (minutes / 60.0).floor();
                let remainder = minutes - hours * 60.0;
                let mut parts = vec![format!("{}h", hours)];
                if remainder > 0.0 {
                    parts.push(format!("{}m", remainder));
                }
                parts
            } else {
                vec![format!("{}m", minutes)]
            }
        }
        StepDuration::HoursMinutes { hours, minutes } => {
            let mut parts = Vec::new();
            if let Some(h) = hours.filter(|h| *h != 0.0) {
                parts.push(format!("{}h", h));
            }
            if let Some(m) = minutes.filter(|m| *m != 0.0) {
                parts.push(format!("{}m", m));
            }
            parts
        }
    }
}

/// Format a minute count as "45 min", "2 hr" or "1 hr 15 min"
pub fn format_minutes(total_minutes: u32) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours == 0 {
        format!("{} min", minutes)
    } else if minutes == 0 {
        format!("{} hr", hours)
    } else {
        format!("{} hr {} min", hours, minutes)
    }
}

/// Read one ISO-8601 duration atom as words ("3 days", "1 week", "4 hours")
///
/// Days, weeks, months and hours are tried in that order; the first match wins.
pub fn parse_iso_duration(iso: &str) -> Option<String> {
    let atoms: [(&Regex, &str, &str); 4] = [
        (&*ISO_DAYS_REGEX, "day", "days"),
        (&*ISO_WEEKS_REGEX, "week", "weeks"),
        (&*ISO_MONTHS_REGEX, "month", "months"),
        (&*ISO_HOURS_REGEX, "hour", "hours"),
    ];

    atoms.iter().find_map(|(regex, singular, plural)| {
        let count: u64 = regex.captures(iso)?.get(1)?.as_str().parse().ok()?;
        Some(if count == 1 {
            format!("1 {}", singular)
        } else {
            format!("{} {}", count, plural)
        })
    })
}

/// Storage text for one location, see [`format_storage_duration_with`]
pub fn format_storage_duration(method: &StorageMethod) -> String {
    format_storage_duration_with(method, DEFAULT_UNSPECIFIED_STORAGE_TEXT)
}

/// Storage text for one location
///
/// A note that says something other than the parsed duration wins ("in an
/// airtight container"). Without a parseable duration the note is used, then
/// `unspecified`.
pub fn format_storage_duration_with(method: &StorageMethod, unspecified: &str) -> String {
    let parsed = method.duration.as_deref().and_then(parse_iso_duration);
    let notes = method
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());

    match (parsed, notes) {
        (Some(parsed), Some(notes)) if notes != parsed => {
            trace!("Storage note '{}' overrides '{}'", notes, parsed);
            notes.to_string()
        }
        (Some(parsed), _) => parsed,
        (None, Some(notes)) => notes.to_string(),
        (None, None) => {
            debug!(
                "No readable storage duration in {:?}, using '{}'",
                method.duration, unspecified
            );
            unspecified.to_string()
        }
    }
}

/// Minutes a duration contributes to the recipe total
pub fn duration_minutes(duration: &StepDuration) -> f64 {
    match duration {
        StepDuration::Minutes(minutes) => *minutes,
        StepDuration::Range {
            min_minutes,
            max_minutes,
        } => (min_minutes + max_minutes) / 2.0,
        StepDuration::HoursMinutes { hours, minutes } => {
            hours.unwrap_or(0.0) * 60.0 + minutes.unwrap_or(0.0)
        }
    }
}

/// Sum the timing of all structured steps, in whole minutes
///
/// Ranges count as their midpoint; rounding happens once on the grand total.
/// A total that is not positive means no total time is known.
pub fn total_instruction_minutes(instructions: &[InstructionEntry]) -> Option<u32> {
    let total: f64 = instructions
        .iter()
        .filter_map(|entry| match entry {
            InstructionEntry::Structured(step) => step.timing.as_ref()?.duration.as_ref(),
            InstructionEntry::PlainText(_) => None,
        })
        .map(duration_minutes)
        .filter(|minutes| minutes.is_finite())
        .sum();

    trace!("Instruction timings sum to {} minutes", total);
    total_minutes(total)
}

/// Round a minute total once; `None` below 1 minute or past [`MAX_TOTAL_MINUTES`]
pub fn total_minutes(minutes: f64) -> Option<u32> {
    let rounded = minutes.round();
    if (1.0..=MAX_TOTAL_MINUTES).contains(&rounded) {
        Some(rounded as u32)
    } else {
        if rounded > MAX_TOTAL_MINUTES {
            debug!("Total of {} minutes is out of range, omitting it", minutes);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe_model::Step;

    #[test]
    fn test_format_single_minutes() {
        let minutes = |m: f64| format_timing(&Timing::of(StepDuration::Minutes(m)));
        assert_eq!(minutes(45.0).as_deref(), Some("45m"));
        assert_eq!(minutes(60.0).as_deref(), Some("1h"));
        assert_eq!(minutes(90.0).as_deref(), Some("1h 30m"));
    }

    #[test]
    fn test_format_range_and_legacy_pair() {
        let range = Timing::of(StepDuration::Range {
            min_minutes: 10.0,
            max_minutes: 15.0,
        });
        assert_eq!(format_timing(&range).as_deref(), Some("10-15m"));

        let pair = Timing::of(StepDuration::HoursMinutes {
            hours: Some(1.0),
            minutes: Some(20.0),
        });
        assert_eq!(format_timing(&pair).as_deref(), Some("1h 20m"));

        let hours_only = Timing::of(StepDuration::HoursMinutes {
            hours: Some(2.0),
            minutes: Some(0.0),
        });
        assert_eq!(format_timing(&hours_only).as_deref(), Some("2h"));
    }

    #[test]
    fn test_format_cue_fallbacks() {
        let cue_only = Timing::default().with_cue("until golden");
        assert_eq!(format_timing(&cue_only).as_deref(), Some("until golden"));

        let empty_pair = Timing::of(StepDuration::HoursMinutes {
            hours: None,
            minutes: Some(0.0),
        })
        .with_cue("until set");
        assert_eq!(format_timing(&empty_pair).as_deref(), Some("until set"));

        assert_eq!(format_timing(&Timing::default()), None);
    }

    #[test]
    fn test_passive_suffix() {
        let timing = Timing::of(StepDuration::Minutes(30.0)).passive();
        assert_eq!(format_timing(&timing).as_deref(), Some("30m (passive)"));

        let cue = Timing::default().with_cue("until doubled").passive();
        assert_eq!(format_timing(&cue).as_deref(), Some("until doubled (passive)"));

        assert_eq!(format_timing(&Timing::default().passive()), None);
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(45), "45 min");
        assert_eq!(format_minutes(120), "2 hr");
        assert_eq!(format_minutes(75), "1 hr 15 min");
        assert_eq!(format_minutes(0), "0 min");
    }

    #[test]
    fn test_parse_iso_duration() {
        assert_eq!(parse_iso_duration("P3D").as_deref(), Some("3 days"));
        assert_eq!(parse_iso_duration("P1D").as_deref(), Some("1 day"));
        assert_eq!(parse_iso_duration("P1W").as_deref(), Some("1 week"));
        assert_eq!(parse_iso_duration("P2M").as_deref(), Some("2 months"));
        assert_eq!(parse_iso_duration("PT4H").as_deref(), Some("4 hours"));
        assert_eq!(parse_iso_duration("PT1H").as_deref(), Some("1 hour"));
        assert_eq!(parse_iso_duration("PT30M"), None);
        assert_eq!(parse_iso_duration("a while"), None);
    }

    #[test]
    fn test_storage_note_overrides_parsed_duration() {
        let method = StorageMethod::new("P3D").with_notes("in an airtight container");
        assert_eq!(format_storage_duration(&method), "in an airtight container");

        let same = StorageMethod::new("P3D").with_notes("3 days");
        assert_eq!(format_storage_duration(&same), "3 days");
    }

    #[test]
    fn test_storage_fallbacks() {
        assert_eq!(format_storage_duration(&StorageMethod::new("P1W")), "1 week");

        let unreadable = StorageMethod::new("forever").with_notes("keeps well");
        assert_eq!(format_storage_duration(&unreadable), "keeps well");

        assert_eq!(format_storage_duration(&StorageMethod::default()), "unspecified");
        assert_eq!(
            format_storage_duration_with(&StorageMethod::default(), "n/a"),
            "n/a"
        );
    }

    #[test]
    fn test_total_instruction_minutes() {
        let steps = vec![
            InstructionEntry::PlainText("Mix".to_string()),
            InstructionEntry::Structured(
                Step::new("Simmer").with_timing(Timing::of(StepDuration::Minutes(20.0))),
            ),
            InstructionEntry::Structured(Step::new("Rest").with_timing(Timing::of(
                StepDuration::Range {
                    min_minutes: 5.0,
                    max_minutes: 10.0,
                },
            ))),
            InstructionEntry::Structured(Step::new("Bake").with_timing(Timing::of(
                StepDuration::HoursMinutes {
                    hours: Some(1.0),
                    minutes: Some(0.0),
                },
            ))),
            InstructionEntry::Structured(Step::new("Serve")),
        ];
        // 20 + 7.5 + 60, rounded once
        assert_eq!(total_instruction_minutes(&steps), Some(88));
    }

    #[test]
    fn test_range_midpoints_round_at_the_end() {
        let half = || {
            InstructionEntry::Structured(Step::new("Wait").with_timing(Timing::of(
                StepDuration::Range {
                    min_minutes: 1.0,
                    max_minutes: 2.0,
                },
            )))
        };
        // 1.5 + 1.5 = 3, not round(1.5) + round(1.5) = 4
        assert_eq!(total_instruction_minutes(&[half(), half()]), Some(3));
    }

    #[test]
    fn test_zero_total_is_absent() {
        assert_eq!(total_instruction_minutes(&[]), None);
        let plain = vec![InstructionEntry::PlainText("Stir".to_string())];
        assert_eq!(total_instruction_minutes(&plain), None);
    }

    #[test]
    fn test_out_of_range_total_is_absent() {
        let endless = vec![InstructionEntry::Structured(
            Step::new("Age").with_timing(Timing::of(StepDuration::Minutes(1e300))),
        )];
        assert_eq!(total_instruction_minutes(&endless), None);

        assert_eq!(total_minutes(MAX_TOTAL_MINUTES), Some(u32::MAX));
        assert_eq!(total_minutes(MAX_TOTAL_MINUTES + 1.0), None);
        assert_eq!(total_minutes(0.4), None);
        assert_eq!(total_minutes(89.6), Some(90));
    }
}
