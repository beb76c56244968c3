//! Scheduling configuration loaded via OrthoConfig.
//!
//! The daily slot grid is configuration data, not derived: deployments can
//! override the labels (and the notification feed cap) through the
//! environment without touching the domain.

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{DEFAULT_FEED_LIMIT, ScheduleTemplate, SchedulingValidationError};

/// Configuration values controlling the slot grid and feed caps.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SCHEDULING")]
pub struct SchedulingSettings {
    /// Optional override of the daily grid labels (`HH:MM`, grid order).
    pub slot_labels: Option<Vec<String>>,
    /// Optional override of the notification feed cap.
    pub feed_limit: Option<i64>,
}

impl SchedulingSettings {
    /// Build the slot grid, falling back to the default hourly template.
    pub fn schedule_template(&self) -> Result<ScheduleTemplate, SchedulingValidationError> {
        self.slot_labels
            .as_deref()
            .map_or_else(|| Ok(ScheduleTemplate::default_grid()), ScheduleTemplate::parse)
    }

    /// Return the configured feed cap, falling back to the default.
    pub fn feed_limit(&self) -> i64 {
        self.feed_limit.unwrap_or(DEFAULT_FEED_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for scheduling configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> SchedulingSettings {
        SchedulingSettings::load_from_iter([OsString::from("backend")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("SCHEDULING_SLOT_LABELS", None::<String>),
            ("SCHEDULING_FEED_LIMIT", None::<String>),
        ]);

        let settings = load_from_empty_args();
        let template = settings.schedule_template().expect("default grid is valid");

        assert_eq!(template, ScheduleTemplate::default_grid());
        assert_eq!(settings.feed_limit(), DEFAULT_FEED_LIMIT);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("SCHEDULING_SLOT_LABELS", None::<String>),
            ("SCHEDULING_FEED_LIMIT", Some("50".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.feed_limit(), 50);
    }

    #[rstest]
    fn explicit_labels_build_a_custom_grid() {
        let settings = SchedulingSettings {
            slot_labels: Some(vec![
                "09:00".to_owned(),
                "09:30".to_owned(),
                "10:00".to_owned(),
            ]),
            feed_limit: None,
        };

        let template = settings.schedule_template().expect("labels parse");
        let labels: Vec<String> = template.labels().iter().map(ToString::to_string).collect();
        assert_eq!(labels, vec!["09:00", "09:30", "10:00"]);
    }

    #[rstest]
    fn malformed_labels_are_rejected() {
        let settings = SchedulingSettings {
            slot_labels: Some(vec!["25:00".to_owned()]),
            feed_limit: None,
        };

        assert!(matches!(
            settings.schedule_template(),
            Err(SchedulingValidationError::InvalidSlotLabel { .. })
        ));
    }
}
