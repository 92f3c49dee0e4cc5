//! Alert summary fixtures and the relative-time labels shown beside them.

use crate::feed::generator::age_to_label;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Critical,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertSummary {
    pub icon: &'static str,
    pub title: &'static str,
    pub age_minutes: u32,
    pub severity: AlertSeverity,
}

impl AlertSummary {
    pub fn time_label(&self) -> String {
        age_to_label(self.age_minutes)
    }
}

/// Placeholder alerts on the fleet overview. No generator feeds this list.
pub fn alert_summary_fixtures() -> Vec<AlertSummary> {
    vec![
        AlertSummary {
            icon: "🔥",
            title: "Fire detected in Zone 3",
            age_minutes: 2,
            severity: AlertSeverity::Critical,
        },
        AlertSummary {
            icon: "⚠️",
            title: "PPE violation - Loading Bay 2",
            age_minutes: 8,
            severity: AlertSeverity::Warning,
        },
        AlertSummary {
            icon: "🦺",
            title: "Safety check completed",
            age_minutes: 22,
            severity: AlertSeverity::Info,
        },
    ]
}

/// Labels next to the dashboard's active alert cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlertTimes {
    pub fire: String,
    pub ppe: String,
    pub intruder: String,
}

impl AlertTimes {
    pub const FIRE_MINUTES: u32 = 2;
    pub const PPE_MINUTES: u32 = 8;
    pub const INTRUDER_MINUTES: u32 = 15;

    pub fn current() -> Self {
        Self {
            fire: age_to_label(Self::FIRE_MINUTES),
            ppe: age_to_label(Self::PPE_MINUTES),
            intruder: age_to_label(Self::INTRUDER_MINUTES),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_are_ordered_by_severity() {
        let alerts = alert_summary_fixtures();
        assert_eq!(alerts.len(), 3);
        assert_eq!(alerts[0].severity, AlertSeverity::Critical);
        assert_eq!(alerts[1].time_label(), "8 minutes ago");
    }

    #[test]
    fn alert_times_use_age_labels() {
        let times = AlertTimes::current();
        assert_eq!(times.fire, "2 minutes ago");
        assert_eq!(times.ppe, "8 minutes ago");
        assert_eq!(times.intruder, "15 minutes ago");
    }
}
