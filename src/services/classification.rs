use crate::db::models::{AlertType, Severity};

/// Object labels that count as threats.
pub const THREAT_LABELS: &[&str] = &[
    "aggressor",
    "blood",
    "hand",
    "knife_deploy",
    "knife_weapon",
    "person",
    "stabbing",
    "victim",
    "handgun",
    "pistol",
    "rifle",
    "shotgun",
    "violence",
];

/// Any of these raises severity to high.
pub const HIGH_SEVERITY_LABELS: &[&str] = &["handgun", "pistol", "rifle", "shotgun", "violence"];

/// Any of these makes the alert a weapon alert.
pub const WEAPON_LABELS: &[&str] = &[
    "handgun",
    "pistol",
    "rifle",
    "shotgun",
    "knife_weapon",
    "knife_deploy",
];

/// Outcome of classifying a detection batch that matched at least one threat label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Matched labels, lowercased, in input order
    pub matched: Vec<String>,
    pub severity: Severity,
    pub alert_type: AlertType,
}

impl Classification {
    pub fn message(&self) -> String {
        format!("Detected: {}", self.matched.join(", "))
    }
}

/// Classify raw detector labels.
///
/// Returns `None` when no label is a known threat. Severity and alert type are
/// decided independently over the whole matched set.
pub fn classify<S: AsRef<str>>(detections: &[S]) -> Option<Classification> {
    let matched: Vec<String> = detections
        .iter()
        .map(|label| label.as_ref().to_lowercase())
        .filter(|label| THREAT_LABELS.contains(&label.as_str()))
        .collect();

    if matched.is_empty() {
        return None;
    }

    let any_of = |set: &[&str]| matched.iter().any(|label| set.contains(&label.as_str()));

    let severity = if any_of(HIGH_SEVERITY_LABELS) {
        Severity::High
    } else {
        Severity::Medium
    };

    let alert_type = if any_of(WEAPON_LABELS) {
        AlertType::Weapon
    } else {
        AlertType::Threat
    };

    Some(Classification {
        matched,
        severity,
        alert_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_among_noise_is_medium_threat() {
        let result = classify(&["Person", "Car"]).unwrap();
        assert_eq!(result.matched, vec!["person"]);
        assert_eq!(result.severity, Severity::Medium);
        assert_eq!(result.alert_type, AlertType::Threat);
        assert_eq!(result.message(), "Detected: person");
    }

    #[test]
    fn firearm_is_high_weapon() {
        let result = classify(&["pistol", "person"]).unwrap();
        assert_eq!(result.matched, vec!["pistol", "person"]);
        assert_eq!(result.severity, Severity::High);
        assert_eq!(result.alert_type, AlertType::Weapon);
        assert_eq!(result.message(), "Detected: pistol, person");
    }

    #[test]
    fn unknown_labels_are_no_threat() {
        assert_eq!(classify(&["car", "tree"]), None);
        assert_eq!(classify::<&str>(&[]), None);
    }

    #[test]
    fn knife_is_weapon_but_medium() {
        let result = classify(&["KNIFE_WEAPON"]).unwrap();
        assert_eq!(result.severity, Severity::Medium);
        assert_eq!(result.alert_type, AlertType::Weapon);
    }

    #[test]
    fn violence_is_high_but_not_weapon() {
        let result = classify(&["violence", "victim"]).unwrap();
        assert_eq!(result.severity, Severity::High);
        assert_eq!(result.alert_type, AlertType::Threat);
    }

    #[test]
    fn duplicates_and_order_are_kept() {
        let result = classify(&["Hand", "tree", "hand", "Blood"]).unwrap();
        assert_eq!(result.matched, vec!["hand", "hand", "blood"]);
    }

    #[test]
    fn label_sets_are_consistent() {
        for label in HIGH_SEVERITY_LABELS.iter().chain(WEAPON_LABELS) {
            assert!(THREAT_LABELS.contains(label), "{} is not a threat label", label);
        }
    }
}
