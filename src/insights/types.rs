//! Insight and recommendation records

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Where an insight or recommendation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InsightKind {
    Pattern,
    Lifestyle,
    Correlation,
    Trend,
    Medication,
    Tracking,
    Diet,
    Symptom,
}

impl InsightKind {
    /// Prefix used for generated ids
    pub fn family(&self) -> &'static str {
        match self {
            InsightKind::Pattern => "pattern",
            InsightKind::Lifestyle => "lifestyle",
            InsightKind::Correlation => "correlation",
            InsightKind::Trend => "trend",
            InsightKind::Medication => "medication",
            InsightKind::Tracking => "tracking",
            InsightKind::Diet => "diet",
            InsightKind::Symptom => "symptom",
        }
    }
}

/// Ordering puts `High` first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "HIGH"),
            Priority::Medium => write!(f, "MEDIUM"),
            Priority::Low => write!(f, "LOW"),
        }
    }
}

/// An actionable finding
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightRecommendation {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: InsightKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    pub evidence: Vec<String>,
    pub action_steps: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl InsightRecommendation {
    /// Start a record with a fresh `{family}-{uuid}` id
    pub fn generated(kind: InsightKind, priority: Priority, title: impl Into<String>) -> Self {
        let id = format!("{}-{}", kind.family(), uuid::Uuid::new_v4());
        Self::with_id(id, kind, priority, title)
    }

    /// Start a record with a fixed id
    pub fn with_id(
        id: impl Into<String>,
        kind: InsightKind,
        priority: Priority,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            category: None,
            priority,
            title: title.into(),
            description: String::new(),
            confidence: None,
            evidence: Vec::new(),
            action_steps: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence.clamp(0.0, 1.0));
        self
    }

    pub fn evidence<I, S>(mut self, evidence: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.evidence.extend(evidence.into_iter().map(Into::into));
        self
    }

    pub fn actions<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.action_steps.extend(steps.into_iter().map(Into::into));
        self
    }
}

/// Stable sort, `High` first
pub fn sort_by_priority(items: &mut [InsightRecommendation]) {
    items.sort_by_key(|item| item.priority);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_id_prefix() {
        let insight = InsightRecommendation::generated(InsightKind::Trend, Priority::Low, "Pain Trend");
        assert!(insight.id.starts_with("trend-"));
        assert_eq!(insight.id.len(), "trend-".len() + 36);
    }

    #[test]
    fn test_priority_sort_is_stable() {
        let mut items = vec![
            InsightRecommendation::with_id("a", InsightKind::Diet, Priority::Low, "a"),
            InsightRecommendation::with_id("b", InsightKind::Diet, Priority::High, "b"),
            InsightRecommendation::with_id("c", InsightKind::Diet, Priority::Medium, "c"),
            InsightRecommendation::with_id("d", InsightKind::Diet, Priority::High, "d"),
        ];
        sort_by_priority(&mut items);

        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d", "c", "a"]);
    }

    #[test]
    fn test_serialized_field_names() {
        let item = InsightRecommendation::with_id(
            "low_fiber_intake",
            InsightKind::Diet,
            Priority::Medium,
            "Increase Fiber Intake",
        )
        .actions(["Add more whole grains, fruits and vegetables"]);

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "DIET");
        assert_eq!(json["priority"], "MEDIUM");
        assert!(json.get("actionSteps").is_some());
        assert!(json.get("confidence").is_none());
    }
}
