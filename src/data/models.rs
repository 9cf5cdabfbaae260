//! Data models for form briefs, history records, and identities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix carried by every locally synthesized identity uid
pub const OFFLINE_UID_PREFIX: &str = "offline_";

/// Hero section layout variants offered by the form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HeroLayout {
    Centered,
    Split,
    Minimal,
}

impl HeroLayout {
    pub fn label(&self) -> &'static str {
        match self {
            HeroLayout::Centered => "centered",
            HeroLayout::Split => "split",
            HeroLayout::Minimal => "minimal",
        }
    }
}

/// Color theme variants offered by the form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    Modern,
    Bold,
    Elegant,
    Playful,
}

impl ColorTheme {
    pub fn label(&self) -> &'static str {
        match self {
            ColorTheme::Modern => "modern",
            ColorTheme::Bold => "bold",
            ColorTheme::Elegant => "elegant",
            ColorTheme::Playful => "playful",
        }
    }
}

/// User-authored content brief describing the desired landing page
///
/// Field names serialize in camelCase to stay wire-compatible with stored
/// briefs from earlier releases.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormSpec {
    /// Product/page name, also the source of the project slug
    pub page_name: String,
    /// Page-type category (free text, e.g. "SaaS Product Launch")
    #[serde(rename = "type")]
    pub page_type: String,
    /// Free-text description of the product
    pub description: String,
    /// Free-text target audience
    pub target_audience: String,
    /// Exactly three benefit strings, in display order
    pub benefits: [String; 3],
    /// Hero section layout variant
    pub hero_layout: HeroLayout,
    /// Color theme variant
    pub color_theme: ColorTheme,
}

impl FormSpec {
    /// Starting brief shown in a fresh editor session
    pub fn initial() -> Self {
        Self {
            page_name: "My Awesome Product".to_string(),
            page_type: "SaaS Product Launch".to_string(),
            description:
                "An AI-powered tool that automates social media scheduling for busy marketers."
                    .to_string(),
            target_audience: "Freelancers and small business owners".to_string(),
            benefits: [
                "Save 10 hours a week".to_string(),
                "Increase engagement by 40%".to_string(),
                "Automated analytics reports".to_string(),
            ],
            hero_layout: HeroLayout::Centered,
            color_theme: ColorTheme::Modern,
        }
    }
}

/// Persisted/cached projection of a generation result
///
/// History lists are ordered newest-first; the remote store is authoritative
/// when reachable and the local snapshot holds at most the 20 most recent
/// records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryRecord {
    /// Opaque identifier (remote page id, or a fresh uuid for local-only records)
    pub id: String,
    /// Creation time
    pub timestamp: DateTime<Utc>,
    /// The brief that produced the page
    pub data: FormSpec,
    /// The generated HTML document
    pub html: String,
    /// Public URL, present only when remotely published
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    /// Owning identity uid, absent for local-only records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_uid: Option<String>,
}

impl HistoryRecord {
    /// Create a local-only record for the fallback path
    pub fn local(data: FormSpec, html: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            data,
            html,
            live_url: None,
            owner_uid: None,
        }
    }
}

/// Resolved actor identity
///
/// `Offline` identities are synthesized locally when the identity provider is
/// unreachable or unconfigured; they never round-trip to the remote store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Identity {
    Authenticated {
        uid: String,
        email: String,
        display_name: String,
    },
    Guest {
        uid: String,
    },
    Offline {
        uid: String,
        email: String,
        display_name: String,
        guest: bool,
    },
}

impl Identity {
    /// Synthesize an offline identity with a freshly generated local-only uid
    pub fn offline(email: impl Into<String>, display_name: impl Into<String>, guest: bool) -> Self {
        Identity::Offline {
            uid: format!("{}{}", OFFLINE_UID_PREFIX, Uuid::new_v4().as_simple()),
            email: email.into(),
            display_name: display_name.into(),
            guest,
        }
    }

    pub fn uid(&self) -> &str {
        match self {
            Identity::Authenticated { uid, .. }
            | Identity::Guest { uid }
            | Identity::Offline { uid, .. } => uid,
        }
    }

    /// Whether this identity was synthesized locally and must not reach the
    /// remote store
    pub fn is_offline(&self) -> bool {
        matches!(self, Identity::Offline { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_spec_camel_case_wire_names() {
        let spec = FormSpec::initial();
        let json = serde_json::to_value(&spec).unwrap();
        assert!(json.get("pageName").is_some());
        assert!(json.get("targetAudience").is_some());
        assert!(json.get("heroLayout").is_some());
        assert!(json.get("colorTheme").is_some());
        assert_eq!(json["type"], "SaaS Product Launch");
        assert_eq!(json["heroLayout"], "centered");
    }

    #[test]
    fn test_form_spec_roundtrip() {
        let spec = FormSpec::initial();
        let json = serde_json::to_string(&spec).unwrap();
        let back: FormSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);
    }

    #[test]
    fn test_offline_identity_is_tagged() {
        let id = Identity::offline("guest@offline.local", "Guest (Offline)", true);
        assert!(id.is_offline());
        assert!(id.uid().starts_with(OFFLINE_UID_PREFIX));
    }

    #[test]
    fn test_authenticated_identity_is_not_offline() {
        let id = Identity::Authenticated {
            uid: "user-1".to_string(),
            email: "a@b.c".to_string(),
            display_name: "A".to_string(),
        };
        assert!(!id.is_offline());
    }

    #[test]
    fn test_local_record_has_no_owner() {
        let rec = HistoryRecord::local(FormSpec::initial(), "<html></html>".to_string());
        assert!(rec.owner_uid.is_none());
        assert!(rec.live_url.is_none());
        assert!(!rec.id.is_empty());
    }
}
