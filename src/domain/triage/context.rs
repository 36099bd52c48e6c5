//! Conversation Context
//!
//! The evolving state of a single triage conversation: message log, user
//! profile, detected symptoms, suggested conditions, recommended specialist,
//! urgency, nearby facilities and the emergency flag.
//!
//! Agents receive a context by value and hand back deltas; only the
//! contextual memory step folds those deltas into a new canonical context.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::MessageId;

use super::health::HealthRecord;

/// Maximum number of messages retained in a conversation log.
pub const MAX_MESSAGES: usize = 20;

// ════════════════════════════════════════════════════════════════════════════════
// Messages
// ════════════════════════════════════════════════════════════════════════════════

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One entry of the conversation log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Creates a message stamped with the current time.
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            text: text.into(),
            sender,
            timestamp: Utc::now(),
        }
    }

    /// Creates a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    /// Creates a bot message.
    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Profile
// ════════════════════════════════════════════════════════════════════════════════

/// Optional user profile used to personalise analysis.
///
/// Every field is optional so that a partial profile can be merged into an
/// existing one without clearing what was already known.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub past_conditions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergies: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medications: Option<Vec<String>>,
}

impl UserInfo {
    /// Shallow merge: fields present in `patch` override, absent fields are kept.
    pub fn merge(&mut self, patch: UserInfo) {
        if patch.age.is_some() {
            self.age = patch.age;
        }
        if patch.gender.is_some() {
            self.gender = patch.gender;
        }
        if patch.past_conditions.is_some() {
            self.past_conditions = patch.past_conditions;
        }
        if patch.allergies.is_some() {
            self.allergies = patch.allergies;
        }
        if patch.medications.is_some() {
            self.medications = patch.medications;
        }
    }

    /// Returns true when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == UserInfo::default()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Symptoms and conditions
// ════════════════════════════════════════════════════════════════════════════════

/// Self-reported severity of a symptom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
    Unknown,
}

/// A symptom as described by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symptom {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relievers: Option<Vec<String>>,
    pub date: DateTime<Utc>,
}

impl Symptom {
    /// A free-text symptom report of unknown severity, dated now.
    pub fn reported(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            severity: Some(Severity::Unknown),
            duration: None,
            location: None,
            triggers: None,
            relievers: None,
            date: Utc::now(),
        }
    }
}

/// Likelihood of a suggested condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Likelihood {
    #[serde(rename = "faible", alias = "low")]
    Low,
    #[serde(rename = "modéré", alias = "modere", alias = "medium", alias = "moderate")]
    Moderate,
    #[serde(rename = "élevé", alias = "eleve", alias = "high")]
    High,
}

impl fmt::Display for Likelihood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Likelihood::Low => "faible",
            Likelihood::Moderate => "modéré",
            Likelihood::High => "élevé",
        };
        write!(f, "{}", s)
    }
}

/// Urgency rating of the described symptoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
    Emergency,
}

impl fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UrgencyLevel::Low => "low",
            UrgencyLevel::Medium => "medium",
            UrgencyLevel::High => "high",
            UrgencyLevel::Emergency => "emergency",
        };
        write!(f, "{}", s)
    }
}

/// A candidate medical condition.
///
/// The shape varies slightly depending on who produced it: analysis yields a
/// probability, keyword triage may attach an urgency level, a specialist type
/// or matched symptoms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<Likelihood>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency_level: Option<UrgencyLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialist_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<Vec<String>>,
}

impl Condition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        probability: Likelihood,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            probability: Some(probability),
            urgency_level: None,
            specialist_type: None,
            symptoms: None,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Specialists and facilities
// ════════════════════════════════════════════════════════════════════════════════

/// French titles for the specialty identifiers used across analysis and the
/// facility catalog.
const SPECIALTY_TITLES: &[(&str, &str)] = &[
    ("general", "Médecin généraliste"),
    ("neurologist", "Neurologue"),
    ("cardiologist", "Cardiologue"),
    ("dermatologist", "Dermatologue"),
    ("ophthalmologist", "Ophtalmologue"),
    ("oncologist", "Oncologue"),
    ("pediatrician", "Pédiatre"),
    ("emergency", "Médecin urgentiste"),
];

/// Title used when a specialty identifier is not in the table.
const UNKNOWN_SPECIALTY_TITLE: &str = "spécialiste";

/// Medical specialty descriptor recommended to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specialist {
    #[serde(rename = "type")]
    pub specialist_type: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl Specialist {
    pub fn new(
        specialist_type: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            specialist_type: specialist_type.into(),
            title: title.into(),
            description: description.into(),
        }
    }

    /// Specialist for a bare type identifier such as `"cardiologist"`.
    ///
    /// The identifier is matched case-insensitively; an unknown one keeps its
    /// type but gets the generic title.
    pub fn for_type(specialist_type: &str) -> Self {
        let specialist_type = specialist_type.trim().to_lowercase();
        let title = SPECIALTY_TITLES
            .iter()
            .find(|(known, _)| *known == specialist_type)
            .map_or(UNKNOWN_SPECIALTY_TITLE, |(_, title)| *title);
        Self::new(specialist_type, title, "")
    }

    /// Default recommendation when no specialty can be resolved.
    pub fn general_practitioner() -> Self {
        Self::new(
            "general",
            "Médecin généraliste",
            "Un médecin généraliste est un professionnel de santé qui prend en charge le suivi médical global des patients et les oriente vers des spécialistes si nécessaire.",
        )
    }
}

/// Caller position as reported by a location provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}

/// Map coordinates of a facility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// A medical establishment candidate for an in-person visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub name: String,
    pub address: String,
    pub specialties: Vec<String>,
    /// Distance from the caller, in kilometres.
    pub distance: f64,
    pub rating: f32,
    pub location: LatLng,
}

impl Facility {
    /// Case-insensitive exact match on the specialty list.
    pub fn offers(&self, specialist_type: &str) -> bool {
        self.specialties
            .iter()
            .any(|s| s.to_lowercase() == specialist_type.to_lowercase())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Conversation context
// ════════════════════════════════════════════════════════════════════════════════

/// Accumulated state of one conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationContext {
    pub messages: Vec<ChatMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_info: Option<UserInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub current_symptoms: Vec<Symptom>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggested_conditions: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_specialist: Option<Specialist>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nearby_facilities: Option<Vec<Facility>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency_level: Option<UrgencyLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency_recommendations: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_detected: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_location: Option<GeoPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_record: Option<HealthRecord>,
}

impl ConversationContext {
    /// Create an empty context for a new conversation
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message, dropping the oldest entries beyond [`MAX_MESSAGES`].
    pub fn push_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
        if self.messages.len() > MAX_MESSAGES {
            let overflow = self.messages.len() - MAX_MESSAGES;
            self.messages.drain(..overflow);
        }
    }

    /// Shallow-merge a partial profile into the stored one.
    pub fn update_user_info(&mut self, patch: UserInfo) {
        self.user_info.get_or_insert_with(UserInfo::default).merge(patch);
    }

    /// Profile to hand to collaborators (empty when none is known).
    pub fn user_info_or_default(&self) -> UserInfo {
        self.user_info.clone().unwrap_or_default()
    }

    /// Description of the first recorded symptom, if any.
    pub fn primary_symptom(&self) -> Option<&str> {
        self.current_symptoms
            .first()
            .map(|s| s.description.as_str())
            .filter(|d| !d.is_empty())
    }

    /// Text of the most recent user message.
    pub fn last_user_message(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.sender == Sender::User)
            .map(|m| m.text.as_str())
    }

    /// Whether an emergency has been flagged during this conversation.
    pub fn is_emergency(&self) -> bool {
        self.emergency_detected.unwrap_or(false)
    }
}
