//! Partial context updates and the memory merge.

use super::context::{
    ChatMessage, Condition, ConversationContext, Facility, GeoPoint, Specialist, Symptom,
    UrgencyLevel, UserInfo,
};
use super::health::HealthRecord;

/// Fields to fold into a [`ConversationContext`].
///
/// `None` leaves the context field as it is. Present fields overwrite, except
/// `message` (appended) and `user_info` (shallow-merged).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextDelta {
    pub message: Option<ChatMessage>,
    pub current_symptoms: Option<Vec<Symptom>>,
    pub suggested_conditions: Option<Vec<Condition>>,
    pub recommended_specialist: Option<Specialist>,
    pub nearby_facilities: Option<Vec<Facility>>,
    pub user_location: Option<GeoPoint>,
    pub urgency_level: Option<UrgencyLevel>,
    pub urgency_recommendations: Option<String>,
    pub is_emergency: Option<bool>,
    pub user_info: Option<UserInfo>,
    pub health_record: Option<HealthRecord>,
}

impl ContextDelta {
    pub fn is_empty(&self) -> bool {
        *self == ContextDelta::default()
    }
}

impl ConversationContext {
    /// Applies `delta` in place.
    pub fn apply(&mut self, delta: ContextDelta) {
        if let Some(message) = delta.message {
            self.push_message(message);
        }
        if let Some(symptoms) = delta.current_symptoms {
            self.current_symptoms = symptoms;
        }
        if let Some(conditions) = delta.suggested_conditions {
            self.suggested_conditions = conditions;
        }
        if let Some(specialist) = delta.recommended_specialist {
            self.recommended_specialist = Some(specialist);
        }
        if let Some(facilities) = delta.nearby_facilities {
            self.nearby_facilities = Some(facilities);
        }
        if let Some(location) = delta.user_location {
            self.user_location = Some(location);
        }
        if let Some(level) = delta.urgency_level {
            self.urgency_level = Some(level);
        }
        if let Some(recommendations) = delta.urgency_recommendations {
            self.urgency_recommendations = Some(recommendations);
        }
        if let Some(flag) = delta.is_emergency {
            self.emergency_detected = Some(flag);
        }
        if let Some(patch) = delta.user_info {
            self.update_user_info(patch);
        }
        if let Some(record) = delta.health_record {
            self.health_record = Some(record);
        }
    }

    /// Returns a new context with `delta` applied; `self` is untouched.
    pub fn merged(&self, delta: ContextDelta) -> ConversationContext {
        let mut next = self.clone();
        next.apply(delta);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::triage::context::{LatLng, MAX_MESSAGES};
    use proptest::prelude::*;

    fn facility(name: &str, distance: f64) -> Facility {
        Facility {
            name: name.to_string(),
            address: "Tunis".to_string(),
            specialties: vec!["general".to_string()],
            distance,
            rating: 4.0,
            location: LatLng { lat: 36.8, lng: 10.1 },
        }
    }

    #[test]
    fn merged_leaves_source_untouched() {
        let context = ConversationContext::new();

        let next = context.merged(ContextDelta {
            urgency_level: Some(UrgencyLevel::High),
            ..Default::default()
        });

        assert_eq!(context.urgency_level, None);
        assert_eq!(next.urgency_level, Some(UrgencyLevel::High));
    }

    #[test]
    fn empty_delta_is_identity() {
        let mut context = ConversationContext::new();
        context.push_message(ChatMessage::user("bonjour"));
        context.recommended_specialist = Some(Specialist::general_practitioner());

        assert_eq!(context.merged(ContextDelta::default()), context);
    }

    #[test]
    fn absent_fields_do_not_clear_existing_values() {
        let mut context = ConversationContext::new();
        context.recommended_specialist = Some(Specialist::general_practitioner());
        context.current_symptoms = vec![Symptom::reported("toux")];

        let next = context.merged(ContextDelta {
            urgency_level: Some(UrgencyLevel::Low),
            ..Default::default()
        });

        assert!(next.recommended_specialist.is_some());
        assert_eq!(next.current_symptoms.len(), 1);
    }

    #[test]
    fn message_is_appended_and_log_stays_capped() {
        let mut context = ConversationContext::new();
        for i in 0..MAX_MESSAGES {
            context.push_message(ChatMessage::user(format!("m{}", i)));
        }

        let next = context.merged(ContextDelta {
            message: Some(ChatMessage::bot("suite")),
            ..Default::default()
        });

        assert_eq!(next.messages.len(), MAX_MESSAGES);
        assert_eq!(next.messages[0].text, "m1");
        assert_eq!(next.messages.last().unwrap().text, "suite");
    }

    #[test]
    fn user_info_is_shallow_merged() {
        let mut context = ConversationContext::new();
        context.update_user_info(UserInfo {
            age: Some(40),
            ..Default::default()
        });

        let next = context.merged(ContextDelta {
            user_info: Some(UserInfo {
                gender: Some("femme".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        });

        let info = next.user_info.unwrap();
        assert_eq!(info.age, Some(40));
        assert_eq!(info.gender.as_deref(), Some("femme"));
    }

    #[test]
    fn overwrite_fields_are_not_cumulative() {
        let delta = ContextDelta {
            recommended_specialist: Some(Specialist::general_practitioner()),
            nearby_facilities: Some(vec![facility("A", 1.0), facility("B", 2.0)]),
            ..Default::default()
        };

        let once = ConversationContext::new().merged(delta.clone());
        let twice = once.merged(delta);

        assert_eq!(once.recommended_specialist, twice.recommended_specialist);
        assert_eq!(once.nearby_facilities, twice.nearby_facilities);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Property: applying the same overwrite delta twice is the same as once.
        #[test]
        fn prop_overwrite_merge_is_idempotent(
            names in proptest::collection::vec("[A-Za-z ]{1,12}", 0..5),
            level in prop_oneof![
                Just(UrgencyLevel::Low),
                Just(UrgencyLevel::Medium),
                Just(UrgencyLevel::High),
                Just(UrgencyLevel::Emergency),
            ],
        ) {
            let delta = ContextDelta {
                nearby_facilities: Some(
                    names.iter().enumerate().map(|(i, n)| facility(n, i as f64)).collect(),
                ),
                urgency_level: Some(level),
                is_emergency: (level == UrgencyLevel::Emergency).then_some(true),
                ..Default::default()
            };

            let once = ConversationContext::new().merged(delta.clone());
            let twice = once.merged(delta);

            prop_assert_eq!(once, twice);
        }
    }
}
