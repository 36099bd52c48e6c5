//! AgentManager - Runs the triage pipeline for one conversation.
//!
//! Owns the six agents and the canonical [`ConversationContext`]. Every
//! non-memory step is followed by a contextual memory fold; the folded
//! context replaces the canonical one. A turn ends when the last agent names
//! no successor, when a stage would be re-entered, or when the hop ceiling
//! is hit.
//!
//! Callers must serialize calls against one manager (`&mut self` enforces
//! this within a task; the session registry wraps each manager in a mutex).

use std::sync::Arc;
use std::time::Duration;

use crate::adapters::analysis::MockAnalysisProvider;
use crate::adapters::geo::{FixedLocationProvider, MockFacilityLocator};
use crate::domain::foundation::ConversationId;
use crate::domain::triage::{
    AgentId, AgentInput, AgentPayload, ChatMessage, ConversationContext, Facility,
    FacilitySearchError, HealthInsights, HealthRecord, PipelineError, Specialist, TrackingData,
    TurnRouter, UserInfo, DEFAULT_MAX_HOPS,
};
use crate::ports::{AnalysisProvider, FacilityLocator, LocationProvider};

use super::agents::{
    messages, Agent, ContextualMemoryAgent, DiagnosticAgent, EmergencyAgent, GeoLocationAgent,
    HealthTrackerAgent, SpecialistRecommendationAgent,
};

/// External collaborators shared by every conversation.
#[derive(Clone)]
pub struct Collaborators {
    pub analysis: Arc<dyn AnalysisProvider>,
    pub location: Arc<dyn LocationProvider>,
    pub facilities: Arc<dyn FacilityLocator>,
}

impl Collaborators {
    pub fn new(
        analysis: Arc<dyn AnalysisProvider>,
        location: Arc<dyn LocationProvider>,
        facilities: Arc<dyn FacilityLocator>,
    ) -> Self {
        Self {
            analysis,
            location,
            facilities,
        }
    }

    /// Canned analysis, simulated Tunis position and facility catalog.
    pub fn demo() -> Self {
        Self::new(
            Arc::new(MockAnalysisProvider::new()),
            Arc::new(FixedLocationProvider::tunis()),
            Arc::new(MockFacilityLocator::tunis()),
        )
    }
}

/// Per-turn limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Maximum agent invocations in one turn.
    pub max_hops: usize,
    /// Deadline applied to each collaborator call.
    pub provider_timeout: Duration,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            max_hops: DEFAULT_MAX_HOPS,
            provider_timeout: Duration::from_secs(10),
        }
    }
}

/// Result of a user turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    pub response: String,
    pub context: ConversationContext,
}

/// Result of an on-demand facility lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct FacilitySearch {
    pub message: String,
    pub facilities: Vec<Facility>,
}

/// Result of a health-tracking update.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthTracking {
    pub message: String,
    pub record: HealthRecord,
    pub insights: HealthInsights,
}

pub struct AgentManager {
    id: ConversationId,
    diagnostic: DiagnosticAgent,
    specialist: SpecialistRecommendationAgent,
    emergency: EmergencyAgent,
    memory: ContextualMemoryAgent,
    geo: GeoLocationAgent,
    tracker: HealthTrackerAgent,
    context: ConversationContext,
    max_hops: usize,
}

impl AgentManager {
    pub fn new(id: ConversationId, collaborators: &Collaborators, settings: PipelineSettings) -> Self {
        let deadline = settings.provider_timeout;
        Self {
            id,
            diagnostic: DiagnosticAgent::new(collaborators.analysis.clone(), deadline),
            specialist: SpecialistRecommendationAgent::new(collaborators.analysis.clone(), deadline),
            emergency: EmergencyAgent::new(collaborators.analysis.clone(), deadline),
            memory: ContextualMemoryAgent::new(),
            geo: GeoLocationAgent::new(
                collaborators.location.clone(),
                collaborators.facilities.clone(),
                deadline,
            ),
            tracker: HealthTrackerAgent::new(),
            context: ConversationContext::new(),
            max_hops: settings.max_hops,
        }
    }

    pub fn id(&self) -> ConversationId {
        self.id
    }

    /// Read-only view of the live context.
    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    /// Owned copy of the live context.
    pub fn snapshot(&self) -> ConversationContext {
        self.context.clone()
    }

    /// Shallow-merges a partial profile into the context.
    pub fn update_user_profile(&mut self, patch: UserInfo) {
        self.context.update_user_info(patch);
    }

    fn agent(&self, id: AgentId) -> &dyn Agent {
        match id {
            AgentId::Diagnostic => &self.diagnostic,
            AgentId::SpecialistRecommendation => &self.specialist,
            AgentId::Emergency => &self.emergency,
            AgentId::ContextualMemory => &self.memory,
            AgentId::GeoLocation => &self.geo,
            AgentId::HealthTracker => &self.tracker,
        }
    }

    /// Runs one user turn. Never fails: a pipeline error becomes an apology.
    pub async fn process_user_message(&mut self, text: &str) -> TurnOutcome {
        self.context.push_message(ChatMessage::user(text));

        let mut router = TurnRouter::new(self.max_hops);
        let response = match self.run_turn(&mut router, text).await {
            Ok(response) => {
                tracing::info!(
                    conversation_id = %self.id,
                    hops = router.hops(),
                    chars = response.len(),
                    "Turn completed"
                );
                tracing::debug!(conversation_id = %self.id, trace = ?router.trace(), "Turn settled");
                response
            }
            Err(err) => {
                tracing::error!(
                    conversation_id = %self.id,
                    error = %err,
                    trace = ?router.trace(),
                    "Turn aborted"
                );
                messages::TURN_FAILED.to_string()
            }
        };

        self.context.push_message(ChatMessage::bot(response.clone()));
        TurnOutcome {
            response,
            context: self.context.clone(),
        }
    }

    async fn run_turn(
        &mut self,
        router: &mut TurnRouter,
        text: &str,
    ) -> Result<String, PipelineError> {
        let mut current = Some(AgentId::ENTRY);
        let mut payload = Some(AgentPayload::UserText(text.to_string()));
        let mut final_response = String::new();

        while let Some(agent_id) = current {
            router.enter(agent_id)?;
            tracing::debug!(conversation_id = %self.id, agent = %agent_id, hop = router.hops(), "Running agent");

            let input = AgentInput::new(self.context.clone()).with_optional_payload(payload.take());
            let result = self.agent(agent_id).process(input).await?;

            if agent_id == AgentId::ContextualMemory {
                if let Some(updated) = result.context_update() {
                    self.context = updated.clone();
                }
            } else {
                self.fold(result.data.clone()).await?;
            }

            if let Some(error) = &result.error {
                tracing::debug!(agent = %agent_id, error = %error, "Agent reported a soft failure");
            }
            if !result.message.is_empty() && !result.message.starts_with(messages::CONTEXT_UPDATED) {
                final_response = result.message;
            }

            current = router.resolve(result.next_agent);
            payload = result.data;
        }

        Ok(final_response)
    }

    /// Folds `data` into the canonical context through the memory agent.
    async fn fold(&mut self, data: Option<AgentPayload>) -> Result<(), PipelineError> {
        let input = AgentInput::new(self.context.clone()).with_optional_payload(data);
        let folded = self.memory.process(input).await?;
        match folded.data {
            Some(AgentPayload::ContextUpdate(updated)) => {
                self.context = *updated;
                Ok(())
            }
            _ => Err(PipelineError::MissingContextUpdate),
        }
    }

    /// Looks up facilities for the recommended specialist outside the main loop.
    ///
    /// An empty `specialist_type` searches for the recommended specialist;
    /// another type overrides it.
    pub async fn find_nearby_facilities(
        &mut self,
        specialist_type: &str,
    ) -> Result<FacilitySearch, FacilitySearchError> {
        let Some(recommended) = self.context.recommended_specialist.clone() else {
            return Err(FacilitySearchError::NoSpecialist);
        };

        let requested = specialist_type.trim();
        let specialist = if requested.is_empty()
            || requested.eq_ignore_ascii_case(&recommended.specialist_type)
        {
            recommended
        } else {
            Specialist::for_type(requested)
        };

        let input = AgentInput::new(self.context.clone())
            .with_payload(AgentPayload::SpecialistQuery(specialist));
        let result = self
            .geo
            .process(input)
            .await
            .map_err(|err| FacilitySearchError::SearchFailed(err.into()))?;

        let facilities = match &result.data {
            Some(AgentPayload::Location(location)) => location.nearby_facilities.clone(),
            _ => Vec::new(),
        };
        self.fold(result.data)
            .await
            .map_err(FacilitySearchError::SearchFailed)?;

        Ok(FacilitySearch {
            message: result.message,
            facilities,
        })
    }

    /// Records tracking data and conversation symptoms in the health record.
    pub async fn track_health(
        &mut self,
        tracking: Option<TrackingData>,
    ) -> Result<HealthTracking, PipelineError> {
        let input = AgentInput::new(self.context.clone())
            .with_optional_payload(tracking.map(AgentPayload::Tracking));
        let result = self.tracker.process(input).await?;

        let (record, insights) = match &result.data {
            Some(AgentPayload::HealthReport(report)) => {
                (report.record.clone(), report.insights.clone())
            }
            _ => (HealthRecord::default(), HealthInsights::default()),
        };
        self.fold(result.data).await?;

        Ok(HealthTracking {
            message: result.message,
            record,
            insights,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::geo::UnavailableLocationProvider;
    use crate::domain::triage::{Sender, SymptomAnalysis, UrgencyAssessment, UrgencyLevel};
    use crate::ports::ProviderError;

    fn manager_with(analysis: MockAnalysisProvider) -> AgentManager {
        let collaborators = Collaborators::new(
            Arc::new(analysis),
            Arc::new(FixedLocationProvider::tunis()),
            Arc::new(MockFacilityLocator::tunis()),
        );
        AgentManager::new(ConversationId::new(), &collaborators, PipelineSettings::default())
    }

    fn demo_manager() -> AgentManager {
        AgentManager::new(
            ConversationId::new(),
            &Collaborators::demo(),
            PipelineSettings::default(),
        )
    }

    #[tokio::test]
    async fn full_chain_reaches_geolocation() {
        let mut manager = demo_manager();

        let outcome = manager
            .process_user_message("J'ai des maux de tête sévères depuis 3 jours et des nausées")
            .await;

        let context = &outcome.context;
        assert_eq!(context.suggested_conditions.len(), 3);
        assert_eq!(
            context.recommended_specialist.as_ref().unwrap().specialist_type,
            "neurologist"
        );
        assert_eq!(context.urgency_level, Some(UrgencyLevel::Medium));
        assert_eq!(context.nearby_facilities.as_ref().unwrap().len(), 3);
        assert!(outcome.response.starts_with("J'ai trouvé 3 établissements"));
    }

    #[tokio::test]
    async fn turn_appends_user_then_bot_message() {
        let mut manager = demo_manager();

        let outcome = manager.process_user_message("toux").await;

        let log = &outcome.context.messages;
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].sender, Sender::User);
        assert_eq!(log[0].text, "toux");
        assert_eq!(log[1].sender, Sender::Bot);
        assert_eq!(log[1].text, outcome.response);
    }

    #[tokio::test]
    async fn zero_conditions_returns_clarification() {
        let mut manager =
            manager_with(MockAnalysisProvider::new().with_analysis(SymptomAnalysis::new(vec![])));

        let outcome = manager.process_user_message("je ne sais pas").await;

        assert_eq!(outcome.response, messages::NO_CONDITIONS);
        assert!(outcome.context.suggested_conditions.is_empty());
        assert_eq!(outcome.context.urgency_level, Some(UrgencyLevel::Medium));
    }

    #[tokio::test]
    async fn diagnostic_failure_is_recorded_in_history() {
        let mut manager = manager_with(
            MockAnalysisProvider::new().with_analysis_error(ProviderError::unavailable("down")),
        );

        let outcome = manager.process_user_message("fièvre").await;

        assert_eq!(outcome.response, messages::DIAGNOSIS_FAILED);
        assert_eq!(outcome.context.messages.last().unwrap().text, messages::DIAGNOSIS_FAILED);
        assert!(outcome.context.recommended_specialist.is_none());
    }

    #[tokio::test]
    async fn emergency_settles_without_geolocation() {
        let mut manager = manager_with(MockAnalysisProvider::new().with_urgency(
            UrgencyAssessment {
                urgency_level: Some(UrgencyLevel::Emergency),
                reasoning: Some("Signes de gravité.".to_string()),
                recommendations: Some("Appelez le 15.".to_string()),
            },
        ));

        let outcome = manager.process_user_message("douleur thoracique").await;

        assert!(outcome.response.contains("URGENCE MÉDICALE POSSIBLE"));
        assert_eq!(outcome.context.emergency_detected, Some(true));
        assert!(outcome.context.nearby_facilities.is_none());
    }

    #[tokio::test]
    async fn tiny_hop_ceiling_yields_apology() {
        let mut manager = AgentManager::new(
            ConversationId::new(),
            &Collaborators::demo(),
            PipelineSettings {
                max_hops: 2,
                ..Default::default()
            },
        );

        let outcome = manager.process_user_message("maux de tête").await;

        assert_eq!(outcome.response, messages::TURN_FAILED);
        assert_eq!(outcome.context.messages.last().unwrap().text, messages::TURN_FAILED);
    }

    #[tokio::test]
    async fn profile_update_is_merged() {
        let mut manager = demo_manager();

        manager.update_user_profile(UserInfo {
            age: Some(52),
            ..Default::default()
        });
        manager.update_user_profile(UserInfo {
            allergies: Some(vec!["pollen".to_string()]),
            ..Default::default()
        });

        let info = manager.context().user_info.clone().unwrap();
        assert_eq!(info.age, Some(52));
        assert_eq!(info.allergies, Some(vec!["pollen".to_string()]));
    }

    #[tokio::test]
    async fn facility_search_requires_a_specialist() {
        let mut manager = demo_manager();
        let before = manager.snapshot();

        let err = manager.find_nearby_facilities("cardiologist").await.unwrap_err();

        assert_eq!(err, FacilitySearchError::NoSpecialist);
        assert_eq!(manager.snapshot(), before);
    }

    #[tokio::test]
    async fn facility_search_overrides_specialty() {
        let mut manager = demo_manager();
        manager.process_user_message("maux de tête").await;

        let search = manager.find_nearby_facilities("dermatologist").await.unwrap();

        assert_eq!(search.facilities.len(), 2);
        assert_eq!(search.facilities[0].name, "Dr. Ahmed Ben Salah");
        assert_eq!(manager.context().nearby_facilities, Some(search.facilities));
    }

    #[tokio::test]
    async fn overridden_specialty_is_named_by_its_title() {
        let mut manager = demo_manager();
        manager.process_user_message("maux de tête").await;

        let search = manager.find_nearby_facilities("cardiologist").await.unwrap();

        assert_eq!(search.facilities.len(), 2);
        assert!(search.message.contains("consultations avec un Cardiologue"));
        assert!(!search.message.contains("un cardiologist"));
    }

    #[tokio::test]
    async fn facility_search_without_location_returns_message() {
        let collaborators = Collaborators::new(
            Arc::new(MockAnalysisProvider::new()),
            Arc::new(UnavailableLocationProvider),
            Arc::new(MockFacilityLocator::tunis()),
        );
        let mut manager =
            AgentManager::new(ConversationId::new(), &collaborators, PipelineSettings::default());
        manager.process_user_message("maux de tête").await;

        let search = manager.find_nearby_facilities("").await.unwrap();

        assert_eq!(search.message, messages::LOCATION_UNAVAILABLE);
        assert!(search.facilities.is_empty());
    }

    #[tokio::test]
    async fn track_health_stores_record_in_context() {
        let mut manager = demo_manager();
        manager.process_user_message("mal de tête").await;

        let tracking = manager.track_health(None).await.unwrap();

        assert_eq!(tracking.record.symptoms.len(), 1);
        assert!(tracking.message.starts_with("Suivi de santé mis à jour."));
        assert_eq!(manager.context().health_record, Some(tracking.record));
    }
}
