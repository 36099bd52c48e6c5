//! GeoLocationAgent - Finds facilities offering the recommended specialty.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::triage::{
    AgentError, AgentId, AgentInput, AgentPayload, AgentResponse, LocationPayload,
};
use crate::ports::{FacilityLocator, LocationProvider};

use super::{messages, with_deadline, Agent};

pub struct GeoLocationAgent {
    location: Arc<dyn LocationProvider>,
    facilities: Arc<dyn FacilityLocator>,
    deadline: Duration,
}

impl GeoLocationAgent {
    pub fn new(
        location: Arc<dyn LocationProvider>,
        facilities: Arc<dyn FacilityLocator>,
        deadline: Duration,
    ) -> Self {
        Self {
            location,
            facilities,
            deadline,
        }
    }
}

#[async_trait]
impl Agent for GeoLocationAgent {
    fn id(&self) -> AgentId {
        AgentId::GeoLocation
    }

    async fn process(&self, input: AgentInput) -> Result<AgentResponse, AgentError> {
        let specialist = match input.payload {
            Some(AgentPayload::SpecialistQuery(specialist)) => specialist,
            Some(AgentPayload::Recommendation(rec)) => rec.specialist,
            _ => input
                .context
                .recommended_specialist
                .ok_or_else(|| AgentError::missing_input(self.id(), "a recommended specialist"))?,
        };

        tracing::debug!(agent = %self.id(), specialist_type = %specialist.specialist_type, "Finding nearby specialists");

        let location = match with_deadline(self.deadline, self.location.current_location()).await {
            Ok(Some(location)) => location,
            Ok(None) => {
                return Ok(AgentResponse::new(messages::LOCATION_UNAVAILABLE)
                    .with_error("location unavailable"));
            }
            Err(err) => {
                tracing::warn!(agent = %self.id(), error = %err, "Location lookup failed");
                return Ok(AgentResponse::new(messages::LOCATION_UNAVAILABLE)
                    .with_error(err.to_string()));
            }
        };

        let mut found = match with_deadline(
            self.deadline,
            self.facilities.find(&location, &specialist.specialist_type),
        )
        .await
        {
            Ok(found) => found,
            Err(err) => {
                tracing::warn!(agent = %self.id(), error = %err, "Facility search failed");
                return Ok(AgentResponse::new(messages::FACILITY_SEARCH_FAILED)
                    .with_error(err.to_string()));
            }
        };
        found.retain(|f| f.offers(&specialist.specialist_type));
        found.sort_by(|a, b| a.distance.total_cmp(&b.distance));

        let message = messages::facilities(&specialist, &found);
        Ok(AgentResponse::new(message)
            .with_data(AgentPayload::Location(LocationPayload {
                user_location: location,
                nearby_facilities: found,
            }))
            .route_to(AgentId::ContextualMemory))
    }
}
