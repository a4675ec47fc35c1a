use chrono::Utc;

use crate::{
    catalog::ConditionCatalog,
    client::WeatherClient,
    comfort::Comfort,
    error::FetchError,
    model::{Coordinates, WeatherFact, WeatherSnapshot},
};

/// Turns coordinates into a presentable [`WeatherSnapshot`].
#[derive(Debug)]
pub struct WeatherService {
    client: WeatherClient,
    catalog: ConditionCatalog,
}

impl WeatherService {
    pub fn new(client: WeatherClient) -> Self {
        Self { client, catalog: ConditionCatalog }
    }

    pub fn client(&self) -> &WeatherClient {
        &self.client
    }

    /// Fetch and enrich. Errors from the client come back untouched.
    pub async fn snapshot(&self, coordinates: Coordinates) -> Result<WeatherSnapshot, FetchError> {
        let fact = self.client.fetch(coordinates).await?;
        Ok(self.enrich(fact))
    }

    pub fn enrich(&self, fact: WeatherFact) -> WeatherSnapshot {
        let comfort = Comfort::classify(fact.feels_like);

        WeatherSnapshot {
            condition_label: self.catalog.label(&fact.condition_code).to_string(),
            recommendation: comfort.advice().to_string(),
            comfort,
            fact,
            fetched_at: Utc::now(),
        }
    }
}
