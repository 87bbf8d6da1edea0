use reqwest::Method;
use talent_core::Result;
use talent_core::types::{Candidate, CandidateDetails};

use super::TalentApi;

impl TalentApi {
    /// Lists candidates.
    pub async fn list_candidates(&self) -> Result<Vec<Candidate>> {
        self.authorized(Method::GET, &["candidates"], None).await
    }

    /// Fetches a candidate with all of their applications.
    pub async fn get_candidate(&self, id: i64) -> Result<CandidateDetails> {
        self.authorized(Method::GET, &["candidates", &id.to_string()], None)
            .await
    }
}
