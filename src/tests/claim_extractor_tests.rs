#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::implementations::claim_extractor::{ ExtractionError, LLMClaimExtractor };
    use crate::tests::fixtures::FixtureLlm;
    use crate::traits::claim_extractor::ClaimExtractor;
    use crate::traits::llm_client::LlmClient;

    const ARTICLE: &str =
        "Heavy rain flooded parts of Kochi on Tuesday, closing schools for two days. \
         Separately, the state government announced a new metro line for Thiruvananthapuram.";

    const EXTRACTION_REPLY: &str =
        r#"{
  "incidents": [
    {
      "incident_summary": "Flooding in Kochi closes schools",
      "search_statement": "Kochi floods schools closed OR Kerala heavy rain Kochi",
      "facts": [
        {"statement": "Heavy rain flooded parts of Kochi", "date": "Tuesday", "place": "Kochi"},
        {"statement": "Schools in Kochi were closed for two days", "date": null, "place": "Kochi"}
      ]
    },
    {
      "incident_summary": "New metro line announced",
      "search_statement": "Thiruvananthapuram metro line announced OR Kerala new metro",
      "facts": [
        {"statement": "The state government announced a metro line for Thiruvananthapuram", "date": null, "place": null}
      ]
    }
  ]
}"#;

    fn extractor_with(llm: &Arc<FixtureLlm>) -> LLMClaimExtractor {
        let client: Arc<dyn LlmClient> = llm.clone();
        LLMClaimExtractor::new(Some(client), "gpt-4o-mini", 2500)
    }

    #[tokio::test]
    async fn test_empty_input_makes_no_llm_call() {
        let llm = Arc::new(FixtureLlm::replying(EXTRACTION_REPLY));
        let extractor = extractor_with(&llm);

        assert!(extractor.extract("").await.is_none());
        assert!(extractor.extract("   \n\t").await.is_none());
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_extracts_incidents_with_search_statements() {
        let llm = Arc::new(FixtureLlm::replying(EXTRACTION_REPLY));
        let extractor = extractor_with(&llm);

        let incidents = extractor.extract(ARTICLE).await.expect("extraction should succeed");

        assert_eq!(incidents.len(), 2);
        assert!(incidents.iter().all(|i| i.has_search_statement()));
        assert_eq!(incidents[0].facts.len(), 2);
        assert_eq!(incidents[0].facts[1].date, None);
        assert_eq!(incidents[0].search_queries().len(), 2);
        assert_eq!(llm.call_count(), 1);

        let request = &llm.requests()[0];
        assert_eq!(request.temperature, 0.0);
        assert!(request.prompt_text().contains("Thiruvananthapuram"));
    }

    #[tokio::test]
    async fn test_same_article_gives_same_incidents() {
        let llm = Arc::new(FixtureLlm::replying(EXTRACTION_REPLY));
        let extractor = extractor_with(&llm);

        let first = extractor.extract(ARTICLE).await;
        let second = extractor.extract(ARTICLE).await;

        assert!(first.is_some());
        assert_eq!(first, second);
        let requests = llm.requests();
        assert_eq!(requests[0], requests[1]);
    }

    #[tokio::test]
    async fn test_llm_failure_returns_none() {
        let llm = Arc::new(FixtureLlm::failing());
        let extractor = extractor_with(&llm);

        assert!(extractor.extract(ARTICLE).await.is_none());
        assert!(matches!(extractor.try_extract(ARTICLE).await, Err(ExtractionError::Llm(_))));
    }

    #[tokio::test]
    async fn test_invalid_json_returns_none() {
        let llm = Arc::new(FixtureLlm::replying("Here are the incidents: ..."));
        let extractor = extractor_with(&llm);

        assert!(extractor.extract(ARTICLE).await.is_none());
    }

    #[tokio::test]
    async fn test_missing_incidents_key_is_empty_list() {
        let llm = Arc::new(FixtureLlm::replying(r#"{"claims": []}"#));
        let extractor = extractor_with(&llm);

        assert_eq!(extractor.extract(ARTICLE).await, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_missing_client_fails_closed() {
        let extractor = LLMClaimExtractor::new(None, "gpt-4o-mini", 2500);

        assert!(extractor.extract(ARTICLE).await.is_none());
        assert!(
            matches!(extractor.try_extract(ARTICLE).await, Err(ExtractionError::ClientUnavailable))
        );
    }
}
