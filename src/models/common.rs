use std::fmt;

use serde::{ Deserialize, Serialize };

/// External news-search providers the fetcher knows how to query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Provider {
    /// NewsData.io: result-capped keyword search
    NewsData,
    /// GNews.io: relevance-sorted search
    GNews,
}

impl Provider {
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::NewsData => "NewsData.io",
            Provider::GNews => "GNews.io",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Stages of a single pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineStage {
    Idle,
    ExtractingClaims,
    FetchingSources,
    Verifying,
    Done,
    Error,
}

impl PipelineStage {
    /// `Done` and `Error` absorb; nothing leaves them.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineStage::Done | PipelineStage::Error)
    }

    /// The stage that follows this one on the success path
    pub fn next(&self) -> PipelineStage {
        match self {
            PipelineStage::Idle => PipelineStage::ExtractingClaims,
            PipelineStage::ExtractingClaims => PipelineStage::FetchingSources,
            PipelineStage::FetchingSources => PipelineStage::Verifying,
            PipelineStage::Verifying => PipelineStage::Done,
            PipelineStage::Done => PipelineStage::Done,
            PipelineStage::Error => PipelineStage::Error,
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PipelineStage::Idle => "Idle",
            PipelineStage::ExtractingClaims => "Stage 1: Extracting claims",
            PipelineStage::FetchingSources => "Stage 2: Fetching sources",
            PipelineStage::Verifying => "Stage 3: Verifying facts",
            PipelineStage::Done => "Done",
            PipelineStage::Error => "Error",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_path_ends_in_done() {
        let mut stage = PipelineStage::Idle;
        let mut seen = vec![stage];
        while !stage.is_terminal() {
            stage = stage.next();
            seen.push(stage);
        }
        assert_eq!(
            seen,
            vec![
                PipelineStage::Idle,
                PipelineStage::ExtractingClaims,
                PipelineStage::FetchingSources,
                PipelineStage::Verifying,
                PipelineStage::Done
            ]
        );
        assert_eq!(PipelineStage::Error.next(), PipelineStage::Error);
    }
}
