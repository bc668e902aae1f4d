pub mod common;
pub mod incident;
pub mod article;
pub mod verification;
pub mod bundle;

// Re-export common model types
pub use common::{ PipelineStage, Provider };
pub use incident::{ Fact, Incident };
pub use article::Article;
pub use verification::{ Verdict, VerdictLabel, Verification };
pub use bundle::ResultBundle;
