pub mod fixtures;

mod claim_extractor_tests;
