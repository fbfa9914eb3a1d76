//! Enrichment pipeline services
//!
//! Control flow for one lookup:
//! 1. [`assembler`] fetches the character profile through [`upstream`]
//! 2. [`detail_orchestrator`] fans out one run-detail fetch per unique run,
//!    resolving each run's season with [`season`] and decoding rosters with
//!    [`run_detail`]
//! 3. [`enrichment`] derives per-run statistics
//! 4. [`brackets`] aggregates runs into difficulty bands

pub mod assembler;
pub mod brackets;
pub mod detail_orchestrator;
pub mod enrichment;
pub mod run_detail;
pub mod season;
pub mod upstream;

pub use assembler::CharacterAssembler;
pub use detail_orchestrator::{DetailOrchestrator, DetailRequest};
pub use run_detail::{RunDetailOutcome, UnavailableReason};
pub use upstream::{UpstreamApi, UpstreamClient};

// ============================================================================
// Mock Upstream for Testing
// ============================================================================
