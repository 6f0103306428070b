//! `study-gate` - evaluates one admission request read from stdin.
//!
//! Input is a JSON object `{ "tier", "snapshot"?, "request" }`; the decision
//! is printed to stdout as JSON. An optional first argument names a
//! configuration file; otherwise configuration comes from the environment.

use serde::{Deserialize, Serialize};
use std::io::Read;

use study_gate::application::LimitResponse;
use study_gate::config::{init_tracing, AppConfig};
use study_gate::domain::admission::{ActionRequest, AdmissionDecision};
use study_gate::domain::plan::PlanTier;
use study_gate::domain::usage::UsageSnapshot;

#[derive(Debug, Deserialize)]
struct EvaluateInput {
    tier: PlanTier,
    #[serde(default)]
    snapshot: UsageSnapshot,
    request: ActionRequest,
}

#[derive(Debug, Serialize)]
struct EvaluateOutput {
    tier: PlanTier,
    decision: AdmissionDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit_response: Option<LimitResponse>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::load()?,
    };
    config.validate()?;
    init_tracing(&config.logging)?;

    let engine = config.engine()?;

    let mut raw = String::new();
    std::io::stdin().read_to_string(&mut raw)?;
    let input: EvaluateInput = serde_json::from_str(&raw)?;
    input.request.validate()?;

    let decision = engine.evaluate(input.tier, &input.snapshot, &input.request);
    let output = EvaluateOutput {
        tier: input.tier,
        decision,
        limit_response: LimitResponse::from_decision(&decision),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
