//! Form input layer.
//!
//! This module accepts the string-typed form state the UI collaborator keeps,
//! converts it into typed income sources and runs the full evaluation.

mod evaluation;
mod request;

pub use evaluation::{Evaluation, EvaluationRequest, evaluate_request, parse_sources};
pub use request::{
    DATE_FORMAT, PensionRequest, RevisionRequest, SalaryRequest, SemiAnnualBenefitRequest,
    SourceRequest, TemporaryBenefitRequest, parse_amount, parse_date,
};
