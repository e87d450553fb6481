//! Portuguese residence-visa eligibility (D2 entrepreneur, D7 passive
//! income, D8 digital nomad).

mod checkers;
mod domain;
mod matcher;
mod policy;

pub use checkers::{check_d2, check_d7, check_d8};
pub use domain::{
    BusinessPlan, EligibilityResult, EligibilityStatus, PortugalProfile, RequirementCheck,
    VisaType,
};
pub use matcher::{match_visas, VisaMatch, VisaQuestionnaire, VisaRecommendation};
pub use policy::{PortugalPolicy, StatusPolicy};
