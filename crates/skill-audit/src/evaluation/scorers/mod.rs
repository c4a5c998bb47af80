//! Category scorers. Each category is a static checklist evaluated in order.

mod clarity;
mod dependencies;
mod documentation;
mod error_handling;
mod portability;
mod safety;
mod scope;
mod structure;

use super::checklist::{self, Check};
use super::report::Finding;
use super::rubric::CategoryId;
use super::text::Subject;

pub(crate) fn checks_for(id: CategoryId) -> &'static [Check] {
    match id {
        CategoryId::Structure => structure::CHECKS,
        CategoryId::Clarity => clarity::CHECKS,
        CategoryId::Safety => safety::CHECKS,
        CategoryId::Dependencies => dependencies::CHECKS,
        CategoryId::ErrorHandling => error_handling::CHECKS,
        CategoryId::Scope => scope::CHECKS,
        CategoryId::Documentation => documentation::CHECKS,
        CategoryId::Portability => portability::CHECKS,
    }
}

pub(crate) fn score_category(id: CategoryId, subject: &Subject<'_>) -> (f64, Vec<Finding>) {
    checklist::evaluate(checks_for(id), subject)
}
