pub mod constants;
pub mod rules;
pub mod search;

pub use constants::*;
pub use rules::{MatchRule, RecordPredicate, MATCH_RULES};
pub use search::{
    score_by_rules, score_by_substring, search, search_and_record, search_with_rules,
};
