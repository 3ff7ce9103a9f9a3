pub mod prompts;
pub mod render;

pub use prompts::{
    prompt_field, prompt_formula_by_name, prompt_formula_choice, prompt_formula_source,
    prompt_search_query, prompt_yes_no, FormulaSource,
};
pub use render::{
    display_formula_card, display_formula_list, display_history, display_result, display_stats,
};
