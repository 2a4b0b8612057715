//! Prompt templates for seat agents

mod template;

pub use template::PromptTemplate;
