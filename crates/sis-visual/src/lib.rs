//! Visual mapping engine.
//!
//! Turns an emotional arc, plus optional power and pacing estimates, into
//! color, lighting and camera recommendations. Lighting and camera come from
//! ordered rule tables ([`rules::LIGHTING_RULES`], [`rules::CAMERA_RULES`]);
//! colors come from the emotion color knowledge base.

pub mod error;
pub mod knowledge_base;
pub mod mapper;
pub mod rules;

pub use error::{KnowledgeBaseError, KnowledgeBaseResult};
pub use knowledge_base::{validate_knowledge_base, ColorEntry, KnowledgeBase, KnowledgeBaseReport};
pub use mapper::{technical_tags, VisualMappingEngine};
pub use rules::{apply_rules, Rule, RuleContext, CAMERA_RULES, LIGHTING_RULES};
