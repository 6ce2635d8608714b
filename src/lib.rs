//! Parley - Conversational response engine
//!
//! Answers free-form user input from a preference-ordered chain of
//! backends: two remote generative models (OpenAI, Gemini) and a local
//! rule-based responder that always has an answer.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
