pub mod logging;

// Query pair classification: detector cascade + lexical similarity
pub mod reformulation;
