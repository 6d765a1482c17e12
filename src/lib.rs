// Grid model and problem instances
// --------------------------------
pub mod generate;
pub mod maze;

// Search machinery
// ----------------
pub mod frontier;
pub mod search;
pub mod trace;

// Algorithms
// ----------
pub mod algorithms;

// Batch driving and metrics
// -------------------------
pub mod runner;
