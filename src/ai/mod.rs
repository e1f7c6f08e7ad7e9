pub mod adaptive;
mod agent;
pub mod heuristic;
mod minimax;
mod random;
pub mod search;

pub use adaptive::{AdaptiveAgent, AdaptiveConfig, Weights};
pub use agent::{create_agent, Agent, AgentMode};
pub use heuristic::{AdaptiveHeuristic, ClassicHeuristic, Heuristic};
pub use minimax::MinimaxAgent;
pub use random::RandomAgent;
pub use search::{alpha_beta, minimax, Difficulty, SearchResult, WIN_SCORE};
