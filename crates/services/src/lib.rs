pub mod completion;
pub mod health;
pub mod prompt;
pub mod transport;
pub mod turn;

pub use completion::{ChatCompletionService, CompletionBackend, CompletionError};
pub use health::{HealthError, HealthMonitor, HealthReport, ResourceProbe, ResourceUsage, StaticProbe, SystemProbe};
pub use prompt::build_prompt;
pub use transport::TransportError;
pub use turn::{TurnError, TurnOrchestrator, TurnRequest, TurnResponse, TurnStage};
