mod component;
mod interaction;
mod render;
mod scale;
mod scene;
mod scheduler;
mod simulation;
mod state;
mod types;

pub use component::ForceGraphCanvas;
pub use scheduler::{AnimationFrame, Ticker};
pub use simulation::SimulationParameters;
pub use state::ForceGraphState;
pub use types::{GraphData, GraphNode, NodeKind};
#[cfg(test)]
pub use types::{InferredData, VisitorProfile};
