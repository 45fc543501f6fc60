use super::evolution_engine::{GenerationSummary, ProgressCallback};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Reports progress through the `log` facade
#[derive(Default)]
pub struct ConsoleProgressCallback {
    cancel: Option<Arc<AtomicBool>>,
}

impl ConsoleProgressCallback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort the run once `flag` is set
    pub fn with_cancel_flag(flag: Arc<AtomicBool>) -> Self {
        Self { cancel: Some(flag) }
    }
}

impl ProgressCallback for ConsoleProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::info!("Generation {} starting...", generation);
    }

    fn on_generation_complete(&mut self, summary: &GenerationSummary) {
        log::info!(
            "Generation {} scored {} genomes. Best fitness: {}, average: {:.2}",
            summary.generation,
            summary.population_size,
            summary.best_fitness,
            summary.average_fitness
        );
    }

    fn should_abort(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

// For driving a run from another thread
pub struct ChannelProgressCallback {
    sender: std::sync::mpsc::Sender<ProgressMessage>,
    cancel: Arc<AtomicBool>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressMessage {
    GenerationStart(usize),
    GenerationComplete(GenerationSummary),
}

impl ChannelProgressCallback {
    pub fn new(sender: std::sync::mpsc::Sender<ProgressMessage>, cancel: Arc<AtomicBool>) -> Self {
        Self { sender, cancel }
    }
}

impl ProgressCallback for ChannelProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationStart(generation));
    }

    fn on_generation_complete(&mut self, summary: &GenerationSummary) {
        let _ = self.sender.send(ProgressMessage::GenerationComplete(*summary));
    }

    fn should_abort(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }
}
