use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Instant;

use macroquad::logging::info;

use crate::domain::{ROOT_SYMBOL, RuleTable, SceneBuffer, expand, flatten};
use crate::producer::{RuleProducer, produce_or_fallback};

/// Finished generation coming back from a worker thread.
struct GenerationResult {
    scene: SceneBuffer,
    elapsed_ms: f32,
}

/// The single in-flight generation. Replacing this drops the receiver,
/// so a superseded worker's result is discarded instead of racing to
/// publish out of order.
struct PendingGeneration {
    rx: Receiver<GenerationResult>,
}

/// AppState coordinates generation and publishing.
/// This is the application layer: it owns the published scene snapshot,
/// the selected genes, and at most one in-flight regeneration.
pub struct AppState {
    /// Read-only snapshot the renderer sees; swapped whole on publish.
    pub scene: Arc<SceneBuffer>,
    pub genes: Vec<String>,
    pub generation: u64,
    pub last_generation_time_ms: f32,
    pub last_render_time_ms: f32,
    producer: Arc<dyn RuleProducer>,
    pending: Option<PendingGeneration>,
}

impl AppState {
    pub fn new(producer: Arc<dyn RuleProducer>) -> Self {
        Self {
            scene: Arc::new(SceneBuffer::empty()),
            genes: Vec::new(),
            generation: 0,
            last_generation_time_ms: 0.0,
            last_render_time_ms: 0.0,
            producer,
            pending: None,
        }
    }

    pub fn set_genes(&mut self, genes: Vec<String>) {
        self.genes = genes;
    }

    /// Replace the gene list with a fresh random selection.
    pub fn randomize_genes(&mut self) {
        self.genes = crate::domain::random_genes();
    }

    /// True while a generation is running on a worker thread.
    pub fn is_generating(&self) -> bool {
        self.pending.is_some()
    }

    /// Kick off producer -> expand -> flatten on a background thread.
    /// The previous frame's scene keeps rendering until the result is
    /// published by `poll`. Calling again while one is in flight
    /// supersedes it: the stale result is dropped on arrival.
    pub fn regenerate(&mut self) {
        let genes = self.genes.clone();
        let producer = Arc::clone(&self.producer);
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let start = Instant::now();
            let table = produce_or_fallback(producer.as_ref(), &genes);
            let scene = build_scene(&table);
            let elapsed_ms = start.elapsed().as_secs_f32() * 1000.0;
            // Receiver may be gone if this request was superseded
            let _ = tx.send(GenerationResult { scene, elapsed_ms });
        });

        self.pending = Some(PendingGeneration { rx });
    }

    /// Check for a finished generation and publish it atomically.
    /// Call once per frame.
    pub fn poll(&mut self) {
        let Some(pending) = &self.pending else {
            return;
        };
        match pending.rx.try_recv() {
            Ok(result) => {
                self.scene = Arc::new(result.scene);
                self.generation += 1;
                self.last_generation_time_ms = result.elapsed_ms;
                self.pending = None;
                info!(
                    "generation {} published: {} primitives in {:.1}ms",
                    self.generation,
                    self.scene.len(),
                    self.last_generation_time_ms
                );
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                // Worker died without sending; keep the previous scene
                self.pending = None;
            }
        }
    }

    /// Synchronous regeneration entry point for callers that already
    /// hold a validated rule table: flatten and publish immediately.
    pub fn publish_table(&mut self, table: &RuleTable) {
        self.scene = Arc::new(build_scene(table));
        self.generation += 1;
        self.pending = None;
    }
}

fn build_scene(table: &RuleTable) -> SceneBuffer {
    let tree = expand(table, ROOT_SYMBOL);
    SceneBuffer::new(flatten(&tree))
}
