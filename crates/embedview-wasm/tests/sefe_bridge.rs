//! End-to-end: the SEFE workflow driving a real (test-built) engine module
//! through the bridge, sharing one virtual filesystem.

use std::sync::Arc;

use async_trait::async_trait;

use embedview_core::{
    InputSource, MemoryFs, RecordingSurface, SefeColor, SefeVerdict, SefeWorkflow, SelectedFile,
    SingleGraphWorkflow, SlotName, VirtualFs,
};
use embedview_wasm::{BridgeConfig, WasmEngine};

const SVG: &str = "<svg xmlns='http://www.w3.org/2000/svg'><g/></svg>";

struct StaticSource(&'static str);

#[async_trait]
impl InputSource for StaticSource {
    async fn fetch(&self) -> std::io::Result<Option<SelectedFile>> {
        Ok(Some(SelectedFile {
            name: "graph.txt".to_string(),
            text: self.0.to_string(),
        }))
    }
}

/// A guest with the real engine's export surface. `sefeLoadedFiles` answers
/// feasible only when both inputs are staged, and draws both colors when it
/// does, which is close enough to exercise every seam of the protocol.
fn engine_wat() -> String {
    format!(
        r#"(module
  (import "env" "vfs_size" (func $size (param i32 i32) (result i32)))
  (import "env" "vfs_read" (func $read (param i32 i32 i32 i32) (result i32)))
  (import "env" "vfs_write" (func $write (param i32 i32 i32 i32) (result i32)))
  (memory (export "memory") 1)
  (data (i32.const 0) "/red.txt")
  (data (i32.const 16) "/blue.txt")
  (data (i32.const 32) "/embedding-red.svg")
  (data (i32.const 64) "/embedding-blue.svg")
  (data (i32.const 96) "/input.txt")
  (data (i32.const 112) "/embedding.svg")
  (data (i32.const 256) "{svg}")
  (func (export "embedLoadedFile")
    (local $n i32)
    (local.set $n (call $read (i32.const 96) (i32.const 10) (i32.const 1024) (i32.const 4096)))
    (if (i32.ge_s (local.get $n) (i32.const 0))
      (then (drop (call $write (i32.const 112) (i32.const 14) (i32.const 256) (i32.const {svg_len}))))))
  (func (export "sefeMainTest")
    (drop (call $write (i32.const 32) (i32.const 18) (i32.const 256) (i32.const {svg_len})))
    (drop (call $write (i32.const 64) (i32.const 19) (i32.const 256) (i32.const {svg_len}))))
  (func (export "sefeLoadedFiles") (result i32)
    (if (i32.lt_s (call $size (i32.const 0) (i32.const 8)) (i32.const 0))
      (then (return (i32.const 99))))
    (if (i32.lt_s (call $size (i32.const 16) (i32.const 9)) (i32.const 0))
      (then (return (i32.const 99))))
    (drop (call $write (i32.const 32) (i32.const 18) (i32.const 256) (i32.const {svg_len})))
    (drop (call $write (i32.const 64) (i32.const 19) (i32.const 256) (i32.const {svg_len})))
    (i32.const 1)))"#,
        svg = SVG,
        svg_len = SVG.len()
    )
}

fn bridged_engine(vfs: Arc<MemoryFs>) -> WasmEngine {
    let bytes = wat::parse_str(engine_wat()).unwrap();
    WasmEngine::from_bytes(&BridgeConfig::default(), &bytes, vfs).unwrap()
}

#[tokio::test]
async fn test_sefe_session_over_the_bridge() {
    let vfs = Arc::new(MemoryFs::new());
    let mut engine = bridged_engine(vfs.clone());
    let mut flow = SefeWorkflow::new(vfs.clone());
    let mut surface = RecordingSurface::new();

    flow.stage(SefeColor::Red, &StaticSource("A-B"))
        .await
        .unwrap();
    flow.stage(SefeColor::Blue, &StaticSource("A-C"))
        .await
        .unwrap();

    let ready = flow.ready().unwrap();
    let verdict = flow.evaluate(ready, &mut engine, &mut surface).unwrap();

    assert_eq!(verdict, SefeVerdict::Feasible);
    assert_eq!(surface.rendered.len(), 2);
    assert_eq!(surface.markup_for(SlotName::RedEmbedding), Some(SVG));
    assert_eq!(surface.markup_for(SlotName::BlueEmbedding), Some(SVG));
}

#[tokio::test]
async fn test_engine_sees_missing_input_when_invoked_raw() {
    // The workflow's ready() gate prevents this path, but the engine-side
    // behavior stays engine-defined: the guest answers with its own code.
    use embedview_core::Engine;

    let vfs = Arc::new(MemoryFs::new());
    vfs.write_text(SlotName::RedInput, "A-B"); // blue never staged
    let mut engine = bridged_engine(vfs);

    let code = engine.invoke(embedview_core::EngineOp::SefeLoadedFiles).unwrap();
    assert_eq!(code, Some(99));
    assert_eq!(SefeVerdict::from_code(99), SefeVerdict::EngineError(99));
}

#[tokio::test]
async fn test_single_graph_session_over_the_bridge() {
    let vfs = Arc::new(MemoryFs::new());
    let mut engine = bridged_engine(vfs.clone());
    let mut flow = SingleGraphWorkflow::new(vfs.clone());
    let mut surface = RecordingSurface::new();

    flow.stage(&StaticSource("0 1\n1 2\n2 0\n")).await.unwrap();
    flow.embed(&mut engine).unwrap();

    let outcome = flow.render(&mut surface);
    assert!(outcome.is_rendered());
    assert_eq!(surface.markup_for(SlotName::Embedding), Some(SVG));
}

#[tokio::test]
async fn test_self_test_draws_without_any_staging() {
    let vfs = Arc::new(MemoryFs::new());
    let mut engine = bridged_engine(vfs.clone());
    let flow = SefeWorkflow::new(vfs.clone());

    flow.run_self_test(&mut engine).unwrap();
    assert!(vfs.contains(SlotName::RedEmbedding));
    assert!(vfs.contains(SlotName::BlueEmbedding));
}
