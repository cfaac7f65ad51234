//! The wasmtime-backed engine: module loading, the host-function virtual
//! filesystem ABI, and named entry-point dispatch.
//!
//! The guest never receives call arguments. It reaches the shared slot store
//! through three imports:
//!
//! - `env.vfs_size(path_ptr, path_len) -> i32` — content byte length, `-1`
//!   when the slot is absent or the path is outside the agreed set
//! - `env.vfs_read(path_ptr, path_len, dst_ptr, dst_cap) -> i32` — copies the
//!   slot into guest memory, returns bytes copied or `-1`
//! - `env.vfs_write(path_ptr, path_len, src_ptr, src_len) -> i32` — stores
//!   UTF-8 guest bytes into the slot, `0` on success, `-1` on failure
//!
//! Paths resolve through the closed slot set; the guest cannot invent new
//! files.

use std::sync::Arc;

use tracing::debug;
use wasmtime::{
    Caller, Extern, Instance, Linker, Memory, Module, Store, StoreLimits, StoreLimitsBuilder,
};

use embedview_core::engine::{Engine, EngineFault, EngineOp};
use embedview_core::vfs::VirtualFs;
use embedview_core::SlotName;

use crate::config::BridgeConfig;
use crate::error::BridgeError;

struct HostState {
    limits: StoreLimits,
    vfs: Arc<dyn VirtualFs>,
}

/// The precompiled engine module, instantiated against a slot store.
pub struct WasmEngine {
    store: Store<HostState>,
    instance: Instance,
    max_fuel: u64,
    enable_fuel: bool,
}

impl WasmEngine {
    /// Load and instantiate an engine module.
    ///
    /// Validates size and the `\0asm` magic before compiling, links the
    /// filesystem ABI, and applies memory limits and fuel metering from the
    /// config. The engine shares `vfs` with the control surface: whatever a
    /// workflow stages is what the next invocation reads.
    pub fn from_bytes(
        config: &BridgeConfig,
        bytes: &[u8],
        vfs: Arc<dyn VirtualFs>,
    ) -> Result<Self, BridgeError> {
        if bytes.len() > config.max_module_size {
            return Err(BridgeError::ModuleTooLarge {
                max: config.max_module_size,
                actual: bytes.len(),
            });
        }
        if bytes.len() < 4 || !bytes.starts_with(b"\0asm") {
            return Err(BridgeError::InvalidModule(
                "missing wasm magic header".to_string(),
            ));
        }

        let mut cfg = wasmtime::Config::new();
        if config.enable_fuel {
            cfg.consume_fuel(true);
        }
        let runtime =
            wasmtime::Engine::new(&cfg).map_err(|e| BridgeError::Internal(e.to_string()))?;

        let module =
            Module::new(&runtime, bytes).map_err(|e| BridgeError::InvalidModule(e.to_string()))?;

        let mut linker: Linker<HostState> = Linker::new(&runtime);
        link_vfs(&mut linker).map_err(|e| BridgeError::Internal(e.to_string()))?;

        let limits = StoreLimitsBuilder::new()
            .memory_size(config.max_memory_pages as usize * 64 * 1024)
            .build();
        let mut store = Store::new(&runtime, HostState { limits, vfs });
        store.limiter(|state| &mut state.limits);
        if config.enable_fuel {
            store
                .set_fuel(config.max_fuel)
                .map_err(|e| BridgeError::Internal(e.to_string()))?;
        }

        let instance = linker
            .instantiate(&mut store, &module)
            .map_err(|e| BridgeError::Instantiate(e.to_string()))?;

        Ok(Self {
            store,
            instance,
            max_fuel: config.max_fuel,
            enable_fuel: config.enable_fuel,
        })
    }
}

impl Engine for WasmEngine {
    fn invoke(&mut self, op: EngineOp) -> Result<Option<i32>, EngineFault> {
        let fault = |reason: String| EngineFault {
            operation: op,
            reason,
        };

        if self.enable_fuel {
            // Each invocation gets a fresh fuel budget.
            self.store
                .set_fuel(self.max_fuel)
                .map_err(|e| fault(e.to_string()))?;
        }

        let name = op.export_name();
        debug!(operation = %op, "invoking engine export");

        if op.returns_code() {
            let func = self
                .instance
                .get_typed_func::<(), i32>(&mut self.store, name)
                .map_err(|_| fault(format!("missing export: {name}")))?;
            let code = func
                .call(&mut self.store, ())
                .map_err(|e| fault(classify_trap(&e)))?;
            Ok(Some(code))
        } else {
            let func = self
                .instance
                .get_typed_func::<(), ()>(&mut self.store, name)
                .map_err(|_| fault(format!("missing export: {name}")))?;
            func.call(&mut self.store, ())
                .map_err(|e| fault(classify_trap(&e)))?;
            Ok(None)
        }
    }
}

fn classify_trap(err: &wasmtime::Error) -> String {
    let msg = err.to_string();
    // The top-level error message carries only the backtrace context; the trap
    // reason (e.g. fuel/memory) lives in the root cause of the error chain.
    let detail = format!("{} {}", msg, err.root_cause()).to_lowercase();
    if detail.contains("fuel") {
        "fuel exhausted".to_string()
    } else if detail.contains("memory") {
        "memory limit exceeded".to_string()
    } else {
        msg
    }
}

fn link_vfs(linker: &mut Linker<HostState>) -> wasmtime::Result<()> {
    linker.func_wrap(
        "env",
        "vfs_size",
        |mut caller: Caller<'_, HostState>, path_ptr: i32, path_len: i32| -> i32 {
            let Some(slot) = slot_from_guest(&mut caller, path_ptr, path_len) else {
                return -1;
            };
            match caller.data().vfs.read_text(slot) {
                Ok(text) => text.len() as i32,
                Err(_) => -1,
            }
        },
    )?;

    linker.func_wrap(
        "env",
        "vfs_read",
        |mut caller: Caller<'_, HostState>,
         path_ptr: i32,
         path_len: i32,
         dst_ptr: i32,
         dst_cap: i32|
         -> i32 {
            let Some(slot) = slot_from_guest(&mut caller, path_ptr, path_len) else {
                return -1;
            };
            let text = match caller.data().vfs.read_text(slot) {
                Ok(text) => text,
                Err(_) => return -1,
            };
            let Ok(cap) = usize::try_from(dst_cap) else {
                return -1;
            };
            if text.len() > cap {
                return -1;
            }
            let Some(memory) = guest_memory(&mut caller) else {
                return -1;
            };
            let Ok(dst) = usize::try_from(dst_ptr) else {
                return -1;
            };
            match memory.write(&mut caller, dst, text.as_bytes()) {
                Ok(()) => text.len() as i32,
                Err(_) => -1,
            }
        },
    )?;

    linker.func_wrap(
        "env",
        "vfs_write",
        |mut caller: Caller<'_, HostState>,
         path_ptr: i32,
         path_len: i32,
         src_ptr: i32,
         src_len: i32|
         -> i32 {
            let Some(slot) = slot_from_guest(&mut caller, path_ptr, path_len) else {
                return -1;
            };
            let Some(memory) = guest_memory(&mut caller) else {
                return -1;
            };
            let (Ok(src), Ok(len)) = (usize::try_from(src_ptr), usize::try_from(src_len)) else {
                return -1;
            };
            let mut buf = vec![0u8; len];
            if memory.read(&caller, src, &mut buf).is_err() {
                return -1;
            }
            match String::from_utf8(buf) {
                Ok(text) => {
                    caller.data().vfs.write_text(slot, &text);
                    0
                }
                Err(_) => -1,
            }
        },
    )?;

    Ok(())
}

fn guest_memory(caller: &mut Caller<'_, HostState>) -> Option<Memory> {
    match caller.get_export("memory") {
        Some(Extern::Memory(memory)) => Some(memory),
        _ => None,
    }
}

fn slot_from_guest(
    caller: &mut Caller<'_, HostState>,
    path_ptr: i32,
    path_len: i32,
) -> Option<SlotName> {
    let memory = guest_memory(caller)?;
    let ptr = usize::try_from(path_ptr).ok()?;
    let len = usize::try_from(path_len).ok()?;
    let mut buf = vec![0u8; len];
    memory.read(&*caller, ptr, &mut buf).ok()?;
    let path = std::str::from_utf8(&buf).ok()?;
    SlotName::from_path(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedview_core::MemoryFs;

    const SVG: &str = "<svg xmlns='http://www.w3.org/2000/svg'><g/></svg>";

    /// A guest that behaves like the real engine: reads staged inputs through
    /// `vfs_read`, draws through `vfs_write`, reports SEFE status codes.
    fn engine_wat(code: i32) -> String {
        format!(
            r#"(module
  (import "env" "vfs_read" (func $read (param i32 i32 i32 i32) (result i32)))
  (import "env" "vfs_write" (func $write (param i32 i32 i32 i32) (result i32)))
  (memory (export "memory") 1)
  (data (i32.const 0) "/embedding-red.svg")
  (data (i32.const 32) "/embedding-blue.svg")
  (data (i32.const 64) "/embedding.svg")
  (data (i32.const 96) "/input.txt")
  (data (i32.const 256) "{svg}")
  (func (export "embedLoadedFile")
    (local $n i32)
    (local.set $n (call $read (i32.const 96) (i32.const 10) (i32.const 1024) (i32.const 4096)))
    (if (i32.ge_s (local.get $n) (i32.const 0))
      (then (drop (call $write (i32.const 64) (i32.const 14) (i32.const 1024) (local.get $n))))))
  (func (export "sefeMainTest")
    (drop (call $write (i32.const 0) (i32.const 18) (i32.const 256) (i32.const {svg_len})))
    (drop (call $write (i32.const 32) (i32.const 19) (i32.const 256) (i32.const {svg_len}))))
  (func (export "sefeLoadedFiles") (result i32)
    (drop (call $write (i32.const 0) (i32.const 18) (i32.const 256) (i32.const {svg_len})))
    (drop (call $write (i32.const 32) (i32.const 19) (i32.const 256) (i32.const {svg_len})))
    (i32.const {code})))"#,
            svg = SVG,
            svg_len = SVG.len(),
            code = code
        )
    }

    fn build(wat: &str, config: &BridgeConfig, vfs: Arc<MemoryFs>) -> WasmEngine {
        let bytes = wat::parse_str(wat).unwrap();
        WasmEngine::from_bytes(config, &bytes, vfs).unwrap()
    }

    #[test]
    fn test_queried_op_reports_status_and_draws() {
        let vfs = Arc::new(MemoryFs::new());
        let mut engine = build(&engine_wat(1), &BridgeConfig::default(), vfs.clone());

        let code = engine.invoke(EngineOp::SefeLoadedFiles).unwrap();
        assert_eq!(code, Some(1));
        assert_eq!(vfs.read_text(SlotName::RedEmbedding).unwrap(), SVG);
        assert_eq!(vfs.read_text(SlotName::BlueEmbedding).unwrap(), SVG);
    }

    #[test]
    fn test_void_op_echo_draws_from_staged_input() {
        let vfs = Arc::new(MemoryFs::new());
        vfs.write_text(SlotName::Input, "0 1\n1 2\n");
        let mut engine = build(&engine_wat(1), &BridgeConfig::default(), vfs.clone());

        // The test guest echoes the staged input as its drawing, which is
        // enough to prove vfs_read and vfs_write round-trip guest memory.
        let code = engine.invoke(EngineOp::EmbedLoadedFile).unwrap();
        assert_eq!(code, None);
        assert_eq!(vfs.read_text(SlotName::Embedding).unwrap(), "0 1\n1 2\n");
    }

    #[test]
    fn test_void_op_without_staged_input_draws_nothing() {
        let vfs = Arc::new(MemoryFs::new());
        let mut engine = build(&engine_wat(1), &BridgeConfig::default(), vfs.clone());

        engine.invoke(EngineOp::EmbedLoadedFile).unwrap();
        assert!(!vfs.contains(SlotName::Embedding));
    }

    #[test]
    fn test_self_test_draws_both_colors() {
        let vfs = Arc::new(MemoryFs::new());
        let mut engine = build(&engine_wat(0), &BridgeConfig::default(), vfs.clone());

        engine.invoke(EngineOp::SefeMainTest).unwrap();
        assert!(vfs.contains(SlotName::RedEmbedding));
        assert!(vfs.contains(SlotName::BlueEmbedding));
    }

    #[test]
    fn test_path_outside_slot_set_is_refused() {
        let wat = r#"(module
  (import "env" "vfs_write" (func $write (param i32 i32 i32 i32) (result i32)))
  (memory (export "memory") 1)
  (data (i32.const 0) "/etc/passwd")
  (data (i32.const 32) "pwned")
  (func (export "sefeLoadedFiles") (result i32)
    (call $write (i32.const 0) (i32.const 11) (i32.const 32) (i32.const 5))))"#;
        let vfs = Arc::new(MemoryFs::new());
        let bytes = wat::parse_str(wat).unwrap();
        let mut engine =
            WasmEngine::from_bytes(&BridgeConfig::default(), &bytes, vfs.clone()).unwrap();

        // The guest surfaces the host's refusal as its status code.
        let code = engine.invoke(EngineOp::SefeLoadedFiles).unwrap();
        assert_eq!(code, Some(-1));
    }

    #[test]
    fn test_missing_export_is_a_fault() {
        let wat = r#"(module (memory (export "memory") 1))"#;
        let vfs = Arc::new(MemoryFs::new());
        let bytes = wat::parse_str(wat).unwrap();
        let mut engine =
            WasmEngine::from_bytes(&BridgeConfig::default(), &bytes, vfs).unwrap();

        let err = engine.invoke(EngineOp::EmbedLoadedFile).unwrap_err();
        assert!(err.to_string().contains("missing export"));
    }

    #[test]
    fn test_fuel_exhaustion_is_a_fault() {
        let wat = r#"(module
  (memory (export "memory") 1)
  (func (export "embedLoadedFile")
    (local $i i32)
    (loop $loop
      (local.set $i (i32.add (local.get $i) (i32.const 1)))
      (br_if $loop (i32.lt_s (local.get $i) (i32.const 100000000))))))"#;
        let config = BridgeConfig {
            max_fuel: 10_000,
            ..BridgeConfig::default()
        };
        let vfs = Arc::new(MemoryFs::new());
        let bytes = wat::parse_str(wat).unwrap();
        let mut engine = WasmEngine::from_bytes(&config, &bytes, vfs).unwrap();

        let err = engine.invoke(EngineOp::EmbedLoadedFile).unwrap_err();
        assert!(err.to_string().contains("fuel"));
    }

    #[test]
    fn test_invalid_bytes_are_rejected() {
        let vfs = Arc::new(MemoryFs::new());
        let result = WasmEngine::from_bytes(&BridgeConfig::default(), b"AAAA", vfs);
        assert!(matches!(result, Err(BridgeError::InvalidModule(_))));
    }

    #[test]
    fn test_oversized_module_is_rejected() {
        let config = BridgeConfig {
            max_module_size: 8,
            ..BridgeConfig::default()
        };
        let vfs = Arc::new(MemoryFs::new());
        let bytes = wat::parse_str(r#"(module (memory 1))"#).unwrap();
        let result = WasmEngine::from_bytes(&config, &bytes, vfs);
        assert!(matches!(result, Err(BridgeError::ModuleTooLarge { .. })));
    }
}
