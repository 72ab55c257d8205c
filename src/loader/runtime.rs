//! WASM module runtime — compiles the render component and exposes it as a
//! `RenderCapability`.
//!
//! Uses wasmtime's component model. The render module is a component that
//! exports `render: func(text: string) -> string`; the host writes the
//! returned frame to the preview surface, so to callers the capability is
//! `render(text)` with a visible side effect. The component is compiled
//! once (expensive) and instantiated per call (cheap).

use std::path::Path;

use wasmtime::component::{Component, Linker, ResourceTable, Val};
use wasmtime::{Engine, Store};
use wasmtime_wasi::{WasiCtx, WasiCtxBuilder, WasiCtxView, WasiView};

use super::error::LoadError;
use crate::capability::{RenderCapability, RenderError};
use crate::surface::PreviewSurface;

/// Store data for render calls — implements WasiView.
struct HostState {
    ctx: WasiCtx,
    table: ResourceTable,
}

impl WasiView for HostState {
    fn ctx(&mut self) -> WasiCtxView<'_> {
        WasiCtxView {
            ctx: &mut self.ctx,
            table: &mut self.table,
        }
    }
}

impl HostState {
    /// Minimal state: the render module gets no filesystem, network, or env.
    fn minimal() -> Self {
        Self {
            ctx: WasiCtxBuilder::new().build(),
            table: ResourceTable::new(),
        }
    }
}

fn store_and_linker(engine: &Engine) -> Result<(Store<HostState>, Linker<HostState>), String> {
    let store = Store::new(engine, HostState::minimal());
    let mut linker = Linker::new(engine);
    wasmtime_wasi::p2::add_to_linker_sync(&mut linker)
        .map_err(|e| format!("WASI link failed: {e}"))?;
    Ok((store, linker))
}

/// The module runtime — owns the wasmtime engine.
pub struct ModuleRuntime {
    engine: Engine,
}

impl ModuleRuntime {
    /// Create a runtime with the component model enabled.
    pub fn new() -> Result<Self, LoadError> {
        let mut config = wasmtime::Config::new();
        config.wasm_component_model(true);
        let engine =
            Engine::new(&config).map_err(|e| LoadError::EngineCreation(e.to_string()))?;
        Ok(Self { engine })
    }

    /// Load the render module from a filesystem path.
    ///
    /// Compiles the component and instantiates it once to verify the
    /// `render` export exists, so a bad module fails at load time rather
    /// than on the first keystroke.
    pub fn load_module(
        &self,
        path: &Path,
        surface: PreviewSurface,
    ) -> Result<WasmRenderer, LoadError> {
        let component = Component::from_file(&self.engine, path)
            .map_err(|e| LoadError::Compilation(format!("{}: {e}", path.display())))?;
        self.verify_render_export(&component)?;
        Ok(WasmRenderer {
            engine: self.engine.clone(),
            component,
            surface,
        })
    }

    /// Load the render module from raw bytes.
    pub fn load_module_bytes(
        &self,
        bytes: &[u8],
        surface: PreviewSurface,
    ) -> Result<WasmRenderer, LoadError> {
        let component = Component::new(&self.engine, bytes)
            .map_err(|e| LoadError::Compilation(e.to_string()))?;
        self.verify_render_export(&component)?;
        Ok(WasmRenderer {
            engine: self.engine.clone(),
            component,
            surface,
        })
    }

    fn verify_render_export(&self, component: &Component) -> Result<(), LoadError> {
        let (mut store, linker) = store_and_linker(&self.engine).map_err(LoadError::Instantiation)?;
        let instance = linker
            .instantiate(&mut store, component)
            .map_err(|e| LoadError::Instantiation(e.to_string()))?;
        instance
            .get_func(&mut store, "render")
            .map(|_| ())
            .ok_or(LoadError::MissingExport)
    }
}

/// A loaded render module. Calls go through a fresh Store each time, so a
/// trapped call leaves no wedged instance behind.
pub struct WasmRenderer {
    engine: Engine,
    component: Component,
    surface: PreviewSurface,
}

impl std::fmt::Debug for WasmRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WasmRenderer").finish_non_exhaustive()
    }
}

impl RenderCapability for WasmRenderer {
    fn render(&self, text: &str) -> Result<(), RenderError> {
        let (mut store, linker) =
            store_and_linker(&self.engine).map_err(RenderError::Instantiation)?;
        let instance = linker
            .instantiate(&mut store, &self.component)
            .map_err(|e| RenderError::Instantiation(e.to_string()))?;
        let render = instance
            .get_func(&mut store, "render")
            .ok_or_else(|| RenderError::Call("export 'render' not found".into()))?;

        let mut results = vec![Val::Bool(false)]; // 1 string result
        render
            .call(&mut store, &[Val::String(text.into())], &mut results)
            .map_err(|e| RenderError::Call(e.to_string()))?;

        match &results[0] {
            Val::String(frame) => {
                self.surface.present(frame);
                Ok(())
            }
            other => Err(RenderError::BadOutput(format!(
                "expected string from render, got: {other:?}"
            ))),
        }
    }
}
