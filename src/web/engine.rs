// Bindings to the simulation engine, a separately loaded wasm module the page
// exposes as `window.snakeEngine` (its `World` class plus its `memory` export).
use js_sys::{Reflect, Uint8Array, WebAssembly};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::engine::Engine;
use crate::error::{MemoryError, SnakeError};
use crate::memory::{LinearMemory, WordView, check_range};
use crate::model::{Direction, GameStatus};

const NAMESPACE: &str = "snakeEngine";

#[wasm_bindgen(js_namespace = snakeEngine)]
extern "C" {
    #[wasm_bindgen(js_name = World)]
    type World;

    #[wasm_bindgen(static_method_of = World, js_name = new, catch)]
    fn create(width: u32, spawn_index: u32) -> Result<World, JsValue>;

    #[wasm_bindgen(method)]
    fn start_game(this: &World);

    #[wasm_bindgen(method)]
    fn step(this: &World);

    #[wasm_bindgen(method)]
    fn game_status(this: &World) -> Option<u32>;

    #[wasm_bindgen(method)]
    fn game_status_text(this: &World) -> String;

    #[wasm_bindgen(method)]
    fn points(this: &World) -> u32;

    #[wasm_bindgen(method)]
    fn reward_cell(this: &World) -> Option<u32>;

    #[wasm_bindgen(method)]
    fn snake_length(this: &World) -> u32;

    #[wasm_bindgen(method)]
    fn snake_cells(this: &World) -> u32;

    #[wasm_bindgen(method)]
    fn set_snake_direction(this: &World, direction: &str);
}

/// The engine's `WebAssembly.Memory`. Its `ArrayBuffer` is detached whenever
/// the memory grows, so the buffer is looked up again on every read.
pub struct WasmMemory {
    memory: WebAssembly::Memory,
}

impl WasmMemory {
    fn lookup() -> Result<Self, SnakeError> {
        let ns = Reflect::get(&js_sys::global(), &JsValue::from_str(NAMESPACE))?;
        if ns.is_undefined() {
            return Err(SnakeError::Host(format!("`{NAMESPACE}` is not loaded")));
        }
        let memory = Reflect::get(&ns, &JsValue::from_str("memory"))?
            .dyn_into::<WebAssembly::Memory>()
            .map_err(|_| SnakeError::Host(format!("`{NAMESPACE}.memory` is not a WebAssembly.Memory")))?;
        Ok(Self { memory })
    }

    fn buffer(&self) -> js_sys::ArrayBuffer {
        self.memory.buffer().unchecked_into()
    }
}

impl LinearMemory for WasmMemory {
    fn byte_len(&self) -> u64 {
        self.buffer().byte_length() as u64
    }

    fn words(&self, byte_offset: u32, count: u32) -> Result<WordView<'_>, MemoryError> {
        let buffer = self.buffer();
        check_range(byte_offset, count, buffer.byte_length() as u64)?;
        // Separate module, separate memory: the bytes have to be copied over.
        let view = Uint8Array::new_with_byte_offset_and_length(&buffer, byte_offset, count * 4);
        Ok(WordView::owned(view.to_vec()))
    }
}

pub struct WasmEngine {
    world: World,
    memory: WasmMemory,
}

impl WasmEngine {
    pub fn create(width_cells: u32, spawn_index: u32) -> Result<Self, SnakeError> {
        let memory = WasmMemory::lookup()?;
        let world = World::create(width_cells, spawn_index)?;
        log::info!("engine created: {width_cells}x{width_cells}, spawn at {spawn_index}");
        Ok(Self { world, memory })
    }
}

impl Engine for WasmEngine {
    type Memory = WasmMemory;

    fn start(&mut self) {
        self.world.start_game();
    }

    fn advance(&mut self) {
        self.world.step();
    }

    fn set_direction(&mut self, direction: Direction) {
        self.world.set_snake_direction(direction.key());
    }

    fn status(&self) -> Result<GameStatus, SnakeError> {
        GameStatus::from_engine(self.world.game_status())
    }

    fn status_text(&self) -> String {
        self.world.game_status_text()
    }

    fn score(&self) -> u32 {
        self.world.points()
    }

    fn reward_cell(&self) -> Option<u32> {
        self.world.reward_cell()
    }

    fn snake_len(&self) -> u32 {
        self.world.snake_length()
    }

    fn snake_offset(&self) -> u32 {
        self.world.snake_cells()
    }

    fn memory(&self) -> &WasmMemory {
        &self.memory
    }
}
