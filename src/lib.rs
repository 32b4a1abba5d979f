#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod color;
pub mod geom;
pub mod input;

use geom::{ControlLattice, GradientMesh, Vec2, tessellate, uniform_lattice};
use input::{HandleEvent, apply_handle_events, handle_fraction};
use serde::Serialize;
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    log::set_logger(&DEFAULT_LOGGER).expect("error initializing logger");
    log::set_max_level(LevelFilter::Debug);
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
#[wasm_bindgen]
pub async fn initialize_parallel(worker_count: Option<u32>) -> Result<(), JsError> {
    let threads = worker_count
        .map(|count| count.max(1) as usize)
        .or_else(|| {
            std::thread::available_parallelism()
                .map(|value| value.get())
                .ok()
        })
        .unwrap_or(1);

    wasm_bindgen_rayon::init_thread_pool(threads)
        .await
        .map_err(|err| JsError::new(&format!("kon rayon threadpool niet initialiseren: {err}")))
}

#[macro_export]
macro_rules! debug_log {
    ($($t:tt)*) => {{
        #[cfg(feature = "debug_logs")]
        {
            #[cfg(target_arch = "wasm32")]
            {
                ::web_sys::console::log_1(&::wasm_bindgen::JsValue::from_str(&format!($($t)*)));
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                println!("{}", format!($($t)*));
            }
        }
    }};
}

/// Per-frame metadata die samen met de vertexbuffers naar de renderer gaat.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
struct FrameInfo {
    vertex_count: usize,
    triangle_count: usize,
    wireframe: bool,
}

/// Public entry point for consumers.
#[wasm_bindgen]
pub struct Engine {
    lattice: ControlLattice,
    subdivisions: usize,
    wireframe: bool,
    mesh: Option<GradientMesh>,
    mesh_dirty: bool,
}

#[wasm_bindgen]
impl Engine {
    /// Maak een engine met een gelijkmatig gezaaid `width` × `height`
    /// rooster over [-1,1]² en het opgegeven aantal onderverdelingen.
    #[wasm_bindgen(constructor)]
    pub fn new(width: usize, height: usize, subdivisions: usize) -> Result<Engine, JsValue> {
        if subdivisions < 2 {
            return Err(js_error(&format!(
                "onderverdeling moet minimaal 2 zijn, kreeg {subdivisions}"
            )));
        }

        Ok(Engine {
            lattice: uniform_lattice(width, height),
            subdivisions,
            wireframe: false,
            mesh: None,
            mesh_dirty: true,
        })
    }

    #[wasm_bindgen]
    pub fn lattice_width(&self) -> usize {
        self.lattice.width()
    }

    #[wasm_bindgen]
    pub fn lattice_height(&self) -> usize {
        self.lattice.height()
    }

    #[wasm_bindgen]
    pub fn subdivisions(&self) -> usize {
        self.subdivisions
    }

    /// Stel het aantal onderverdelingen per patch in.
    #[wasm_bindgen]
    pub fn set_subdivisions(&mut self, subdivisions: usize) -> Result<(), JsValue> {
        if subdivisions < 2 {
            return Err(js_error(&format!(
                "onderverdeling moet minimaal 2 zijn, kreeg {subdivisions}"
            )));
        }
        if subdivisions != self.subdivisions {
            self.subdivisions = subdivisions;
            self.mesh_dirty = true;
        }
        Ok(())
    }

    /// Verwerk één handle-positie (genormaliseerd, [0,1]²) voor één
    /// roosterknooppunt.
    #[wasm_bindgen]
    pub fn move_handle(
        &mut self,
        node_x: usize,
        node_y: usize,
        x: f64,
        y: f64,
    ) -> Result<(), JsValue> {
        apply_handle_events(&mut self.lattice, [HandleEvent::new(node_x, node_y, x, y)])
            .map_err(|err| js_error(&err.to_string()))?;
        self.mesh_dirty = true;
        Ok(())
    }

    /// Stel de tangentvectoren van een knooppunt in.
    #[wasm_bindgen]
    pub fn set_node_tangents(
        &mut self,
        node_x: usize,
        node_y: usize,
        u_x: f64,
        u_y: f64,
        v_x: f64,
        v_y: f64,
    ) -> Result<(), JsValue> {
        self.check_node(node_x, node_y)?;
        if ![u_x, u_y, v_x, v_y].iter().all(|value| value.is_finite()) {
            return Err(js_error("tangentwaarden moeten eindige getallen zijn"));
        }

        let node = self.lattice.get_mut(node_x, node_y);
        node.u_tangent = Vec2::new(u_x, u_y);
        node.v_tangent = Vec2::new(v_x, v_y);
        self.mesh_dirty = true;
        Ok(())
    }

    /// Stel de kleur van een knooppunt in vanuit een hex- of kleurnaam.
    #[wasm_bindgen]
    pub fn set_node_color(
        &mut self,
        node_x: usize,
        node_y: usize,
        color: &str,
    ) -> Result<(), JsValue> {
        self.check_node(node_x, node_y)?;
        let linear = color::parse_color(color).map_err(|err| js_error(&err.to_string()))?;

        self.lattice.get_mut(node_x, node_y).color = linear;
        self.mesh_dirty = true;
        Ok(())
    }

    /// Kleur van een knooppunt als `#rrggbb`, voor de handle-swatch.
    #[wasm_bindgen]
    pub fn node_color_hex(&self, node_x: usize, node_y: usize) -> Result<String, JsValue> {
        self.check_node(node_x, node_y)?;
        Ok(color::to_hex(self.lattice.get(node_x, node_y).color))
    }

    /// Handle-fractie `[x, y]` van een knooppunt, voor het herplaatsen van
    /// handles na een reset of resize.
    #[wasm_bindgen]
    pub fn handle_fraction(&self, node_x: usize, node_y: usize) -> Result<Vec<f64>, JsValue> {
        self.check_node(node_x, node_y)?;
        Ok(handle_fraction(self.lattice.get(node_x, node_y)).to_vec())
    }

    #[wasm_bindgen]
    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    /// Zet de wireframe-weergavevlag. De vlag reist mee met `frame_info`;
    /// de kern zelf kijkt er nooit naar.
    #[wasm_bindgen]
    pub fn set_wireframe(&mut self, wireframe: bool) {
        self.wireframe = wireframe;
    }

    /// Hertessellleer het rooster als er sinds de vorige keer iets is
    /// gewijzigd.
    #[wasm_bindgen]
    pub fn evaluate(&mut self) -> Result<(), JsValue> {
        if !self.mesh_dirty && self.mesh.is_some() {
            return Ok(());
        }

        let mesh = tessellate(&self.lattice, self.subdivisions)
            .map_err(|err| js_error(&err.to_string()))?;
        debug_log!(
            "mesh opnieuw opgebouwd: {} driehoeken",
            mesh.triangle_count()
        );

        self.mesh = Some(mesh);
        self.mesh_dirty = false;
        Ok(())
    }

    /// Vertexposities als platte buffer (3 floats per vertex).
    #[wasm_bindgen]
    pub fn position_buffer(&self) -> Result<Vec<f32>, JsValue> {
        let mesh = self.evaluated_mesh()?;
        Ok(mesh.positions_flat().iter().map(|v| *v as f32).collect())
    }

    /// Vertexkleuren als platte buffer (3 floats per vertex).
    #[wasm_bindgen]
    pub fn color_buffer(&self) -> Result<Vec<f32>, JsValue> {
        let mesh = self.evaluated_mesh()?;
        Ok(mesh.colors_flat().iter().map(|v| *v as f32).collect())
    }

    /// Frame-metadata voor de renderer.
    #[wasm_bindgen]
    pub fn frame_info(&self) -> Result<JsValue, JsValue> {
        let mesh = self.evaluated_mesh()?;
        let info = FrameInfo {
            vertex_count: mesh.vertex_count(),
            triangle_count: mesh.triangle_count(),
            wireframe: self.wireframe,
        };
        serde_wasm_bindgen::to_value(&info).map_err(|err| JsError::new(&err.to_string()).into())
    }
}

impl Engine {
    fn check_node(&self, node_x: usize, node_y: usize) -> Result<(), JsValue> {
        if node_x >= self.lattice.width() || node_y >= self.lattice.height() {
            return Err(js_error(&format!(
                "knooppunt ({node_x}, {node_y}) ligt buiten het {}x{} rooster",
                self.lattice.width(),
                self.lattice.height(),
            )));
        }
        Ok(())
    }

    fn evaluated_mesh(&self) -> Result<&GradientMesh, JsValue> {
        match self.mesh.as_ref() {
            Some(mesh) if !self.mesh_dirty => Ok(mesh),
            _ => Err(js_error("mesh is nog niet geëvalueerd")),
        }
    }

    /// Directe toegang tot het rooster voor native afnemers (tests, CLI).
    #[must_use]
    pub fn lattice(&self) -> &ControlLattice {
        &self.lattice
    }

    /// Muteerbare toegang tot het rooster voor native afnemers.
    pub fn lattice_mut(&mut self) -> &mut ControlLattice {
        self.mesh_dirty = true;
        &mut self.lattice
    }
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        JsValue::NULL
    }
}
