#[cfg(target_arch = "wasm32")]
fn main() {
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(err) = native::run() {
        eprintln!("mesh_cli error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use gradient_mesh_engine::color::parse_color;
    use gradient_mesh_engine::geom::{
        ControlLattice, GradientMesh, Vec2, tessellate, uniform_lattice,
    };
    use std::fmt::Write as _;
    use std::fs::{self, File};
    use std::io::{BufWriter, Write};
    use std::path::{Path, PathBuf};

    const SNAPSHOT_QUANTIZE: f64 = 1e-6;
    const SNAPSHOT_DECIMALS: usize = 6;

    const USAGE: &str = r#"mesh_cli (gradient-mesh-engine)

USAGE:
  mesh_cli list
  mesh_cli run <scenario|all> [options]

SCENARIOS:
  flat_red_quad
  displaced_center
  tangent_swirl

OPTIONS (run):
  --out-dir <dir>    Write <scenario>.obj and/or <scenario>.snap to this dir (required for `all`)
  --obj <path>       Write OBJ (single scenario only)
  --snap <path>      Write golden-style snapshot (single scenario only)
  --no-obj           Skip OBJ when using --out-dir
  --no-snap          Skip snapshot when using --out-dir
  --overwrite        Overwrite existing output files
  -h, --help         Show this help
"#;

    pub fn run() -> Result<(), String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut args = Args::new(args);

        let Some(command) = args.next() else {
            print_usage();
            return Ok(());
        };

        match command.as_str() {
            "list" => {
                print_scenarios();
                Ok(())
            }
            "run" => cmd_run(&mut args),
            "-h" | "--help" | "help" => {
                print_usage();
                Ok(())
            }
            other => Err(format!("unknown command `{other}`\n\n{USAGE}")),
        }
    }

    fn print_usage() {
        println!("{USAGE}");
    }

    fn print_scenarios() {
        for scenario in Scenario::ALL {
            println!("{}", scenario.name());
        }
    }

    fn cmd_run(args: &mut Args) -> Result<(), String> {
        let scenario_name = args.next().ok_or("missing scenario name")?;

        let mut out_dir: Option<PathBuf> = None;
        let mut obj_path: Option<PathBuf> = None;
        let mut snap_path: Option<PathBuf> = None;
        let mut overwrite = false;
        let mut write_obj = true;
        let mut write_snap = true;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--out-dir" => out_dir = Some(PathBuf::from(args.value("--out-dir")?)),
                "--obj" => obj_path = Some(PathBuf::from(args.value("--obj")?)),
                "--snap" => snap_path = Some(PathBuf::from(args.value("--snap")?)),
                "--overwrite" => overwrite = true,
                "--no-obj" => write_obj = false,
                "--no-snap" => write_snap = false,
                "-h" | "--help" => {
                    print_usage();
                    return Ok(());
                }
                other => return Err(format!("unknown option `{other}`\n\n{USAGE}")),
            }
        }

        if let Some(dir) = out_dir.as_ref() {
            if obj_path.is_some() || snap_path.is_some() {
                return Err("use either --out-dir or --obj/--snap (not both)".to_string());
            }
            if !write_obj && !write_snap {
                return Err("nothing to write (both --no-obj and --no-snap set)".to_string());
            }

            fs::create_dir_all(dir).map_err(|e| format!("create out dir: {e}"))?;

            if scenario_name == "all" {
                for scenario in Scenario::ALL {
                    run_one_scenario_to_dir(*scenario, dir, write_obj, write_snap, overwrite)?;
                }
                return Ok(());
            }

            let scenario = Scenario::from_str(scenario_name.as_str())
                .ok_or_else(|| unknown_scenario(&scenario_name))?;
            return run_one_scenario_to_dir(scenario, dir, write_obj, write_snap, overwrite);
        }

        if scenario_name == "all" {
            return Err("`run all` requires --out-dir".to_string());
        }

        let scenario = Scenario::from_str(scenario_name.as_str())
            .ok_or_else(|| unknown_scenario(&scenario_name))?;
        let output = run_scenario(scenario)?;

        if let Some(path) = snap_path.as_deref() {
            write_text_file(path, &output.snapshot, overwrite)?;
            eprintln!("wrote {}", path.display());
        } else {
            print!("{}", output.snapshot);
        }

        if let Some(path) = obj_path.as_deref() {
            write_obj_file(path, &output.mesh, output.name, overwrite)?;
            eprintln!("wrote {}", path.display());
        }

        eprintln!(
            "{}: vertices={} triangles={}",
            output.name,
            output.mesh.vertex_count(),
            output.mesh.triangle_count()
        );

        Ok(())
    }

    fn run_one_scenario_to_dir(
        scenario: Scenario,
        dir: &Path,
        write_obj: bool,
        write_snap: bool,
        overwrite: bool,
    ) -> Result<(), String> {
        let output = run_scenario(scenario)?;

        if write_snap {
            let path = dir.join(format!("{}.snap", output.name));
            write_text_file(&path, &output.snapshot, overwrite)?;
            eprintln!("wrote {}", path.display());
        }

        if write_obj {
            let path = dir.join(format!("{}.obj", output.name));
            write_obj_file(&path, &output.mesh, output.name, overwrite)?;
            eprintln!("wrote {}", path.display());
        }

        eprintln!(
            "{}: vertices={} triangles={}",
            output.name,
            output.mesh.vertex_count(),
            output.mesh.triangle_count()
        );

        Ok(())
    }

    fn unknown_scenario(name: &str) -> String {
        let mut msg = String::new();
        msg.push_str(&format!("unknown scenario `{name}`\n\navailable scenarios:\n"));
        for scenario in Scenario::ALL {
            msg.push_str(&format!("  {}\n", scenario.name()));
        }
        msg
    }

    fn write_text_file(path: &Path, text: &str, overwrite: bool) -> Result<(), String> {
        if path.exists() && !overwrite {
            return Err(format!(
                "refusing to overwrite existing file {} (use --overwrite)",
                path.display()
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("create dir {}: {e}", parent.display()))?;
        }
        fs::write(path, normalize_snapshot_text(text))
            .map_err(|e| format!("write {}: {e}", path.display()))
    }

    fn write_obj_file(
        path: &Path,
        mesh: &GradientMesh,
        name: &str,
        overwrite: bool,
    ) -> Result<(), String> {
        mesh.validate()
            .map_err(|e| format!("mesh validation failed: {e}"))?;

        if path.exists() && !overwrite {
            return Err(format!(
                "refusing to overwrite existing file {} (use --overwrite)",
                path.display()
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("create dir {}: {e}", parent.display()))?;
        }

        let file = File::create(path).map_err(|e| format!("create {}: {e}", path.display()))?;
        let mut w = BufWriter::new(file);

        writeln!(w, "# gradient-mesh-engine mesh_cli").map_err(|e| format!("write obj: {e}"))?;
        writeln!(w, "o {name}").map_err(|e| format!("write obj: {e}"))?;

        // Vertex-color OBJ extension: `v x y z r g b`. The mesh is a
        // non-indexed soup, so faces just run over consecutive triples.
        let has_colors = !mesh.colors.is_empty();
        for (idx, p) in mesh.positions.iter().copied().enumerate() {
            if has_colors {
                let c = mesh.colors[idx];
                writeln!(w, "v {} {} {} {} {} {}", p[0], p[1], p[2], c[0], c[1], c[2])
            } else {
                writeln!(w, "v {} {} {}", p[0], p[1], p[2])
            }
            .map_err(|e| format!("write obj: {e}"))?;
        }

        for tri in 0..mesh.triangle_count() {
            let a = tri * 3 + 1;
            writeln!(w, "f {} {} {}", a, a + 1, a + 2).map_err(|e| format!("write obj: {e}"))?;
        }

        w.flush().map_err(|e| format!("flush {}: {e}", path.display()))
    }

    fn normalize_snapshot_text(text: &str) -> String {
        let normalized = text.replace("\r\n", "\n");
        if normalized.ends_with('\n') {
            normalized
        } else {
            format!("{normalized}\n")
        }
    }

    fn quantize_f64(value: f64) -> f64 {
        if !value.is_finite() {
            return value;
        }
        let value = if value == -0.0 { 0.0 } else { value };
        let q = (value / SNAPSHOT_QUANTIZE).round() * SNAPSHOT_QUANTIZE;
        if q == -0.0 { 0.0 } else { q }
    }

    fn write_f64(out: &mut String, value: f64) {
        let value = quantize_f64(value);
        let _ = write!(out, "{value:.SNAPSHOT_DECIMALS$}");
    }

    fn write_vec3_line(out: &mut String, prefix: &str, v: [f64; 3]) {
        let _ = write!(out, "{prefix} ");
        write_f64(out, v[0]);
        out.push(' ');
        write_f64(out, v[1]);
        out.push(' ');
        write_f64(out, v[2]);
        out.push('\n');
    }

    fn write_mesh(out: &mut String, mesh: &GradientMesh) {
        mesh.validate().expect("mesh should be internally consistent");

        let _ = writeln!(out, "mesh.vertex_count {}", mesh.vertex_count());
        let _ = writeln!(out, "mesh.triangle_count {}", mesh.triangle_count());
        let _ = writeln!(out, "mesh.has_colors {}", !mesh.colors.is_empty());

        let _ = writeln!(out, "mesh.positions {}", mesh.positions.len());
        for p in mesh.positions.iter().copied() {
            write_vec3_line(out, "p", p);
        }

        let _ = writeln!(out, "mesh.colors {}", mesh.colors.len());
        for c in mesh.colors.iter().copied() {
            write_vec3_line(out, "c", c);
        }
    }

    fn snapshot(op: &str, sections: impl FnOnce(&mut String)) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# gradient-mesh-engine golden v1");
        let _ = writeln!(out, "op {op}");
        let _ = writeln!(out, "quantize {SNAPSHOT_QUANTIZE:.1e}");
        sections(&mut out);
        normalize_snapshot_text(&out)
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Scenario {
        FlatRedQuad,
        DisplacedCenter,
        TangentSwirl,
    }

    impl Scenario {
        const ALL: &'static [Scenario] = &[
            Scenario::FlatRedQuad,
            Scenario::DisplacedCenter,
            Scenario::TangentSwirl,
        ];

        fn name(self) -> &'static str {
            match self {
                Scenario::FlatRedQuad => "flat_red_quad",
                Scenario::DisplacedCenter => "displaced_center",
                Scenario::TangentSwirl => "tangent_swirl",
            }
        }

        fn from_str(name: &str) -> Option<Self> {
            match name {
                "flat_red_quad" => Some(Scenario::FlatRedQuad),
                "displaced_center" => Some(Scenario::DisplacedCenter),
                "tangent_swirl" => Some(Scenario::TangentSwirl),
                _ => None,
            }
        }
    }

    struct ScenarioOutput {
        name: &'static str,
        mesh: GradientMesh,
        snapshot: String,
    }

    fn run_scenario(scenario: Scenario) -> Result<ScenarioOutput, String> {
        match scenario {
            Scenario::FlatRedQuad => scenario_flat_red_quad(),
            Scenario::DisplacedCenter => scenario_displaced_center(),
            Scenario::TangentSwirl => scenario_tangent_swirl(),
        }
    }

    fn write_lattice(out: &mut String, lattice: &ControlLattice, subdivisions: usize) {
        let _ = writeln!(out, "lattice.width {}", lattice.width());
        let _ = writeln!(out, "lattice.height {}", lattice.height());
        let _ = writeln!(out, "lattice.subdivisions {subdivisions}");
    }

    fn scenario_flat_red_quad() -> Result<ScenarioOutput, String> {
        let mut lattice = uniform_lattice(2, 2);
        let red = parse_color("#ff0000").map_err(|e| e.to_string())?;
        for x in 0..2 {
            for y in 0..2 {
                lattice.get_mut(x, y).color = red;
            }
        }

        let subdivisions = 4;
        let mesh = tessellate(&lattice, subdivisions).map_err(|e| e.to_string())?;

        let snap = snapshot("flat_red_quad", |out| {
            write_lattice(out, &lattice, subdivisions);
            write_mesh(out, &mesh);
        });

        Ok(ScenarioOutput {
            name: "flat_red_quad",
            mesh,
            snapshot: snap,
        })
    }

    fn scenario_displaced_center() -> Result<ScenarioOutput, String> {
        let mut lattice = uniform_lattice(3, 3);
        let palette = [
            "#e63946", "#f1faee", "#a8dadc", "#457b9d", "#1d3557", "#ffb703", "#fb8500",
            "#8ecae6", "#219ebc",
        ];
        for x in 0..3 {
            for y in 0..3 {
                lattice.get_mut(x, y).color =
                    parse_color(palette[x * 3 + y]).map_err(|e| e.to_string())?;
            }
        }
        lattice.get_mut(1, 1).location = Vec2::new(0.35, -0.2);

        let subdivisions = 6;
        let mesh = tessellate(&lattice, subdivisions).map_err(|e| e.to_string())?;

        let snap = snapshot("displaced_center", |out| {
            write_lattice(out, &lattice, subdivisions);
            write_mesh(out, &mesh);
        });

        Ok(ScenarioOutput {
            name: "displaced_center",
            mesh,
            snapshot: snap,
        })
    }

    fn scenario_tangent_swirl() -> Result<ScenarioOutput, String> {
        let mut lattice = uniform_lattice(3, 3);
        for x in 0..3 {
            for y in 0..3 {
                let node = lattice.get_mut(x, y);
                let angle = (x * 3 + y) as f64 * std::f64::consts::FRAC_PI_4;
                node.u_tangent = Vec2::new(0.6 * angle.cos(), 0.6 * angle.sin());
                node.v_tangent = Vec2::new(-0.6 * angle.sin(), 0.6 * angle.cos());
                node.color = [x as f64 / 2.0, y as f64 / 2.0, 0.8];
            }
        }

        let subdivisions = 5;
        let mesh = tessellate(&lattice, subdivisions).map_err(|e| e.to_string())?;

        let snap = snapshot("tangent_swirl", |out| {
            write_lattice(out, &lattice, subdivisions);
            write_mesh(out, &mesh);
        });

        Ok(ScenarioOutput {
            name: "tangent_swirl",
            mesh,
            snapshot: snap,
        })
    }

    struct Args {
        args: Vec<String>,
        pos: usize,
    }

    impl Args {
        fn new(args: Vec<String>) -> Self {
            Self { args, pos: 0 }
        }

        fn next(&mut self) -> Option<String> {
            let arg = self.args.get(self.pos)?.clone();
            self.pos += 1;
            Some(arg)
        }

        fn value(&mut self, flag: &str) -> Result<String, String> {
            self.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        }
    }
}
