//! relief: convert grayscale heightmaps into error-bounded triangle meshes

mod args;

use std::io::Write as _;
use std::time::Instant;

use anyhow::{bail, Context};
use clap::Parser;

use relief_core::add_base;
use relief_io::{read_heightmap, write_hillshade, write_mesh, write_normal_map};
use relief_triangulation::Triangulator;

use args::Args;

/// Prints `message... ` when constructed and the elapsed time when
/// finished, unless quiet.
struct StepTimer {
    start: Instant,
    quiet: bool,
}

impl StepTimer {
    fn start(quiet: bool, message: &str) -> Self {
        if !quiet {
            print!("{message}... ");
            std::io::stdout().flush().ok();
        }
        Self {
            start: Instant::now(),
            quiet,
        }
    }

    fn finish(self) {
        if !self.quiet {
            println!("{:.3}s", self.start.elapsed().as_secs_f64());
        }
    }
}

fn main() -> anyhow::Result<()> {
    let total = Instant::now();
    env_logger::init();
    let args = Args::parse();

    if args.outfile.is_none() && args.normal_map.is_none() && args.shade_path.is_none() {
        bail!("an output mesh path or --normal-map/--shade-path is required");
    }

    let timer = StepTimer::start(args.quiet, "loading heightmap");
    let mut hm = read_heightmap(&args.infile)
        .with_context(|| format!("failed to load heightmap {:?}", args.infile))?;
    timer.finish();

    if !args.quiet {
        println!(
            "  {} x {} = {} pixels",
            hm.width(),
            hm.height(),
            hm.width() * hm.height()
        );
    }

    if args.level {
        hm.auto_level();
    }
    if args.invert {
        hm.invert();
    }
    if args.blur > 0 {
        let timer = StepTimer::start(args.quiet, "blurring heightmap");
        hm.gaussian_blur(args.blur);
        timer.finish();
    }
    if args.gamma > 0.0 {
        hm.gamma_curve(args.gamma);
    }
    if args.border_size > 0 {
        hm.add_border(args.border_size, args.border_height);
    }

    // filters may have grown the grid
    let width = hm.width();
    let height = hm.height();

    if let Some(outfile) = &args.outfile {
        let timer = StepTimer::start(args.quiet, "triangulating");
        let mut triangulator = Triangulator::new(&hm)?;
        triangulator.run(args.error, args.triangles, args.points);
        let mut mesh = triangulator.mesh();
        let error = triangulator.error();
        timer.finish();

        if args.base > 0.0 {
            let timer = StepTimer::start(args.quiet, "adding solid base");
            add_base(&mut mesh, width, height, -args.base);
            timer.finish();
        }

        if !args.quiet {
            let naive = (width - 1) * (height - 1) * 2;
            println!("  error = {error}");
            println!("  points = {}", mesh.vertex_count());
            println!("  triangles = {}", mesh.face_count());
            println!(
                "  vs. naive = {:.1}%",
                100.0 * mesh.face_count() as f64 / naive as f64
            );
        }

        // map the pixel-indexed mesh onto the requested physical size,
        // then derive UVs from the final positions
        let timer = StepTimer::start(args.quiet, "rescaling mesh");
        mesh.rescale(args.xsize, args.ysize, args.zscale);
        mesh.generate_grid_uvs(args.xsize, args.ysize);
        timer.finish();

        let timer = StepTimer::start(args.quiet, "writing mesh");
        write_mesh(outfile, &mesh)
            .with_context(|| format!("failed to write mesh {outfile:?}"))?;
        timer.finish();
    }

    if let Some(path) = &args.normal_map {
        let timer = StepTimer::start(args.quiet, "computing normal map");
        write_normal_map(path, &hm, args.zscale)?;
        timer.finish();
    }

    if let Some(path) = &args.shade_path {
        let timer = StepTimer::start(args.quiet, "computing hillshade");
        write_hillshade(path, &hm, args.zscale, args.shade_alt, args.shade_az)?;
        timer.finish();
    }

    if !args.quiet {
        println!("{:.3}s total", total.elapsed().as_secs_f64());
    }
    Ok(())
}
